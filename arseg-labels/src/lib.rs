//! Training-data generation on top of `arseg-core`.
//!
//! Collapses edit scripts into per-character BEGIN / CONT / REW labels,
//! rebuilds segmentations from labels, aligns segment-level tags and runs
//! the whole thing over blank-line separated corpora.

pub mod align;
pub mod clitics;
pub mod label;
pub mod pipeline;
pub mod reconstruct;
pub mod tagged;

pub use align::{align_tags, parse_tags, segment_pairs, SegmentPair};
pub use clitics::{head_bounds, mark_clitics};
pub use label::{project_label, project_word, CoarseLabel, LabelScheme};
pub use pipeline::{
    read_sentences, EditRecord, LabeledWord, Pipeline, PipelineConfig, RunStats, Sentence,
    LABEL_SEPARATOR, REWRITE_SEPARATOR, WORD_BOUNDARY,
};
pub use reconstruct::{reconstruct, reconstruct_tagged, rewrite_char};
pub use tagged::{parse_tagged_line, rebuild_line, RebuildOptions};

pub type Result<T> = std::result::Result<T, LabelError>;

#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("unknown label {0:?}")]
    UnknownLabel(String),

    #[error("malformed tagged token {0:?}")]
    MalformedToken(String),

    #[error("{chars} characters but {labels} labels")]
    LengthMismatch { chars: usize, labels: usize },

    #[error("{segments} segments but {tags} tags")]
    TagCountMismatch { segments: usize, tags: usize },
}
