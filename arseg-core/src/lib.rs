//! Edit-script inference for Arabic segmentation training data.
//!
//! Given a raw word and its gold segmented/normalized form, works out per
//! raw character why the two differ (boundary, deletion, insertion,
//! substitution, gemination, ...) as a sequence of [`EditToken`]s.

pub mod config;
pub mod engine;
pub mod normalize;
pub mod patterns;
pub mod token;

pub use config::{EngineConfig, DEFAULT_SEG_MARKER};
pub use engine::{edits_for_line, first_match, infer_edits, parse_line, RuleKind, Step, RULES};
pub use normalize::{is_common_rewrite, is_diacritic, NormalizationGroup, NORMALIZATION_GROUPS};
pub use patterns::Tails;
pub use token::{EditToken, MarkedToken};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("line has no tab-separated segmented field")]
    MalformedLine,

    #[error("empty raw side")]
    EmptyRaw,

    #[error("unknown edit with {raw:?} left on the raw side and {seg:?} on the segmented side")]
    UnrecognizedEdit { raw: String, seg: String },

    #[error("unconsumed segmented suffix {seg:?}")]
    ResidualMismatch { seg: String },
}
