//! Corpus Pipeline
//!
//! Reads blank-line separated sentences of `raw<TAB>segmented` records and
//! turns each sentence into one training line. Sentences are independent
//! and processed in parallel; output order follows input order.

use std::fmt;
use std::fs;
use std::io::BufRead;
use std::path::Path;

use arseg_core::{infer_edits, parse_line, EditError, EditToken, EngineConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::align::{align_tags, segment_pairs};
use crate::label::{project_word, CoarseLabel, LabelScheme};
use crate::LabelError;

/// Token separating words in a basic training line.
pub const WORD_BOUNDARY: &str = ".#.";
/// Separator between a character (or segment) and its label.
pub const LABEL_SEPARATOR: &str = "|||";
/// Separator between the plain and rewritten form of a segment.
pub const REWRITE_SEPARATOR: &str = ">>>";

/// Environment variable naming a JSON pipeline config.
pub const CONFIG_ENV: &str = "ARSEG_CONFIG";

/// Pipeline-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub engine: EngineConfig,
    pub scheme: LabelScheme,
}

impl PipelineConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(LabelError::from)
    }

    pub fn to_path(&self, path: impl AsRef<Path>) -> Result<(), LabelError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn from_env_or_default() -> Result<Self, LabelError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_path(path),
            Err(_) => Ok(Self::default()),
        }
    }

    fn marker(&self) -> char {
        self.engine.seg_marker
    }
}

/// Counters for one run. Per-sentence stats are merged after the
/// parallel map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub sentences: usize,
    pub written: usize,
    /// Sentences dropped because a word failed inference
    pub skipped: usize,
    pub tag_mismatches: usize,
    pub malformed_lines: usize,
    pub empty_raw: usize,
    pub unrecognized_edits: usize,
    pub residual_mismatches: usize,
}

impl RunStats {
    pub fn merge(&mut self, other: &RunStats) {
        self.sentences += other.sentences;
        self.written += other.written;
        self.skipped += other.skipped;
        self.tag_mismatches += other.tag_mismatches;
        self.malformed_lines += other.malformed_lines;
        self.empty_raw += other.empty_raw;
        self.unrecognized_edits += other.unrecognized_edits;
        self.residual_mismatches += other.residual_mismatches;
    }

    /// Count an inference failure under its reason.
    pub fn record_failure(&mut self, err: &EditError) {
        match err {
            EditError::MalformedLine => self.malformed_lines += 1,
            EditError::EmptyRaw => self.empty_raw += 1,
            EditError::UnrecognizedEdit { .. } => self.unrecognized_edits += 1,
            EditError::ResidualMismatch { .. } => self.residual_mismatches += 1,
        }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sentences, {} written, {} skipped (empty-raw {}, unknown-edit {}, residual-mismatch {}), {} tag mismatches, {} malformed lines",
            self.sentences,
            self.written,
            self.skipped,
            self.empty_raw,
            self.unrecognized_edits,
            self.residual_mismatches,
            self.tag_mismatches,
            self.malformed_lines,
        )
    }
}

/// Records of one sentence, unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    pub lines: Vec<String>,
}

/// Split a corpus into sentences at blank lines. Runs of blank lines and
/// trailing blanks do not produce empty sentences.
pub fn read_sentences<R: BufRead>(reader: R) -> Result<Vec<Sentence>, LabelError> {
    let mut sentences = Vec::new();
    let mut current = Sentence::default();
    for line in reader.lines() {
        let line = line?;
        // a bare tab is an (empty) record, not a separator
        if line.trim_end_matches('\r').is_empty() {
            if !current.lines.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
        } else {
            current.lines.push(line);
        }
    }
    if !current.lines.is_empty() {
        sentences.push(current);
    }
    Ok(sentences)
}

/// A raw word with its coarse labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledWord {
    pub raw: String,
    pub labels: Vec<CoarseLabel>,
}

/// Inferred edits for one record, as dumped by the `edits` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    pub raw: String,
    pub segmented: String,
    pub edits: Vec<EditToken>,
}

impl EditRecord {
    /// Tab-separated text form: raw, segmented, then the edits rendered
    /// with `marker`.
    pub fn render(&self, marker: char) -> String {
        let edits: Vec<String> = self
            .edits
            .iter()
            .map(|edit| edit.display_with(marker).to_string())
            .collect();
        format!("{}\t{}\t{}", self.raw, self.segmented, edits.join(" "))
    }
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn skip_line(&self, line: &str, err: &EditError) {
        if self.config.engine.verbose {
            warn!("skipping line {line:?}: {err}");
        } else {
            debug!("skipping line {line:?}: {err}");
        }
    }

    /// Label every word of a sentence. `None` when any word fails
    /// inference; the failure is counted in `stats`.
    pub fn label_words(
        &self,
        sentence: &Sentence,
        stats: &mut RunStats,
    ) -> Result<Option<Vec<LabeledWord>>, LabelError> {
        stats.sentences += 1;
        let mut words = Vec::with_capacity(sentence.lines.len());
        for line in &sentence.lines {
            let (raw, seg) = match parse_line(line) {
                Ok(fields) => fields,
                Err(err) => {
                    self.skip_line(line, &err);
                    stats.record_failure(&err);
                    continue;
                }
            };
            let edits = match infer_edits(raw, seg, &self.config.engine) {
                Ok(edits) => edits,
                Err(err) => {
                    stats.skipped += 1;
                    stats.record_failure(&err);
                    return Ok(None);
                }
            };
            let labels = project_word(raw, &edits, self.config.marker(), self.config.scheme)?;
            words.push(LabeledWord {
                raw: raw.to_string(),
                labels,
            });
        }
        Ok(Some(words))
    }

    /// Basic training line for a sentence, or `None` if it was dropped or
    /// has no words.
    pub fn training_line(
        &self,
        sentence: &Sentence,
        stats: &mut RunStats,
    ) -> Result<Option<String>, LabelError> {
        let Some(words) = self.label_words(sentence, stats)? else {
            return Ok(None);
        };
        if words.is_empty() {
            return Ok(None);
        }
        let rendered: Vec<String> = words
            .iter()
            .map(|word| {
                word.raw
                    .chars()
                    .zip(&word.labels)
                    .map(|(ch, label)| format!("{ch}{LABEL_SEPARATOR}{label}"))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        stats.written += 1;
        Ok(Some(rendered.join(&format!(" {WORD_BOUNDARY} "))))
    }

    /// Dual training line pairing each kept segment with a tag, or `None`
    /// if the sentence was dropped.
    pub fn aligned_line(
        &self,
        sentence: &Sentence,
        tag_line: &str,
        stats: &mut RunStats,
    ) -> Result<Option<String>, LabelError> {
        let Some(words) = self.label_words(sentence, stats)? else {
            return Ok(None);
        };
        if words.is_empty() {
            return Ok(None);
        }
        let mut pairs = Vec::new();
        for word in &words {
            pairs.extend(segment_pairs(&word.raw, &word.labels, self.config.marker())?);
        }
        match align_tags(&pairs, tag_line) {
            Ok(tokens) => {
                stats.written += 1;
                Ok(Some(tokens.join(" ")))
            }
            Err(err @ LabelError::TagCountMismatch { .. }) => {
                debug!("dropping sentence: {err}");
                stats.tag_mismatches += 1;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Basic training lines for a corpus, in input order.
    pub fn training_lines(&self, sentences: &[Sentence]) -> Result<(Vec<String>, RunStats), LabelError> {
        let results = sentences
            .par_iter()
            .map(|sentence| {
                let mut stats = RunStats::default();
                let line = self.training_line(sentence, &mut stats)?;
                Ok((line, stats))
            })
            .collect::<Result<Vec<_>, LabelError>>()?;
        Ok(collect_lines(results))
    }

    /// Dual training lines for a corpus. Tag line `i` belongs to sentence
    /// `i`; a missing tag line counts as empty.
    pub fn aligned_lines(
        &self,
        sentences: &[Sentence],
        tag_lines: &[String],
    ) -> Result<(Vec<String>, RunStats), LabelError> {
        if tag_lines.len() != sentences.len() {
            warn!(
                "{} sentences but {} tag lines",
                sentences.len(),
                tag_lines.len()
            );
        }
        let results = sentences
            .par_iter()
            .enumerate()
            .map(|(i, sentence)| {
                let tags = tag_lines.get(i).map(String::as_str).unwrap_or("");
                let mut stats = RunStats::default();
                let line = self.aligned_line(sentence, tags, &mut stats)?;
                Ok((line, stats))
            })
            .collect::<Result<Vec<_>, LabelError>>()?;
        Ok(collect_lines(results))
    }

    /// Edit scripts for individual records. Failed records are counted
    /// under their reason and left out.
    pub fn edit_records(&self, lines: &[String]) -> (Vec<EditRecord>, RunStats) {
        let results: Vec<(Option<EditRecord>, RunStats)> = lines
            .par_iter()
            .filter(|line| !line.trim_end_matches('\r').is_empty())
            .map(|line| {
                let mut stats = RunStats::default();
                let (raw, seg) = match parse_line(line) {
                    Ok(fields) => fields,
                    Err(err) => {
                        self.skip_line(line, &err);
                        stats.record_failure(&err);
                        return (None, stats);
                    }
                };
                match infer_edits(raw, seg, &self.config.engine) {
                    Ok(edits) => {
                        stats.written += 1;
                        let record = EditRecord {
                            raw: raw.to_string(),
                            segmented: seg.to_string(),
                            edits,
                        };
                        (Some(record), stats)
                    }
                    Err(err) => {
                        stats.skipped += 1;
                        stats.record_failure(&err);
                        (None, stats)
                    }
                }
            })
            .collect();

        let mut total = RunStats::default();
        let mut records = Vec::with_capacity(results.len());
        for (record, stats) in results {
            total.merge(&stats);
            records.extend(record);
        }
        (records, total)
    }
}

fn collect_lines(results: Vec<(Option<String>, RunStats)>) -> (Vec<String>, RunStats) {
    let mut total = RunStats::default();
    let mut lines = Vec::with_capacity(results.len());
    for (line, stats) in results {
        total.merge(&stats);
        lines.extend(line);
    }
    (lines, total)
}
