//! Segment-level tag alignment.
//!
//! A labeled word is split into segments twice, once as written and once
//! with rewrites applied, and each kept segment is paired with the next tag
//! from an external tag line.

use arseg_core::normalize::is_all_diacritics;

use crate::label::CoarseLabel;
use crate::pipeline::{LABEL_SEPARATOR, REWRITE_SEPARATOR};
use crate::reconstruct::reconstruct;
use crate::LabelError;

/// One segment, as written and as rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPair {
    pub plain: String,
    pub rewritten: String,
}

fn keep_segment(segment: &str) -> bool {
    !segment.is_empty() && !is_all_diacritics(segment)
}

/// Kept segment pairs of a labeled word. Pairs where either side is empty
/// or diacritics only are dropped.
pub fn segment_pairs(
    raw: &str,
    labels: &[CoarseLabel],
    marker: char,
) -> Result<Vec<SegmentPair>, LabelError> {
    let plain = reconstruct(raw, labels, false, marker)?;
    let rewritten = reconstruct(raw, labels, true, marker)?;
    Ok(plain
        .split(marker)
        .zip(rewritten.split(marker))
        .filter(|(p, r)| keep_segment(p) && keep_segment(r))
        .map(|(p, r)| SegmentPair {
            plain: p.to_string(),
            rewritten: r.to_string(),
        })
        .collect())
}

/// Tags of a whitespace-separated tag line. Tokens of the form
/// `text|||tag` yield `tag`; bare tokens are taken whole.
pub fn parse_tags(line: &str) -> Vec<&str> {
    line.split_whitespace()
        .map(|token| match token.rsplit_once(LABEL_SEPARATOR) {
            Some((_, tag)) => tag,
            None => token,
        })
        .collect()
}

/// Render `plain>>>rewritten|||tag` for each segment, or fail when the tag
/// line does not have one tag per segment.
pub fn align_tags(pairs: &[SegmentPair], tag_line: &str) -> Result<Vec<String>, LabelError> {
    let tags = parse_tags(tag_line);
    if tags.len() != pairs.len() {
        return Err(LabelError::TagCountMismatch {
            segments: pairs.len(),
            tags: tags.len(),
        });
    }
    Ok(pairs
        .iter()
        .zip(tags)
        .map(|(pair, tag)| {
            format!(
                "{}{REWRITE_SEPARATOR}{}{LABEL_SEPARATOR}{tag}",
                pair.plain, pair.rewritten
            )
        })
        .collect())
}
