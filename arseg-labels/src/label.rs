//! Coarse Labels
//!
//! Projects fine-grained edit tokens onto the three tags a character
//! tagger is trained on.

use std::fmt;
use std::str::FromStr;

use arseg_core::normalize::{ALIF_MAQSURA, HAA, LAAM, TAA, TAA_MARBUTA, YAA};
use arseg_core::EditToken;
use serde::{Deserialize, Serialize};

use crate::LabelError;

/// Per-character training label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoarseLabel {
    /// A segment starts at this character
    Begin,
    /// Inside the current segment, copied unchanged
    Continue,
    /// Inside the current segment, normalized on output (or li + al-)
    Rewrite,
}

impl CoarseLabel {
    pub fn symbol(&self) -> &'static str {
        match self {
            CoarseLabel::Begin => "BEGIN",
            CoarseLabel::Continue => "CONT",
            CoarseLabel::Rewrite => "REW",
        }
    }
}

impl fmt::Display for CoarseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CoarseLabel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BEGIN" => Ok(CoarseLabel::Begin),
            "CONT" | "CONTINUE" => Ok(CoarseLabel::Continue),
            // REWAL / REWTA are older spellings of the rewrite tag
            "REW" | "REWRITE" | "REWAL" | "REWTA" => Ok(CoarseLabel::Rewrite),
            other => Err(LabelError::UnknownLabel(other.to_string())),
        }
    }
}

/// Which single-character swaps count as learnable rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelScheme {
    /// yaa <-> alif maqsura, taa <-> taa marbuta
    Basic,
    /// Basic plus haa <-> taa marbuta
    Full,
}

impl Default for LabelScheme {
    fn default() -> Self {
        LabelScheme::Basic
    }
}

impl LabelScheme {
    pub fn is_reversible_swap(self, from: char, to: char) -> bool {
        let basic = matches!(
            (from, to),
            (YAA, ALIF_MAQSURA) | (ALIF_MAQSURA, YAA) | (TAA, TAA_MARBUTA) | (TAA_MARBUTA, TAA)
        );
        match self {
            LabelScheme::Basic => basic,
            LabelScheme::Full => {
                basic || matches!((from, to), (HAA, TAA_MARBUTA) | (TAA_MARBUTA, HAA))
            }
        }
    }
}

/// Coarse label for one raw character and its edit token.
pub fn project_label(
    raw: char,
    token: &EditToken,
    marker: char,
    scheme: LabelScheme,
) -> CoarseLabel {
    if raw == LAAM && token.inserts_article(marker) {
        return CoarseLabel::Rewrite;
    }
    if token.has_boundary(marker) {
        return CoarseLabel::Begin;
    }
    match token {
        EditToken::Substitute { from, to } if scheme.is_reversible_swap(*from, *to) => {
            CoarseLabel::Rewrite
        }
        _ => CoarseLabel::Continue,
    }
}

/// Labels for a whole word, aligned with its characters.
pub fn project_word(
    raw: &str,
    tokens: &[EditToken],
    marker: char,
    scheme: LabelScheme,
) -> Result<Vec<CoarseLabel>, LabelError> {
    let chars = raw.chars().count();
    if chars != tokens.len() {
        return Err(LabelError::LengthMismatch {
            chars,
            labels: tokens.len(),
        });
    }
    Ok(raw
        .chars()
        .zip(tokens)
        .map(|(ch, token)| project_label(ch, token, marker, scheme))
        .collect())
}
