//! Edit tokens: one per raw character, explaining how it maps onto the
//! segmented form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_SEG_MARKER;
use crate::normalize::{ALIF, HAA};

/// The fine-grained edit applied to a single raw character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditToken {
    /// Copied unchanged, no boundary.
    NoSegBoundary,
    /// Copied unchanged, a segment starts here.
    SegBoundary,
    /// Dropped from the segmented form.
    Deleted,
    /// Letters (possibly with a marker) inserted before the raw character.
    InsertedPrefix(String),
    /// Letters inserted after the raw character, optionally with a segment
    /// starting at the raw character.
    InsertedSuffix { boundary: bool, text: String },
    /// Gemination spelled out as two letters, with or without a marker
    /// between them.
    Duplicated { boundary: bool },
    /// Orthographic substitution where a segment starts.
    SubstituteAtBoundary { from: char, to: char },
    /// Plain orthographic substitution.
    Substitute { from: char, to: char },
    /// Irregular, non-compositional rewrite of the whole word or of a
    /// preposition abbreviation.
    Other,
    /// Silent dialectal haa restored as a pronoun segment after the
    /// character.
    RecoverHaa,
}

impl EditToken {
    /// The part of the segmented word this token produces for `raw`, or
    /// `None` when the token does not carry enough information (`Other`).
    pub fn segment_slice(&self, raw: char, marker: char) -> Option<String> {
        let slice = match self {
            EditToken::NoSegBoundary => raw.to_string(),
            EditToken::SegBoundary => format!("{marker}{raw}"),
            EditToken::Deleted => String::new(),
            EditToken::InsertedPrefix(text) => format!("{text}{raw}"),
            EditToken::InsertedSuffix { boundary, text } => {
                let mut slice = String::new();
                if *boundary {
                    slice.push(marker);
                }
                slice.push(raw);
                slice.push_str(text);
                slice
            }
            EditToken::Duplicated { boundary: true } => format!("{raw}{marker}{raw}"),
            EditToken::Duplicated { boundary: false } => format!("{raw}{raw}"),
            EditToken::SubstituteAtBoundary { to, .. } => format!("{marker}{to}"),
            EditToken::Substitute { to, .. } => to.to_string(),
            EditToken::RecoverHaa => format!("{raw}{marker}{HAA}"),
            EditToken::Other => return None,
        };
        Some(slice)
    }

    /// Whether the token's segmented slice contains a boundary.
    pub fn has_boundary(&self, marker: char) -> bool {
        match self {
            EditToken::SegBoundary
            | EditToken::SubstituteAtBoundary { .. }
            | EditToken::RecoverHaa
            | EditToken::Duplicated { boundary: true } => true,
            EditToken::InsertedPrefix(text) => text.contains(marker),
            EditToken::InsertedSuffix { boundary, text } => *boundary || text.contains(marker),
            EditToken::NoSegBoundary
            | EditToken::Deleted
            | EditToken::Duplicated { boundary: false }
            | EditToken::Substitute { .. }
            | EditToken::Other => false,
        }
    }

    /// A definite-article alif inserted after a boundary (li + al-).
    pub fn inserts_article(&self, marker: char) -> bool {
        match self {
            EditToken::InsertedPrefix(text) => {
                let mut chars = text.chars();
                chars.next() == Some(marker) && chars.next() == Some(ALIF) && chars.next().is_none()
            }
            _ => false,
        }
    }
}

/// Compact format with `:` as the marker; `_` stands for the raw character.
impl fmt::Display for EditToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display_with(DEFAULT_SEG_MARKER), f)
    }
}

impl EditToken {
    /// Same compact format with a caller-chosen marker.
    pub fn display_with(&self, marker: char) -> MarkedToken<'_> {
        MarkedToken {
            token: self,
            marker,
        }
    }
}

/// An [`EditToken`] rendered with a specific boundary marker.
pub struct MarkedToken<'a> {
    token: &'a EditToken,
    marker: char,
}

impl fmt::Display for MarkedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = self.marker;
        match self.token {
            EditToken::NoSegBoundary => f.write_str("<noseg>"),
            EditToken::Deleted => f.write_str("<del>"),
            EditToken::Other => f.write_str("<other>"),
            EditToken::Substitute { from, to } => write!(f, "{from}>{to}"),
            EditToken::SubstituteAtBoundary { from, to } => write!(f, "{marker}{from}>{to}"),
            other => match other.segment_slice('_', marker) {
                Some(slice) => f.write_str(&slice),
                None => f.write_str("<other>"),
            },
        }
    }
}
