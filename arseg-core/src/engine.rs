//! Edit-Script Inference
//!
//! Walks a raw word and its gold segmentation from the right, one raw
//! character per step. At each step the rules below are tried in order and
//! the first one that matches commits: it emits the raw character's
//! [`EditToken`] and says how much of the segmented tail it accounts for.
//! The order matters on ambiguous dialectal inputs and must not change.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::normalize::{ALIF, AIN};
use crate::patterns::{self, Tails};
use crate::token::EditToken;
use crate::EditError;

/// Names of the inference rules, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    MaAlif,
    Shadda,
    SegPlus,
    PlusSeg,
    Lengthening,
    Boundary,
    NoSeg,
    AlaaNormalization,
    VowelInsertion,
    InterveningVowel,
    HaaRecovery,
    VowelDeletion,
    DiacriticDeletion,
    BoundaryRewrite,
    PlainRewrite,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::MaAlif => "ma-alif",
            RuleKind::Shadda => "shadda",
            RuleKind::SegPlus => "seg-plus",
            RuleKind::PlusSeg => "plus-seg",
            RuleKind::Lengthening => "lengthening",
            RuleKind::Boundary => "boundary",
            RuleKind::NoSeg => "no-seg",
            RuleKind::AlaaNormalization => "alaa-normalization",
            RuleKind::VowelInsertion => "vowel-insertion",
            RuleKind::InterveningVowel => "intervening-vowel",
            RuleKind::HaaRecovery => "haa-recovery",
            RuleKind::VowelDeletion => "vowel-deletion",
            RuleKind::DiacriticDeletion => "diacritic-deletion",
            RuleKind::BoundaryRewrite => "boundary-rewrite",
            RuleKind::PlainRewrite => "plain-rewrite",
        };
        f.write_str(name)
    }
}

/// What a matching rule does: the token for the current raw character and
/// the number of segmented characters it consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub token: EditToken,
    pub seg_consumed: usize,
}

impl Step {
    fn new(token: EditToken, seg_consumed: usize) -> Self {
        Self {
            token,
            seg_consumed,
        }
    }
}

/// A predicate paired with the step it commits to.
pub struct Rule {
    pub kind: RuleKind,
    matcher: fn(&Tails) -> Option<Step>,
}

impl Rule {
    /// Try the rule against the current tails.
    pub fn apply(&self, tails: &Tails) -> Option<Step> {
        (self.matcher)(tails)
    }
}

/// The inference rules in priority order.
pub static RULES: &[Rule] = &[
    Rule {
        kind: RuleKind::MaAlif,
        matcher: |t| {
            patterns::is_ma_alif(t).then(|| {
                Step::new(
                    EditToken::InsertedPrefix(format!("{ALIF}{}{ALIF}", t.marker)),
                    4,
                )
            })
        },
    },
    Rule {
        kind: RuleKind::Shadda,
        matcher: |t| {
            patterns::is_shadda(t).then(|| {
                if t.seg_back(2) == Some(t.marker) {
                    Step::new(EditToken::Duplicated { boundary: true }, 3)
                } else {
                    Step::new(EditToken::Duplicated { boundary: false }, 2)
                }
            })
        },
    },
    Rule {
        kind: RuleKind::SegPlus,
        matcher: |t| {
            let inserted = t.seg_back(2)?;
            patterns::is_seg_plus(t).then(|| {
                Step::new(
                    EditToken::InsertedPrefix(format!("{}{inserted}", t.marker)),
                    3,
                )
            })
        },
    },
    Rule {
        kind: RuleKind::PlusSeg,
        matcher: |t| {
            let inserted = t.seg_back(3)?;
            patterns::is_plus_seg(t).then(|| {
                Step::new(
                    EditToken::InsertedPrefix(format!("{inserted}{}", t.marker)),
                    3,
                )
            })
        },
    },
    Rule {
        kind: RuleKind::Lengthening,
        matcher: |t| patterns::is_lengthening(t).then(|| Step::new(EditToken::Deleted, 0)),
    },
    Rule {
        kind: RuleKind::Boundary,
        matcher: |t| patterns::is_boundary(t).then(|| Step::new(EditToken::SegBoundary, 2)),
    },
    Rule {
        kind: RuleKind::NoSeg,
        matcher: |t| patterns::is_no_seg(t).then(|| Step::new(EditToken::NoSegBoundary, 1)),
    },
    Rule {
        kind: RuleKind::AlaaNormalization,
        matcher: |t| {
            patterns::is_alaa_normalization(t).then(|| {
                // on ع the whole word is consumed, along with a boundary in
                // front of it; on ل the ع is left for the next step
                let consumed = match t.raw_back(1) {
                    Some(AIN) if t.seg_back(4) == Some(t.marker) => 4,
                    Some(AIN) => 3,
                    _ => 2,
                };
                Step::new(EditToken::Other, consumed)
            })
        },
    },
    Rule {
        kind: RuleKind::VowelInsertion,
        matcher: |t| {
            let vowel = t.seg_back(1)?;
            patterns::is_vowel_insertion(t).then(|| {
                let boundary = t.seg_back(3) == Some(t.marker);
                let token = EditToken::InsertedSuffix {
                    boundary,
                    text: vowel.to_string(),
                };
                Step::new(token, if boundary { 3 } else { 2 })
            })
        },
    },
    Rule {
        kind: RuleKind::InterveningVowel,
        matcher: |t| {
            let vowel = t.seg_back(1)?;
            patterns::is_intervening_vowel(t).then(|| {
                let token = EditToken::InsertedSuffix {
                    boundary: false,
                    text: format!("{}{vowel}", t.marker),
                };
                Step::new(token, 3)
            })
        },
    },
    Rule {
        kind: RuleKind::HaaRecovery,
        matcher: |t| patterns::is_haa_recovery(t).then(|| Step::new(EditToken::RecoverHaa, 3)),
    },
    Rule {
        kind: RuleKind::VowelDeletion,
        matcher: |t| patterns::is_vowel_deletion(t).then(|| Step::new(EditToken::Deleted, 0)),
    },
    Rule {
        kind: RuleKind::DiacriticDeletion,
        matcher: |t| patterns::is_diacritic_deletion(t).then(|| Step::new(EditToken::Deleted, 0)),
    },
    Rule {
        kind: RuleKind::BoundaryRewrite,
        matcher: |t| {
            let (from, to) = (t.raw_back(1)?, t.seg_back(1)?);
            patterns::is_boundary_rewrite(t)
                .then(|| Step::new(EditToken::SubstituteAtBoundary { from, to }, 2))
        },
    },
    Rule {
        kind: RuleKind::PlainRewrite,
        matcher: |t| {
            let (from, to) = (t.raw_back(1)?, t.seg_back(1)?);
            patterns::is_plain_rewrite(t).then(|| Step::new(EditToken::Substitute { from, to }, 1))
        },
    },
];

/// First rule in priority order that matches the tails.
pub fn first_match(tails: &Tails) -> Option<(RuleKind, Step)> {
    RULES
        .iter()
        .find_map(|rule| rule.apply(tails).map(|step| (rule.kind, step)))
}

/// Infer the edit script turning `raw` into `seg`, one token per raw
/// character.
pub fn infer_edits(raw: &str, seg: &str, config: &EngineConfig) -> Result<Vec<EditToken>, EditError> {
    let result = infer(raw, seg, config);
    if let Err(err) = &result {
        if config.verbose {
            warn!("ignoring {raw:?} / {seg:?}: {err}");
        } else {
            debug!("ignoring {raw:?} / {seg:?}: {err}");
        }
    }
    result
}

fn infer(raw: &str, seg: &str, config: &EngineConfig) -> Result<Vec<EditToken>, EditError> {
    if raw.is_empty() {
        return Err(EditError::EmptyRaw);
    }
    let raw_len = raw.chars().count();
    if seg.is_empty() {
        return Ok(vec![EditToken::Deleted; raw_len]);
    }
    if config.special_noseg && raw != seg && !seg.contains(config.seg_marker) {
        return Ok(vec![EditToken::Other; raw_len]);
    }

    let raw: Vec<char> = raw.chars().collect();
    let seg: Vec<char> = seg.chars().collect();
    let mut raw_end = raw.len();
    let mut seg_end = seg.len();
    let mut edits = Vec::with_capacity(raw.len());

    while raw_end > 0 {
        let tails = Tails::new(&raw[..raw_end], &seg[..seg_end], config.seg_marker);
        let Some((kind, step)) = first_match(&tails) else {
            return Err(EditError::UnrecognizedEdit {
                raw: tails.raw.iter().collect(),
                seg: tails.seg.iter().collect(),
            });
        };
        trace!(rule = %kind, token = %step.token, "matched");
        debug_assert!(step.seg_consumed <= seg_end);
        seg_end -= step.seg_consumed.min(seg_end);
        raw_end -= 1;
        edits.push(step.token);
    }

    if seg_end != 0 {
        return Err(EditError::ResidualMismatch {
            seg: seg[..seg_end].iter().collect(),
        });
    }

    edits.reverse();
    Ok(edits)
}

/// Split an input record into its raw and segmented fields.
pub fn parse_line(line: &str) -> Result<(&str, &str), EditError> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    match line.split_once('\t') {
        Some((raw, seg)) if !seg.contains('\t') => Ok((raw, seg)),
        _ => Err(EditError::MalformedLine),
    }
}

/// Parse a record and infer its edits.
pub fn edits_for_line(line: &str, config: &EngineConfig) -> Result<Vec<EditToken>, EditError> {
    let (raw, seg) = parse_line(line)?;
    infer_edits(raw, seg, config)
}
