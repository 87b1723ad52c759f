//! Rebuilding segmented words from raw characters and coarse labels.

use arseg_core::normalize::{ALIF, ALIF_MAQSURA, HAA, LAAM, TAA, TAA_MARBUTA, YAA};

use crate::label::CoarseLabel;
use crate::LabelError;

/// Normalized form of a character labeled REW. Characters with no entry
/// are returned unchanged.
pub fn rewrite_char(ch: char) -> char {
    match ch {
        TAA | HAA => TAA_MARBUTA,
        TAA_MARBUTA => TAA,
        YAA | ALIF => ALIF_MAQSURA,
        ALIF_MAQSURA => YAA,
        other => other,
    }
}

/// Rebuild a segmented word. BEGIN opens a segment with `marker`, CONT
/// copies, REW rewrites when `apply_rewrites` is set. REW on laam stands
/// for li + al- and always opens a segment.
pub fn reconstruct(
    raw: &str,
    labels: &[CoarseLabel],
    apply_rewrites: bool,
    marker: char,
) -> Result<String, LabelError> {
    let chars = raw.chars().count();
    if chars != labels.len() {
        return Err(LabelError::LengthMismatch {
            chars,
            labels: labels.len(),
        });
    }

    let mut out = String::with_capacity(raw.len() + labels.len());
    for (ch, label) in raw.chars().zip(labels) {
        match label {
            CoarseLabel::Begin => {
                out.push(marker);
                out.push(ch);
            }
            CoarseLabel::Continue => out.push(ch),
            CoarseLabel::Rewrite if ch == LAAM => {
                out.push(marker);
                if apply_rewrites {
                    out.push(ALIF);
                }
                out.push(LAAM);
            }
            CoarseLabel::Rewrite if apply_rewrites => out.push(rewrite_char(ch)),
            CoarseLabel::Rewrite => out.push(ch),
        }
    }
    Ok(out)
}

/// Same as [`reconstruct`] for tagger output given as (character, label
/// text) pairs.
pub fn reconstruct_tagged<S: AsRef<str>>(
    pairs: &[(char, S)],
    apply_rewrites: bool,
    marker: char,
) -> Result<String, LabelError> {
    let labels = pairs
        .iter()
        .map(|(_, label)| label.as_ref().parse())
        .collect::<Result<Vec<CoarseLabel>, _>>()?;
    let raw: String = pairs.iter().map(|(ch, _)| *ch).collect();
    reconstruct(&raw, &labels, apply_rewrites, marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{project_word, LabelScheme};
    use arseg_core::{infer_edits, EngineConfig};
    use crate::label::CoarseLabel::{Begin as B, Continue as C, Rewrite as R};

    #[test]
    fn rebuilds_boundaries() {
        let labels = [C, B, C, B, C, C, C];
        assert_eq!(reconstruct("والكتاب", &labels, true, ':').unwrap(), "و:ال:كتاب");
        assert_eq!(reconstruct("والكتاب", &labels, false, '+').unwrap(), "و+ال+كتاب");
    }

    #[test]
    fn li_article_depends_on_rewrite_flag() {
        let labels = [C, R, B, C, C, C];
        assert_eq!(reconstruct("للكتاب", &labels, true, ':').unwrap(), "ل:ال:كتاب");
        assert_eq!(reconstruct("للكتاب", &labels, false, ':').unwrap(), "ل:ل:كتاب");
    }

    #[test]
    fn rewrite_table() {
        assert_eq!(rewrite_char('ت'), 'ة');
        assert_eq!(rewrite_char('ه'), 'ة');
        assert_eq!(rewrite_char('ة'), 'ت');
        assert_eq!(rewrite_char('ي'), 'ى');
        assert_eq!(rewrite_char('ا'), 'ى');
        assert_eq!(rewrite_char('ى'), 'ي');
        assert_eq!(rewrite_char('ك'), 'ك');

        assert_eq!(reconstruct("مدرست", &[C, C, C, C, R], true, ':').unwrap(), "مدرسة");
        assert_eq!(reconstruct("مدرست", &[C, C, C, C, R], false, ':').unwrap(), "مدرست");
    }

    #[test]
    fn leading_begin_emits_marker() {
        assert_eq!(reconstruct("بيت", &[B, C, C], true, ':').unwrap(), ":بيت");
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = reconstruct("كتب", &[C], true, ':').unwrap_err();
        assert!(matches!(err, LabelError::LengthMismatch { chars: 3, labels: 1 }));
    }

    #[test]
    fn labels_round_trip_through_inference() {
        let cases = [
            ("والكتاب", "و:ال:كتاب"),
            ("للكتاب", "ل:ال:كتاب"),
            ("ومدرست", "و:مدرسة"),
            ("بيتي", "بيت:ي"),
        ];
        for (raw, seg) in cases {
            let edits = infer_edits(raw, seg, &EngineConfig::default()).unwrap();
            let labels = project_word(raw, &edits, ':', LabelScheme::Basic).unwrap();
            assert_eq!(reconstruct(raw, &labels, true, ':').unwrap(), seg, "{raw}");
        }
    }

    #[test]
    fn unrewritten_output_without_markers_is_the_raw_word() {
        let cases = [
            ("مكلش", "ما:اكل:ش"),
            ("عني", "عن:ني"),
            ("في", "في:ه"),
            ("كتبو", "كتب:وا"),
            ("وياااا", "و:يا"),
            ("ومدرسه", "و:مدرسة"),
            ("للكتاب", "ل:ال:كتاب"),
            ("مما", "من:ما"),
            ("وع", "و:على"),
        ];
        for (raw, seg) in cases {
            let edits = infer_edits(raw, seg, &EngineConfig::default()).unwrap();
            let labels = project_word(raw, &edits, ':', LabelScheme::Full).unwrap();
            let rebuilt = reconstruct(raw, &labels, false, ':').unwrap();
            assert_eq!(rebuilt.replace(':', ""), raw, "{raw}");
        }
    }

    #[test]
    fn tagged_pairs_accept_label_aliases() {
        let pairs = [('ل', "CONT"), ('ل', "REWAL"), ('ك', "BEGIN"), ('م', "CONTINUE")];
        assert_eq!(reconstruct_tagged(&pairs, true, ':').unwrap(), "ل:ال:كم");

        let bad = [('ل', "X")];
        assert!(matches!(
            reconstruct_tagged(&bad, true, ':'),
            Err(LabelError::UnknownLabel(_))
        ));
    }
}
