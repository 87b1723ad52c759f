//! Orthographic Normalization Classes
//!
//! Static groups of Arabic characters that the gold segmentation may
//! substitute for one another:
//! - taa / taa marbuta / haa
//! - alif variants and alif maqsura
//! - hamza carriers
//! - dialectal consonant mergers
//! - Arabic vs. Latin punctuation and digits

pub const HAMZA: char = '\u{0621}';
pub const ALIF_MADDA: char = '\u{0622}';
pub const ALIF_HAMZA_ABOVE: char = '\u{0623}';
pub const WAW_HAMZA: char = '\u{0624}';
pub const ALIF_HAMZA_BELOW: char = '\u{0625}';
pub const YAA_HAMZA: char = '\u{0626}';
pub const ALIF: char = '\u{0627}';
pub const TAA_MARBUTA: char = '\u{0629}';
pub const TAA: char = '\u{062A}';
pub const THAA: char = '\u{062B}';
pub const DAL: char = '\u{062F}';
pub const THAL: char = '\u{0630}';
pub const ZAIN: char = '\u{0632}';
pub const SEEN: char = '\u{0633}';
pub const DAD: char = '\u{0636}';
pub const TAH: char = '\u{0637}';
pub const ZAH: char = '\u{0638}';
pub const AIN: char = '\u{0639}';
pub const TATWEEL: char = '\u{0640}';
pub const QAF: char = '\u{0642}';
pub const LAAM: char = '\u{0644}';
pub const MEEM: char = '\u{0645}';
pub const NOON: char = '\u{0646}';
pub const HAA: char = '\u{0647}';
pub const WAW: char = '\u{0648}';
pub const ALIF_MAQSURA: char = '\u{0649}';
pub const YAA: char = '\u{064A}';
pub const DAGGER_ALIF: char = '\u{0670}';
pub const ALIF_WASLA: char = '\u{0671}';

/// A set of characters that are orthographic variants of one another.
pub type NormalizationGroup = &'static [char];

/// Every group the gold data is known to rewrite within. A character may sit
/// in several groups; co-membership in any one of them is enough.
pub static NORMALIZATION_GROUPS: &[NormalizationGroup] = &[
    // taa marbuta
    &[TAA_MARBUTA, TAA],
    &[TAA_MARBUTA, HAA],
    // alif maqsura
    &[ALIF_MAQSURA, YAA, ALIF],
    // alif variants
    &[ALIF, ALIF_HAMZA_ABOVE, ALIF_HAMZA_BELOW, ALIF_MADDA, ALIF_WASLA],
    // hamza carriers
    &[HAMZA, ALIF_HAMZA_ABOVE, ALIF_HAMZA_BELOW, WAW_HAMZA, YAA_HAMZA],
    &[WAW_HAMZA, WAW],
    &[YAA_HAMZA, YAA, ALIF_MAQSURA],
    // /t/
    &[TAA, TAH],
    // interdentals merged in dialect
    &[THAA, TAA, SEEN],
    &[THAL, DAL, ZAIN],
    &[ZAH, DAD, ZAIN],
    // dialectal qaf
    &[QAF, HAMZA, ALIF_HAMZA_ABOVE],
    // punctuation
    &['\u{060C}', ','],
    &['\u{061B}', ';'],
    &['\u{061F}', '?'],
    &['\u{066A}', '%'],
    &['\u{066B}', '.'],
    // digits
    &['\u{0660}', '0'],
    &['\u{0661}', '1'],
    &['\u{0662}', '2'],
    &['\u{0663}', '3'],
    &['\u{0664}', '4'],
    &['\u{0665}', '5'],
    &['\u{0666}', '6'],
    &['\u{0667}', '7'],
    &['\u{0668}', '8'],
    &['\u{0669}', '9'],
];

/// Letters that may be inserted right after a boundary (definite-article
/// alif, first-person noon, dialectal y -> ny).
pub static SEG_PLUS_LETTERS: &[char] = &[ALIF, NOON, YAA];

/// Letters that may be inserted right before a boundary (plural noon,
/// mim~A / Al~A doubling).
pub static PLUS_SEG_LETTERS: &[char] = &[ALIF, NOON];

/// True iff the two characters are identical or share a normalization group.
pub fn is_common_rewrite(seg: char, raw: char) -> bool {
    if seg == raw {
        return true;
    }
    NORMALIZATION_GROUPS
        .iter()
        .any(|group| group.contains(&seg) && group.contains(&raw))
}

/// Long vowels (alif, waw, yaa, alif maqsura).
pub fn is_long_vowel(ch: char) -> bool {
    matches!(ch, ALIF | WAW | YAA | ALIF_MAQSURA)
}

/// Haa and taa marbuta, which dialectal spelling drops or swaps freely.
pub fn is_haa_class(ch: char) -> bool {
    matches!(ch, HAA | TAA_MARBUTA)
}

/// Vowel endings accepted after "3l" in the normalized preposition.
pub fn is_alaa_vowel(ch: char) -> bool {
    matches!(ch, ALIF_MAQSURA | YAA | ALIF)
}

/// Diacritics, tatweel and dagger alif: never carried into the segmentation.
pub fn is_diacritic(ch: char) -> bool {
    matches!(ch,
        '\u{064B}'..='\u{065F}' | // Fathatan to wavy hamza below
        TATWEEL |
        DAGGER_ALIF
    )
}

/// A non-empty string made only of diacritics/tatweel.
pub fn is_all_diacritics(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_diacritic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_characters_are_common_rewrites() {
        assert!(is_common_rewrite('ب', 'ب'));
        assert!(is_common_rewrite(':', ':'));
    }

    #[test]
    fn rewrite_predicate_is_symmetric_over_table() {
        for group in NORMALIZATION_GROUPS {
            for &a in group.iter() {
                for &b in group.iter() {
                    assert!(is_common_rewrite(a, b), "{a} / {b}");
                    assert_eq!(is_common_rewrite(a, b), is_common_rewrite(b, a));
                }
            }
        }
    }

    #[test]
    fn overlapping_groups_are_all_consulted() {
        // taa is in both the taa marbuta group and the /t/ group
        assert!(is_common_rewrite('ة', 'ت'));
        assert!(is_common_rewrite('ط', 'ت'));
        assert!(is_common_rewrite('ه', 'ة'));
        // but group membership is not transitive
        assert!(!is_common_rewrite('ط', 'ة'));
        assert!(!is_common_rewrite('ه', 'ت'));
    }

    #[test]
    fn unrelated_letters_are_not_rewrites() {
        assert!(!is_common_rewrite('ب', 'ت'));
        assert!(!is_common_rewrite('و', 'ا'));
        assert!(!is_common_rewrite('ك', 'ل'));
    }

    #[test]
    fn punctuation_and_digit_variants() {
        assert!(is_common_rewrite('،', ','));
        assert!(is_common_rewrite('?', '؟'));
        assert!(is_common_rewrite('٣', '3'));
        assert!(!is_common_rewrite('٣', '4'));
    }

    #[test]
    fn character_classes() {
        assert!(is_diacritic('\u{064E}')); // fatha
        assert!(is_diacritic('ـ'));
        assert!(is_diacritic('\u{0670}'));
        assert!(!is_diacritic('ا'));

        assert!(is_long_vowel('ى'));
        assert!(!is_long_vowel('ه'));
        assert!(is_haa_class('ة'));

        assert!(is_all_diacritics("\u{064B}ـ"));
        assert!(!is_all_diacritics(""));
        assert!(!is_all_diacritics("بِ"));
    }
}
