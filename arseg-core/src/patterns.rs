//! Pattern Predicates
//!
//! Each predicate recognizes one orthographic or dialectal phenomenon by
//! looking only at the ends of the still-unconsumed raw and segmented
//! strings. Predicates are pure; consuming input is left to the engine.

use crate::normalize::{
    is_alaa_vowel, is_common_rewrite, is_diacritic, is_haa_class, is_long_vowel, AIN, ALIF, HAA,
    LAAM, MEEM, PLUS_SEG_LETTERS, SEG_PLUS_LETTERS, YAA,
};

/// Trailing view over the unconsumed parts of both words.
#[derive(Debug, Clone, Copy)]
pub struct Tails<'a> {
    pub raw: &'a [char],
    pub seg: &'a [char],
    pub marker: char,
}

impl<'a> Tails<'a> {
    pub fn new(raw: &'a [char], seg: &'a [char], marker: char) -> Self {
        Self { raw, seg, marker }
    }

    /// `n`-th raw character from the end, 1-based.
    pub fn raw_back(&self, n: usize) -> Option<char> {
        back(self.raw, n)
    }

    /// `n`-th segmented character from the end, 1-based.
    pub fn seg_back(&self, n: usize) -> Option<char> {
        back(self.seg, n)
    }

    /// Common rewrite between `seg_back(seg_n)` and `raw_back(raw_n)`;
    /// false when either is out of range.
    fn common_at(&self, seg_n: usize, raw_n: usize) -> bool {
        match (self.seg_back(seg_n), self.raw_back(raw_n)) {
            (Some(seg), Some(raw)) => is_common_rewrite(seg, raw),
            _ => false,
        }
    }

    /// Segmented characters back to front, boundary markers skipped.
    fn unmarked_seg_rev(&self) -> impl Iterator<Item = char> + 'a {
        let marker = self.marker;
        self.seg.iter().rev().copied().filter(move |&ch| ch != marker)
    }
}

fn back(chars: &[char], n: usize) -> Option<char> {
    if n == 0 {
        return None;
    }
    chars.len().checked_sub(n).map(|i| chars[i])
}

fn same(a: Option<char>, b: Option<char>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}

/// "mA" negation spelled with a bare meem fused to a verb starting in alif:
/// raw `...م x`, segmented `...م ا SEG ا x`.
pub fn is_ma_alif(t: &Tails) -> bool {
    let n = t.seg.len();
    n >= 5
        && t.raw.len() >= 2
        && t.common_at(1, 1)
        && t.raw_back(2) == Some(MEEM)
        && t.seg[n - 5..n - 1] == [MEEM, ALIF, t.marker, ALIF]
}

/// Gemination written once in the raw text and twice in the segmentation.
///
/// Ignoring markers, the segmented side must hold a longer trailing run of
/// the current raw character than the raw side does.
pub fn is_shadda(t: &Tails) -> bool {
    let Some(last) = t.raw_back(1) else {
        return false;
    };
    let mut seg = t.unmarked_seg_rev();
    if seg.next() != Some(last) {
        return false;
    }

    let mut raw = t.raw.iter().rev().copied().skip(1);
    loop {
        match (seg.next(), raw.next()) {
            (Some(s), Some(r)) => {
                if s != last {
                    return false;
                }
                if s != r {
                    return true;
                }
            }
            // raw exhausted inside the run: word-initial shadda
            (Some(s), None) => return s == last,
            (None, _) => return false,
        }
    }
}

/// A letter inserted right after a boundary: segmented `...y SEG x c`
/// against raw `...y' c`.
pub fn is_seg_plus(t: &Tails) -> bool {
    t.seg.len() >= 4
        && t.raw.len() >= 2
        && t.common_at(1, 1)
        && matches!(
            (t.seg_back(2), t.raw_back(2)),
            (Some(s), Some(r)) if s != r && SEG_PLUS_LETTERS.contains(&s)
        )
        && t.seg_back(3) == Some(t.marker)
        && t.common_at(4, 2)
}

/// A letter inserted right before a boundary: segmented `...y x SEG c`
/// against raw `...y' c`.
pub fn is_plus_seg(t: &Tails) -> bool {
    t.seg.len() >= 4
        && t.raw.len() >= 2
        && t.common_at(1, 1)
        && t.seg_back(2) == Some(t.marker)
        && matches!(
            (t.seg_back(3), t.raw_back(2)),
            (Some(s), Some(r)) if s != r && PLUS_SEG_LETTERS.contains(&s)
        )
        && t.common_at(4, 2)
}

/// Expressive lengthening (raw `yAAAA`, segmented `yA`): a doubled trailing
/// raw letter whose segmented counterpart is single.
pub fn is_lengthening(t: &Tails) -> bool {
    let (Some(last), Some(prev)) = (t.raw_back(1), t.raw_back(2)) else {
        return false;
    };
    if last != prev {
        return false;
    }
    let mut seg = t.unmarked_seg_rev();
    seg.next() == Some(last) && seg.next() != Some(last)
}

/// Ordinary boundary in front of an unchanged character.
pub fn is_boundary(t: &Tails) -> bool {
    match t.raw_back(1) {
        Some(raw) => t.seg.ends_with(&[t.marker, raw]),
        None => false,
    }
}

/// Unchanged character, no boundary.
pub fn is_no_seg(t: &Tails) -> bool {
    same(t.seg_back(1), t.raw_back(1))
}

/// The abbreviated preposition ع / عل normalized to على.
pub fn is_alaa_normalization(t: &Tails) -> bool {
    let raw_matches = match (t.raw_back(1), t.raw_back(2)) {
        (Some(AIN), _) => true,
        (Some(LAAM), Some(AIN)) => true,
        _ => false,
    };
    raw_matches
        && t.seg_back(3) == Some(AIN)
        && t.seg_back(2) == Some(LAAM)
        && t.seg_back(1).map_or(false, is_alaa_vowel)
}

/// A long vowel added right after the raw character (verbal -wA, jussive
/// normalization).
pub fn is_vowel_insertion(t: &Tails) -> bool {
    same(t.seg_back(2), t.raw_back(1)) && t.seg_back(1).map_or(false, is_long_vowel)
}

/// A long vowel added as its own segment after the raw character.
pub fn is_intervening_vowel(t: &Tails) -> bool {
    same(t.seg_back(3), t.raw_back(1))
        && t.seg_back(2) == Some(t.marker)
        && t.seg_back(1).map_or(false, is_long_vowel)
}

/// Silent dialectal haa after yaa, restored as a pronoun segment.
pub fn is_haa_recovery(t: &Tails) -> bool {
    t.raw_back(1) == Some(YAA) && t.seg.ends_with(&[YAA, t.marker, HAA])
}

/// A trailing long vowel or haa with no segmented counterpart: the
/// segmented side already ends with the previous raw character.
pub fn is_vowel_deletion(t: &Tails) -> bool {
    let (Some(last), Some(prev)) = (t.raw_back(1), t.raw_back(2)) else {
        return false;
    };
    (is_long_vowel(last) || is_haa_class(last)) && norm_ends_with(t.seg, prev)
}

fn norm_ends_with(seg: &[char], ch: char) -> bool {
    match seg.last() {
        Some(&last) => last == ch || (is_haa_class(last) && is_haa_class(ch)),
        None => false,
    }
}

/// Diacritic, tatweel or dagger alif in the raw text.
pub fn is_diacritic_deletion(t: &Tails) -> bool {
    t.raw_back(1).map_or(false, is_diacritic)
}

/// Orthographic substitution coinciding with a boundary.
pub fn is_boundary_rewrite(t: &Tails) -> bool {
    t.seg_back(2) == Some(t.marker) && t.common_at(1, 1)
}

/// Plain orthographic substitution.
pub fn is_plain_rewrite(t: &Tails) -> bool {
    t.common_at(1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(pred: fn(&Tails) -> bool, raw: &str, seg: &str) -> bool {
        let raw: Vec<char> = raw.chars().collect();
        let seg: Vec<char> = seg.chars().collect();
        pred(&Tails::new(&raw, &seg, ':'))
    }

    #[test]
    fn tails_index_from_the_end() {
        let raw: Vec<char> = "كتب".chars().collect();
        let tails = Tails::new(&raw, &[], ':');
        assert_eq!(tails.raw_back(1), Some('ب'));
        assert_eq!(tails.raw_back(3), Some('ك'));
        assert_eq!(tails.raw_back(4), None);
        assert_eq!(tails.raw_back(0), None);
        assert_eq!(tails.seg_back(1), None);
    }

    #[test]
    fn ma_alif_fusion() {
        assert!(check(is_ma_alif, "مك", "ما:اك"));
        assert!(!check(is_ma_alif, "مك", "من:اك"));
        assert!(!check(is_ma_alif, "بك", "ما:اك"));
        assert!(!check(is_ma_alif, "مك", "ا:اك"));
    }

    #[test]
    fn shadda_with_and_without_marker() {
        assert!(check(is_shadda, "عن", "عن:ن"));
        assert!(check(is_shadda, "مد", "مدد"));
        // word-initial gemination
        assert!(check(is_shadda, "ب", "ب:ب"));
        // same run length on both sides
        assert!(!check(is_shadda, "مدد", "مد:د"));
        assert!(!check(is_shadda, "عني", "عن:ني"));
        // markers are skipped before the runs are compared
        assert!(!check(is_shadda, "كتب", "كتب:"));
        assert!(check(is_shadda, "ب", "بب:"));
    }

    #[test]
    fn seg_plus_inserted_after_boundary() {
        assert!(check(is_seg_plus, "لل", "ل:ال"));
        assert!(!check(is_seg_plus, "ال", "و:ال"));
        // the letter before the boundary must match the raw side
        assert!(!check(is_seg_plus, "وأح", "و:اح"));
        assert!(!check(is_seg_plus, "لل", "ل:بل"));
    }

    #[test]
    fn plus_seg_inserted_before_boundary() {
        assert!(check(is_plus_seg, "مم", "من:م"));
        assert!(!check(is_plus_seg, "كلش", "كل:ش"));
        assert!(!check(is_plus_seg, "نم", "ن:م"));
    }

    #[test]
    fn lengthening_deletion() {
        assert!(check(is_lengthening, "وياا", "و:يا"));
        assert!(!check(is_lengthening, "ويا", "و:يا"));
        assert!(!check(is_lengthening, "مدد", "مد:د"));
    }

    #[test]
    fn plain_boundary_and_no_seg() {
        assert!(check(is_boundary, "وك", "و:ك"));
        assert!(!check(is_boundary, "وك", "وك"));
        assert!(check(is_no_seg, "وك", "وك"));
        assert!(!check(is_no_seg, "وك", "و:"));
        assert!(!check(is_no_seg, "", ""));
    }

    #[test]
    fn alaa_normalization() {
        assert!(check(is_alaa_normalization, "ع", "على"));
        assert!(check(is_alaa_normalization, "عل", "على"));
        assert!(check(is_alaa_normalization, "عل", "علي"));
        assert!(!check(is_alaa_normalization, "بل", "على"));
        assert!(!check(is_alaa_normalization, "ع", "علم"));
    }

    #[test]
    fn vowel_insertions() {
        assert!(check(is_vowel_insertion, "كتبو", "كتب:وا"));
        assert!(!check(is_vowel_insertion, "كتبو", "كتب:وه"));
        assert!(check(is_intervening_vowel, "ل", "ل:ي"));
        assert!(!check(is_intervening_vowel, "ل", "لي"));
    }

    #[test]
    fn haa_recovery_and_deletion() {
        assert!(check(is_haa_recovery, "في", "في:ه"));
        assert!(!check(is_haa_recovery, "فو", "في:ه"));

        assert!(check(is_vowel_deletion, "وراه", "و:را"));
        // haa class members stand in for one another
        assert!(check(is_vowel_deletion, "سنةه", "سنه"));
        assert!(!check(is_vowel_deletion, "ومدرسه", "و:مدرسة"));
        assert!(!check(is_vowel_deletion, "ه", ""));
    }

    #[test]
    fn diacritics_and_rewrites() {
        assert!(check(is_diacritic_deletion, "كِ", "ك"));
        assert!(check(is_diacritic_deletion, "كـ", "ك"));
        assert!(!check(is_diacritic_deletion, "كت", "ك"));

        assert!(check(is_boundary_rewrite, "وأ", "و:ا"));
        assert!(!check(is_boundary_rewrite, "وأ", "وا"));
        assert!(check(is_plain_rewrite, "مدرسه", "مدرسة"));
        assert!(!check(is_plain_rewrite, "ب", ""));
    }
}
