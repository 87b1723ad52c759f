//! Clitic markers for rebuilt words.
//!
//! Segments in front of the head are marked as prefixes (`w+ ktAb`),
//! segments after it as suffixes (`ktAb +h`). The head is found by peeling
//! known clitics off both ends, alternating suffix then prefix, and taking
//! the longest remaining segment.

/// Known proclitics.
pub static PREFIXES: &[&str] = &[
    "ل", "ف", "و", "م", "ما", "ح", "حا", "ه", "ها", "ك", "ب", "س",
];

/// Known enclitics.
pub static SUFFIXES: &[&str] = &[
    "ل", "و", "ما", "ه", "ها", "هم", "هن", "نا", "كم", "تن", "تم", "ى", "ي", "هما", "ك", "ب",
    "ش",
];

/// Half-open range of the head segment. When every segment is a clitic
/// the range is empty and sits at the first suffix.
pub fn head_bounds(segments: &[&str]) -> (usize, usize) {
    if segments.is_empty() {
        return (0, 0);
    }

    // segments[..prefix_end] are prefixes, segments[suffix_end..] suffixes
    let mut prefix_end = 0;
    let mut suffix_end = segments.len();
    let mut prefixes_done = false;
    let mut suffixes_done = false;
    loop {
        if !suffixes_done {
            if SUFFIXES.contains(&segments[suffix_end - 1]) {
                suffix_end -= 1;
            } else {
                suffixes_done = true;
            }
        }
        if suffix_end <= prefix_end {
            break;
        }
        if !prefixes_done {
            if PREFIXES.contains(&segments[prefix_end]) {
                prefix_end += 1;
            } else {
                prefixes_done = true;
            }
        }
        if suffix_end <= prefix_end || (prefixes_done && suffixes_done) {
            break;
        }
    }

    if suffix_end <= prefix_end {
        return (suffix_end, suffix_end);
    }
    let head = (prefix_end..suffix_end).fold(prefix_end, |best, i| {
        if segments[i].chars().count() > segments[best].chars().count() {
            i
        } else {
            best
        }
    });
    (head, head + 1)
}

/// Space-separated segments with clitic markers. The first segment never
/// carries a marker of its own.
pub fn mark_clitics(segments: &[&str], prefix_marker: &str, suffix_marker: &str) -> String {
    let (head_start, head_end) = head_bounds(segments);
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            if i <= head_start {
                out.push_str(prefix_marker);
            }
            out.push(' ');
            if i >= head_end {
                out.push_str(suffix_marker);
            }
        }
        out.push_str(segment);
    }
    out
}
