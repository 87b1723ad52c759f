//! Rebuilding segmented text from tagger output.
//!
//! Input lines use the training format: `c|||LABEL` tokens with `.#.`
//! between words.

use crate::clitics::mark_clitics;
use crate::pipeline::{LABEL_SEPARATOR, WORD_BOUNDARY};
use crate::reconstruct::reconstruct_tagged;
use crate::LabelError;

/// How tagged words are turned back into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildOptions {
    pub apply_rewrites: bool,
    pub marker: char,
    /// Prefix and suffix markers; when set, segments are written
    /// space-separated with clitic markers instead of joined by `marker`.
    pub clitic_markers: Option<(String, String)>,
}

impl Default for RebuildOptions {
    fn default() -> Self {
        Self {
            apply_rewrites: true,
            marker: arseg_core::DEFAULT_SEG_MARKER,
            clitic_markers: None,
        }
    }
}

/// Split a tagged line into words of (character, label) pairs.
pub fn parse_tagged_line(line: &str) -> Result<Vec<Vec<(char, String)>>, LabelError> {
    let mut words = Vec::new();
    let mut current = Vec::new();
    for token in line.split_whitespace() {
        if token == WORD_BOUNDARY {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        let (text, label) = token
            .rsplit_once(LABEL_SEPARATOR)
            .ok_or_else(|| LabelError::MalformedToken(token.to_string()))?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => current.push((ch, label.to_string())),
            _ => return Err(LabelError::MalformedToken(token.to_string())),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    Ok(words)
}

/// Rebuild one tagged line as space-separated words.
pub fn rebuild_line(line: &str, options: &RebuildOptions) -> Result<String, LabelError> {
    let words = parse_tagged_line(line)?;
    let mut rebuilt = Vec::with_capacity(words.len());
    for word in &words {
        let text = reconstruct_tagged(word, options.apply_rewrites, options.marker)?;
        let text = match &options.clitic_markers {
            Some((prefix, suffix)) => {
                let segments: Vec<&str> = text
                    .split(options.marker)
                    .filter(|segment| !segment.is_empty())
                    .collect();
                mark_clitics(&segments, prefix, suffix)
            }
            None => text
                .strip_prefix(options.marker)
                .map(str::to_string)
                .unwrap_or(text),
        };
        rebuilt.push(text);
    }
    Ok(rebuilt.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "و|||CONT ك|||BEGIN ت|||CONT ا|||CONT ب|||CONT ه|||BEGIN .#. ل|||CONT ل|||REW ب|||BEGIN ي|||CONT ت|||CONT";

    #[test]
    fn parses_words_and_labels() {
        let words = parse_tagged_line(LINE).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].len(), 6);
        assert_eq!(words[1][1], ('ل', "REW".to_string()));
        assert!(parse_tagged_line("  ").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(matches!(
            parse_tagged_line("كت|||CONT"),
            Err(LabelError::MalformedToken(_))
        ));
        assert!(matches!(
            parse_tagged_line("ك"),
            Err(LabelError::MalformedToken(_))
        ));
    }

    #[test]
    fn rebuilds_with_segment_marker() {
        let options = RebuildOptions::default();
        assert_eq!(rebuild_line(LINE, &options).unwrap(), "و:كتاب:ه ل:ال:بيت");

        let plain = RebuildOptions {
            apply_rewrites: false,
            ..Default::default()
        };
        assert_eq!(rebuild_line(LINE, &plain).unwrap(), "و:كتاب:ه ل:ل:بيت");
    }

    #[test]
    fn rebuilds_with_clitic_markers() {
        let options = RebuildOptions {
            clitic_markers: Some(("+".into(), "+".into())),
            ..Default::default()
        };
        assert_eq!(rebuild_line(LINE, &options).unwrap(), "و+ كتاب +ه ل+ ال+ بيت");
    }

    #[test]
    fn leading_begin_does_not_open_the_word() {
        assert_eq!(
            rebuild_line("ب|||BEGIN ي|||CONT", &RebuildOptions::default()).unwrap(),
            "بي"
        );
    }
}
