//! Engine Configuration

use serde::{Deserialize, Serialize};

/// Default morpheme boundary marker in gold segmentations.
pub const DEFAULT_SEG_MARKER: char = ':';

/// Options for edit-script inference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Report skipped lines at warn level instead of debug
    pub verbose: bool,
    /// Tag unsegmented rewrites (e.g. ع -> على) as `Other` wholesale
    pub special_noseg: bool,
    /// Reserved boundary character in the segmented side
    pub seg_marker: char,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            special_noseg: true,
            seg_marker: DEFAULT_SEG_MARKER,
        }
    }
}

impl EngineConfig {
    /// Same defaults with a different boundary marker.
    pub fn with_marker(seg_marker: char) -> Self {
        Self {
            seg_marker,
            ..Default::default()
        }
    }
}
