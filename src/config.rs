use serde::{Deserialize, Serialize};

/// What a `<span>` ends at when it has a `begin` but no `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MissingEndPolicy {
    /// The segment ends where it begins (zero length).
    #[default]
    MirrorBegin,
    /// The segment ends at `0`, then gets clamped up to its start.
    Zero,
}

/// Options controlling how lyrics markup is turned into paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingOptions {
    /// How to resolve a missing `end` attribute.
    pub missing_end: MissingEndPolicy,
    /// Glue a lone ASCII letter to a following lone accented letter when
    /// assembling text, e.g. `o` + `ù` becomes `où`.
    pub merge_elisions: bool,
    /// Keep lines that carry no timed segments.
    pub include_untimed_lines: bool,
}

impl Default for ParsingOptions {
    fn default() -> Self {
        Self {
            missing_end: MissingEndPolicy::default(),
            merge_elisions: true,
            include_untimed_lines: true,
        }
    }
}
