//! # Lyrics data model
//!
//! The parser's output: paragraphs hold lines, lines hold their display text
//! plus the timed segments used for karaoke highlighting. All times are in
//! seconds.

use serde::{Deserialize, Serialize};

/// An atomic timed run of text, usually one word or syllable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricSegment {
    /// Trimmed, whitespace-collapsed text. Never empty.
    pub text: String,
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds, never earlier than `start_time`.
    pub end_time: f64,
}

impl LyricSegment {
    #[must_use]
    pub fn new(text: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            text: text.into(),
            start_time,
            end_time,
        }
    }

    /// Length of the segment in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// One displayable row of lyrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// The assembled line with inter-word spacing reconstructed.
    pub text: String,
    /// Timed segments in document order. Empty for untimed lines.
    #[serde(default)]
    pub segments: Vec<LyricSegment>,
}

impl LyricLine {
    #[must_use]
    pub fn new(text: impl Into<String>, segments: Vec<LyricSegment>) -> Self {
        Self {
            text: text.into(),
            segments,
        }
    }

    /// Whether the line carries any timing information.
    #[must_use]
    pub fn is_timed(&self) -> bool {
        !self.segments.is_empty()
    }

    /// Start of the first segment.
    #[must_use]
    pub fn start_time(&self) -> Option<f64> {
        self.segments.first().map(|s| s.start_time)
    }

    /// Latest end among the line's segments.
    #[must_use]
    pub fn end_time(&self) -> Option<f64> {
        self.segments.iter().map(|s| s.end_time).reduce(f64::max)
    }
}

/// A section of the song, e.g. a verse or a chorus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LyricParagraph {
    /// Lines in document order. May be empty.
    #[serde(default)]
    pub lines: Vec<LyricLine>,
    /// Section label such as `"Verse"` or `"Chorus"`, when the markup has one.
    pub song_part: Option<String>,
}

impl LyricParagraph {
    #[must_use]
    pub const fn new(lines: Vec<LyricLine>, song_part: Option<String>) -> Self {
        Self { lines, song_part }
    }

    #[must_use]
    pub fn start_time(&self) -> Option<f64> {
        self.lines.iter().find_map(LyricLine::start_time)
    }

    #[must_use]
    pub fn end_time(&self) -> Option<f64> {
        self.lines
            .iter()
            .filter_map(LyricLine::end_time)
            .reduce(f64::max)
    }
}
