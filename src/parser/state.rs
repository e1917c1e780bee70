//! # Parser state machine
//!
//! One [`ParserState`] is created per parse. The element stack mirrors the
//! open tags so character data can be attributed to the nearest enclosing
//! span or line, and so every end tag pops exactly what its start pushed.

use std::mem;

use tracing::{trace, warn};

use super::{
    tokens::{LineToken, assemble_text, is_bracket_only, join_span_words, push_words},
    utils::normalize_whitespace,
};
use crate::{
    config::{MissingEndPolicy, ParsingOptions},
    model::{LyricLine, LyricParagraph, LyricSegment},
};

/// Coarse position of the parser within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ParsePhase {
    Idle,
    InSection,
    InLine,
    InSpan,
}

/// What an open element on the stack stands for.
#[derive(Debug)]
pub(super) enum ElementFrame {
    /// `<tt>` or `<body>`. Closing one flushes the implicit paragraph.
    Container,
    Section,
    Line,
    Span(SpanData),
    /// Anything unrecognised, including a `<p>` nested in another `<p>`.
    Other,
}

/// A paragraph being accumulated.
#[derive(Debug, Default)]
pub(super) struct SectionData {
    pub(super) song_part: Option<String>,
    pub(super) lines: Vec<LyricLine>,
    /// Opened by a `<p>` that sits outside any `<div>`.
    pub(super) implicit: bool,
}

/// A line being accumulated.
#[derive(Debug, Default)]
pub(super) struct LineData {
    pub(super) tokens: Vec<LineToken>,
    pub(super) segments: Vec<LyricSegment>,
}

/// An open `<span>`.
#[derive(Debug)]
pub(super) struct SpanData {
    pub(super) start_time: f64,
    pub(super) end_time: f64,
    /// Raw character data directly owned by this span.
    pub(super) text: String,
    /// Index in the line's segment list reserved when the span opened, so a
    /// span wrapping other spans still lands before them.
    pub(super) segment_slot: usize,
}

#[derive(Debug)]
pub(super) struct ParserState<'o> {
    pub(super) options: &'o ParsingOptions,
    pub(super) paragraphs: Vec<LyricParagraph>,
    pub(super) stack: Vec<ElementFrame>,
    pub(super) section: Option<SectionData>,
    pub(super) line: Option<LineData>,
    /// Character data seen since the last tag boundary.
    pub(super) text_buffer: String,
    pub(super) has_pending_whitespace: bool,
}

impl<'o> ParserState<'o> {
    pub(super) const fn new(options: &'o ParsingOptions) -> Self {
        Self {
            options,
            paragraphs: Vec::new(),
            stack: Vec::new(),
            section: None,
            line: None,
            text_buffer: String::new(),
            has_pending_whitespace: false,
        }
    }

    pub(super) fn phase(&self) -> ParsePhase {
        if self
            .stack
            .iter()
            .any(|frame| matches!(frame, ElementFrame::Span(_)))
            && self.line.is_some()
        {
            ParsePhase::InSpan
        } else if self.line.is_some() {
            ParsePhase::InLine
        } else if self.section.is_some() {
            ParsePhase::InSection
        } else {
            ParsePhase::Idle
        }
    }

    /// Starts a paragraph, emitting whichever one was open.
    ///
    /// Sections do not nest: an inner `<div>` ends the outer paragraph, and
    /// lines after the inner `</div>` fall into an unlabeled paragraph rather
    /// than back into the outer one.
    pub(super) fn open_section(&mut self, song_part: Option<String>) {
        self.close_section();
        trace!("Opening section {song_part:?}");
        self.section = Some(SectionData {
            song_part,
            ..Default::default()
        });
    }

    pub(super) fn close_section(&mut self) {
        if let Some(section) = self.section.take() {
            if section.implicit && section.lines.is_empty() {
                return;
            }
            self.paragraphs
                .push(LyricParagraph::new(section.lines, section.song_part));
        }
    }

    pub(super) fn close_implicit_section(&mut self) {
        if self.section.as_ref().is_some_and(|s| s.implicit) {
            self.close_section();
        }
    }

    pub(super) fn open_line(&mut self) {
        if self.section.is_none() {
            self.section = Some(SectionData {
                implicit: true,
                ..Default::default()
            });
        }
        self.line = Some(LineData::default());
        self.has_pending_whitespace = false;
    }

    pub(super) fn close_line(&mut self) {
        let Some(line) = self.line.take() else {
            return;
        };
        self.has_pending_whitespace = false;

        if line.segments.is_empty() && !self.options.include_untimed_lines {
            trace!("Dropping untimed line");
            return;
        }

        let text = assemble_text(&line.tokens, self.options.merge_elisions);
        if let Some(section) = self.section.as_mut() {
            section.lines.push(LyricLine::new(text, line.segments));
        }
    }

    /// Builds the frame for a `<span>` from its already parsed bounds.
    pub(super) fn open_span(&self, begin: Option<f64>, end: Option<f64>) -> SpanData {
        let start_time = begin.unwrap_or(0.0);
        let end_time = match (end, self.options.missing_end) {
            (Some(end), _) => {
                if end < start_time {
                    warn!("Span ends at {end}s before it begins at {start_time}s, clamping");
                }
                end
            }
            (None, MissingEndPolicy::MirrorBegin) => start_time,
            (None, MissingEndPolicy::Zero) => 0.0,
        };

        SpanData {
            start_time,
            end_time: end_time.max(start_time),
            text: String::new(),
            segment_slot: self.line.as_ref().map_or(0, |line| line.segments.len()),
        }
    }

    pub(super) fn close_span(&mut self, span: SpanData) {
        let Some(line) = self.line.as_mut() else {
            return;
        };

        let text = join_span_words(
            &normalize_whitespace(&span.text),
            self.options.merge_elisions,
        );
        // A wrapper holding only the brackets around its child spans times
        // nothing itself; the brackets still reach the line text.
        if text.is_empty() || is_bracket_only(&text) {
            return;
        }

        let slot = span.segment_slot.min(line.segments.len());
        line.segments.insert(
            slot,
            LyricSegment::new(text, span.start_time, span.end_time),
        );
    }

    /// Turns the buffered character data into line tokens.
    ///
    /// Called at every tag boundary, so text split across entity references
    /// is normalized as one chunk.
    pub(super) fn flush_text(&mut self) {
        if self.text_buffer.is_empty() {
            return;
        }
        let raw = mem::take(&mut self.text_buffer);

        let Some(line) = self.line.as_mut() else {
            return;
        };

        if raw.chars().all(char::is_whitespace) {
            self.has_pending_whitespace = true;
            return;
        }

        let leading = self.has_pending_whitespace || raw.starts_with(char::is_whitespace);
        push_words(&mut line.tokens, &normalize_whitespace(&raw), leading);
        self.has_pending_whitespace = raw.ends_with(char::is_whitespace);

        if let Some(span) = self.innermost_span_mut() {
            span.text.push_str(&raw);
        }
    }

    fn innermost_span_mut(&mut self) -> Option<&mut SpanData> {
        self.stack
            .iter_mut()
            .rev()
            .take_while(|frame| !matches!(frame, ElementFrame::Line))
            .find_map(|frame| match frame {
                ElementFrame::Span(span) => Some(span),
                _ => None,
            })
    }

    /// Ends the parse. Explicit sections still open are unclosed markup and
    /// are dropped; loose lines are kept if the document itself was closed.
    pub(super) fn finish(mut self) -> Vec<LyricParagraph> {
        if self.stack.is_empty() {
            self.close_implicit_section();
        }
        self.paragraphs
    }
}
