//! # Timed lyrics parser
//!
//! Turns Apple Music style TTML (`tt → body → div → p → span`) into
//! [`LyricParagraph`]s. It is not a general TTML subtitle parser: heads,
//! styling and regions are ignored.
//!
//! Parsing is best effort. Malformed markup stops the parse and the
//! paragraphs closed before the failure are returned; unknown elements and
//! attributes are skipped; bad timecodes resolve to `0`.

mod constants;
mod handlers;
mod state;
mod tokens;
mod utils;

use std::str;

use quick_xml::{Reader, events::Event};
use tracing::{debug, warn};

use self::state::ParserState;
use crate::{config::ParsingOptions, model::LyricParagraph};

pub use self::tokens::should_suppress_space;
pub use self::utils::{normalize_whitespace, parse_timecode};

/// A reusable lyrics parser.
///
/// Every call to [`parse`](Self::parse) starts from a clean state, so one
/// instance can parse any number of documents. The parser only holds its
/// options; separate instances can be used from separate threads.
#[derive(Debug, Clone, Default)]
pub struct LyricsParser {
    options: ParsingOptions,
}

impl LyricsParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_options(options: ParsingOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &ParsingOptions {
        &self.options
    }

    /// Parses a markup string into paragraphs in document order.
    ///
    /// Never fails: an empty `Vec` means no paragraph could be closed.
    pub fn parse(&mut self, markup: &str) -> Vec<LyricParagraph> {
        parse_lyrics_with_options(markup, &self.options)
    }

    /// Like [`parse`](Self::parse), for raw bytes. Input that is not UTF-8
    /// yields no paragraphs.
    pub fn parse_bytes(&mut self, bytes: &[u8]) -> Vec<LyricParagraph> {
        match str::from_utf8(bytes) {
            Ok(markup) => self.parse(markup),
            Err(e) => {
                warn!("Lyrics markup is not valid UTF-8: {e}");
                Vec::new()
            }
        }
    }
}

/// Parses lyrics markup with default options.
///
/// ```
/// let ttml = r#"<tt><body><div itunes:songPart="Verse">
///   <p><span begin="0.5" end="0.9">We</span> <span begin="0.9" end="1.2">rise</span></p>
/// </div></body></tt>"#;
///
/// let paragraphs = ttml_lyrics::parse_lyrics(ttml);
/// assert_eq!(paragraphs[0].song_part.as_deref(), Some("Verse"));
/// assert_eq!(paragraphs[0].lines[0].text, "We rise");
/// assert_eq!(paragraphs[0].lines[0].segments.len(), 2);
/// ```
#[must_use]
pub fn parse_lyrics(markup: &str) -> Vec<LyricParagraph> {
    parse_lyrics_with_options(markup, &ParsingOptions::default())
}

/// Parses lyrics markup with the given options.
#[must_use]
pub fn parse_lyrics_with_options(markup: &str, options: &ParsingOptions) -> Vec<LyricParagraph> {
    let markup = markup.strip_prefix('\u{feff}').unwrap_or(markup);

    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);
    reader.config_mut().expand_empty_elements = true;

    let mut state = ParserState::new(options);

    loop {
        let event = match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => event,
            Err(e) => {
                warn!(
                    "Lyrics markup error at position {} while {:?}: {e}. Keeping {} closed paragraphs",
                    reader.error_position(),
                    state.phase(),
                    state.paragraphs.len()
                );
                return state.paragraphs;
            }
        };

        if let Err(e) = handlers::handle_event(&event, &mut state, reader.decoder()) {
            warn!(
                "Failed to handle lyrics markup near position {}: {e}. Keeping {} closed paragraphs",
                reader.buffer_position(),
                state.paragraphs.len()
            );
            return state.paragraphs;
        }
    }

    let paragraphs = state.finish();
    debug!("Parsed {} lyric paragraphs", paragraphs.len());
    paragraphs
}
