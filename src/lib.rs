//! # ttml_lyrics: timed lyrics from Apple Music style TTML
//!
//! Parses the TTML lyrics served by music catalogs into paragraphs (song
//! sections), lines and word-level segments with start and end times in
//! seconds, ready for karaoke style highlighting.
//!
//! The parser streams the document with `quick-xml`, rebuilds the spacing
//! between words that the markup leaves out, and re-joins French elisions
//! that some sources split into two spans (`o` + `ù` → `où`).
//!
//! ```rust
//! use ttml_lyrics::LyricsParser;
//!
//! let ttml = r#"
//! <tt xmlns="http://www.w3.org/ns/ttml" xmlns:itunes="http://music.apple.com/lyric-ttml-internal">
//!   <body>
//!     <div itunes:songPart="Verse">
//!       <p><span begin="0.5" end="0.9">We</span><span begin="0.9" end="1.2">rise</span></p>
//!     </div>
//!   </body>
//! </tt>"#;
//!
//! let mut parser = LyricsParser::new();
//! let paragraphs = parser.parse(ttml);
//!
//! let line = &paragraphs[0].lines[0];
//! assert_eq!(line.text, "We rise");
//! assert_eq!(line.segments[1].text, "rise");
//! assert!((line.segments[1].start_time - 0.9).abs() < 1e-9);
//! ```
//!
//! Parsing never fails. Malformed markup yields the paragraphs that were
//! closed before the error, and unparsable timecodes resolve to `0`.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod response;

pub use config::{MissingEndPolicy, ParsingOptions};
pub use error::LyricsError;
pub use model::{LyricLine, LyricParagraph, LyricSegment};
pub use parser::{
    LyricsParser, normalize_whitespace, parse_lyrics, parse_lyrics_with_options, parse_timecode,
    should_suppress_space,
};
pub use response::LyricsResponse;
