use quick_xml::{
    Error as QuickXmlErrorMain, encoding::EncodingError,
    events::attributes::AttrError as QuickXmlAttrError,
};
use thiserror::Error;

/// Errors raised while decoding a lyrics payload.
///
/// The markup parser itself never hands these to callers: it logs them and
/// returns whatever paragraphs were closed before the failure. They surface
/// through the [`response`](crate::response) envelope helpers.
#[derive(Error, Debug)]
pub enum LyricsError {
    /// Malformed markup reported by `quick-xml`.
    #[error("XML error: {0}")]
    Xml(#[from] QuickXmlErrorMain),
    /// Malformed attribute list reported by `quick-xml`.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] QuickXmlAttrError),
    /// Text could not be decoded as UTF-8.
    #[error("text encoding error: {0}")]
    Encoding(#[from] EncodingError),
    /// The raw input bytes were not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// JSON envelope could not be deserialized.
    #[error("failed to parse JSON {context}: {source}")]
    JsonParse {
        /// Underlying `serde_json` error.
        #[source]
        source: serde_json::Error,
        /// Where the failure happened.
        context: String,
    },
    /// The envelope's `data` array was empty.
    #[error("the lyrics response contained no data")]
    EmptyResponse,
    /// The envelope decoded but did not hold usable lyrics.
    #[error("invalid lyrics response: {0}")]
    InvalidResponseFormat(String),
}

impl LyricsError {
    /// Builds a `JsonParse` error with some context.
    #[must_use]
    pub fn json_parse(source: serde_json::Error, context: impl Into<String>) -> Self {
        Self::JsonParse {
            source,
            context: context.into(),
        }
    }
}
