//! # Catalog response envelope
//!
//! The catalog serves lyrics as JSON with the TTML document embedded in
//! `data[0].attributes.ttml`. Fetching is the caller's job; this module only
//! decodes the envelope and hands the markup to the parser.

use serde::{Deserialize, Serialize};

use crate::{error::LyricsError, model::LyricParagraph, parser::parse_lyrics};

/// Top-level JSON object returned by the lyrics endpoint.
#[derive(Serialize, Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LyricsResponse {
    pub data: Vec<LyricsData>,
}

/// One lyrics resource.
#[derive(Serialize, Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LyricsData {
    pub id: String,
    /// `"syllable-lyrics"` for word-timed lyrics, `"lyrics"` for line-timed.
    #[serde(rename = "type")]
    pub data_type: String,
    pub attributes: LyricsAttributes,
}

#[derive(Serialize, Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LyricsAttributes {
    /// The embedded TTML document.
    #[serde(alias = "ttmlLocalizations")]
    pub ttml: String,
    #[serde(default)]
    pub play_params: Option<PlayParams>,
}

#[derive(Serialize, Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayParams {
    pub id: String,
    pub kind: String,
    pub catalog_id: String,
    pub display_type: i64,
}

impl LyricsResponse {
    /// Decodes the JSON envelope.
    ///
    /// # Errors
    ///
    /// Returns [`LyricsError::JsonParse`] when `json` does not match the
    /// envelope structure.
    pub fn from_json(json: &str) -> Result<Self, LyricsError> {
        serde_json::from_str(json)
            .map_err(|e| LyricsError::json_parse(e, "from the lyrics response envelope"))
    }

    /// The markup of the first lyrics resource.
    ///
    /// # Errors
    ///
    /// [`LyricsError::EmptyResponse`] when `data` is empty,
    /// [`LyricsError::InvalidResponseFormat`] when the markup is blank.
    pub fn ttml(&self) -> Result<&str, LyricsError> {
        let item = self.data.first().ok_or(LyricsError::EmptyResponse)?;
        let ttml = item.attributes.ttml.as_str();
        if ttml.trim().is_empty() {
            return Err(LyricsError::InvalidResponseFormat(format!(
                "lyrics resource '{}' has no TTML",
                item.id
            )));
        }
        Ok(ttml)
    }

    /// Parses the first lyrics resource into paragraphs.
    ///
    /// # Errors
    ///
    /// Same as [`ttml`](Self::ttml). Markup problems do not error; they only
    /// shorten the result.
    pub fn paragraphs(&self) -> Result<Vec<LyricParagraph>, LyricsError> {
        self.ttml().map(parse_lyrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &str = r#"{
        "data": [{
            "id": "1234567890",
            "type": "syllable-lyrics",
            "attributes": {
                "ttml": "<tt><body><div itunes:songPart=\"Verse\"><p><span begin=\"15.417\" end=\"15.671\">I</span></p></div></body></tt>",
                "playParams": {
                    "id": "1234567890",
                    "kind": "lyric",
                    "catalogId": "1234567890",
                    "displayType": 3
                }
            }
        }]
    }"#;

    #[test]
    fn test_decode_envelope() {
        let response = LyricsResponse::from_json(ENVELOPE).unwrap();
        let item = &response.data[0];
        assert_eq!(item.data_type, "syllable-lyrics");
        let play_params = item.attributes.play_params.as_ref().unwrap();
        assert_eq!(play_params.catalog_id, "1234567890");
        assert_eq!(play_params.display_type, 3);
        assert!(response.ttml().unwrap().starts_with("<tt>"));
    }

    #[test]
    fn test_paragraphs_from_envelope() {
        let paragraphs = LyricsResponse::from_json(ENVELOPE)
            .unwrap()
            .paragraphs()
            .unwrap();
        let segment = &paragraphs[0].lines[0].segments[0];
        assert_eq!(segment.text, "I");
        assert!((segment.start_time - 15.417).abs() < 1e-4);
        assert!((segment.end_time - 15.671).abs() < 1e-4);
    }

    #[test]
    fn test_empty_and_invalid_envelopes() {
        let empty = LyricsResponse::from_json(r#"{"data": []}"#).unwrap();
        assert!(matches!(empty.ttml(), Err(LyricsError::EmptyResponse)));

        let blank = LyricsResponse::from_json(
            r#"{"data": [{"id": "1", "type": "lyrics", "attributes": {"ttml": "  "}}]}"#,
        )
        .unwrap();
        assert!(matches!(
            blank.paragraphs(),
            Err(LyricsError::InvalidResponseFormat(_))
        ));

        assert!(matches!(
            LyricsResponse::from_json("{\"data\": 5}"),
            Err(LyricsError::JsonParse { .. })
        ));
    }
}
