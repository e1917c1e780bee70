//! Element and attribute names recognised by the parser.
//!
//! Elements are matched by local name, so `tt:p` and `p` are the same thing.
//! Attributes are matched by local name as well.

pub(super) const TAG_TT: &[u8] = b"tt";
pub(super) const TAG_BODY: &[u8] = b"body";
pub(super) const TAG_DIV: &[u8] = b"div";
pub(super) const TAG_P: &[u8] = b"p";
pub(super) const TAG_SPAN: &[u8] = b"span";
pub(super) const TAG_BR: &[u8] = b"br";

/// `itunes:songPart`
pub(super) const ATTR_SONG_PART: &[u8] = b"songPart";
/// `itunes:song-part`, the older spelling.
pub(super) const ATTR_SONG_PART_LEGACY: &[u8] = b"song-part";
pub(super) const ATTR_BEGIN: &[u8] = b"begin";
pub(super) const ATTR_END: &[u8] = b"end";
