//! # Event handlers
//!
//! Routes each pulled `quick-xml` event to the state machine.

use std::str;

use quick_xml::{
    encoding::Decoder,
    events::{BytesStart, Event},
};
use tracing::warn;

use super::{
    constants::{
        ATTR_BEGIN, ATTR_END, ATTR_SONG_PART, ATTR_SONG_PART_LEGACY, TAG_BODY, TAG_BR, TAG_DIV,
        TAG_P, TAG_SPAN, TAG_TT,
    },
    state::{ElementFrame, ParserState},
    utils::{decode_entity, get_string_attribute, get_time_attribute},
};
use crate::error::LyricsError;

pub(super) fn handle_event(
    event: &Event<'_>,
    state: &mut ParserState<'_>,
    decoder: Decoder,
) -> Result<(), LyricsError> {
    match event {
        Event::Start(e) => handle_start(e, state, decoder)?,
        Event::Empty(e) => {
            handle_start(e, state, decoder)?;
            handle_end(state);
        }
        Event::End(_) => handle_end(state),
        Event::Text(e) => {
            let text = e.xml_content()?;
            state.text_buffer.push_str(&text);
        }
        Event::CData(e) => {
            let text = e.decode()?;
            state.text_buffer.push_str(&text);
        }
        Event::GeneralRef(e) => {
            let entity_name = str::from_utf8(e.as_ref())?;
            match decode_entity(entity_name) {
                Some(c) => state.text_buffer.push(c),
                None => warn!("Ignoring unknown entity '&{entity_name};'"),
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_start(
    e: &BytesStart,
    state: &mut ParserState<'_>,
    decoder: Decoder,
) -> Result<(), LyricsError> {
    let in_line = state.line.is_some();
    let local_name = e.local_name();

    // Unrecognised inline elements (`<em>` and the like) do not break words.
    let is_boundary = match local_name.as_ref() {
        TAG_TT | TAG_BODY | TAG_DIV | TAG_P => !in_line,
        TAG_SPAN | TAG_BR => true,
        _ => false,
    };
    if is_boundary {
        state.flush_text();
    }

    let frame = match local_name.as_ref() {
        TAG_TT | TAG_BODY if !in_line => ElementFrame::Container,
        TAG_DIV if !in_line => {
            let song_part =
                get_string_attribute(e, decoder, &[ATTR_SONG_PART, ATTR_SONG_PART_LEGACY])?;
            state.open_section(song_part);
            ElementFrame::Section
        }
        TAG_P if !in_line => {
            state.open_line();
            ElementFrame::Line
        }
        TAG_SPAN => {
            let begin = get_time_attribute(e, decoder, &[ATTR_BEGIN])?;
            let end = get_time_attribute(e, decoder, &[ATTR_END])?;
            ElementFrame::Span(state.open_span(begin, end))
        }
        TAG_BR => {
            if in_line {
                state.has_pending_whitespace = true;
            }
            ElementFrame::Other
        }
        _ => ElementFrame::Other,
    };

    state.stack.push(frame);
    Ok(())
}

/// Pops the innermost open element. `quick-xml` has already checked that the
/// end tag matches it.
fn handle_end(state: &mut ParserState<'_>) {
    if !matches!(state.stack.last(), None | Some(ElementFrame::Other)) {
        state.flush_text();
    }
    let Some(frame) = state.stack.pop() else {
        return;
    };

    match frame {
        ElementFrame::Container => state.close_implicit_section(),
        ElementFrame::Section => state.close_section(),
        ElementFrame::Line => state.close_line(),
        ElementFrame::Span(span) => state.close_span(span),
        ElementFrame::Other => {}
    }
}
