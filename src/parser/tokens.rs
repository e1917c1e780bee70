//! # Line text assembly
//!
//! Lyrics markup is inconsistent about where word-separating whitespace
//! lives: sometimes between tags, sometimes inside a span, sometimes nowhere
//! at all. The parser therefore collects normalized words as [`LineToken`]s
//! and decides spacing only when the line is assembled.

/// Characters that attach to the preceding word without a space.
const CLOSING_PUNCTUATION: &[char] = &[',', '.', '!', '?', ':', ';', ')', ']', '}'];

/// Characters after which a word attaches without a space, unless the source
/// had whitespace there.
const OPENING_BRACKETS: &[char] = &['(', '[', '{'];

/// Accented Latin letters that continue an apostrophized elision, e.g. the
/// `ù` that some sources split off from `où`.
const ACCENTED_START_CHARS: &[char] = &[
    'à', 'â', 'ä', 'á', 'é', 'è', 'ê', 'ë', 'í', 'î', 'ï', 'ó', 'ô', 'ö', 'ò', 'ú', 'ù', 'û', 'ü',
    'ñ', 'ç', 'œ', 'æ', 'ÿ', 'À', 'Â', 'Ä', 'Á', 'É', 'È', 'Ê', 'Ë', 'Í', 'Î', 'Ï', 'Ó', 'Ô', 'Ö',
    'Ò', 'Ú', 'Ù', 'Û', 'Ü', 'Ñ', 'Ç', 'Œ', 'Æ', 'Ÿ',
];

/// A normalized word waiting to be joined into a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineToken {
    pub(crate) text: String,
    /// The source had whitespace right before this word.
    pub(crate) needs_leading_space: bool,
}

impl LineToken {
    pub(crate) fn new(text: impl Into<String>, needs_leading_space: bool) -> Self {
        Self {
            text: text.into(),
            needs_leading_space,
        }
    }
}

/// Whether `next` should be glued to `previous` with no space in between.
///
/// True when `next` starts with closing punctuation (`suis` + `,`), or when
/// `previous` is a single ASCII letter and `next` a single accented letter
/// (`o` + `ù` → `où`, `l` + `à` → `là`).
#[must_use]
pub fn should_suppress_space(previous: &str, next: &str) -> bool {
    starts_with_closing_punctuation(next) || is_elision_pair(previous, next)
}

fn starts_with_closing_punctuation(token: &str) -> bool {
    token.starts_with(CLOSING_PUNCTUATION)
}

fn is_elision_pair(previous: &str, next: &str) -> bool {
    single_char(previous).is_some_and(|c| c.is_ascii_alphabetic())
        && single_char(next).is_some_and(is_accented_start_char)
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

pub(crate) fn is_accented_start_char(c: char) -> bool {
    ACCENTED_START_CHARS.contains(&c)
}

/// Joins tokens into display text.
///
/// The first token is taken verbatim, every later one gets a single leading
/// space unless [`should_suppress_space`] says otherwise, or it directly
/// follows an opening bracket with no whitespace in the source.
pub(crate) fn assemble_text(tokens: &[LineToken], merge_elisions: bool) -> String {
    let mut output = String::new();
    let mut previous: Option<&LineToken> = None;

    for token in tokens {
        if let Some(prev) = previous {
            let glued = if merge_elisions {
                should_suppress_space(&prev.text, &token.text)
            } else {
                starts_with_closing_punctuation(&token.text)
            };
            let suppress =
                glued || (!token.needs_leading_space && prev.text.ends_with(OPENING_BRACKETS));

            if !suppress {
                output.push(' ');
            }
        }
        output.push_str(&token.text);
        previous = Some(token);
    }

    output
}

/// Joins a span's own normalized words into segment text.
///
/// Only elisions are merged here; punctuation and brackets keep whatever
/// spacing the span had.
pub(crate) fn join_span_words(normalized: &str, merge_elisions: bool) -> String {
    let mut output = String::with_capacity(normalized.len());
    let mut previous: Option<&str> = None;

    for word in normalized.split(' ').filter(|w| !w.is_empty()) {
        if let Some(prev) = previous
            && !(merge_elisions && is_elision_pair(prev, word))
        {
            output.push(' ');
        }
        output.push_str(word);
        previous = Some(word);
    }

    output
}

/// Whether `text` holds nothing but brackets, as the direct text of a
/// background wrapper span around its child spans does.
pub(crate) fn is_bracket_only(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c == ' ' || OPENING_BRACKETS.contains(&c) || matches!(c, ')' | ']' | '}'))
}

/// Splits an already normalized chunk into word tokens.
///
/// `leading_space` only applies to the first word; later words were
/// separated by whitespace in the chunk itself.
pub(crate) fn push_words(tokens: &mut Vec<LineToken>, normalized: &str, leading_space: bool) {
    for (i, word) in normalized.split(' ').filter(|w| !w.is_empty()).enumerate() {
        let needs_leading_space = if i == 0 {
            leading_space && !tokens.is_empty()
        } else {
            true
        };
        tokens.push(LineToken::new(word, needs_leading_space));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble_words(words: &[&str]) -> String {
        let tokens: Vec<LineToken> = words.iter().map(|w| LineToken::new(*w, false)).collect();
        assemble_text(&tokens, true)
    }

    #[test]
    fn test_should_suppress_space() {
        assert!(should_suppress_space("suis", ","));
        assert!(should_suppress_space("oh", "!"));
        assert!(should_suppress_space("yeah", ")"));
        assert!(should_suppress_space("o", "ù"));
        assert!(should_suppress_space("l", "à"));
        assert!(should_suppress_space("L", "À"));

        assert!(!should_suppress_space("vais", "à"));
        assert!(!should_suppress_space("o", "ùe"));
        assert!(!should_suppress_space("é", "à"));
        assert!(!should_suppress_space("o", "u"));
        assert!(!should_suppress_space("we", "rise"));
        assert!(!should_suppress_space("", "à"));
    }

    #[test]
    fn test_assemble_text() {
        assert_eq!(assemble_words(&["We", "rise"]), "We rise");
        assert_eq!(assemble_words(&["suis", ",", "ni"]), "suis, ni");
        assert_eq!(assemble_words(&["ni", "o", "ù", "je"]), "ni où je");
        assert_eq!(assemble_words(&["vais", "à", "paris"]), "vais à paris");
        assert_eq!(assemble_words(&["c'est", "l", "à"]), "c'est là");
        assert_eq!(assemble_words(&[]), "");
    }

    #[test]
    fn test_assemble_text_respects_source_space_after_bracket() {
        let tokens = vec![LineToken::new("(", false), LineToken::new("oh", false)];
        assert_eq!(assemble_text(&tokens, true), "(oh");

        let tokens = vec![LineToken::new("(", false), LineToken::new("oh", true)];
        assert_eq!(assemble_text(&tokens, true), "( oh");
    }

    #[test]
    fn test_assemble_text_without_elision_merge() {
        let tokens = vec![
            LineToken::new("o", false),
            LineToken::new("ù", false),
            LineToken::new(",", false),
        ];
        assert_eq!(assemble_text(&tokens, false), "o ù,");
    }

    #[test]
    fn test_join_span_words_only_merges_elisions() {
        assert_eq!(join_span_words("o ù", true), "où");
        assert_eq!(join_span_words("l à bas", true), "là bas");
        assert_eq!(join_span_words("o ù", false), "o ù");
        assert_eq!(join_span_words("hey !", true), "hey !");
        assert_eq!(join_span_words("( oh )", true), "( oh )");
        assert_eq!(join_span_words("", true), "");
    }

    #[test]
    fn test_is_bracket_only() {
        assert!(is_bracket_only("()"));
        assert!(is_bracket_only("( )"));
        assert!(is_bracket_only("]"));
        assert!(!is_bracket_only("(oh"));
        assert!(!is_bracket_only("!"));
        assert!(!is_bracket_only(""));
    }

    #[test]
    fn test_push_words() {
        let mut tokens = Vec::new();
        push_words(&mut tokens, "hello world", true);
        push_words(&mut tokens, "again", true);
        push_words(&mut tokens, "glued", false);
        assert_eq!(
            tokens,
            vec![
                LineToken::new("hello", false),
                LineToken::new("world", true),
                LineToken::new("again", true),
                LineToken::new("glued", false),
            ]
        );
    }
}
