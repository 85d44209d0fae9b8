//! Word/separator tokenizer
//!
//! Splits text into typed spans that borrow from the input, so joining the
//! spans back together reproduces the input exactly.
//!
//! A word is a run of letters that may also contain the connector characters
//! `-` and `.`. Connectors continue a word but never start one, and a
//! trailing run of connectors is handed back to the following separator:
//! `"Dr."` becomes the word `"Dr"` and the separator `"."`.

/// Typed slice of the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    /// Candidate for redaction
    Word(&'a str),
    /// Everything else, preserved verbatim
    Separator(&'a str),
}

impl<'a> Span<'a> {
    /// The underlying text
    pub fn as_str(&self) -> &'a str {
        match self {
            Span::Word(s) | Span::Separator(s) => s,
        }
    }
}

fn is_connector(c: char) -> bool {
    c == '-' || c == '.'
}

/// Single left-to-right pass over `text`
pub fn tokenize(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut word_start: Option<usize> = None;
    let mut connector_start: Option<usize> = None;
    let mut separator_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        let in_word = word_start.is_some();

        if c.is_alphabetic() || (in_word && is_connector(c)) {
            if !in_word {
                if let Some(start) = separator_start.take() {
                    spans.push(Span::Separator(&text[start..i]));
                }
                word_start = Some(i);
            }

            if c.is_alphabetic() {
                connector_start = None;
            } else if connector_start.is_none() {
                connector_start = Some(i);
            }
        } else {
            if let Some(start) = word_start.take() {
                separator_start = finish_word(text, start, connector_start.take(), i, &mut spans);
            }
            separator_start.get_or_insert(i);
        }
    }

    if let Some(start) = word_start {
        separator_start = finish_word(text, start, connector_start, text.len(), &mut spans);
    }
    if let Some(start) = separator_start {
        spans.push(Span::Separator(&text[start..]));
    }

    spans
}

/// Push the word without its trailing connectors and return where the
/// pending separator starts, if the word left any connectors behind
fn finish_word<'a>(
    text: &'a str,
    start: usize,
    connector_start: Option<usize>,
    end: usize,
    spans: &mut Vec<Span<'a>>,
) -> Option<usize> {
    let cut = connector_start.unwrap_or(end);
    spans.push(Span::Word(&text[start..cut]));
    (cut < end).then_some(cut)
}
