//! Inline span rewriting: `code`, **bold** and *italic*.
//!
//! A line is held as a list of spans. Plain spans are still open to
//! rewriting; styled spans produced by an earlier pass are opaque, so an
//! asterisk inside a code span is never read as emphasis.

use super::style::{Color, Style, StyledSpan};

const CODE: Delimiter = Delimiter {
    marker: '`',
    width: 1,
};
const BOLD: Delimiter = Delimiter {
    marker: '*',
    width: 2,
};
const ITALIC: Delimiter = Delimiter {
    marker: '*',
    width: 1,
};

/// Styles applied to inline code spans.
pub const CODE_STYLE: &[Style] = &[Style::Color(Color::Green), Style::Reverse];

/// A symmetric delimiter made of `width` copies of `marker`.
#[derive(Debug, Clone, Copy)]
struct Delimiter {
    marker: char,
    width: usize,
}

impl Delimiter {
    fn as_string(&self) -> String {
        self.marker.to_string().repeat(self.width)
    }
}

/// Rewrite the inline markers of one line into styled spans.
///
/// Passes run in a fixed order: code, then bold, then italic. Italic is
/// skipped for the whole line when it contains `**` outside code spans, so
/// `**bold** and *italic*` keeps its single asterisks literally.
pub fn transform(line: &str) -> Vec<StyledSpan> {
    let mut spans = rewrite(vec![StyledSpan::plain(line)], CODE, CODE_STYLE);

    if contains_plain(&spans, &BOLD.as_string()) {
        spans = rewrite(spans, BOLD, &[Style::Bold]);
    } else if contains_plain(&spans, &ITALIC.as_string()) {
        spans = rewrite(spans, ITALIC, &[Style::Underline]);
    }

    merge_plain(spans)
}

fn contains_plain(spans: &[StyledSpan], needle: &str) -> bool {
    spans
        .iter()
        .any(|span| span.is_plain() && span.text.contains(needle))
}

/// Apply one delimiter pass to every plain span.
fn rewrite(spans: Vec<StyledSpan>, delim: Delimiter, styles: &[Style]) -> Vec<StyledSpan> {
    spans
        .into_iter()
        .flat_map(|span| {
            if span.is_plain() {
                scan(&span.text, delim, styles)
            } else {
                vec![span]
            }
        })
        .collect()
}

/// Left-to-right, non-overlapping replacement of `delim content delim`,
/// where content is one or more characters other than the marker.
fn scan(text: &str, delim: Delimiter, styles: &[Style]) -> Vec<StyledSpan> {
    let open = delim.as_string();
    let mut out = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while let Some(start) = rest.find(&open) {
        let after = &rest[start + open.len()..];
        let content_len = after.find(delim.marker).unwrap_or(after.len());

        if content_len > 0 && after[content_len..].starts_with(&open) {
            literal.push_str(&rest[..start]);
            if !literal.is_empty() {
                out.push(StyledSpan::plain(std::mem::take(&mut literal)));
            }
            out.push(StyledSpan::styled(&after[..content_len], styles));
            rest = &after[content_len + open.len()..];
        } else {
            // No match here; retry one character further on.
            let skip = start + delim.marker.len_utf8();
            literal.push_str(&rest[..skip]);
            rest = &rest[skip..];
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        out.push(StyledSpan::plain(literal));
    }
    out
}

/// Join neighbouring plain spans and drop empty ones.
fn merge_plain(spans: Vec<StyledSpan>) -> Vec<StyledSpan> {
    let mut merged: Vec<StyledSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        if span.text.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last) if last.is_plain() && span.is_plain() => last.text.push_str(&span.text),
            _ => merged.push(span),
        }
    }
    merged
}
