//! Line classification.
//!
//! Every input line maps to exactly one [`LineKind`]. Rules are tried in a
//! fixed order and the first match wins: header, one-line fenced code,
//! bullet, numbered item, paragraph.

/// Fence delimiter for single-line code blocks.
pub const FENCE: &str = "```";

/// Characters that start a bulleted item.
const BULLET_MARKERS: [char; 3] = ['-', '•', '*'];

/// The rule that applies to a line, borrowing the content it extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `#`-prefixed line. `level` is the raw count of leading `#`s.
    Header { level: usize, text: &'a str },
    /// A whole line wrapped in fences, e.g. ```` ```ls -la``` ````.
    FencedCode { code: &'a str },
    Bullet { body: &'a str },
    /// `prefix` is everything up to and including the first `.`.
    Numbered { prefix: &'a str, rest: &'a str },
    Paragraph,
}

/// Classify a single line.
pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();

    if trimmed.starts_with('#') {
        let level = trimmed.chars().take_while(|&c| c == '#').count();
        let text = trimmed.trim_start_matches('#').trim();
        return LineKind::Header { level, text };
    }

    if trimmed.starts_with(FENCE) && trimmed.ends_with(FENCE) {
        let code = if trimmed.len() >= FENCE.len() * 2 {
            &trimmed[FENCE.len()..trimmed.len() - FENCE.len()]
        } else {
            ""
        };
        return LineKind::FencedCode { code };
    }

    if let Some(body) = bullet_body(trimmed) {
        return LineKind::Bullet { body };
    }

    if let Some(dot) = numbered_prefix_end(line) {
        return LineKind::Numbered {
            prefix: &line[..=dot],
            rest: &line[dot + 1..],
        };
    }

    LineKind::Paragraph
}

/// Body of a bulleted item, if `trimmed` is one.
///
/// A `*` only counts as a bullet when followed by whitespace (or nothing);
/// `*emph*` and `**bold**` lines are emphasis.
fn bullet_body(trimmed: &str) -> Option<&str> {
    let mut chars = trimmed.chars();
    let marker = chars.next().filter(|c| BULLET_MARKERS.contains(c))?;
    if trimmed.starts_with("**") {
        return None;
    }
    if marker == '*' && chars.next().is_some_and(|c| !c.is_whitespace()) {
        return None;
    }
    Some(trimmed[marker.len_utf8()..].trim())
}

/// Byte offset of the `.` ending a `^\s*\d+\.` prefix.
fn numbered_prefix_end(line: &str) -> Option<usize> {
    let digits_start = line.len() - line.trim_start().len();
    let rest = &line[digits_start..];
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || rest.as_bytes().get(digits) != Some(&b'.') {
        return None;
    }
    Some(digits_start + digits)
}
