//! Word wrapping over styled spans.
//!
//! `textwrap` picks the break points on the visible text of a line. The
//! resulting rows are cut back into spans so every piece keeps the styles
//! of the span it came from, which re-applies styling on each output row.

use std::ops::Range;

use textwrap::core::break_words;
use textwrap::word_splitters::split_words;
use textwrap::wrap_algorithms::wrap_first_fit;
use textwrap::{WordSeparator, WordSplitter};

use super::style::{char_width, RenderedLine, StyledSpan};

/// Columns between tab stops.
const TAB_WIDTH: usize = 8;

/// One character tagged with the index of the span it belongs to.
#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    span: usize,
}

/// Reflow `spans` to `width` columns.
///
/// A line that already fits is returned untouched as a single row.
/// Continuation rows start with `indent` spaces, which count toward the
/// width. Words break at spaces or after hyphens, and words wider than a
/// row are split. Whitespace is dropped at row boundaries except for the
/// leading indentation of the first row.
pub fn wrap(spans: &[StyledSpan], width: usize, indent: usize) -> Vec<RenderedLine> {
    let total: usize = spans.iter().map(StyledSpan::width).sum();
    if total <= width {
        return vec![RenderedLine::new(spans.to_vec())];
    }
    let width = width.max(indent.saturating_add(1));

    let cells = to_cells(spans);
    let text: String = cells.iter().map(|cell| cell.ch).collect();
    let offsets: Vec<usize> = cells
        .iter()
        .scan(0, |pos, cell| {
            let at = *pos;
            *pos += cell.ch.len_utf8();
            Some(at)
        })
        .collect();

    let rows: Vec<RenderedLine> = row_ranges(&text, width, indent)
        .into_iter()
        .enumerate()
        .filter(|(_, range)| !range.is_empty())
        .map(|(n, range)| {
            let first = offsets.partition_point(|&at| at < range.start);
            let last = offsets.partition_point(|&at| at < range.end);
            build_row(spans, &cells[first..last], if n == 0 { 0 } else { indent })
        })
        .collect();

    if rows.is_empty() {
        vec![RenderedLine::blank()]
    } else {
        rows
    }
}

/// Flatten spans into cells. Tabs expand to the next tab stop and other
/// ASCII whitespace becomes a plain space.
fn to_cells(spans: &[StyledSpan]) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut column = 0;
    for (span, s) in spans.iter().enumerate() {
        for ch in s.text.chars() {
            if ch == '\t' {
                let stop = (column / TAB_WIDTH + 1) * TAB_WIDTH;
                cells.extend(std::iter::repeat(Cell { ch: ' ', span }).take(stop - column));
                column = stop;
            } else {
                let ch = if ch.is_ascii_whitespace() { ' ' } else { ch };
                column += char_width(ch);
                cells.push(Cell { ch, span });
            }
        }
    }
    cells
}

/// Byte ranges of `text`, one per output row, without trailing whitespace.
fn row_ranges(text: &str, width: usize, indent: usize) -> Vec<Range<usize>> {
    let splitter = WordSplitter::HyphenSplitter;
    let words = split_words(WordSeparator::AsciiSpace.find_words(text), &splitter);
    let words = break_words(words, width - indent);

    // Words tile the text, so each start follows from the lengths before it.
    let starts: Vec<usize> = words
        .iter()
        .scan(0, |pos, word| {
            let at = *pos;
            *pos += word.word.len() + word.whitespace.len();
            Some(at)
        })
        .collect();

    let line_widths = [width as f64, (width - indent) as f64];
    let mut ranges = Vec::new();
    let mut index = 0;
    for line in wrap_first_fit(&words, &line_widths) {
        if let Some(last) = line.last() {
            let end = starts[index + line.len() - 1] + last.word.len();
            ranges.push(starts[index]..end);
        }
        index += line.len();
    }
    ranges
}

/// Regroup the cells of one row into spans, prefixed by the hanging indent.
fn build_row(spans: &[StyledSpan], row: &[Cell], indent: usize) -> RenderedLine {
    let mut out: Vec<StyledSpan> = Vec::new();
    if indent > 0 {
        out.push(StyledSpan::plain(" ".repeat(indent)));
    }

    let mut current: Option<(usize, String)> = None;
    for cell in row {
        match current.as_mut() {
            Some((span, text)) if *span == cell.span => text.push(cell.ch),
            _ => {
                if let Some((span, text)) = current.take() {
                    out.push(StyledSpan::styled(text, &spans[span].styles));
                }
                current = Some((cell.span, cell.ch.to_string()));
            }
        }
    }
    if let Some((span, text)) = current {
        out.push(StyledSpan::styled(text, &spans[span].styles));
    }

    RenderedLine::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::style::Style;

    fn texts(rows: &[RenderedLine]) -> Vec<String> {
        rows.iter().map(RenderedLine::text).collect()
    }

    #[test]
    fn short_line_is_untouched() {
        let spans = vec![StyledSpan::plain("   leading and trailing   ")];
        let rows = wrap(&spans, 80, 2);
        assert_eq!(texts(&rows), vec!["   leading and trailing   "]);
    }

    #[test]
    fn exactly_at_width_is_untouched() {
        let line = "x".repeat(80);
        let rows = wrap(&[StyledSpan::plain(line.clone())], 80, 2);
        assert_eq!(texts(&rows), vec![line]);
    }

    #[test]
    fn long_word_is_split_with_hanging_indent() {
        let rows = wrap(&[StyledSpan::plain("a".repeat(100))], 80, 2);
        assert_eq!(
            texts(&rows),
            vec!["a".repeat(78), format!("  {}", "a".repeat(22))]
        );
    }

    #[test]
    fn words_wrap_at_spaces() {
        let words = vec!["word"; 30].join(" ");
        let rows = wrap(&[StyledSpan::plain(words)], 80, 2);
        assert!(rows.len() >= 2);
        for row in &rows {
            assert!(row.width() <= 80, "row too wide: {:?}", row.text());
            assert!(!row.text().ends_with(' '));
        }
        assert!(rows[1].text().starts_with("  word"));
        assert!(!rows[1].text().starts_with("   "));
    }

    #[test]
    fn no_text_is_lost() {
        let words: Vec<String> = (0..40).map(|n| format!("w{n}")).collect();
        let line = words.join(" ");
        let rows = wrap(&[StyledSpan::plain(line)], 30, 2);
        let joined: Vec<String> = rows
            .iter()
            .flat_map(|r| {
                r.text()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        assert_eq!(joined, words);
    }

    #[test]
    fn styles_survive_the_break() {
        let spans = vec![
            StyledSpan::plain("x".repeat(75) + " "),
            StyledSpan::styled("bold words here", &[Style::Bold]),
        ];
        let rows = wrap(&spans, 80, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text(), format!("{} bold", "x".repeat(75)));
        assert_eq!(rows[0].spans[1], StyledSpan::styled("bold", &[Style::Bold]));
        assert_eq!(rows[1].spans[0], StyledSpan::plain("  "));
        assert_eq!(
            rows[1].spans[1],
            StyledSpan::styled("words here", &[Style::Bold])
        );
    }

    #[test]
    fn width_ignores_escape_sequences() {
        colored::control::set_override(true);
        let spans = vec![StyledSpan::styled("y".repeat(79), &[Style::Underline])];
        let rows = wrap(&spans, 80, 2);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].to_string().len() > 80);
    }

    #[test]
    fn wide_characters_count_double() {
        let rows = wrap(&[StyledSpan::plain("日".repeat(50))], 80, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].width(), 78);
        assert_eq!(rows[1].width(), 2 + 22);
    }

    #[test]
    fn tiny_width_still_makes_progress() {
        let rows = wrap(&[StyledSpan::plain("abcdef")], 1, 2);
        // Width is clamped to indent + 1.
        assert_eq!(texts(&rows), vec!["abc", "  d", "  e", "  f"]);
    }

    #[test]
    fn breaks_after_hyphens() {
        let line = format!("{} well-known-thing", "x".repeat(70));
        let rows = wrap(&[StyledSpan::plain(line)], 80, 2);
        assert_eq!(
            texts(&rows),
            vec![format!("{} well-", "x".repeat(70)), "  known-thing".to_string()]
        );
    }

    #[test]
    fn tabs_expand_to_tab_stops() {
        let line = format!("a\tb{}", " y".repeat(50));
        let rows = wrap(&[StyledSpan::plain(line)], 80, 2);
        assert!(rows.len() >= 2);
        assert!(rows[0].text().starts_with("a       b y"));
        assert!(!rows[0].text().contains('\t'));
    }

    #[test]
    fn fitting_line_with_carriage_return_is_untouched() {
        let line = format!("{}\r", "x".repeat(80));
        let rows = wrap(&[StyledSpan::plain(line.clone())], 80, 2);
        assert_eq!(texts(&rows), vec![line]);
    }

    #[test]
    fn oversized_indent_does_not_overflow() {
        let line = "one two three four five";
        let rows = wrap(&[StyledSpan::plain(line)], 10, usize::MAX);
        assert_eq!(texts(&rows), vec![line]);
    }

    #[test]
    fn whitespace_only_line_becomes_one_blank_row() {
        let rows = wrap(&[StyledSpan::plain(" ".repeat(100))], 80, 2);
        assert_eq!(texts(&rows), vec![""]);
    }
}
