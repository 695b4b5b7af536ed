//! Terminal rendering for the lightweight markdown found in model replies.
//!
//! Supported, one line at a time:
//!
//! | Input | Output |
//! |-------|--------|
//! | `# Title` | blank, `=====`, `TITLE`, `=====` in cyan + bold |
//! | `## Section` | blank, text in yellow + bold, `-` rule in yellow |
//! | `### Deeper` (and below) | blank, text in magenta + bold |
//! | ```` ```cmd``` ```` on one line | `  📝 cmd` in green + reverse |
//! | `- item`, `• item`, `* item` | blue bullet glyph + body |
//! | `1. item` | `1.` in blue + bold + unstyled remainder |
//! | `` `code` `` / `**bold**` / `*italic*` | green + reverse / bold / underline |
//!
//! Paragraph lines wider than the configured width are wrapped with a
//! hanging indent. Rendering is a pure function of its input: nothing is
//! remembered between calls, and malformed markers are left as literal
//! text.

pub mod classify;
pub mod inline;
pub mod style;
pub mod wrap;

use serde::Deserialize;

use classify::LineKind;
pub use style::{Color, RenderedLine, Style, StyledSpan};

/// Marker printed in front of one-line code blocks.
const CODE_ICON: &str = "📝";

/// Glyph used for bulleted items.
const BULLET: &str = "  • ";

const H1_STYLE: &[Style] = &[Style::Color(Color::Cyan), Style::Bold];
const H2_STYLE: &[Style] = &[Style::Color(Color::Yellow), Style::Bold];
const H2_RULE_STYLE: &[Style] = &[Style::Color(Color::Yellow)];
const H3_STYLE: &[Style] = &[Style::Color(Color::Magenta), Style::Bold];
const LIST_MARKER_STYLE: &[Style] = &[Style::Color(Color::Blue), Style::Bold];

/// Layout settings, loadable from the `[render]` table of `.aeros.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RenderOptions {
    /// Paragraph lines wider than this many columns are wrapped.
    #[serde(default = "default_width")]
    pub width: usize,
    /// Hanging indent for wrapped continuation lines.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            indent: default_indent(),
        }
    }
}

fn default_width() -> usize {
    80
}

fn default_indent() -> usize {
    2
}

/// Stateless markdown-to-terminal renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render `text` to a string ready to be written to a terminal.
    pub fn render(&self, text: &str) -> String {
        self.render_lines(text)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render `text` to styled rows without painting them.
    pub fn render_lines(&self, text: &str) -> Vec<RenderedLine> {
        text.split('\n')
            .flat_map(|line| self.render_line(line))
            .collect()
    }

    fn render_line(&self, line: &str) -> Vec<RenderedLine> {
        match classify::classify(line) {
            LineKind::Header { level, text } => header(level, text),
            LineKind::FencedCode { code } => vec![RenderedLine::styled(
                format!("  {CODE_ICON} {code}"),
                inline::CODE_STYLE,
            )],
            LineKind::Bullet { body } => {
                let mut spans = vec![StyledSpan::styled(BULLET, LIST_MARKER_STYLE)];
                spans.extend(inline::transform(body));
                vec![RenderedLine::new(spans)]
            }
            LineKind::Numbered { prefix, rest } => {
                let mut spans = vec![StyledSpan::styled(prefix, LIST_MARKER_STYLE)];
                if !rest.is_empty() {
                    spans.push(StyledSpan::plain(rest));
                }
                vec![RenderedLine::new(spans)]
            }
            LineKind::Paragraph => wrap::wrap(
                &inline::transform(line),
                self.options.width,
                self.options.indent,
            ),
        }
    }
}

/// Header rows, always preceded by a blank separator row.
fn header(level: usize, text: &str) -> Vec<RenderedLine> {
    let len = text.chars().count();
    match level {
        1 => {
            let rule = "=".repeat(len);
            vec![
                RenderedLine::blank(),
                RenderedLine::styled(rule.clone(), H1_STYLE),
                RenderedLine::styled(text.to_uppercase(), H1_STYLE),
                RenderedLine::styled(rule, H1_STYLE),
            ]
        }
        2 => vec![
            RenderedLine::blank(),
            RenderedLine::styled(text, H2_STYLE),
            RenderedLine::styled("-".repeat(len), H2_RULE_STYLE),
        ],
        _ => vec![RenderedLine::blank(), RenderedLine::styled(text, H3_STYLE)],
    }
}

/// Render `text` with the default 80-column layout.
pub fn render(text: &str) -> String {
    Renderer::default().render(text)
}

/// Render `text` to styled rows with the default layout.
pub fn render_lines(text: &str) -> Vec<RenderedLine> {
    Renderer::default().render_lines(text)
}
