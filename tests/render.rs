//! End-to-end checks of the public rendering API on realistic replies.

use aeros::markdown::{self, Color, RenderOptions, Renderer, Style, StyledSpan};

const REPLY: &str = "# Rust Ownership

Rust manages memory through **ownership**, a set of rules checked at compile time. There is no garbage collector and no manual freeing.

## Key rules
- Each value has a single *owner*
- When the owner goes out of scope, the value is dropped
* Values can be **borrowed** with `&` or `&mut`

### Example
```let s = String::from(\"hi\");```

1. Create a value
2. Move it with `let t = s;`

That's it!";

#[test]
fn realistic_reply_layout() {
    let lines = markdown::render_lines(REPLY);
    let text: Vec<String> = lines.iter().map(|l| l.text()).collect();

    assert_eq!(text[0], "");
    assert_eq!(text[1], "=".repeat("Rust Ownership".len()));
    assert_eq!(text[2], "RUST OWNERSHIP");
    assert_eq!(text[3], text[1]);

    assert!(text.contains(&"  • Each value has a single owner".to_string()));
    assert!(text.contains(&"  • Values can be borrowed with & or &mut".to_string()));
    assert!(text.contains(&"  📝 let s = String::from(\"hi\");".to_string()));
    assert!(text.contains(&"2. Move it with `let t = s;`".to_string()));
    assert_eq!(text.last().map(String::as_str), Some("That's it!"));

    for line in &lines {
        assert!(line.width() <= 80, "too wide: {:?}", line.text());
    }
}

#[test]
fn long_paragraph_is_wrapped_with_hanging_indent() {
    let lines = markdown::render_lines(REPLY);
    let paragraph: Vec<String> = lines
        .iter()
        .map(|l| l.text())
        .skip_while(|t| !t.starts_with("Rust manages"))
        .take_while(|t| !t.is_empty())
        .collect();

    assert_eq!(paragraph.len(), 2);
    assert!(paragraph[1].starts_with("  "));
    assert!(!paragraph[1].starts_with("   "));

    let bold = StyledSpan::styled("ownership", &[Style::Bold]);
    assert!(lines.iter().any(|l| l.spans.contains(&bold)));
}

#[test]
fn painted_output_keeps_line_count() {
    colored::control::set_override(true);
    let rendered = markdown::render(REPLY);
    let rows = markdown::render_lines(REPLY).len();
    assert_eq!(rendered.split('\n').count(), rows);
    assert!(!rendered.contains("**"));
}

#[test]
fn narrow_renderer() {
    let renderer = Renderer::new(RenderOptions {
        width: 40,
        indent: 2,
    });
    let lines = renderer.render_lines(&"lorem ipsum ".repeat(10));
    assert!(lines.len() >= 3);
    for line in &lines {
        assert!(line.width() <= 40);
    }
}

#[test]
fn inline_code_is_green_reverse() {
    let lines = markdown::render_lines("Use `cargo` here");
    assert!(lines[0].spans.contains(&StyledSpan::styled(
        "cargo",
        &[Style::Color(Color::Green), Style::Reverse]
    )));
}

#[test]
fn pathological_input_never_panics() {
    let mut inputs: Vec<String> = [
        "```", "``", "#", "**", "*", "***", "- ", "1.", "`*`*`", "**a*b**c*", "\t\t",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    inputs.push("日本語のテキスト".repeat(20));
    for input in &inputs {
        let _ = markdown::render(input);
    }
}
