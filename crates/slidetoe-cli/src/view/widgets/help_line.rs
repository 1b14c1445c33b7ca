use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Keys and what they do, e.g. `(&["Enter", "Space"], "Place")`.
pub type KeyBinding<'a> = (&'a [&'a str], &'a str);

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const MUTED_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Builds a centered one-line summary of key bindings.
pub fn help_line<'a>(bindings: &[KeyBinding<'a>]) -> Line<'a> {
    let mut spans = vec![];
    for (i, (keys, action)) in bindings.iter().copied().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", MUTED_STYLE));
        }
        for (j, key) in keys.iter().copied().enumerate() {
            if j > 0 {
                spans.push(Span::styled("/", MUTED_STYLE));
            }
            spans.push(Span::styled(key, KEY_STYLE));
        }
        spans.push(Span::raw(" "));
        spans.push(Span::raw(action));
    }
    Line::from(spans).centered()
}
