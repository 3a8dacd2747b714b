//! The spotlight input box: one bordered line of text.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Single-line input field with a prompt, a placeholder, and a block
/// cursor when focused.
pub struct InputBar<'a> {
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> InputBar<'a> {
    pub fn new(value: &'a str, placeholder: &'a str, focused: bool) -> Self {
        Self {
            value,
            placeholder,
            focused,
        }
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("quickbar (Esc to hide, Ctrl-C to quit)");

        let inner = block.inner(area);
        block.render(area, buf);

        let prompt = Span::styled("> ", Style::default().fg(Color::Cyan));
        let mut spans = vec![prompt];

        if self.value.is_empty() {
            spans.push(Span::styled(
                self.placeholder,
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            // Show the tail of a value wider than the box, so the
            // insertion point never scrolls out of view. Budget: inner
            // width minus the prompt and the cursor cell.
            let cursor_cells: usize = if self.focused { 1 } else { 0 };
            let available = (inner.width as usize).saturating_sub(2 + cursor_cells);
            let total = self.value.chars().count();
            let skipped = total.saturating_sub(available);
            let visible: String = self.value.chars().skip(skipped).collect();
            spans.push(Span::styled(visible, Style::default().fg(Color::Yellow)));
        }

        if self.focused {
            spans.push(Span::styled(
                " ",
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
