//! The status line under the input box.
//!
//! Rendered only when a status message is present; severity picks the
//! color.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Paragraph, Widget},
};

use crate::state::{StatusKind, StatusMessage};

/// One line of feedback: a warning or an error.
pub struct StatusLine<'a> {
    status: &'a StatusMessage,
}

impl<'a> StatusLine<'a> {
    pub fn new(status: &'a StatusMessage) -> Self {
        Self { status }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = match self.status.kind {
            StatusKind::Warning => Color::Yellow,
            StatusKind::Error => Color::Red,
        };

        Paragraph::new(self.status.text.as_str())
            .style(Style::default().fg(color))
            .render(area, buf);
    }
}
