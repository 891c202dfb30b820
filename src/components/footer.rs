use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

// (key, label) pairs shown while the palette is closed.
const CLOSED_HINTS: [(&str, &str); 4] = [
    ("^K", "commands"),
    (":", "commands"),
    ("esc", "dismiss error"),
    ("q", "quit"),
];

pub struct Footer<'a> {
    pub theme: &'a Theme,
    pub status: Option<&'a str>,
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (key, label) in CLOSED_HINTS {
            spans.push(Span::styled(format!(" {key}"), self.theme.footer_segment_key));
            spans.push(Span::raw(format!(" {label} ")));
        }
        if let Some(status) = self.status {
            spans.push(Span::raw(" │ "));
            spans.push(Span::styled(status, self.theme.status_info));
        }

        Paragraph::new(Line::from(spans))
            .style(self.theme.footer)
            .render(area, buf);
    }
}
