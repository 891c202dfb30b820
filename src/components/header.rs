use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Header<'a> {
    pub theme: &'a Theme,
    pub stats: &'a str,
    pub loading: bool,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" SHARPLINE ", self.theme.header_logo),
            Span::styled(format!(" {} ", self.stats), self.theme.header),
        ];
        if self.loading {
            spans.push(Span::styled(" RUNNING ", self.theme.header_active));
        }

        Paragraph::new(Line::from(spans))
            .style(self.theme.header)
            .render(area, buf);
    }
}
