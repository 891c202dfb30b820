use crate::app::state::ErrorSeverity;
use ratatui::style::{Color, Modifier, Style};

pub mod glyphs {
    pub const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];
    pub const FAVORITE: &str = "★";
    pub const PROMPT: &str = " > ";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub border: Style,
    pub border_focus: Style,

    pub header_logo: Style,
    pub header_active: Style,
    pub header_item: Style,
    pub header: Style,

    pub footer_segment_key: Style,
    pub footer_segment_val: Style,
    pub footer: Style,

    pub list_item: Style,
    pub list_selected: Style,
    pub list_disabled: Style,
    pub description: Style,
    pub shortcut: Style,
    pub favorite: Style,

    pub category: Style,
    pub category_active: Style,

    pub status_info: Style,
    pub status_warn: Style,
    pub status_error: Style,
    pub status_critical: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Style::default().fg(Color::Rgb(80, 80, 80)),
            border_focus: Style::default().fg(Color::Cyan),

            header_logo: Style::default()
                .bg(Color::Green)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            header_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_item: Style::default().fg(Color::Rgb(150, 150, 150)),
            header: Style::default().bg(Color::Rgb(40, 40, 40)).fg(Color::White),

            footer_segment_key: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            footer_segment_val: Style::default().fg(Color::White),
            footer: Style::default()
                .bg(Color::Rgb(30, 30, 30))
                .fg(Color::Rgb(150, 150, 150)),

            list_item: Style::default().fg(Color::Rgb(210, 210, 210)),
            list_selected: Style::default()
                .bg(Color::Rgb(50, 50, 50))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            list_disabled: Style::default()
                .fg(Color::Rgb(100, 100, 100))
                .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT),
            description: Style::default()
                .fg(Color::Rgb(130, 130, 130))
                .add_modifier(Modifier::DIM),
            shortcut: Style::default().fg(Color::Rgb(200, 150, 100)),
            favorite: Style::default().fg(Color::Yellow),

            category: Style::default().fg(Color::Rgb(130, 130, 130)),
            category_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),

            status_info: Style::default().fg(Color::Green),
            status_warn: Style::default().fg(Color::Yellow),
            status_error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            status_critical: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    pub fn severity(&self, severity: ErrorSeverity) -> Style {
        match severity {
            ErrorSeverity::Warning => self.status_warn,
            ErrorSeverity::Error => self.status_error,
            ErrorSeverity::Critical => self.status_critical,
        }
    }
}
