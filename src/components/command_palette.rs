use crate::app::state::{CommandPaletteState, ErrorState};
use crate::config::PaletteVariant;
use crate::domain::models::{Command, CommandCategory};
use crate::domain::registry::CommandRegistry;
use crate::theme::{glyphs, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Widget},
};
use std::rc::Rc;

use super::helpers::{centered_rect_fixed_height, contains, draw_drop_shadow, fill_between};

// Borders plus query, category, separator and status rows.
const CHROME_ROWS: u16 = 6;
const TITLE_WIDTH: usize = 20;

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteHit {
    Outside,
    Chrome,
    Row(usize),
}

pub struct CommandPaletteModal<'a> {
    pub theme: &'a Theme,
    pub state: &'a CommandPaletteState,
    pub registry: &'a CommandRegistry,
    pub variant: PaletteVariant,
    pub max_results: usize,
    pub error: Option<&'a ErrorState>,
    pub frame_count: u64,
}

impl CommandPaletteModal<'_> {
    pub fn modal_area(area: Rect, max_results: usize) -> Rect {
        let rows = u16::try_from(max_results).unwrap_or(u16::MAX);
        centered_rect_fixed_height(60, rows.saturating_add(CHROME_ROWS), area)
    }

    /// Maps a terminal position to a visible row, using the same geometry
    /// and scroll offset as `render`.
    pub fn hit_test(
        area: Rect,
        max_results: usize,
        state: &CommandPaletteState,
        column: u16,
        row: u16,
    ) -> PaletteHit {
        let modal = Self::modal_area(area, max_results);
        if !contains(modal, column, row) {
            return PaletteHit::Outside;
        }
        let results = sections(inner(modal))[3];
        if !contains(results, column, row) {
            return PaletteHit::Chrome;
        }
        let offset = scroll_offset(state.selected_index, results.height);
        PaletteHit::Row(offset + usize::from(row - results.y))
    }

    fn row_line<'b>(&self, cmd: &'b Command, selected: bool, width: usize) -> Line<'b> {
        let base = if !cmd.enabled {
            self.theme.list_disabled
        } else if selected {
            self.theme.list_selected
        } else {
            self.theme.list_item
        };
        let row_bg = if selected {
            self.theme.list_selected
        } else {
            Style::default()
        };

        let prefix = if selected { "> " } else { "  " };
        let star = if self.state.is_favorite(&cmd.id) {
            format!("{} ", glyphs::FAVORITE)
        } else {
            "  ".to_string()
        };
        let title = format!("{:<width$}", cmd.title, width = TITLE_WIDTH);
        let mut used = prefix.len() + 2 + title.chars().count();

        let mut spans = vec![
            Span::styled(prefix, base),
            Span::styled(star, self.theme.favorite.patch(row_bg)),
            Span::styled(title, base),
        ];

        let shortcut = cmd
            .shortcut
            .as_ref()
            .map(|s| format!(" {s} "))
            .unwrap_or_default();

        if self.variant == PaletteVariant::Default {
            if let Some(desc) = &cmd.description {
                let room = width.saturating_sub(used + shortcut.chars().count() + 1);
                let desc: String = desc.chars().take(room).collect();
                used += desc.chars().count() + 1;
                spans.push(Span::styled(
                    format!(" {desc}"),
                    self.theme.description.patch(row_bg),
                ));
            }
        }

        spans.push(Span::styled(
            fill_between(used, shortcut.chars().count(), width),
            row_bg,
        ));
        spans.push(Span::styled(shortcut, self.theme.shortcut.patch(row_bg)));
        Line::from(spans)
    }

    fn category_line(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(CommandCategory::ALL.len() + 2);
        spans.push(Span::raw(" "));
        let all_style = if self.state.category.is_none() {
            self.theme.category_active
        } else {
            self.theme.category
        };
        spans.push(Span::styled("All", all_style));
        for category in CommandCategory::ALL {
            let style = if self.state.category == Some(category) {
                self.theme.category_active
            } else {
                self.theme.category
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(category.label(), style));
        }
        Line::from(spans)
    }

    fn status_line(&self) -> Line<'_> {
        if self.state.loading {
            let frame = glyphs::SPINNER[(self.frame_count as usize) % glyphs::SPINNER.len()];
            let name = self
                .state
                .pending
                .as_ref()
                .and_then(|id| self.registry.find(id))
                .map_or("command", |c| c.title.as_str());
            return Line::from(vec![
                Span::styled(format!(" {frame} "), self.theme.status_info),
                Span::styled(format!("Running {name}..."), self.theme.list_item),
            ]);
        }
        if let Some(err) = self.error {
            let style = self.theme.severity(err.severity);
            return Line::from(vec![
                Span::styled(format!(" ✗ {} ", err.severity.label()), style),
                Span::styled(err.message.as_str(), self.theme.status_error),
            ]);
        }
        Line::from(vec![
            Span::styled(" ↵", self.theme.footer_segment_key),
            Span::raw(" run  "),
            Span::styled("tab", self.theme.footer_segment_key),
            Span::raw(" category  "),
            Span::styled("^F", self.theme.footer_segment_key),
            Span::raw(" favorite  "),
            Span::styled("esc", self.theme.footer_segment_key),
            Span::raw(" close"),
        ])
    }
}

impl Widget for CommandPaletteModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = Self::modal_area(area, self.max_results);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" COMMAND PALETTE ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let inner_area = inner(modal_area);
        block.render(modal_area, buf);
        if inner_area.width == 0 || inner_area.height < CHROME_ROWS - 2 {
            return;
        }
        let layout = sections(inner_area);

        // Query
        let query_line = Line::from(vec![
            Span::styled(glyphs::PROMPT, self.theme.footer_segment_key),
            Span::styled(self.state.query.as_str(), self.theme.footer_segment_val),
            Span::styled(
                "_",
                self.theme
                    .footer_segment_val
                    .add_modifier(ratatui::style::Modifier::SLOW_BLINK),
            ),
        ]);
        buf.set_line(layout[0].x, layout[0].y, &query_line, layout[0].width);

        buf.set_line(layout[1].x, layout[1].y, &self.category_line(), layout[1].width);

        let separator = "─".repeat(layout[2].width as usize);
        buf.set_string(layout[2].x, layout[2].y, separator, self.theme.border_focus);

        // Results
        let results = layout[3];
        if self.state.is_empty_result() {
            if results.height > 0 {
                let no_results = Line::from(Span::styled(
                    "  No commands found.",
                    self.theme.description,
                ));
                buf.set_line(results.x, results.y, &no_results, results.width);
            }
        } else {
            let offset = scroll_offset(self.state.selected_index, results.height);
            let width = results.width as usize;
            let items: Vec<ListItem> = self
                .state
                .matches
                .iter()
                .enumerate()
                .skip(offset)
                .filter_map(|(i, ranked)| {
                    let cmd = self.registry.get(ranked.index)?;
                    Some(ListItem::new(self.row_line(
                        cmd,
                        i == self.state.selected_index,
                        width,
                    )))
                })
                .collect();
            List::new(items).render(results, buf);
        }

        buf.set_line(layout[4].x, layout[4].y, &self.status_line(), layout[4].width);
    }
}

fn inner(modal: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(modal)
}

fn sections(inner: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Query input
            Constraint::Length(1), // Category tabs
            Constraint::Length(1), // Separator
            Constraint::Min(0),    // Results
            Constraint::Length(1), // Status
        ])
        .split(inner)
}

// First visible row so the selection stays on screen.
fn scroll_offset(selected: usize, height: u16) -> usize {
    selected.saturating_sub(usize::from(height).saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ErrorSeverity;
    use crate::domain::action::MockCommandAction;
    use crate::domain::models::UsageHistory;
    use crate::domain::ranker::{self, RankOptions};
    use crate::domain::shortcut::Shortcut;
    use std::sync::Arc;

    fn registry() -> CommandRegistry {
        CommandRegistry::new(vec![
            Command::new(
                "bet.place",
                "Place Bet",
                CommandCategory::Betting,
                Arc::new(MockCommandAction::new()),
            )
            .with_description("Open the bet slip")
            .with_shortcut(Shortcut::ctrl('b'))
            .with_priority(5.0),
            Command::new(
                "bet.odds",
                "View Odds",
                CommandCategory::Betting,
                Arc::new(MockCommandAction::new()),
            ),
        ])
        .unwrap()
    }

    fn state_for(registry: &CommandRegistry, query: &str) -> CommandPaletteState {
        CommandPaletteState {
            open: true,
            query: query.to_string(),
            matches: ranker::rank(
                registry.commands(),
                query,
                &UsageHistory::default(),
                &RankOptions::default(),
            ),
            ..Default::default()
        }
    }

    fn render(state: &CommandPaletteState, registry: &CommandRegistry) -> String {
        render_with_error(state, registry, None)
    }

    fn render_with_error(
        state: &CommandPaletteState,
        registry: &CommandRegistry,
        error: Option<&ErrorState>,
    ) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let theme = Theme::default();
        CommandPaletteModal {
            theme: &theme,
            state,
            registry,
            variant: PaletteVariant::Default,
            max_results: 10,
            error,
            frame_count: 0,
        }
        .render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_renders_rows_and_shortcut() {
        let registry = registry();
        let text = render(&state_for(&registry, ""), &registry);
        assert!(text.contains("COMMAND PALETTE"));
        assert!(text.contains("Place Bet"));
        assert!(text.contains("View Odds"));
        assert!(text.contains("Ctrl+B"));
    }

    #[test]
    fn test_renders_empty_state() {
        let registry = registry();
        let text = render(&state_for(&registry, "zzz"), &registry);
        assert!(text.contains("No commands found."));
    }

    #[test]
    fn test_status_line_shows_severity() {
        let registry = registry();
        let err = ErrorState {
            command_id: None,
            message: "bet.place panicked".into(),
            timestamp: chrono::Local::now(),
            severity: ErrorSeverity::Critical,
            suggestions: Vec::new(),
        };
        let text = render_with_error(&state_for(&registry, ""), &registry, Some(&err));
        assert!(text.contains("✗ CRITICAL bet.place panicked"));
    }

    #[test]
    fn test_hit_test_maps_rows() {
        let registry = registry();
        let state = state_for(&registry, "");
        let area = Rect::new(0, 0, 80, 24);
        let modal = CommandPaletteModal::modal_area(area, 10);
        // Border, query, categories and separator sit above the first row.
        let first_row = modal.y + 4;
        let col = modal.x + 2;

        assert_eq!(
            CommandPaletteModal::hit_test(area, 10, &state, col, first_row),
            PaletteHit::Row(0)
        );
        assert_eq!(
            CommandPaletteModal::hit_test(area, 10, &state, col, first_row + 1),
            PaletteHit::Row(1)
        );
        assert_eq!(
            CommandPaletteModal::hit_test(area, 10, &state, col, modal.y + 1),
            PaletteHit::Chrome
        );
        assert_eq!(
            CommandPaletteModal::hit_test(area, 10, &state, 0, 0),
            PaletteHit::Outside
        );
    }

    #[test]
    fn test_scroll_offset_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 3), 0);
        assert_eq!(scroll_offset(2, 3), 0);
        assert_eq!(scroll_offset(5, 3), 3);
        assert_eq!(scroll_offset(4, 0), 4);
    }
}
