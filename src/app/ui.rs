use crate::app::session::{favorite_commands, recent_commands};
use crate::app::state::AppState;
use crate::components::command_palette::CommandPaletteModal;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::domain::models::Command;
use crate::domain::registry::CommandRegistry;
use crate::theme::{glyphs, Theme};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub struct AppLayout {
    pub main: Vec<Rect>,
    pub body: Vec<Rect>,
}

pub fn get_layout(area: Rect) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area)
        .to_vec();

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main[1])
        .to_vec();

    AppLayout { main, body }
}

pub fn draw(f: &mut Frame, app_state: &AppState, registry: &CommandRegistry, theme: &Theme) {
    if f.area().width == 0 || f.area().height == 0 {
        return;
    }

    let layout = get_layout(f.area());

    // --- Header ---
    let stats = format!(
        "{} commands │ {} favorites │ {} used",
        registry.len(),
        app_state.palette.favorites.len(),
        app_state.palette.usage.len()
    );
    f.render_widget(
        Header {
            theme,
            stats: &stats,
            loading: app_state.palette.loading,
        },
        layout.main[0],
    );

    // --- Body ---
    let recent = recent_commands(app_state, registry);
    let favorites = favorite_commands(app_state, registry);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout.body[0]);

    f.render_widget(
        command_list("RECENT", &recent, theme, |c| {
            let count = app_state.palette.usage.frequency(&c.id);
            format!("×{count}")
        }),
        left[0],
    );
    f.render_widget(
        command_list("FAVORITES", &favorites, theme, |_| {
            glyphs::FAVORITE.to_string()
        }),
        left[1],
    );
    f.render_widget(activity_panel(app_state, theme), layout.body[1]);

    // --- Footer ---
    f.render_widget(
        Footer {
            theme,
            status: app_state.status_message.as_deref(),
        },
        layout.main[2],
    );

    // --- Overlay ---
    if app_state.palette.open {
        f.render_widget(
            CommandPaletteModal {
                theme,
                state: &app_state.palette,
                registry,
                variant: app_state.variant,
                max_results: app_state.rank_options.max_results,
                error: app_state.last_error.as_ref(),
                frame_count: app_state.frame_count,
            },
            f.area(),
        );
    }
}

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(title, theme.header_item),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border)
}

fn command_list<'a>(
    title: &'a str,
    commands: &[&'a Command],
    theme: &Theme,
    badge: impl Fn(&Command) -> String,
) -> List<'a> {
    let items: Vec<ListItem> = if commands.is_empty() {
        vec![ListItem::new(Span::styled("  (none yet)", theme.description))]
    } else {
        commands
            .iter()
            .map(|c| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("  {:<20}", c.title), theme.list_item),
                    Span::styled(badge(c), theme.shortcut),
                ]))
            })
            .collect()
    };
    List::new(items).block(panel(title, theme))
}

fn activity_panel<'a>(app_state: &'a AppState, theme: &Theme) -> Paragraph<'a> {
    let mut lines = Vec::new();

    if let Some(err) = &app_state.last_error {
        let who = err
            .command_id
            .as_ref()
            .map_or_else(String::new, |id| format!("{id}: "));
        lines.push(Line::from(vec![
            Span::styled(
                format!("✗ {} ", err.severity.label()),
                theme.severity(err.severity),
            ),
            Span::styled(format!("{who}{}", err.message), theme.status_error),
        ]));
        lines.push(Line::from(Span::styled(
            err.timestamp.format("  at %H:%M:%S").to_string(),
            theme.description,
        )));
        for suggestion in &err.suggestions {
            lines.push(Line::from(vec![
                Span::styled("  • ", theme.footer_segment_key),
                Span::raw(suggestion.as_str()),
            ]));
        }
    } else if let Some(msg) = &app_state.status_message {
        lines.push(Line::from(vec![
            Span::styled("✓ ", theme.status_info),
            Span::raw(msg.as_str()),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("Press "),
            Span::styled("Ctrl+K", theme.footer_segment_key),
            Span::raw(" to open the command palette."),
        ]));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("ACTIVITY", theme))
}
