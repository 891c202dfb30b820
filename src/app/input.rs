use crate::app::{action::Action, keymap::KeyMap, state::AppState};
use crate::components::command_palette::{CommandPaletteModal, PaletteHit};
use crate::domain::registry::CommandRegistry;
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Rect, Size};

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState,
    registry: &CommandRegistry,
    keymap: &KeyMap,
    terminal_size: Size,
) -> Option<Action> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            keymap.get_action(key, app_state.palette.open, registry)
        }
        Event::Mouse(mouse) if app_state.palette.open => {
            map_palette_mouse(mouse, app_state, terminal_size)
        }
        Event::Resize(w, h) => Some(Action::Resize(w, h)),
        _ => None,
    }
}

fn map_palette_mouse(
    mouse: MouseEvent,
    app_state: &AppState,
    terminal_size: Size,
) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Action::SelectPrev),
        MouseEventKind::ScrollDown => Some(Action::SelectNext),
        MouseEventKind::Down(MouseButton::Left) => {
            let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
            match CommandPaletteModal::hit_test(
                area,
                app_state.rank_options.max_results,
                &app_state.palette,
                mouse.column,
                mouse.row,
            ) {
                PaletteHit::Row(i) => Some(Action::ActivateIndex(i)),
                PaletteHit::Outside => Some(Action::Cancel),
                PaletteHit::Chrome => None,
            }
        }
        _ => None,
    }
}
