use super::action::Action;
use crate::domain::registry::CommandRegistry;
use crate::domain::shortcut::{Shortcut, ShortcutKey};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

pub struct KeyMap {
    // Fixed bindings per palette state; printable keys fall through to the
    // query when the palette is open.
    pub closed: HashMap<KeyEvent, Action>,
    pub open: HashMap<KeyEvent, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut closed = HashMap::new();
        let mut open = HashMap::new();

        // --- Palette Closed ---
        closed.insert(ctrl('k'), Action::OpenPalette);
        closed.insert(ch(':'), Action::OpenPalette);
        closed.insert(ch('q'), Action::Quit);
        closed.insert(ctrl('c'), Action::Quit);
        closed.insert(key(KeyCode::Esc), Action::ClearError);

        // --- Palette Open ---
        open.insert(key(KeyCode::Esc), Action::Cancel);
        open.insert(ctrl('k'), Action::ClosePalette);
        open.insert(ctrl('c'), Action::Quit);
        open.insert(key(KeyCode::Enter), Action::ExecuteSelected);
        open.insert(key(KeyCode::Down), Action::SelectNext);
        open.insert(ctrl('n'), Action::SelectNext);
        open.insert(key(KeyCode::Up), Action::SelectPrev);
        open.insert(ctrl('p'), Action::SelectPrev);
        open.insert(key(KeyCode::Tab), Action::CycleCategory);
        open.insert(key(KeyCode::Backspace), Action::Backspace);
        open.insert(ctrl('u'), Action::ClearQuery);
        open.insert(ctrl('f'), Action::ToggleFavoriteSelected);

        Self { closed, open }
    }
}

impl KeyMap {
    pub fn get_action(
        &self,
        event: KeyEvent,
        palette_open: bool,
        registry: &CommandRegistry,
    ) -> Option<Action> {
        if palette_open {
            if let Some(action) = self.open.get(&normalize(event)) {
                return Some(action.clone());
            }
            return match event.code {
                KeyCode::Char(c)
                    if !event
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    Some(Action::InsertChar(c))
                }
                _ => None,
            };
        }

        if let Some(action) = self.closed.get(&normalize(event)) {
            return Some(action.clone());
        }
        let shortcut = to_shortcut(event)?;
        registry
            .find_by_shortcut(&shortcut)
            .map(|cmd| Action::ExecuteCommand(cmd.id.clone()))
    }
}

/// Converts a terminal key event into the palette's shortcut form.
pub fn to_shortcut(event: KeyEvent) -> Option<Shortcut> {
    let key = match event.code {
        KeyCode::Char(c) => ShortcutKey::Char(c.to_ascii_lowercase()),
        KeyCode::F(n) => ShortcutKey::F(n),
        KeyCode::Enter => ShortcutKey::Enter,
        KeyCode::Tab => ShortcutKey::Tab,
        KeyCode::Backspace => ShortcutKey::Backspace,
        KeyCode::Delete => ShortcutKey::Delete,
        _ => return None,
    };
    Some(Shortcut {
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        alt: event.modifiers.contains(KeyModifiers::ALT),
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
        key,
    })
}

// Terminals report the press/repeat kind and state flags inconsistently, and
// some add SHIFT to symbols like ':'. Bindings only care about code and
// the remaining modifiers.
fn normalize(event: KeyEvent) -> KeyEvent {
    let mut modifiers = event.modifiers;
    if matches!(event.code, KeyCode::Char(_)) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    KeyEvent::new(event.code, modifiers)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ch(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}
