use super::{
    action::Action,
    effect::Effect,
    observer::PaletteEvent,
    recovery::{classify, get_suggestions},
    state::{AppState, ErrorState},
};
use crate::domain::{
    models::{CommandCategory, CommandId},
    ranker,
    registry::CommandRegistry,
};
use tracing::debug;

pub fn update(state: &mut AppState, registry: &CommandRegistry, action: Action) -> Option<Effect> {
    match action {
        // --- Palette Lifecycle ---
        Action::OpenPalette => {
            if !state.palette.open {
                state.palette.open = true;
                state.palette.query.clear();
                state.palette.category = None;
                refresh_matches(state, registry);
            }
        }
        Action::ClosePalette | Action::Cancel => {
            // An in-flight action keeps running; its completion still lands.
            state.palette.open = false;
        }

        // --- Query Editing ---
        Action::SetQuery(query) => {
            if state.palette.open {
                state.palette.query = query;
                refresh_matches(state, registry);
            }
        }
        Action::InsertChar(c) => {
            if state.palette.open {
                state.palette.query.push(c);
                refresh_matches(state, registry);
            }
        }
        Action::Backspace => {
            if state.palette.open && state.palette.query.pop().is_some() {
                refresh_matches(state, registry);
            }
        }
        Action::ClearQuery => {
            if state.palette.open {
                state.palette.query.clear();
                refresh_matches(state, registry);
            }
        }
        Action::CycleCategory => {
            if state.palette.open {
                state.palette.category = CommandCategory::cycle(state.palette.category);
                refresh_matches(state, registry);
            }
        }

        // --- Selection ---
        Action::SelectNext => move_selection(state, 1),
        Action::SelectPrev => move_selection(state, -1),
        Action::SelectIndex(i) => {
            if state.palette.open {
                state.palette.selected_index = i;
                state.palette.clamp_selection();
            }
        }

        // --- Execution ---
        Action::ExecuteSelected => {
            if !state.palette.open {
                return None;
            }
            let id = registry.get(state.palette.selected()?)?.id.clone();
            return begin_execution(state, registry, id);
        }
        Action::ActivateIndex(i) => {
            if !state.palette.open || i >= state.palette.visible_count() {
                return None;
            }
            state.palette.selected_index = i;
            let id = registry.get(state.palette.selected()?)?.id.clone();
            return begin_execution(state, registry, id);
        }
        Action::ExecuteCommand(id) => {
            return begin_execution(state, registry, id);
        }
        Action::ExecutionFinished {
            id,
            result,
            finished_at,
        } => {
            state.palette.loading = false;
            state.palette.pending = None;
            return Some(Effect::Notify(match result {
                Ok(message) => {
                    state.palette.usage.record(&id, finished_at);
                    state.status_message = Some(message.clone());
                    state.last_error = None;
                    state.palette.open = false;
                    PaletteEvent::Executed { id, message }
                }
                Err(message) => {
                    state.last_error = Some(ErrorState {
                        command_id: Some(id.clone()),
                        suggestions: get_suggestions(&message),
                        message: message.clone(),
                        timestamp: finished_at,
                        severity: classify(&message),
                    });
                    PaletteEvent::Failed { id, message }
                }
            }));
        }

        // --- Favorites ---
        Action::ToggleFavorite(id) => {
            return toggle_favorite(state, registry, id);
        }
        Action::ToggleFavoriteSelected => {
            if !state.palette.open {
                return None;
            }
            let id = registry.get(state.palette.selected()?)?.id.clone();
            return toggle_favorite(state, registry, id);
        }

        // --- Status ---
        Action::ClearError => {
            state.last_error = None;
        }
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
        }
        Action::Quit => {
            state.should_quit = true;
        }
        Action::Resize(_, _) => {}
    }
    None
}

fn refresh_matches(state: &mut AppState, registry: &CommandRegistry) {
    state.palette.matches = ranker::rank(
        registry.commands(),
        &state.palette.query,
        &state.palette.usage,
        &state.current_rank_options(),
    );
    state.palette.selected_index = 0;
    debug!(
        query = %state.palette.query,
        category = ?state.palette.category,
        visible = state.palette.matches.len(),
        "palette re-ranked"
    );
}

fn move_selection(state: &mut AppState, delta: isize) {
    if !state.palette.open {
        return;
    }
    let count = state.palette.visible_count();
    if count == 0 {
        state.palette.selected_index = 0;
        return;
    }
    let next = state.palette.selected_index as isize + delta;
    state.palette.selected_index = next.clamp(0, count as isize - 1) as usize;
}

fn begin_execution(
    state: &mut AppState,
    registry: &CommandRegistry,
    id: CommandId,
) -> Option<Effect> {
    if state.palette.loading {
        debug!(command = %id, pending = ?state.palette.pending, "execution already in flight");
        return None;
    }
    let command = registry.find(&id)?;
    if !command.enabled {
        debug!(command = %id, "command disabled");
        return None;
    }
    state.palette.loading = true;
    state.palette.pending = Some(id.clone());
    Some(Effect::Execute(id))
}

fn toggle_favorite(
    state: &mut AppState,
    registry: &CommandRegistry,
    id: CommandId,
) -> Option<Effect> {
    if !registry.contains(&id) {
        return None;
    }
    let favorited = if state.palette.favorites.remove(&id) {
        false
    } else {
        state.palette.favorites.insert(id.clone());
        true
    };
    Some(Effect::Notify(PaletteEvent::FavoriteToggled { id, favorited }))
}
