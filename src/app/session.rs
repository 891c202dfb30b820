use super::{
    action::Action,
    effect::Effect,
    features::spawn_execution,
    observer::{PaletteEvent, PaletteObserver},
    reducer,
    state::AppState,
};
use crate::domain::models::{Command, CommandId};
use crate::domain::registry::CommandRegistry;
use std::sync::Arc;
use tokio::sync::mpsc;

/// One palette instance: state, its command source, observers and the
/// channel completions come back on.
pub struct PaletteSession {
    pub state: AppState,
    registry: Arc<CommandRegistry>,
    observers: Vec<Arc<dyn PaletteObserver>>,
    action_tx: mpsc::Sender<Action>,
}

impl PaletteSession {
    pub fn new(
        state: AppState,
        registry: Arc<CommandRegistry>,
        action_tx: mpsc::Sender<Action>,
    ) -> Self {
        Self {
            state,
            registry,
            observers: Vec::new(),
            action_tx,
        }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn PaletteObserver>) {
        self.observers.push(observer);
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Runs the reducer and carries out whatever effect it asks for.
    pub fn dispatch(&mut self, action: Action) {
        if let Some(effect) = reducer::update(&mut self.state, &self.registry, action) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Execute(id) => {
                // The reducer only emits Execute for a registered id.
                if let Some(command) = self.registry.find(&id) {
                    spawn_execution(id, command.action.clone(), self.action_tx.clone());
                }
            }
            Effect::Notify(event) => self.notify(&event),
        }
    }

    fn notify(&self, event: &PaletteEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    // --- Host-facing views ---

    pub fn visible_commands(&self) -> impl Iterator<Item = &Command> {
        self.state
            .palette
            .matches
            .iter()
            .filter_map(|r| self.registry.get(r.index))
    }

    pub fn selected_command(&self) -> Option<&Command> {
        self.registry.get(self.state.palette.selected()?)
    }

    pub fn is_open(&self) -> bool {
        self.state.palette.open
    }

    pub fn is_loading(&self) -> bool {
        self.state.palette.loading
    }

    /// Most used first. Ids no longer registered are skipped.
    pub fn recent_commands(&self) -> Vec<&Command> {
        recent_commands(&self.state, &self.registry)
    }

    /// Registration order. Ids no longer registered are skipped.
    pub fn favorite_commands(&self) -> Vec<&Command> {
        favorite_commands(&self.state, &self.registry)
    }

    pub fn is_favorite(&self, id: &CommandId) -> bool {
        self.state.palette.is_favorite(id)
    }
}

pub fn recent_commands<'a>(state: &AppState, registry: &'a CommandRegistry) -> Vec<&'a Command> {
    state
        .palette
        .usage
        .records()
        .iter()
        .filter_map(|r| registry.find(&r.command_id))
        .collect()
}

pub fn favorite_commands<'a>(state: &AppState, registry: &'a CommandRegistry) -> Vec<&'a Command> {
    registry
        .commands()
        .iter()
        .filter(|c| state.palette.favorites.contains(&c.id))
        .collect()
}
