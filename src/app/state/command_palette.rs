use crate::domain::models::{CommandCategory, CommandId, UsageHistory};
use crate::domain::ranker::Ranked;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandPaletteState {
    pub open: bool,
    pub query: String,
    pub matches: Vec<Ranked>, // Ranked indices into the registry
    pub selected_index: usize,
    pub category: Option<CommandCategory>,
    pub loading: bool,
    pub pending: Option<CommandId>,

    // Outlive open/close; discarded only with the session.
    pub usage: UsageHistory,
    pub favorites: HashSet<CommandId>,
}

impl CommandPaletteState {
    pub fn visible_count(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty_result(&self) -> bool {
        self.matches.is_empty()
    }

    /// Registry index of the selected row.
    pub fn selected(&self) -> Option<usize> {
        self.matches.get(self.selected_index).map(|r| r.index)
    }

    pub fn is_favorite(&self, id: &CommandId) -> bool {
        self.favorites.contains(id)
    }

    /// Keeps `selected_index` inside `[0, max(1, visible_count))`.
    pub fn clamp_selection(&mut self) {
        self.selected_index = self
            .selected_index
            .min(self.matches.len().saturating_sub(1));
    }
}
