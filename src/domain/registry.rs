use super::models::{Command, CommandId};
use super::shortcut::Shortcut;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate command id `{0}`")]
    DuplicateId(CommandId),
}

/// Commands in registration order. Registration order is the ranking
/// tie-breaker, so it never changes after construction.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    by_id: HashMap<CommandId, usize>,
}

impl CommandRegistry {
    pub fn new(commands: Vec<Command>) -> Result<Self, RegistryError> {
        let mut by_id = HashMap::with_capacity(commands.len());
        for (i, cmd) in commands.iter().enumerate() {
            if by_id.insert(cmd.id.clone(), i).is_some() {
                return Err(RegistryError::DuplicateId(cmd.id.clone()));
            }
        }
        Ok(Self { commands, by_id })
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub fn find(&self, id: &CommandId) -> Option<&Command> {
        self.by_id.get(id).map(|&i| &self.commands[i])
    }

    pub fn contains(&self, id: &CommandId) -> bool {
        self.by_id.contains_key(id)
    }

    /// First enabled command bound to `shortcut`.
    pub fn find_by_shortcut(&self, shortcut: &Shortcut) -> Option<&Command> {
        self.commands
            .iter()
            .find(|c| c.enabled && c.shortcut.as_ref() == Some(shortcut))
    }

    /// Resolves ids to commands, silently skipping ids that are no longer
    /// registered.
    pub fn resolve<'a, I>(&'a self, ids: I) -> Vec<&'a Command>
    where
        I: IntoIterator<Item = &'a CommandId>,
    {
        ids.into_iter().filter_map(|id| self.find(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::action::MockCommandAction;
    use crate::domain::models::CommandCategory;
    use std::sync::Arc;

    fn cmd(id: &str) -> Command {
        Command::new(
            id,
            id,
            CommandCategory::Tools,
            Arc::new(MockCommandAction::new()),
        )
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = CommandRegistry::new(vec![cmd("a"), cmd("b"), cmd("a")]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId(CommandId::new("a")));
    }

    #[test]
    fn test_resolve_skips_missing() {
        let registry = CommandRegistry::new(vec![cmd("a"), cmd("b")]).unwrap();
        let ids = [CommandId::new("b"), CommandId::new("gone"), CommandId::new("a")];
        let titles: Vec<_> = registry
            .resolve(ids.iter())
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, vec!["b", "a"]);
    }

    #[test]
    fn test_find_by_shortcut_ignores_disabled() {
        let registry = CommandRegistry::new(vec![
            cmd("off")
                .with_shortcut(Shortcut::ctrl('b'))
                .with_enabled(false),
            cmd("on").with_shortcut(Shortcut::ctrl('b')),
        ])
        .unwrap();
        let found = registry.find_by_shortcut(&Shortcut::ctrl('b')).unwrap();
        assert_eq!(found.id, CommandId::new("on"));
        assert!(registry.find_by_shortcut(&Shortcut::ctrl('x')).is_none());
    }
}
