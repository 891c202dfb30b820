use super::action::CommandAction;
use super::shortcut::Shortcut;
use chrono::{DateTime, Local};
use std::fmt;
use std::sync::Arc;

/// Maximum number of usage records kept per session.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CommandId(pub String);

impl CommandId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCategory {
    Navigation,
    Betting,
    Account,
    Analytics,
    Settings,
    Tools,
}

impl CommandCategory {
    pub const ALL: [CommandCategory; 6] = [
        CommandCategory::Navigation,
        CommandCategory::Betting,
        CommandCategory::Account,
        CommandCategory::Analytics,
        CommandCategory::Settings,
        CommandCategory::Tools,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CommandCategory::Navigation => "Navigation",
            CommandCategory::Betting => "Betting",
            CommandCategory::Account => "Account",
            CommandCategory::Analytics => "Analytics",
            CommandCategory::Settings => "Settings",
            CommandCategory::Tools => "Tools",
        }
    }

    /// Filter cycle: `None -> Navigation -> ... -> Tools -> None`.
    pub fn cycle(current: Option<CommandCategory>) -> Option<CommandCategory> {
        match current {
            None => Some(CommandCategory::Navigation),
            Some(cat) => {
                let pos = Self::ALL.iter().position(|c| *c == cat).unwrap_or(0);
                Self::ALL.get(pos + 1).copied()
            }
        }
    }
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone)]
pub struct Command {
    pub id: CommandId,
    pub title: String,
    pub description: Option<String>,
    pub category: CommandCategory,
    pub keywords: Vec<String>,
    pub shortcut: Option<Shortcut>,
    pub priority: f64,
    pub enabled: bool,
    pub action: Arc<dyn CommandAction>,
}

impl Command {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: CommandCategory,
        action: Arc<dyn CommandAction>,
    ) -> Self {
        Self {
            id: CommandId::new(id),
            title: title.into(),
            description: None,
            category,
            keywords: Vec::new(),
            shortcut: None,
            priority: 0.0,
            enabled: true,
            action,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| (*k).to_string()).collect();
        self
    }

    pub fn with_shortcut(mut self, shortcut: Shortcut) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Title, description and keywords, in that order.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str())
            .chain(self.description.as_deref())
            .chain(self.keywords.iter().map(String::as_str))
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("keywords", &self.keywords)
            .field("shortcut", &self.shortcut)
            .field("priority", &self.priority)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    pub command_id: CommandId,
    pub last_used: DateTime<Local>,
    pub count: u32,
}

/// Per-session usage history, most frequently used first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UsageHistory {
    records: Vec<UsageRecord>,
}

impl UsageHistory {
    pub fn record(&mut self, id: &CommandId, at: DateTime<Local>) {
        if let Some(rec) = self.records.iter_mut().find(|r| &r.command_id == id) {
            rec.count = rec.count.saturating_add(1);
            rec.last_used = at;
        } else {
            self.records.push(UsageRecord {
                command_id: id.clone(),
                last_used: at,
                count: 1,
            });
        }

        // Ties go to the most recently used so a fresh command can displace a stale one.
        self.records
            .sort_by(|a, b| b.count.cmp(&a.count).then(b.last_used.cmp(&a.last_used)));
        self.records.truncate(HISTORY_LIMIT);
    }

    pub fn frequency(&self, id: &CommandId) -> u32 {
        self.get(id).map_or(0, |r| r.count)
    }

    pub fn get(&self, id: &CommandId) -> Option<&UsageRecord> {
        self.records.iter().find(|r| &r.command_id == id)
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
