use super::matcher;
use super::models::{Command, CommandCategory, UsageHistory};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Substring hit or greedy ordered-subsequence match.
    #[default]
    Fuzzy,
    /// Case-insensitive substring containment only.
    Substring,
}

/// Multipliers applied to static priority and usage count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankWeights {
    pub priority: f64,
    pub recency: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            priority: 1.0,
            recency: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankOptions {
    pub match_mode: MatchMode,
    pub weights: RankWeights,
    pub max_results: usize,
    pub category: Option<CommandCategory>,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Fuzzy,
            weights: RankWeights::default(),
            max_results: 10,
            category: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    /// Index into the command slice that was ranked.
    pub index: usize,
    pub score: f64,
    pub weight: f64,
}

/// Best match score across a command's searchable fields, or `None` if the
/// command does not match at all.
pub fn match_command(command: &Command, query: &str, mode: MatchMode) -> Option<f64> {
    if query.is_empty() {
        return Some(1.0);
    }
    match mode {
        MatchMode::Fuzzy => {
            let best = command
                .searchable_fields()
                .map(|field| matcher::score(query, field))
                .fold(0.0_f64, f64::max);
            (best > 0.0).then_some(best)
        }
        MatchMode::Substring => command
            .searchable_fields()
            .any(|field| matcher::contains_ignore_case(query, field))
            .then_some(1.0),
    }
}

/// Orders `commands` for display. Pure: depends only on its inputs.
#[must_use]
pub fn rank(
    commands: &[Command],
    query: &str,
    usage: &UsageHistory,
    options: &RankOptions,
) -> Vec<Ranked> {
    let mut ranked: Vec<Ranked> = commands
        .iter()
        .enumerate()
        .filter(|(_, cmd)| options.category.map_or(true, |cat| cmd.category == cat))
        .filter_map(|(index, cmd)| {
            let score = match_command(cmd, query, options.match_mode)?;
            let frequency = f64::from(usage.frequency(&cmd.id));
            let weight = score
                + cmd.priority * options.weights.priority
                + frequency * options.weights.recency;
            Some(Ranked {
                index,
                score,
                weight,
            })
        })
        .collect();

    // `sort_by` is stable, so equal weights keep registration order.
    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    ranked.truncate(options.max_results);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::action::MockCommandAction;
    use crate::domain::models::CommandId;
    use chrono::Local;
    use std::sync::Arc;

    fn cmd(id: &str, title: &str, keywords: &[&str], priority: f64) -> Command {
        Command::new(
            id,
            title,
            CommandCategory::Betting,
            Arc::new(MockCommandAction::new()),
        )
        .with_keywords(keywords)
        .with_priority(priority)
    }

    fn betting_pair() -> Vec<Command> {
        vec![
            cmd("a", "Place Bet", &["wager"], 5.0),
            cmd("b", "View Odds", &["lines"], 1.0),
        ]
    }

    fn ids(commands: &[Command], ranked: &[Ranked]) -> Vec<String> {
        ranked
            .iter()
            .map(|r| commands[r.index].id.to_string())
            .collect()
    }

    #[test]
    fn test_query_bet_only_place_bet() {
        let commands = betting_pair();
        let ranked = rank(
            &commands,
            "bet",
            &UsageHistory::default(),
            &RankOptions::default(),
        );
        assert_eq!(ids(&commands, &ranked), vec!["a"]);
        assert!((ranked[0].weight - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_query_sorted_by_priority() {
        let mut commands = betting_pair();
        commands.reverse();
        let ranked = rank(
            &commands,
            "",
            &UsageHistory::default(),
            &RankOptions::default(),
        );
        assert_eq!(ids(&commands, &ranked), vec!["a", "b"]);
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let commands = vec![
            cmd("x", "Alpha", &[], 2.0),
            cmd("y", "Beta", &[], 2.0),
            cmd("z", "Gamma", &[], 2.0),
        ];
        let ranked = rank(
            &commands,
            "",
            &UsageHistory::default(),
            &RankOptions::default(),
        );
        assert_eq!(ids(&commands, &ranked), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_keyword_match_and_fuzzy() {
        let commands = betting_pair();
        let usage = UsageHistory::default();
        let opts = RankOptions::default();

        assert_eq!(ids(&commands, &rank(&commands, "wager", &usage, &opts)), vec!["a"]);
        // "vds" is a subsequence of "view odds" only.
        assert_eq!(ids(&commands, &rank(&commands, "vds", &usage, &opts)), vec!["b"]);
        assert!(rank(&commands, "qqq", &usage, &opts).is_empty());
    }

    #[test]
    fn test_substring_mode_disables_fuzzy() {
        let commands = betting_pair();
        let opts = RankOptions {
            match_mode: MatchMode::Substring,
            ..RankOptions::default()
        };
        let usage = UsageHistory::default();
        assert!(rank(&commands, "vds", &usage, &opts).is_empty());
        assert_eq!(ids(&commands, &rank(&commands, "ODDS", &usage, &opts)), vec!["b"]);
    }

    #[test]
    fn test_usage_frequency_boost() {
        let commands = vec![cmd("a", "Alpha", &[], 1.0), cmd("b", "Beta", &[], 1.0)];
        let mut usage = UsageHistory::default();
        usage.record(&CommandId::new("b"), Local::now());

        let ranked = rank(&commands, "", &usage, &RankOptions::default());
        assert_eq!(ids(&commands, &ranked), vec!["b", "a"]);
        assert!((ranked[0].weight - 2.1).abs() < 1e-9);
    }

    #[test]
    fn test_priority_outweighs_recency() {
        let commands = vec![cmd("hi", "High", &[], 2.0), cmd("lo", "Low", &[], 1.0)];
        let mut usage = UsageHistory::default();
        for _ in 0..5 {
            usage.record(&CommandId::new("lo"), Local::now());
        }
        // 1 + 1 + 0.5 < 1 + 2
        let ranked = rank(&commands, "", &usage, &RankOptions::default());
        assert_eq!(ids(&commands, &ranked), vec!["hi", "lo"]);
    }

    #[test]
    fn test_truncates_and_filters_category() {
        let mut commands: Vec<Command> = (0..15)
            .map(|i| cmd(&format!("c{i}"), &format!("Cmd {i}"), &[], 0.0))
            .collect();
        commands.push(
            Command::new(
                "nav",
                "Go Home",
                CommandCategory::Navigation,
                Arc::new(MockCommandAction::new()),
            ),
        );
        let usage = UsageHistory::default();

        let ranked = rank(&commands, "", &usage, &RankOptions::default());
        assert_eq!(ranked.len(), 10);

        let nav_only = RankOptions {
            category: Some(CommandCategory::Navigation),
            ..RankOptions::default()
        };
        assert_eq!(ids(&commands, &rank(&commands, "", &usage, &nav_only)), vec!["nav"]);
    }
}
