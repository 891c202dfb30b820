use super::feed::{best_line, OddsFeed};
use crate::domain::action::{CommandAction, FnAction};
use crate::domain::models::{Command, CommandCategory};
use crate::domain::shortcut::{Shortcut, ShortcutKey};
use anyhow::anyhow;
use futures::FutureExt;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const SIMULATED_LATENCY: Duration = Duration::from_millis(150);

fn message(text: &'static str) -> Arc<dyn CommandAction> {
    FnAction::new(move || {
        async move {
            tokio::time::sleep(SIMULATED_LATENCY).await;
            Ok::<_, anyhow::Error>(text.to_string())
        }
        .boxed()
    })
}

fn failing(reason: &'static str) -> Arc<dyn CommandAction> {
    FnAction::new(move || {
        async move {
            tokio::time::sleep(SIMULATED_LATENCY).await;
            Err::<String, _>(anyhow!(reason))
        }
        .boxed()
    })
}

fn refresh_odds(feed: Arc<dyn OddsFeed>) -> Arc<dyn CommandAction> {
    FnAction::new(move || {
        let feed = feed.clone();
        async move {
            let lines = feed.odds().await?;
            Ok::<_, anyhow::Error>(format!("Refreshed {} lines", lines.len()))
        }
        .boxed()
    })
}

fn top_confidence(feed: Arc<dyn OddsFeed>) -> Arc<dyn CommandAction> {
    FnAction::new(move || {
        let feed = feed.clone();
        async move {
            let lines = feed.odds().await?;
            let best = best_line(&lines).ok_or_else(|| anyhow!("no lines available"))?;
            Ok::<_, anyhow::Error>(format!(
                "Top pick: {} vs {} ({}% confidence)",
                best.home, best.away, best.confidence
            ))
        }
        .boxed()
    })
}

fn team_sentiment(feed: Arc<dyn OddsFeed>, team: &'static str) -> Arc<dyn CommandAction> {
    FnAction::new(move || {
        let feed = feed.clone();
        async move {
            let sample = feed.sentiment(team).await?;
            Ok::<_, anyhow::Error>(format!("{} sentiment: {:+.2}", sample.team, sample.score))
        }
        .boxed()
    })
}

/// Dashboard commands in display order. Ids listed in `disabled` are
/// registered but cannot be executed; `shortcuts` replaces the built-in
/// binding of the named commands.
#[must_use]
pub fn default_commands(
    feed: Arc<dyn OddsFeed>,
    disabled: &[String],
    shortcuts: &BTreeMap<String, Shortcut>,
) -> Vec<Command> {
    let commands = vec![
        // --- Navigation ---
        Command::new(
            "nav.dashboard",
            "Go to Dashboard",
            CommandCategory::Navigation,
            message("Opened Dashboard"),
        )
        .with_description("Odds overview and AI confidence cards")
        .with_keywords(&["home", "overview"])
        .with_shortcut(Shortcut::ctrl('d'))
        .with_priority(3.0),
        Command::new(
            "nav.live",
            "Open Live Betting",
            CommandCategory::Navigation,
            message("Opened Live Betting"),
        )
        .with_description("In-play games and live opportunities")
        .with_keywords(&["in-play", "live", "games"])
        .with_shortcut(Shortcut::ctrl('l'))
        .with_priority(3.0),
        Command::new(
            "nav.social",
            "Open Social Intelligence",
            CommandCategory::Navigation,
            message("Opened Social Intelligence"),
        )
        .with_description("Sentiment feeds from social channels")
        .with_keywords(&["twitter", "reddit", "sentiment"])
        .with_priority(2.0),
        Command::new(
            "nav.matchups",
            "Open Matchup Tracker",
            CommandCategory::Navigation,
            message("Opened Matchup Tracker"),
        )
        .with_description("Head-to-head history between teams")
        .with_keywords(&["history", "h2h"])
        .with_priority(2.0),
        // --- Betting ---
        Command::new(
            "bet.place",
            "Place Bet",
            CommandCategory::Betting,
            message("Bet slip submitted"),
        )
        .with_description("Submit the current bet slip")
        .with_keywords(&["wager", "stake"])
        .with_shortcut(Shortcut::ctrl('b'))
        .with_priority(5.0),
        Command::new(
            "bet.odds",
            "View Odds",
            CommandCategory::Betting,
            message("Showing current odds"),
        )
        .with_description("Current moneyline and spread prices")
        .with_keywords(&["lines", "prices", "moneyline"])
        .with_shortcut(Shortcut::ctrl('o'))
        .with_priority(4.0),
        Command::new(
            "bet.refresh",
            "Refresh Odds",
            CommandCategory::Betting,
            refresh_odds(feed.clone()),
        )
        .with_description("Pull a fresh set of lines from the feed")
        .with_keywords(&["reload", "update", "lines"])
        .with_shortcut(Shortcut::plain(ShortcutKey::F(5)))
        .with_priority(4.0),
        Command::new(
            "bet.slip",
            "Open Bet Slip",
            CommandCategory::Betting,
            message("Opened bet slip"),
        )
        .with_keywords(&["ticket", "parlay"])
        .with_priority(3.0),
        // --- Account ---
        Command::new(
            "account.balance",
            "Check Balance",
            CommandCategory::Account,
            message("Balance: 250.00 units"),
        )
        .with_description("Available bankroll")
        .with_keywords(&["bankroll", "funds", "wallet"])
        .with_priority(2.0),
        Command::new(
            "account.profile",
            "Edit Profile",
            CommandCategory::Account,
            message("Opened profile"),
        )
        .with_keywords(&["user", "me"])
        .with_priority(1.0),
        Command::new(
            "account.logout",
            "Sign Out",
            CommandCategory::Account,
            message("Signed out"),
        )
        .with_keywords(&["logout", "exit"])
        .with_priority(0.5),
        // --- Analytics ---
        Command::new(
            "analytics.confidence",
            "Show AI Confidence",
            CommandCategory::Analytics,
            top_confidence(feed.clone()),
        )
        .with_description("Highest-confidence pick from the model")
        .with_keywords(&["model", "prediction", "pick"])
        .with_priority(3.0),
        Command::new(
            "analytics.sentiment",
            "Team Sentiment",
            CommandCategory::Analytics,
            team_sentiment(feed, "Lakers"),
        )
        .with_description("Social sentiment score for a team")
        .with_keywords(&["social", "mood"])
        .with_priority(2.0),
        // --- Settings ---
        Command::new(
            "settings.theme",
            "Toggle Theme",
            CommandCategory::Settings,
            message("Theme toggled"),
        )
        .with_keywords(&["dark", "light", "appearance"])
        .with_priority(1.0),
        Command::new(
            "settings.notifications",
            "Notification Settings",
            CommandCategory::Settings,
            message("Opened notification settings"),
        )
        .with_keywords(&["alerts", "push"])
        .with_priority(1.0),
        // --- Tools ---
        Command::new(
            "tools.export",
            "Export Bet History",
            CommandCategory::Tools,
            failing("export service unavailable"),
        )
        .with_description("Download settled bets as CSV")
        .with_keywords(&["csv", "download"])
        .with_priority(1.0),
        Command::new(
            "tools.calculator",
            "Odds Calculator",
            CommandCategory::Tools,
            message("Opened odds calculator"),
        )
        .with_keywords(&["payout", "implied", "probability"])
        .with_priority(1.0),
    ];

    for id in disabled.iter().chain(shortcuts.keys()) {
        if !commands.iter().any(|c| c.id.as_str() == id) {
            warn!(command = %id, "config names an unknown command; ignored");
        }
    }

    commands
        .into_iter()
        .map(|cmd| {
            let enabled = !disabled.iter().any(|d| d == cmd.id.as_str());
            let cmd = match shortcuts.get(cmd.id.as_str()) {
                Some(shortcut) => cmd.with_shortcut(*shortcut),
                None => cmd,
            };
            cmd.with_enabled(enabled)
        })
        .collect()
}
