use anyhow::{bail, Result};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct OddsLine {
    pub home: String,
    pub away: String,
    pub home_odds: f64,
    pub away_odds: f64,
    /// Mock model confidence in `[0, 100]`.
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSample {
    pub team: String,
    /// `-1.0` (negative) to `1.0` (positive).
    pub score: f64,
}

/// Placeholder data source behind the dashboard commands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OddsFeed: Send + Sync {
    async fn odds(&self) -> Result<Vec<OddsLine>>;
    async fn sentiment(&self, team: &str) -> Result<SentimentSample>;
}

const TEAMS: &[&str] = &[
    "Lakers", "Celtics", "Warriors", "Nuggets", "Bucks", "Heat", "Knicks", "Suns",
];

/// Deterministic mock feed. Two feeds built from the same seed produce the
/// same sequence of values.
pub struct SeededOddsFeed {
    rng: Mutex<StdRng>,
}

impl SeededOddsFeed {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T> {
        match self.rng.lock() {
            Ok(mut rng) => Ok(f(&mut rng)),
            Err(_) => bail!("odds generator poisoned"),
        }
    }
}

#[async_trait]
impl OddsFeed for SeededOddsFeed {
    async fn odds(&self) -> Result<Vec<OddsLine>> {
        self.with_rng(|rng| {
            TEAMS
                .chunks(2)
                .map(|pair| OddsLine {
                    home: pair[0].to_string(),
                    away: pair[1].to_string(),
                    home_odds: round2(rng.gen_range(1.3..3.5)),
                    away_odds: round2(rng.gen_range(1.3..3.5)),
                    confidence: rng.gen_range(40..=98),
                })
                .collect()
        })
    }

    async fn sentiment(&self, team: &str) -> Result<SentimentSample> {
        if !TEAMS.iter().any(|t| t.eq_ignore_ascii_case(team)) {
            bail!("no sentiment feed for {team}");
        }
        self.with_rng(|rng| SentimentSample {
            team: team.to_string(),
            score: round2(rng.gen_range(-1.0..=1.0)),
        })
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Line with the highest model confidence.
pub fn best_line(lines: &[OddsLine]) -> Option<&OddsLine> {
    lines.iter().max_by_key(|l| l.confidence)
}
