use crate::domain::ranker::{MatchMode, RankOptions, RankWeights};
use crate::domain::shortcut::{Shortcut, ShortcutParseError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("invalid shortcut for `{id}`: {source}")]
    Shortcut {
        id: String,
        source: ShortcutParseError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteVariant {
    /// Title, description and shortcut on each row.
    #[default]
    Default,
    /// Title and shortcut only.
    Compact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    /// `fuzzy` (default) or `substring`.
    pub match_mode: MatchMode,
    pub variant: PaletteVariant,
    /// Rows shown at most. Default 10.
    pub max_results: usize,
    /// Defaults: priority 1.0, recency 0.1.
    pub weights: RankWeights,
    /// Command ids registered but not executable.
    pub disabled_commands: Vec<String>,
    /// Command id to key combination, e.g. `"bet.place" = "ctrl+p"`.
    pub shortcuts: BTreeMap<String, String>,
    /// Seed for the mock odds feed.
    pub feed_seed: u64,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Fuzzy,
            variant: PaletteVariant::Default,
            max_results: 10,
            weights: RankWeights::default(),
            disabled_commands: Vec::new(),
            shortcuts: BTreeMap::new(),
            feed_seed: 42,
        }
    }
}

impl PaletteConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `~/.config/sharpline/config.toml`
    /// is used if present, and defaults otherwise.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit_path {
            Some(p) if p.exists() => Self::load_from_path(p),
            Some(p) => Err(ConfigError::NotFound(p.to_path_buf())),
            None => match get_config_path().filter(|p| p.exists()) {
                Some(p) => Self::load_from_path(&p),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PaletteConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::Invalid("max_results must be at least 1".into()));
        }
        for (name, w) in [
            ("weights.priority", self.weights.priority),
            ("weights.recency", self.weights.recency),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        self.shortcut_overrides()?;
        Ok(())
    }

    pub fn shortcut_overrides(&self) -> Result<BTreeMap<String, Shortcut>, ConfigError> {
        self.shortcuts
            .iter()
            .map(|(id, combo)| {
                combo
                    .parse::<Shortcut>()
                    .map(|shortcut| (id.clone(), shortcut))
                    .map_err(|source| ConfigError::Shortcut {
                        id: id.clone(),
                        source,
                    })
            })
            .collect()
    }

    pub fn rank_options(&self) -> RankOptions {
        RankOptions {
            match_mode: self.match_mode,
            weights: self.weights,
            max_results: self.max_results,
            category: None,
        }
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("sharpline");
        path
    })
}

pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}
