use crate::config::{PaletteConfig, PaletteVariant};
use crate::domain::ranker::RankOptions;

pub mod command_palette;
pub mod error;

// Re-exports
pub use command_palette::CommandPaletteState;
pub use error::{ErrorSeverity, ErrorState};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    // --- Status ---
    pub should_quit: bool,
    pub last_error: Option<ErrorState>,
    pub status_message: Option<String>, // "Bet slip submitted"

    // --- Command Palette ---
    pub palette: CommandPaletteState,

    // --- Animation ---
    pub frame_count: u64,

    // --- Config ---
    pub rank_options: RankOptions,
    pub variant: PaletteVariant,
}

impl AppState {
    #[must_use]
    pub fn new(config: &PaletteConfig) -> Self {
        Self {
            rank_options: config.rank_options(),
            variant: config.variant,
            ..Default::default()
        }
    }

    /// Options for the current ranking pass, including the active category.
    pub fn current_rank_options(&self) -> RankOptions {
        RankOptions {
            category: self.palette.category,
            ..self.rank_options.clone()
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            last_error: None,
            status_message: None,
            palette: CommandPaletteState::default(),
            frame_count: 0,
            rank_options: RankOptions::default(),
            variant: PaletteVariant::default(),
        }
    }
}
