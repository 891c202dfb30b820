use crate::domain::models::CommandId;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Palette Lifecycle ---
    OpenPalette,  // Ctrl+K / ':'
    ClosePalette, // Explicit close request
    Cancel,       // ESC

    // --- Query Editing ---
    SetQuery(String),
    InsertChar(char),
    Backspace,
    ClearQuery,
    CycleCategory, // Tab: None -> Navigation -> ... -> Tools -> None

    // --- Selection ---
    SelectNext,
    SelectPrev,
    SelectIndex(usize),

    // --- Execution ---
    ExecuteSelected,
    ActivateIndex(usize),      // Left click on a visible row: select + execute
    ExecuteCommand(CommandId), // Direct invocation (shortcut while closed)
    ExecutionFinished {
        id: CommandId,
        result: Result<String, String>,
        finished_at: DateTime<Local>,
    },

    // --- Favorites ---
    ToggleFavorite(CommandId),
    ToggleFavoriteSelected,

    // --- Status ---
    ClearError,
}
