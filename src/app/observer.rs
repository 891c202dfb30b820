use crate::domain::models::CommandId;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum PaletteEvent {
    Executed { id: CommandId, message: String },
    Failed { id: CommandId, message: String },
    FavoriteToggled { id: CommandId, favorited: bool },
}

#[cfg_attr(test, mockall::automock)]
pub trait PaletteObserver: Send + Sync {
    fn on_event(&self, event: &PaletteEvent);
}

/// Writes every palette event to the log.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl PaletteObserver for TracingObserver {
    fn on_event(&self, event: &PaletteEvent) {
        match event {
            PaletteEvent::Executed { id, message } => {
                info!(command = %id, %message, "command executed");
            }
            PaletteEvent::Failed { id, message } => {
                warn!(command = %id, error = %message, "command failed");
            }
            PaletteEvent::FavoriteToggled { id, favorited } => {
                info!(command = %id, favorited, "favorite toggled");
            }
        }
    }
}
