use super::observer::PaletteEvent;
use crate::domain::models::CommandId;

/// Side effects requested by the reducer, carried out by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Execute(CommandId),
    Notify(PaletteEvent),
}
