pub mod action;
pub mod matcher;
pub mod models;
pub mod ranker;
pub mod registry;
pub mod shortcut;
