pub mod action;
pub mod effect;
pub mod features;
pub mod input;
pub mod keymap;
pub mod r#loop;
pub mod observer;
pub mod recovery;
pub mod reducer;
pub mod session;
pub mod state;
pub mod ui;
