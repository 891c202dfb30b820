pub mod command_palette;
pub mod footer;
pub mod header;
pub mod helpers;
