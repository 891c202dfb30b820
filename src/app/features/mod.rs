pub mod execute;

pub use execute::spawn_execution;
