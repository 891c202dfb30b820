pub mod catalog;
pub mod feed;
