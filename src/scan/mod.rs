//! Repository traversal and tree rendering

pub mod collector;
pub mod tree;

pub use collector::{CollectStats, FileCollector};
pub use tree::render_tree;
