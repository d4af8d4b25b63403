// Core exports
pub mod engine;
pub mod tree;

pub use engine::{EngineDump, MatchError, MatchingEngine};
pub use tree::{PersonTree, TreeError};
