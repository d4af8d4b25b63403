//! Matchbook - in-memory matchmaking index
//!
//! People are split into one height-ordered tree per gender. The matching
//! engine answers "who is compatible with this person" by range-scanning the
//! opposite tree, and spends a per-person quota of wanted dates on each match,
//! evicting people whose quota runs out.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{MatchError, MatchingEngine, PersonTree, TreeError};
pub use crate::models::{Gender, Height, NewPerson, Person, PersonView, QuotaPolicy};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let engine = MatchingEngine::new(QuotaPolicy::BestEffort);
        assert_eq!(engine.population(), 0);
        assert_eq!(engine.quota_policy(), QuotaPolicy::BestEffort);
    }
}
