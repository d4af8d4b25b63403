use crate::core::tree::{PersonTree, TreeError};
use crate::models::{Gender, Height, HeightBucket, NewPerson, Person, QuotaPolicy};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by the matching engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Person not found: {0}")]
    PersonNotFound(u64),

    #[error("Cannot match two people of the same gender")]
    SameGender,

    #[error("Height check failed")]
    HeightIncompatible,

    #[error("Person {0} has no wanted dates left")]
    QuotaExhausted(u64),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Contents of both trees, for diagnostics
#[derive(Debug, Clone)]
pub struct EngineDump {
    pub male: Vec<HeightBucket>,
    pub female: Vec<HeightBucket>,
}

/// Coordinates the male and female trees
///
/// Ids come from a counter owned by the engine, so a fresh id never collides
/// with a stored one. The two trees are locked independently; a match reads
/// one person from each without any cross-tree lock.
#[derive(Debug)]
pub struct MatchingEngine {
    male: PersonTree,
    female: PersonTree,
    next_id: AtomicU64,
    quota_policy: QuotaPolicy,
}

impl MatchingEngine {
    pub fn new(quota_policy: QuotaPolicy) -> Self {
        Self {
            male: PersonTree::new(),
            female: PersonTree::new(),
            next_id: AtomicU64::new(0),
            quota_policy,
        }
    }

    pub fn quota_policy(&self) -> QuotaPolicy {
        self.quota_policy
    }

    fn tree(&self, gender: Gender) -> &PersonTree {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }

    fn generate_next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of people currently stored across both trees
    pub fn population(&self) -> usize {
        self.male.len() + self.female.len()
    }

    /// Assign an id and file the person under its gender
    pub fn add_person(&self, new_person: NewPerson) -> Result<Arc<Person>, MatchError> {
        let person = Arc::new(Person::new(self.generate_next_id(), new_person));
        self.tree(person.gender).add(Arc::clone(&person))?;

        tracing::info!(
            "Added person {} ({}, height {})",
            person.id,
            person.gender,
            person.height.value()
        );
        Ok(person)
    }

    /// Look a person up in the male tree, then the female tree
    pub fn find_person(&self, id: u64) -> Result<Arc<Person>, MatchError> {
        self.male
            .find_by_id(id)
            .or_else(|| self.female.find_by_id(id))
            .ok_or(MatchError::PersonNotFound(id))
    }

    pub fn remove_person(&self, id: u64) -> Result<(), MatchError> {
        let person = self.find_person(id)?;

        match self.tree(person.gender).remove(id) {
            Ok(()) => {
                tracing::info!("Removed person {}", id);
                Ok(())
            }
            Err(TreeError::NotFound(_)) => Err(MatchError::PersonNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Up to `limit` height-compatible people of the opposite gender
    ///
    /// Men are offered women no taller than themselves, women are offered
    /// men at least as tall as themselves. Results are shortest first.
    pub fn query_single_people(
        &self,
        id: u64,
        limit: usize,
    ) -> Result<Vec<Arc<Person>>, MatchError> {
        let person = self.find_person(id)?;

        let (min, max) = match person.gender {
            Gender::Male => (Height::MIN, person.height),
            Gender::Female => (person.height, Height::MAX),
        };
        let mut candidates = self.tree(person.gender.opposite()).query_by_height(min, max);
        candidates.truncate(limit);

        tracing::debug!(
            "Found {} candidates for person {} (limit {})",
            candidates.len(),
            id,
            limit
        );
        Ok(candidates)
    }

    /// Add a person and return the best compatible candidate, if any
    pub fn add_person_and_find_match(
        &self,
        new_person: NewPerson,
    ) -> Result<(Arc<Person>, Vec<Arc<Person>>), MatchError> {
        let person = self.add_person(new_person)?;
        let matches = self.query_single_people(person.id, 1)?;
        Ok((person, matches))
    }

    /// Match two people, spending one wanted date from each
    ///
    /// Anyone left with no wanted dates is evicted from their tree.
    pub fn match_people(&self, id1: u64, id2: u64) -> Result<(), MatchError> {
        let first = self.find_person(id1)?;
        let second = self.find_person(id2)?;

        if first.gender == second.gender {
            tracing::warn!("Rejected match {} <-> {}: same gender", id1, id2);
            return Err(MatchError::SameGender);
        }

        let (man, woman) = match first.gender {
            Gender::Male => (&first, &second),
            Gender::Female => (&second, &first),
        };
        if man.height < woman.height {
            tracing::warn!("Rejected match {} <-> {}: height check failed", id1, id2);
            return Err(MatchError::HeightIncompatible);
        }

        let first_left = first
            .wanted_dates
            .try_decrement()
            .ok_or(MatchError::QuotaExhausted(first.id))?;

        let second_left = match second.wanted_dates.try_decrement() {
            Some(left) => left,
            None => {
                if self.quota_policy == QuotaPolicy::Compensate {
                    first.wanted_dates.restore();
                }
                tracing::warn!(
                    "Rejected match {} <-> {}: person {} has no wanted dates left",
                    id1,
                    id2,
                    second.id
                );
                return Err(MatchError::QuotaExhausted(second.id));
            }
        };

        for (person, left) in [(&first, first_left), (&second, second_left)] {
            if left == 0 {
                // Someone else may have evicted them already.
                if self.tree(person.gender).remove(person.id).is_ok() {
                    tracing::debug!("Evicted person {} after last wanted date", person.id);
                }
            }
        }

        tracing::info!("Matched {} <-> {}", id1, id2);
        Ok(())
    }

    /// Snapshot of both trees
    pub fn dump(&self) -> EngineDump {
        let dump = EngineDump {
            male: self.male.snapshot(),
            female: self.female.snapshot(),
        };
        tracing::debug!("male: {:?}", dump.male);
        tracing::debug!("female: {:?}", dump.female);
        dump
    }

    /// Run the tree consistency check on both genders
    pub fn check_consistency(&self) -> Result<(), String> {
        self.male
            .check_consistency()
            .map_err(|e| format!("male: {}", e))?;
        self.female
            .check_consistency()
            .map_err(|e| format!("female: {}", e))
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(QuotaPolicy::default())
    }
}
