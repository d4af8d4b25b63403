use crate::models::{Height, HeightBucket, Person};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when mutating a person tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Person already exists: {0}")]
    AlreadyExists(u64),

    #[error("Person not found: {0}")]
    NotFound(u64),
}

#[derive(Debug, Default)]
struct Inner {
    by_height: BTreeMap<Height, Vec<u64>>,
    by_id: HashMap<u64, Arc<Person>>,
}

/// Height-ordered index of the people of one gender
///
/// Two indexes are kept in step under a single `RwLock`:
/// - `by_height`: height -> ids at that height, in insertion order
/// - `by_id`: id -> person
///
/// Writers take the exclusive lock, readers the shared one. The quota inside
/// each person is an atomic and is never touched while holding this lock.
#[derive(Debug, Default)]
pub struct PersonTree {
    inner: RwLock<Inner>,
}

impl PersonTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a person under its height
    pub fn add(&self, person: Arc<Person>) -> Result<(), TreeError> {
        let mut inner = self.inner.write();

        if inner.by_id.contains_key(&person.id) {
            return Err(TreeError::AlreadyExists(person.id));
        }

        inner
            .by_height
            .entry(person.height)
            .or_default()
            .push(person.id);
        inner.by_id.insert(person.id, person);

        Ok(())
    }

    /// Remove a person, dropping its height bucket once it is empty
    pub fn remove(&self, id: u64) -> Result<(), TreeError> {
        let mut inner = self.inner.write();

        let height = match inner.by_id.get(&id) {
            Some(person) => person.height,
            None => return Err(TreeError::NotFound(id)),
        };

        let bucket_empty = match inner.by_height.get_mut(&height) {
            Some(ids) => {
                ids.retain(|&other| other != id);
                ids.is_empty()
            }
            None => return Err(TreeError::NotFound(id)),
        };

        if bucket_empty {
            inner.by_height.remove(&height);
        }
        inner.by_id.remove(&id);

        Ok(())
    }

    /// All people with `min <= height <= max`, shortest first
    ///
    /// People sharing a height come back in insertion order. An inverted
    /// range yields nothing.
    pub fn query_by_height(&self, min: Height, max: Height) -> Vec<Arc<Person>> {
        if min > max {
            return Vec::new();
        }

        let inner = self.inner.read();

        inner
            .by_height
            .range(min..=max)
            .flat_map(|(_, ids)| ids.iter())
            .filter_map(|id| inner.by_id.get(id).cloned())
            .collect()
    }

    pub fn find_by_id(&self, id: u64) -> Option<Arc<Person>> {
        self.inner.read().by_id.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Height buckets in ascending order, for diagnostics
    pub fn snapshot(&self) -> Vec<HeightBucket> {
        self.inner
            .read()
            .by_height
            .iter()
            .map(|(height, ids)| HeightBucket {
                height: height.value(),
                ids: ids.clone(),
            })
            .collect()
    }

    /// Verify that both indexes describe the same set of people
    ///
    /// Returns a description of the first violation found.
    pub fn check_consistency(&self) -> Result<(), String> {
        let inner = self.inner.read();
        let mut seen = HashSet::with_capacity(inner.by_id.len());

        for (height, ids) in &inner.by_height {
            if ids.is_empty() {
                return Err(format!("empty bucket at height {}", height.value()));
            }
            for id in ids {
                if !seen.insert(*id) {
                    return Err(format!("id {} indexed more than once", id));
                }
                match inner.by_id.get(id) {
                    Some(person) if person.height == *height => {}
                    Some(person) => {
                        return Err(format!(
                            "id {} filed under {} but has height {}",
                            id,
                            height.value(),
                            person.height.value()
                        ))
                    }
                    None => return Err(format!("id {} missing from id index", id)),
                }
            }
        }

        if seen.len() != inner.by_id.len() {
            return Err(format!(
                "id index has {} people, height index has {}",
                inner.by_id.len(),
                seen.len()
            ));
        }

        Ok(())
    }
}
