use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Gender partition. Decides which tree owns a person and which way the
/// height rule points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn opposite(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Height key with a total order so it can live in a `BTreeMap`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Height(pub f64);

impl Height {
    pub const MIN: Height = Height(0.0);
    pub const MAX: Height = Height(f64::MAX);

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Height {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Height {}

impl PartialOrd for Height {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Height {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Height {
    fn from(value: f64) -> Self {
        Height(value)
    }
}

/// Remaining number of dates a person still wants.
///
/// Mutated only through compare-and-swap, never under the tree lock.
#[derive(Debug, Default)]
pub struct Quota(AtomicU64);

impl Quota {
    pub fn new(value: u64) -> Self {
        Self(AtomicU64::new(value))
    }

    pub fn get(&self) -> u64 {
        self.0.load(AtomicOrdering::Acquire)
    }

    /// Take one unit off the quota.
    ///
    /// Returns the value left after the decrement, or `None` if the quota was
    /// already exhausted. A lost race with another decrement is retried with
    /// the freshly observed value.
    pub fn try_decrement(&self) -> Option<u64> {
        let mut current = self.0.load(AtomicOrdering::Acquire);
        loop {
            if current == 0 {
                return None;
            }
            match self.0.compare_exchange_weak(
                current,
                current - 1,
                AtomicOrdering::AcqRel,
                AtomicOrdering::Acquire,
            ) {
                Ok(_) => return Some(current - 1),
                Err(observed) => current = observed,
            }
        }
    }

    /// Give back one unit taken by `try_decrement`.
    pub fn restore(&self) {
        self.0.fetch_add(1, AtomicOrdering::AcqRel);
    }
}

/// A person before it has been assigned an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub height: f64,
    pub gender: Gender,
    #[serde(rename = "wantedDates")]
    pub wanted_dates: u64,
}

/// A stored person
#[derive(Debug)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub height: Height,
    pub gender: Gender,
    pub wanted_dates: Quota,
}

impl Person {
    pub fn new(id: u64, new_person: NewPerson) -> Self {
        Self {
            id,
            name: new_person.name,
            height: Height(new_person.height),
            gender: new_person.gender,
            wanted_dates: Quota::new(new_person.wanted_dates),
        }
    }

    /// Point-in-time copy suitable for serialization
    pub fn view(&self) -> PersonView {
        PersonView {
            id: self.id,
            name: self.name.clone(),
            height: self.height.value(),
            gender: self.gender,
            wanted_dates: self.wanted_dates.get(),
        }
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.height == other.height
            && self.gender == other.gender
            && self.wanted_dates.get() == other.wanted_dates.get()
    }
}

/// Serializable snapshot of a person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonView {
    pub id: u64,
    pub name: String,
    pub height: f64,
    pub gender: Gender,
    #[serde(rename = "wantedDates")]
    pub wanted_dates: u64,
}

/// How a match reacts when the second participant is out of dates after
/// the first one was already charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaPolicy {
    /// Give the first participant's date back before failing.
    #[default]
    Compensate,
    /// Keep the first participant's date consumed.
    BestEffort,
}

/// One height bucket in a diagnostic dump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightBucket {
    pub height: f64,
    pub ids: Vec<u64>,
}
