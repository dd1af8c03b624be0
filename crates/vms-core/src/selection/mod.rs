//! Selection sets.
//!
//! A [`SelectionSet`] is an ordered, duplicate-free list of startup snapshots.
//! Insertion order is display order; removing and re-adding an id moves it to
//! the end.

use serde::Serialize;
use thiserror::Error;

use crate::ids::StartupId;
use crate::startup::Startup;

/// Maximum number of comparison candidates offered by the candidate picker.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("candidate selection is full ({limit} startups)")]
    CandidateLimitReached { limit: usize },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SelectionSet {
    entries: Vec<Startup>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `startup` unless its id is already present. Returns whether it was inserted.
    pub fn add(&mut self, startup: Startup) -> bool {
        if self.contains(startup.id) {
            return false;
        }
        self.entries.push(startup);
        true
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: StartupId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|startup| startup.id != id);
        self.entries.len() != before
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn ids(&self) -> Vec<StartupId> {
        self.entries.iter().map(|startup| startup.id).collect()
    }

    pub fn first_id(&self) -> Option<StartupId> {
        self.entries.first().map(|startup| startup.id)
    }

    pub fn contains(&self, id: StartupId) -> bool {
        self.entries.iter().any(|startup| startup.id == id)
    }

    pub fn get(&self, id: StartupId) -> Option<&Startup> {
        self.entries.iter().find(|startup| startup.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Startup> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Startup] {
        &self.entries
    }
}

impl FromIterator<Startup> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = Startup>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for startup in iter {
            set.add(startup);
        }
        set
    }
}

/// Point-in-time view of both selections.
///
/// `primary` holds the startups the user compares from ("my startups");
/// `candidates` holds the startups they are compared against. The two sets may
/// share ids.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SelectionSnapshot {
    pub primary: SelectionSet,
    pub candidates: SelectionSet,
}

impl SelectionSnapshot {
    /// The reference startup rank queries are scoped to.
    pub fn reference_id(&self) -> Option<StartupId> {
        self.primary.first_id()
    }

    pub fn primary_ids(&self) -> Vec<StartupId> {
        self.primary.ids()
    }

    pub fn candidate_ids(&self) -> Vec<StartupId> {
        self.candidates.ids()
    }

    pub fn is_primary(&self, id: StartupId) -> bool {
        self.primary.contains(id)
    }

    /// Both sides must be non-empty before a comparison can be requested.
    pub fn is_comparable(&self) -> bool {
        !self.primary.is_empty() && !self.candidates.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.candidates.is_empty()
    }
}
