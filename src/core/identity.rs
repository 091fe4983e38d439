// identity -> entry position lookup over the secondary collection
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::info;

use crate::core::error::SyncError;
use crate::core::types::{EventIdentity, IdentifiedEvent};
use crate::storage::EventSource;

/// Three-level run -> lumi -> event map to the entry position of each event.
///
/// Every identity maps to exactly one position; inserting it a second time is rejected.
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    runs: HashMap<u32, HashMap<u32, HashMap<u64, u64>>>,
    len: usize,
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single pass over `source`, recording the position of every entry.
    pub fn build<E, S>(source: &mut S) -> Result<Self, SyncError>
    where
        E: IdentifiedEvent,
        S: EventSource<E> + ?Sized,
    {
        let count = source.entry_count();
        let mut index = Self::new();

        for position in 0..count {
            let identity = source.read_identity(position)?;
            index.insert(identity, position)?;
        }

        info!(
            "indexed {} secondary entries across {} runs",
            index.len(),
            index.run_count()
        );
        Ok(index)
    }

    //no overwrites: a second entry for the same identity means the input is broken
    pub fn insert(&mut self, identity: EventIdentity, position: u64) -> Result<(), SyncError> {
        let events = self
            .runs
            .entry(identity.run)
            .or_default()
            .entry(identity.lumi)
            .or_default();

        match events.entry(identity.event) {
            Entry::Occupied(prior) => Err(SyncError::DuplicateIdentity {
                identity,
                first: *prior.get(),
                duplicate: position,
            }),
            Entry::Vacant(slot) => {
                slot.insert(position);
                self.len += 1;
                Ok(())
            }
        }
    }

    pub fn get(&self, identity: EventIdentity) -> Option<u64> {
        self.runs
            .get(&identity.run)?
            .get(&identity.lumi)?
            .get(&identity.event)
            .copied()
    }

    pub fn lookup(&self, identity: EventIdentity) -> Result<u64, SyncError> {
        self.get(identity).ok_or(SyncError::IdentityNotFound(identity))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }
}
