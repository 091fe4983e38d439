//! Storage collaborator: sequential readers of event collections and writers
//! of output records.
//!
//! The synchronizer only depends on the two traits below. `memory` backs them
//! with vectors, `toon` with TOON documents on disk.

pub mod memory;
pub mod toon;

use crate::core::error::SyncError;
use crate::core::record::OutputRecord;
use crate::core::types::{EventIdentity, IdentifiedEvent};

pub use memory::{MemoryCollection, MemorySink};
pub use toon::{ToonSink, encode_output, parse_collection, read_collection};

/// Random-access reader over one event collection.
pub trait EventSource<E> {
    fn entry_count(&self) -> u64;

    fn read_entry(&mut self, index: u64) -> Result<E, SyncError>;

    /// File-level trigger label catalog, in stable catalog order.
    fn trigger_names(&self) -> &[String] {
        &[]
    }

    fn read_identity(&mut self, index: u64) -> Result<EventIdentity, SyncError>
    where
        E: IdentifiedEvent,
    {
        self.read_entry(index).map(|event| event.identity())
    }
}

/// Writer of output records. `define_output` is called once before the first
/// record, `close` once after the last.
pub trait RecordSink {
    fn define_output(&mut self, trigger_names: &[String]) -> Result<(), SyncError>;

    fn write_record(&mut self, record: &OutputRecord) -> Result<(), SyncError>;

    fn close(&mut self) -> Result<(), SyncError>;
}
