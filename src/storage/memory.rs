use crate::core::error::SyncError;
use crate::core::record::OutputRecord;
use crate::storage::{EventSource, RecordSink};

/// Vector-backed event collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryCollection<E> {
    trigger_names: Vec<String>,
    events: Vec<E>,
}

impl<E> MemoryCollection<E> {
    pub fn new(events: Vec<E>) -> Self {
        Self {
            trigger_names: Vec::new(),
            events,
        }
    }

    pub fn with_trigger_names(trigger_names: Vec<String>, events: Vec<E>) -> Self {
        Self {
            trigger_names,
            events,
        }
    }

    pub fn events(&self) -> &[E] {
        &self.events
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<E>) {
        (self.trigger_names, self.events)
    }
}

impl<E: Clone> EventSource<E> for MemoryCollection<E> {
    fn entry_count(&self) -> u64 {
        self.events.len() as u64
    }

    fn read_entry(&mut self, index: u64) -> Result<E, SyncError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.events.get(i))
            .cloned()
            .ok_or(SyncError::EntryOutOfRange {
                index,
                count: self.entry_count(),
            })
    }

    fn trigger_names(&self) -> &[String] {
        &self.trigger_names
    }
}

/// Collects records in memory; used by tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub trigger_names: Vec<String>,
    pub records: Vec<OutputRecord>,
    closed: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl RecordSink for MemorySink {
    fn define_output(&mut self, trigger_names: &[String]) -> Result<(), SyncError> {
        if self.closed {
            return Err(SyncError::SinkClosed);
        }
        self.trigger_names = trigger_names.to_vec();
        Ok(())
    }

    fn write_record(&mut self, record: &OutputRecord) -> Result<(), SyncError> {
        if self.closed {
            return Err(SyncError::SinkClosed);
        }
        self.records.push(record.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<(), SyncError> {
        self.closed = true;
        Ok(())
    }
}
