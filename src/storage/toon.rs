// TOON-backed collections: a whole document is decoded up front and served
// from memory, output records are buffered and written in one go on close.
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::error::SyncError;
use crate::core::record::OutputRecord;
use crate::storage::{MemoryCollection, RecordSink};

/// On-disk layout of an input collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionFile<E> {
    #[serde(default)]
    pub trigger_names: Vec<String>,
    pub events: Vec<E>,
}

#[derive(Serialize)]
struct OutputFile<'a> {
    trigger_names: &'a [String],
    records: &'a [OutputRecord],
}

pub fn parse_collection<E: DeserializeOwned>(text: &str) -> Result<MemoryCollection<E>, SyncError> {
    let file: CollectionFile<E> =
        toon_format::decode_default(text).map_err(|e| SyncError::Decode {
            what: "event collection",
            message: e.to_string(),
        })?;
    Ok(MemoryCollection::with_trigger_names(file.trigger_names, file.events))
}

pub fn read_collection<E: DeserializeOwned>(path: &Path) -> Result<MemoryCollection<E>, SyncError> {
    let text = fs::read_to_string(path).map_err(|source| SyncError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let collection = parse_collection(&text)?;
    info!("loaded {} entries from {}", collection.events().len(), path.display());
    Ok(collection)
}

pub fn encode_collection<E: Serialize>(file: &CollectionFile<E>) -> Result<String, SyncError> {
    toon_format::encode_default(file).map_err(|e| SyncError::Encode {
        what: "event collection",
        message: e.to_string(),
    })
}

/// Render the output document. Same records in, same text out.
pub fn encode_output(trigger_names: &[String], records: &[OutputRecord]) -> Result<String, SyncError> {
    let file = OutputFile {
        trigger_names,
        records,
    };
    toon_format::encode_default(&file).map_err(|e| SyncError::Encode {
        what: "output records",
        message: e.to_string(),
    })
}

/// Writes all records to `path` as one TOON document when closed.
/// Nothing reaches the disk if the run aborts before `close`.
#[derive(Debug)]
pub struct ToonSink {
    path: PathBuf,
    trigger_names: Vec<String>,
    records: Vec<OutputRecord>,
    closed: bool,
}

impl ToonSink {
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            trigger_names: Vec::new(),
            records: Vec::new(),
            closed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for ToonSink {
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
        if self.closed {
            return Ok(());
        }
        let text = encode_output(&self.trigger_names, &self.records)?;
        fs::write(&self.path, text).map_err(|source| SyncError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.closed = true;
        info!("wrote {} records to {}", self.records.len(), self.path.display());
        Ok(())
    }
}
