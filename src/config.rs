use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::SyncError;

/// Thresholds and output bounds of a synchronization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Primary jets need `pt > min_pt` to be kept.
    pub min_pt: f64,
    /// Upper bound on the primary (and generator) jet arrays of a record.
    pub max_jets: usize,
    /// Upper bound on the canonical trigger arrays of a record.
    pub max_triggers: usize,
    /// Leading kept jets that carry quantized composition.
    pub composition_jets: usize,
    /// Secondary jets matched per event, taken in catalog order.
    pub secondary_jets: usize,
    pub max_events: Option<u64>,
    pub is_mc: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            min_pt: 15.0,
            max_jets: 64,
            max_triggers: 64,
            composition_jets: 3,
            secondary_jets: 3,
            max_events: None,
            is_mc: false,
        }
    }
}

impl SyncConfig {
    pub fn from_toon_str(text: &str) -> Result<Self, SyncError> {
        let config: Self = toon_format::decode_default(text)
            .map_err(|e| SyncError::Config(format!("cannot parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toon_file(path: &Path) -> Result<Self, SyncError> {
        let text = fs::read_to_string(path).map_err(|source| SyncError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toon_str(&text)
    }

    pub fn validate(&self) -> Result<(), SyncError> {
        if !self.min_pt.is_finite() {
            return Err(SyncError::Config(format!("min_pt must be finite, got {}", self.min_pt)));
        }
        if self.max_jets == 0 {
            return Err(SyncError::Config("max_jets must be at least 1".to_string()));
        }
        Ok(())
    }
}
