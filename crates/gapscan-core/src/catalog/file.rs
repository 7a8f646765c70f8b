//! File-backed pattern source.
//!
//! The catalogue file is one JSON document mapping resource types to their
//! capability patterns, so scans run without any live knowledge store
//! behind them.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::CatalogError;
use super::raw::RawRecord;
use super::{Capability, PatternSource};

/// One `(capability, pattern record)` pairing in the catalogue file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub capability: Capability,
    pub record: RawRecord,
}

/// Pattern source backed by a catalogue file.
#[derive(Debug, Clone, Default)]
pub struct FilePatternSource {
    records: BTreeMap<String, Vec<CatalogEntry>>,
}

impl FilePatternSource {
    /// Loads a catalogue file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let records = serde_json::from_str(&content)?;
        Ok(Self { records })
    }

    /// Builds a source from in-memory entries.
    pub fn from_entries(records: BTreeMap<String, Vec<CatalogEntry>>) -> Self {
        Self { records }
    }
}

impl PatternSource for FilePatternSource {
    fn resource_types(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.records.keys().cloned().collect())
    }

    fn patterns(&self, resource_type: &str) -> Result<Vec<(Capability, RawRecord)>, CatalogError> {
        Ok(self
            .records
            .get(resource_type)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| (entry.capability.clone(), entry.record.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
