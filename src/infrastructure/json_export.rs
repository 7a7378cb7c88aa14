//! Per-record JSON file export.
//!
//! Each normalized product lands in its own file named
//! `{store_loc}_{sub_department}_{brand}_{item_id}.json` under the result
//! directory. Records are independent; a file is written once and never
//! touched again within a run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::debug;

use crate::domain::ProductRecord;

/// Writes normalized product records to the result directory.
pub struct JsonExporter {
    result_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(result_dir: impl Into<PathBuf>) -> Self {
        Self {
            result_dir: result_dir.into(),
        }
    }

    /// Create the result directory if it does not exist yet.
    pub async fn ensure_result_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.result_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to create result directory: {}",
                    self.result_dir.display()
                )
            })
    }

    /// File name convention for one record.
    pub fn file_name(store_loc: &str, sub_department: &str, brand: &str, item_id: i64) -> String {
        format!("{store_loc}_{sub_department}_{brand}_{item_id}.json")
    }

    /// Serialize one record to its own JSON file; returns the path written.
    pub async fn write_record(
        &self,
        store_loc: &str,
        sub_department: &str,
        record: &ProductRecord,
    ) -> Result<PathBuf> {
        let name = Self::file_name(store_loc, sub_department, &record.brand, record.item_id);
        let path = self.result_dir.join(&name);

        let body = serde_json::to_vec(record)
            .with_context(|| format!("Failed to serialize product {}", record.item_id))?;
        fs::write(&path, body)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!(file = %path.display(), "wrote product record");
        Ok(path)
    }

    pub fn result_dir(&self) -> &Path {
        &self.result_dir
    }
}
