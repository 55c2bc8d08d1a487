//! Loading and saving the progress record.

use std::fs;
use std::path::Path;

use crate::error::ProgressResult;
use crate::record::ProgressRecord;

/// Load the record from `path`. A missing file yields a fresh record.
pub fn load(path: &Path) -> ProgressResult<ProgressRecord> {
    if !path.exists() {
        return Ok(ProgressRecord::new());
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Save the record to `path` as pretty-printed JSON, creating parent
/// directories as needed.
pub fn save(path: &Path, record: &ProgressRecord) -> ProgressResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let data = serde_json::to_string_pretty(record)?;
    fs::write(path, data)?;
    Ok(())
}
