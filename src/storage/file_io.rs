//! File I/O utilities with atomic writes
//!
//! Whole-file JSON reads and writes. Each operation opens the file once and
//! releases it on every exit path.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::BudgetError;

/// Read JSON from a file, returning an error if the file doesn't exist
///
/// A missing or unreadable file is a [`BudgetError::Storage`]; contents that
/// do not decode as `T` are a [`BudgetError::Format`].
pub fn read_json_required<T, P>(path: P) -> Result<T, BudgetError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(BudgetError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| BudgetError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "could not decode file");
        BudgetError::Format(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write tab-indented JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BudgetError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            BudgetError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file lives beside the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let written = write_temp_file(&temp_path, data).and_then(|_| {
        fs::rename(&temp_path, path)
            .map_err(|e| BudgetError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if let Err(err) = written {
        // Never leave a partial temp file behind
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    Ok(())
}

/// Write and sync the temp file; the handle is closed on return
fn write_temp_file<T: Serialize>(temp_path: &Path, data: &T) -> Result<(), BudgetError> {
    let file = File::create(temp_path)
        .map_err(|e| BudgetError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let mut serializer = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"\t"));
    data.serialize(&mut serializer)
        .map_err(|e| BudgetError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| BudgetError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| BudgetError::Storage(format!("Failed to sync data: {}", e)))
}

/// `home.budget` → `home.budget.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(OsString::new);
    name.push(".tmp");
    path.with_file_name(name)
}
