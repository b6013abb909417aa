// src/file.rs

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::info;

use crate::config::options::ExportOptions;
use crate::csv::to_export_string;
use crate::error::Result;
use crate::specs::card::CardRecord;

/// Write `records` where `export` says: stdout, or the file at `export.out_path()`.
/// Returns the path written to (`None` for stdout).
pub fn export_records(export: &ExportOptions, records: &[CardRecord]) -> Result<Option<PathBuf>> {
    let contents = to_export_string(records, export.include_headers, export.format.delim());

    if export.stdout {
        let mut out = io::stdout().lock();
        out.write_all(contents.as_bytes())?;
        out.flush()?;
        return Ok(None);
    }

    let path = export.out_path();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(&path, contents)?;
    info!("wrote {} records to {}", records.len(), path.display());
    Ok(Some(path))
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
