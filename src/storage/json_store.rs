use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::ledger::Transaction;
use crate::utils::ensure_dir;

use super::{Result, StorageBackend};

const TMP_SUFFIX: &str = "tmp";

/// Whole-file JSON persistence for a transaction journal.
///
/// The snapshot is a single JSON array. Saves go through a sibling tmp file
/// and a rename so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStore {
    /// Reads the snapshot. A missing file is a normal first run: it is
    /// created with an empty collection and an empty journal is returned.
    /// Unreadable contents are logged and also yield an empty journal rather
    /// than blocking startup.
    fn load(&self) -> Result<Vec<Transaction>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                if let Err(err) = self.save(&[]) {
                    warn!(
                        path = %self.path.display(),
                        error = %err,
                        "could not create journal file"
                    );
                }
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        if data.trim().is_empty() {
            warn!(path = %self.path.display(), "journal file is empty, starting fresh");
            return Ok(Vec::new());
        }
        match serde_json::from_str(&data) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "journal file is unreadable, starting fresh"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, entries: &[Transaction]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
