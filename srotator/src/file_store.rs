//! File-backed counter shared across processes through an advisory lock.
//!
//! The state file holds the index to hand out next as decimal ASCII. Absent,
//! empty or unparsable content reads as `0`.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::{CounterStore, RotatorError};

pub const DEFAULT_STATE_FILE_NAME: &str = "ai_rr_index.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCounterStore {
    path: PathBuf,
}

impl FileCounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the well-known location in the system temporary directory.
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join(DEFAULT_STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File, RotatorError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| {
                RotatorError::state_unavailable(format!(
                    "failed to create rotation state directory '{}': {error}",
                    parent.display()
                ))
            })?;
        }

        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|error| {
                RotatorError::state_unavailable(format!(
                    "failed to open rotation state '{}': {error}",
                    self.path.display()
                ))
            })
    }

    fn advance_locked(&self, file: &mut File, modulus: usize) -> Result<usize, RotatorError> {
        let mut content = String::new();
        file.read_to_string(&mut content).map_err(|error| {
            RotatorError::state_unavailable(format!("failed to read rotation state: {error}"))
        })?;

        let stored = parse_index(&content).unwrap_or_else(|| {
            if !content.trim().is_empty() {
                tracing::debug!(
                    path = %self.path.display(),
                    "resetting unparsable rotation index to 0"
                );
            }
            0
        });

        let selected = stored % modulus;
        let next = (selected + 1) % modulus;

        file.set_len(0)
            .and_then(|_| file.seek(SeekFrom::Start(0)))
            .and_then(|_| file.write_all(next.to_string().as_bytes()))
            .and_then(|_| file.flush())
            .map_err(|error| {
                RotatorError::state_unavailable(format!("failed to write rotation state: {error}"))
            })?;

        Ok(selected)
    }
}

impl CounterStore for FileCounterStore {
    fn advance(&self, modulus: usize) -> Result<usize, RotatorError> {
        if modulus == 0 {
            return Err(RotatorError::configuration("cannot rotate over zero items"));
        }

        let mut file = self.open()?;
        file.lock().map_err(|error| {
            RotatorError::state_unavailable(format!("failed to lock rotation state: {error}"))
        })?;

        let result = self.advance_locked(&mut file, modulus);

        // Closing the handle also releases the lock.
        let unlocked = file.unlock().map_err(|error| {
            RotatorError::state_unavailable(format!("failed to unlock rotation state: {error}"))
        });

        let selected = result?;
        unlocked?;
        Ok(selected)
    }
}

/// Non-negative decimal index; anything else is `None`.
fn parse_index(content: &str) -> Option<usize> {
    content.trim().parse::<usize>().ok()
}
