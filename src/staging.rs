use crate::errors::{FileOperation, IoError};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// A fully rendered output file waiting to be written.
#[derive(Debug, Clone)]
pub struct StagedFile {
    /// Where the file is written. Existing files are truncated.
    pub destination: PathBuf,
    /// Encoded bytes, including any byte-order mark.
    pub content: Vec<u8>,
}

/// Every file a generation run produces, held in memory until all of them
/// rendered successfully.
#[derive(Debug, Clone, Default)]
pub struct StagedOutput {
    pub entries: Vec<StagedFile>,
}

impl StagedOutput {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, destination: PathBuf, content: Vec<u8>) {
        self.entries.push(StagedFile {
            destination,
            content,
        });
    }

    /// Writes every staged file in order and returns the written paths.
    pub fn apply(&self) -> Result<Vec<PathBuf>, IoError> {
        let mut written = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            write_file(&entry.destination, &entry.content)?;
            written.push(entry.destination.clone());
        }

        Ok(written)
    }
}

/// Writes `contents` to `path`, replacing whatever was there.
fn write_file(path: &Path, contents: &[u8]) -> Result<(), IoError> {
    std::fs::write(path, contents)
        .map_err(|error| IoError::new(FileOperation::Write, path.into(), error))?;

    let msg = format!("{} {}", "create".green(), path.display());

    println!("{}", &msg);

    Ok(())
}
