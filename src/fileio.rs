use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::csv::{self, Parsed};
use crate::error::LoadError;

/// Accepted at the boundary: a `.csv` extension, case-insensitive.
pub fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

pub struct FileIO {
    pub file_path: PathBuf,
}

impl FileIO {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.display().to_string())
    }

    /// Read and parse the file. Parsing itself cannot fail; a document
    /// with no header row is rejected here so the engine is never loaded
    /// with an empty dataset.
    pub fn load(&self) -> Result<Parsed, LoadError> {
        if !is_csv(&self.file_path) {
            return Err(LoadError::Unsupported(self.file_path.clone()));
        }

        let text = fs::read_to_string(&self.file_path)?;
        let parsed = csv::parse(&text);
        if parsed.is_empty() {
            return Err(LoadError::Empty);
        }

        info!(
            file = %self.file_path.display(),
            rows = parsed.rows.len(),
            "file loaded"
        );
        Ok(parsed)
    }
}
