use std::path::PathBuf;

use thiserror::Error;

/// Failures at the file boundary. The parser and the table engine never
/// fail on data shape; everything that can go wrong goes wrong here, and
/// the app surfaces it as a message instead of loading anything.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("not a CSV file: {}", .0.display())]
    Unsupported(PathBuf),

    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("no data: file has no header row")]
    Empty,
}
