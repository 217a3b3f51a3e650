use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

/// How the view is windowed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    Paged,
    Reveal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rows per page in paged mode
    pub page_size: usize,
    /// Rows revealed per growth step in reveal mode
    pub reveal_batch: usize,
    pub window: WindowMode,
    /// Widest a column is allowed to render
    pub max_col_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: 20,
            reveal_batch: 20,
            window: WindowMode::Paged,
            max_col_width: 30,
        }
    }
}

impl Config {
    /// Load `griddle.toml` from the working directory, then the user config
    /// directory. Missing files mean defaults; a malformed file is reported
    /// and ignored.
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            let Ok(text) = fs::read_to_string(&path) else {
                continue;
            };
            match toml::from_str(&text) {
                Ok(config) => return config,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "ignoring malformed config");
                    return Self::default();
                }
            }
        }
        Self::default()
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("griddle.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("griddle").join("config.toml"));
        }
        paths
    }
}
