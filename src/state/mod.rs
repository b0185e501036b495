//! Persisted key-value state: theme preference and the read-article id set.
//!
//! Backed by a single JSON file with fixed keys. First runs (no file) and
//! corrupted values both degrade to defaults without erroring — state is a
//! convenience, never a failure source. Writes go through the
//! write-temp-then-rename pattern so a reader never observes a partial
//! file.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fixed key for the theme preference.
pub const THEME_KEY: &str = "theme";
/// Fixed key for the read-article id list.
pub const READ_KEY: &str = "read_articles";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to write state file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ============================================================================
// Theme
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Cycle to the other variant: Light → Dark → Light.
    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Persisted/display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

// ============================================================================
// State Store
// ============================================================================

/// Owns the persisted theme and read-id set.
///
/// The read set is append-only from the system's perspective: ids are
/// added, never removed, by normal use.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    theme: Theme,
    read: BTreeSet<u32>,
}

impl StateStore {
    /// Loads persisted state, tolerating a missing file and malformed
    /// values.
    ///
    /// With no saved theme, `os_prefers_dark` decides the first-run
    /// default; a saved value always wins.
    pub fn load(path: impl Into<PathBuf>, os_prefers_dark: bool) -> Self {
        let path = path.into();
        let (theme, read) = match std::fs::read_to_string(&path) {
            Ok(raw) => parse_state(&raw, os_prefers_dark),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No state file yet, using defaults");
                (default_theme(os_prefers_dark), BTreeSet::new())
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read state file, using defaults");
                (default_theme(os_prefers_dark), BTreeSet::new())
            }
        };

        Self { path, theme, read }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Sets and persists the theme preference. Persistence failures are
    /// logged, never propagated.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.persist_logged();
    }

    /// Flips the theme and returns the new variant.
    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.next());
        self.theme
    }

    pub fn is_read(&self, id: u32) -> bool {
        self.read.contains(&id)
    }

    /// Records an article as read. Returns true when the id was newly
    /// added; marking an already-read id is a no-op (no duplicate entries,
    /// no redundant write).
    pub fn mark_read(&mut self, id: u32) -> bool {
        if !self.read.insert(id) {
            return false;
        }
        self.persist_logged();
        true
    }

    /// The read-id set, ascending.
    pub fn read_ids(&self) -> &BTreeSet<u32> {
        &self.read
    }

    /// Writes the state file atomically (temp file + rename).
    pub fn persist(&self) -> Result<(), StateError> {
        let value = serde_json::json!({
            THEME_KEY: self.theme.name(),
            READ_KEY: self.read.iter().collect::<Vec<_>>(),
        });
        let body = serde_json::to_string_pretty(&value)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        atomic_write(&self.path, body.as_bytes())?;
        Ok(())
    }

    fn persist_logged(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist state");
        }
    }
}

fn default_theme(os_prefers_dark: bool) -> Theme {
    if os_prefers_dark {
        Theme::Dark
    } else {
        Theme::Light
    }
}

/// Parses the state file, salvaging whatever fields are well-formed.
fn parse_state(raw: &str, os_prefers_dark: bool) -> (Theme, BTreeSet<u32>) {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "State file is not valid JSON, resetting to defaults");
            return (default_theme(os_prefers_dark), BTreeSet::new());
        }
    };

    let theme = value
        .get(THEME_KEY)
        .and_then(|v| v.as_str())
        .and_then(Theme::from_str_name)
        .unwrap_or_else(|| default_theme(os_prefers_dark));

    let read = match value.get(READ_KEY) {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_u64())
            .filter_map(|n| u32::try_from(n).ok())
            .collect(),
        Some(other) => {
            tracing::warn!(found = %other, "Read-id list is not an array, resetting to empty");
            BTreeSet::new()
        }
        None => BTreeSet::new(),
    };

    (theme, read)
}

/// Write-to-temp-then-rename so the destination is never left partial.
fn atomic_write(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let temp_path = path.with_extension("tmp");

    let mut temp = std::fs::File::create(&temp_path)?;
    temp.write_all(bytes)?;
    temp.sync_all()?;
    drop(temp);

    std::fs::rename(&temp_path, path).inspect_err(|_| {
        let _ = std::fs::remove_file(&temp_path);
    })
}
