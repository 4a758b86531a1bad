//! Timestamped action journal file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use autopermit_core::config::JournalSettings;

/// Appends one timestamped line per decision to the journal file.
///
/// Best-effort: write failures are ignored, the journal must never take
/// down the poll loop.
#[derive(Debug)]
pub struct ActionJournal {
    path: PathBuf,
    enabled: bool,
}

impl ActionJournal {
    /// Create a journal from its settings.
    pub fn new(settings: &JournalSettings) -> Self {
        Self {
            path: settings.path.clone(),
            enabled: settings.log_actions,
        }
    }

    /// Append one line, prefixed with a local timestamp.
    pub fn record(&self, message: &str) {
        if !self.enabled {
            return;
        }
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            let _ = writeln!(file, "[{timestamp}] {message}");
        }
    }
}
