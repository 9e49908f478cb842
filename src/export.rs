//! Shortlist export.
//!
//! Structure:
//! - Pure functions: (Shortlist, SaveFormat) → String
//! - [`Exporter`]: writes `saved-synonyms.<ext>` into a directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{Dispatch, info};

use crate::types::{SaveFormat, Shortlist};

/// Base filename for saved shortlists; the format supplies the extension.
pub const SAVE_BASENAME: &str = "saved-synonyms";

/// File name a shortlist is saved under for the given format.
pub fn save_filename(format: SaveFormat) -> String {
    format!("{}.{}", SAVE_BASENAME, format.extension())
}

/// Render a shortlist in the requested format.
pub fn format_shortlist(shortlist: &Shortlist, format: SaveFormat) -> serde_json::Result<String> {
    match format {
        SaveFormat::Text => Ok(format_text(shortlist)),
        SaveFormat::Json => format_json(shortlist),
    }
}

// ============================================================================
// TEXT FORMAT
// ============================================================================

/// One block per word: upper-cased word, one synonym per line, blank line.
fn format_text(shortlist: &Shortlist) -> String {
    let mut out = String::new();
    for (word, synonyms) in shortlist.iter() {
        out.push_str(&word.to_uppercase());
        out.push('\n');
        for synonym in synonyms {
            out.push_str(synonym);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(shortlist: &Shortlist) -> serde_json::Result<String> {
    serde_json::to_string_pretty(shortlist)
}

// ============================================================================
// WRITING
// ============================================================================

/// Writes shortlists to a fixed directory, logging through its own dispatcher.
pub struct Exporter {
    dir: PathBuf,
    log: Dispatch,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>, log: Dispatch) -> Self {
        Self {
            dir: dir.into(),
            log,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the shortlist, replacing any earlier save in the same format.
    ///
    /// Returns the path written.
    pub fn save(&self, shortlist: &Shortlist, format: SaveFormat) -> io::Result<PathBuf> {
        let _log = tracing::dispatcher::set_default(&self.log);

        let path = self.dir.join(save_filename(format));
        let contents = format_shortlist(shortlist, format).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to serialize shortlist: {}", e),
            )
        })?;
        fs::write(&path, contents)?;

        info!(
            path = %path.display(),
            words = shortlist.len(),
            synonyms = shortlist.total_values(),
            "saved shortlist"
        );
        Ok(path)
    }
}

// ============================================================================
// TESTS
// ============================================================================
