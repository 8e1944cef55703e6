//! Fatal error taxonomy for a combination run.
//!
//! Recoverable problems (a source that fails to load, a cell that fails to
//! parse) never surface here: sources are skipped and reported, cells become
//! missing and are imputed later. These variants are the failures that stop
//! the batch.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a combination run.
#[derive(Debug, Error)]
pub enum CombineError {
    /// No source table could be loaded, so there is nothing to merge.
    ///
    /// `candidates` counts the files that were considered and `skipped` the
    /// ones that failed to load.
    #[error("No datasets loaded: {candidates} candidate file(s), {skipped} skipped due to load errors")]
    EmptyInput { candidates: usize, skipped: usize },

    /// Input or output path does not name a CSV file.
    #[error("Unsupported file format: '{extension}'. Supported formats: csv")]
    UnsupportedFormat { extension: String },

    /// The discovery directory could not be listed.
    #[error("Failed to read input directory: {}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The canonical output could not be written. The previous file, if any,
    /// is left in place.
    #[error("Failed to write output file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_message() {
        let err = CombineError::EmptyInput {
            candidates: 3,
            skipped: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("No datasets loaded"));
        assert!(msg.contains("3 candidate"));
    }

    #[test]
    fn test_write_error_exposes_source() {
        use std::error::Error as _;

        let err = CombineError::Write {
            path: PathBuf::from("/tmp/out.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/out.csv"));
        assert!(err.source().is_some());
    }
}
