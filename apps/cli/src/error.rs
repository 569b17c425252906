//! # CLI Error Type
//!
//! Failures of the front end itself. Invalid identifiers are NOT errors here:
//! they are ordinary outcomes printed to the user and reflected in the exit
//! code. Configuration errors are reported by `main` before any command
//! runs.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Batch file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Batch input stopped mid-way (e.g. invalid UTF-8).
    #[error("Failed to read input: {0}")]
    ReadInput(#[source] std::io::Error),

    /// stdout closed or otherwise unwritable.
    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CliError::ReadFile {
            path: PathBuf::from("cnpjs.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "Failed to read cnpjs.txt: not found");
    }
}
