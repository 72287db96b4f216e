//! Identifier list reader
//!
//! Reads a newline-delimited file of cluster identifiers. Blank lines and
//! `#` comment lines are skipped; everything else is kept in file order,
//! duplicates included.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while reading the identifier list
#[derive(Debug, Error)]
pub enum InputError {
    #[error("File '{}' not found", path.display())]
    NotFound { path: PathBuf },

    #[error("No cluster identifiers found in {}", path.display())]
    Empty { path: PathBuf },

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read identifiers from a file
///
/// An empty result is returned as-is; the caller decides whether that is fatal.
pub fn read_identifiers(path: &Path) -> Result<Vec<String>, InputError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            InputError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            InputError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    Ok(parse_identifiers(&content))
}

/// Split text into identifiers, dropping blanks and comments
pub fn parse_identifiers(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
