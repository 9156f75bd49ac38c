//! Output path checks shared by the file writers.

use crate::utils::error::OutputError;
use log::debug;
use std::fs::File;
use std::path::Path;

/// Validate that output path is writable
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Validate the path, create missing parent directories and open the file
pub fn create_output_file(path: &Path) -> Result<File, OutputError> {
    validate_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    File::create(path).map_err(OutputError::WriteFailed)
}
