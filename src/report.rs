//! Outcome of a resize batch.

use crate::error::FileError;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// One entry of a batch that could not be resized.
#[derive(Debug)]
pub struct FileFailure {
    pub name: String,
    pub reason: FileError,
}

impl Serialize for FileFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FileFailure", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("kind", self.reason.kind())?;
        state.serialize_field("reason", &self.reason.to_string())?;
        state.end()
    }
}

/// Aggregated result of a batch. Successful writes are never rolled back,
/// so a report with failures still describes files that were changed.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub resized: Vec<String>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record_success(&mut self, name: &str) {
        self.resized.push(name.to_string());
    }

    pub(crate) fn record_failure(&mut self, name: &str, reason: FileError) {
        self.failures.push(FileFailure {
            name: name.to_string(),
            reason,
        });
    }

    /// Names of the entries that failed, in batch order.
    pub fn failed_names(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.name.as_str()).collect()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            return write!(f, "Resize complete!");
        }
        write!(f, "Could not resize the following files:")?;
        for failure in &self.failures {
            write!(f, "\n{} ({})", failure.name, failure.reason)?;
        }
        Ok(())
    }
}
