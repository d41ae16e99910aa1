//! Per-candidate discovery outcomes

use crate::domain::ApplicationRecord;
use crate::error::{DiscoveryError, DiscoveryWarning};

/// Result of examining one filesystem entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A complete, versioned application
    Success(ApplicationRecord),
    /// The candidate is unusable; the run continues without it
    Warning(DiscoveryWarning),
    /// The run must fail
    Error(DiscoveryError),
    /// The entry is not an application descriptor
    NoResult,
}

impl Outcome {
    pub fn is_no_result(&self) -> bool {
        matches!(self, Outcome::NoResult)
    }
}

impl From<DiscoveryWarning> for Outcome {
    fn from(warning: DiscoveryWarning) -> Self {
        Outcome::Warning(warning)
    }
}

impl From<DiscoveryError> for Outcome {
    fn from(error: DiscoveryError) -> Self {
        Outcome::Error(error)
    }
}

/// Outcomes split by severity, in the order they were produced
#[derive(Debug, Default)]
pub struct Partition {
    pub records: Vec<ApplicationRecord>,
    pub warnings: Vec<DiscoveryWarning>,
    pub errors: Vec<DiscoveryError>,
}

impl FromIterator<Outcome> for Partition {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut partition = Partition::default();
        for outcome in iter {
            match outcome {
                Outcome::Success(record) => partition.records.push(record),
                Outcome::Warning(warning) => partition.warnings.push(warning),
                Outcome::Error(error) => partition.errors.push(error),
                Outcome::NoResult => {}
            }
        }
        partition
    }
}

/// Adds override results: records in order, failures after earlier errors
impl Extend<Result<ApplicationRecord, DiscoveryError>> for Partition {
    fn extend<I: IntoIterator<Item = Result<ApplicationRecord, DiscoveryError>>>(&mut self, iter: I) {
        for result in iter {
            match result {
                Ok(record) => self.records.push(record),
                Err(error) => self.errors.push(error),
            }
        }
    }
}

impl Partition {
    /// Log every warning and fail with all errors, if there are any
    pub fn settle(self) -> Result<Vec<ApplicationRecord>, Vec<DiscoveryError>> {
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
        if self.errors.is_empty() {
            Ok(self.records)
        } else {
            Err(self.errors)
        }
    }
}
