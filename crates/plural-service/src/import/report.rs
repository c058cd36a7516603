//! Import result

use serde::Serialize;

/// Summary of a finished import
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ImportReport {
    /// Service the members came from
    pub service: String,
    /// Members written to the store
    pub imported: usize,
    /// Remote records dropped because they had no usable name
    pub skipped: usize,
    /// Members imported without their avatar
    pub avatar_failures: usize,
    /// First non-fatal error met along the way
    pub first_error: Option<String>,
}

impl ImportReport {
    pub(crate) fn record_failure(&mut self, error: impl ToString) {
        self.avatar_failures += 1;
        if self.first_error.is_none() {
            self.first_error = Some(error.to_string());
        }
    }
}
