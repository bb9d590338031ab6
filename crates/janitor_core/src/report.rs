//! Reconciliation results consumed by the presentation layer.

use serde::{Serialize, Serializer};

use crate::field::FieldValue;
use crate::ReconcileError;

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// One field that differs between the remote and the desired state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    /// Stable field identifier, e.g. `allow_merge_commit`
    pub field: String,
    pub current: FieldValue,
    pub desired: FieldValue,
}

impl std::fmt::Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} → {}", self.field, self.current, self.desired)
    }
}

/// The outcome of reconciling one repository.
///
/// Branch protection changes and failures are folded into the same result
/// as the repository settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileResult {
    /// `owner/name` of the repository
    pub repository: String,

    /// Whether the repository was found
    pub exists: bool,

    /// Detected changes, in reconciliation order
    pub changes: Vec<Change>,

    #[serde(serialize_with = "serialize_error")]
    pub error: Option<ReconcileError>,
}

impl ReconcileResult {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            exists: false,
            changes: Vec::new(),
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Attaches an error to the result.
    ///
    /// Errors accumulate into [`ReconcileError::Multiple`]; none is replaced.
    pub fn record_error(&mut self, error: ReconcileError) {
        self.error = Some(match self.error.take() {
            None => error,
            Some(ReconcileError::Multiple(mut errors)) => {
                errors.push(error);
                ReconcileError::Multiple(errors)
            }
            Some(previous) => ReconcileError::Multiple(vec![previous, error]),
        });
    }
}

fn serialize_error<S>(error: &Option<ReconcileError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Totals over the results of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    /// Found and reconciled without error
    pub succeeded: usize,
    /// Carrying an error
    pub failed: usize,
    /// Not found on GitHub
    pub skipped: usize,
    /// With at least one detected change
    pub changed: usize,
}

impl RunSummary {
    pub fn from_results(results: &[ReconcileResult]) -> Self {
        results.iter().fold(
            Self {
                total: results.len(),
                ..Self::default()
            },
            |mut summary, result| {
                match (&result.error, result.exists) {
                    (Some(_), _) => summary.failed += 1,
                    (None, true) => summary.succeeded += 1,
                    (None, false) => summary.skipped += 1,
                }
                if result.has_changes() {
                    summary.changed += 1;
                }
                summary
            },
        )
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
