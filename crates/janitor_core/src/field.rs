//! Field-level comparison of desired against observed values.
//!
//! Both reconcile functions share one contract: an unset desired value means
//! the field is not managed and nothing happens. A set value is always
//! written to its destination, and a [`Change`] is recorded only when the
//! value actually differs. Repeated runs against a converged repository
//! therefore report nothing while still sending the full managed state.

use serde::Serialize;
use tracing::warn;

use crate::report::Change;

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;

/// A value carried by a change record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Count(u32),
    Text(String),
    List(Vec<String>),
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Count(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Count(v) => write!(f, "{v}"),
            Self::Text(v) if v.is_empty() => f.write_str("\"\""),
            Self::Text(v) => f.write_str(v),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Ordered change records of one repository.
///
/// A field is recorded at most once; a second record for the same field is
/// dropped and logged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a change record. Returns false if `field` was already recorded.
    pub fn record(
        &mut self,
        field: &str,
        current: impl Into<FieldValue>,
        desired: impl Into<FieldValue>,
    ) -> bool {
        if self.contains(field) {
            warn!(field = field, "Ignoring duplicate change record");
            return false;
        }

        self.changes.push(Change {
            field: field.to_string(),
            current: current.into(),
            desired: desired.into(),
        });
        true
    }

    pub fn contains(&self, field: &str) -> bool {
        self.changes.iter().any(|c| c.field == field)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }

    pub fn into_changes(self) -> Vec<Change> {
        self.changes
    }
}

/// Stages a desired value into a sparse patch slot.
///
/// Returns true when a change was recorded.
///
/// # Examples
///
/// ```rust
/// use janitor_core::{reconcile_to_patch, ChangeSet};
///
/// let mut changes = ChangeSet::new();
/// let mut slot = None;
///
/// let changed = reconcile_to_patch(&mut changes, "has_wiki", Some(&false), &false, &mut slot);
///
/// assert!(!changed);
/// assert!(changes.is_empty());
/// assert_eq!(slot, Some(false));
/// ```
pub fn reconcile_to_patch<T>(
    changes: &mut ChangeSet,
    field: &str,
    desired: Option<&T>,
    current: &T,
    slot: &mut Option<T>,
) -> bool
where
    T: Clone + PartialEq + Into<FieldValue>,
{
    let Some(desired) = desired else {
        return false;
    };

    *slot = Some(desired.clone());

    if current == desired {
        return false;
    }

    changes.record(field, current.clone(), desired.clone())
}

/// Moves an in-memory desired snapshot field to the desired value.
///
/// Used for sub-resources that are replaced as a whole rather than patched.
/// Returns true when a change was recorded.
pub fn reconcile_to_desired_state<T>(
    changes: &mut ChangeSet,
    field: &str,
    desired: Option<&T>,
    target: &mut T,
) -> bool
where
    T: Clone + PartialEq + Into<FieldValue>,
{
    let Some(desired) = desired else {
        return false;
    };

    let changed = *target != *desired && changes.record(field, target.clone(), desired.clone());
    *target = desired.clone();
    changed
}
