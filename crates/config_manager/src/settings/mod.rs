//! Desired setting types.
//!
//! This module contains the typed model for the settings block of the
//! configuration file. All fields are optional; an unset field is never
//! reconciled.

pub mod branch_protection;
pub mod repository;

pub use branch_protection::BranchProtectionSettings;
pub use repository::{
    DesiredSettings, GitHubPagesSettings, MergeCommitMessage, MergeCommitTitle,
    SquashMergeCommitMessage, SquashMergeCommitTitle, Visibility,
};
