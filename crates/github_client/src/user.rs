//! The authenticated account.

use serde::Deserialize;

/// The account a client is authenticated as.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
}
