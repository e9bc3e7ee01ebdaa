//! The registered user record.

use serde::{Deserialize, Serialize};

/// A registered user. One user is "current" per session; the full list of
/// registered users lives in the store and is searched by linear scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Minted from the clock at signup.
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
