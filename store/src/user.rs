//! User and session storage trait.

use crate::StoreError;
use divs_types::User;
use serde::{Deserialize, Serialize};

/// Persisted theme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Trait for session and registered-user storage.
///
/// Mirrors the original browser-storage layout: one current user, an
/// authenticated flag, a flat registered-user list, and a theme preference.
/// No uniqueness is enforced; lookups are linear scans.
pub trait UserStore: Send + Sync {
    fn current_user(&self) -> Result<Option<User>, StoreError>;
    fn set_current_user(&self, user: &User) -> Result<(), StoreError>;
    fn clear_current_user(&self) -> Result<(), StoreError>;

    fn is_authenticated(&self) -> Result<bool, StoreError>;
    fn set_authenticated(&self, value: bool) -> Result<(), StoreError>;

    fn registered_users(&self) -> Result<Vec<User>, StoreError>;
    fn append_registered(&self, user: &User) -> Result<(), StoreError>;
    /// Rewrite every registered entry whose phone matches `user.phone`.
    fn update_registered(&self, user: &User) -> Result<(), StoreError>;
    fn remove_registered(&self, id: &str) -> Result<(), StoreError>;

    fn theme(&self) -> Result<Theme, StoreError>;
    fn set_theme(&self, theme: Theme) -> Result<(), StoreError>;

    /// First registered user with the given phone, if any.
    fn find_by_phone(&self, phone: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .registered_users()?
            .into_iter()
            .find(|u| u.phone == phone))
    }
}
