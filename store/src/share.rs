//! Identity-share storage trait.

use crate::StoreError;
use divs_types::IdentityShare;

/// Trait for identity-share storage.
pub trait ShareStore: Send + Sync {
    fn shares(&self) -> Result<Vec<IdentityShare>, StoreError>;

    /// Insert or replace a share by id.
    fn put_share(&self, share: &IdentityShare) -> Result<(), StoreError>;

    /// Mark a share inactive. Errors if the id is unknown.
    fn revoke_share(&self, id: &str) -> Result<(), StoreError>;

    fn get_share(&self, id: &str) -> Result<Option<IdentityShare>, StoreError> {
        Ok(self.shares()?.into_iter().find(|s| s.id == id))
    }

    /// Shares that are still active.
    fn active_shares(&self) -> Result<Vec<IdentityShare>, StoreError> {
        Ok(self.shares()?.into_iter().filter(|s| s.active).collect())
    }
}
