//! Nullable store — thread-safe in-memory storage for testing.

use divs_store::{ShareStore, StoreError, Theme, UserStore};
use divs_types::{IdentityShare, User};
use std::sync::Mutex;

/// An in-memory user + share store for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
#[derive(Default)]
pub struct NullStore {
    current_user: Mutex<Option<User>>,
    authenticated: Mutex<bool>,
    registered: Mutex<Vec<User>>,
    theme: Mutex<Theme>,
    shares: Mutex<Vec<IdentityShare>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the registered list without going through signup.
    pub fn with_registered(users: Vec<User>) -> Self {
        let store = Self::new();
        *store.registered.lock().unwrap() = users;
        store
    }
}

impl UserStore for NullStore {
    fn current_user(&self) -> Result<Option<User>, StoreError> {
        Ok(self.current_user.lock().unwrap().clone())
    }

    fn set_current_user(&self, user: &User) -> Result<(), StoreError> {
        *self.current_user.lock().unwrap() = Some(user.clone());
        Ok(())
    }

    fn clear_current_user(&self) -> Result<(), StoreError> {
        *self.current_user.lock().unwrap() = None;
        Ok(())
    }

    fn is_authenticated(&self) -> Result<bool, StoreError> {
        Ok(*self.authenticated.lock().unwrap())
    }

    fn set_authenticated(&self, value: bool) -> Result<(), StoreError> {
        *self.authenticated.lock().unwrap() = value;
        Ok(())
    }

    fn registered_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.registered.lock().unwrap().clone())
    }

    fn append_registered(&self, user: &User) -> Result<(), StoreError> {
        self.registered.lock().unwrap().push(user.clone());
        Ok(())
    }

    fn update_registered(&self, user: &User) -> Result<(), StoreError> {
        for entry in self.registered.lock().unwrap().iter_mut() {
            if entry.phone == user.phone {
                *entry = user.clone();
            }
        }
        Ok(())
    }

    fn remove_registered(&self, id: &str) -> Result<(), StoreError> {
        self.registered.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }

    fn theme(&self) -> Result<Theme, StoreError> {
        Ok(*self.theme.lock().unwrap())
    }

    fn set_theme(&self, theme: Theme) -> Result<(), StoreError> {
        *self.theme.lock().unwrap() = theme;
        Ok(())
    }
}

impl ShareStore for NullStore {
    fn shares(&self) -> Result<Vec<IdentityShare>, StoreError> {
        Ok(self.shares.lock().unwrap().clone())
    }

    fn put_share(&self, share: &IdentityShare) -> Result<(), StoreError> {
        let mut shares = self.shares.lock().unwrap();
        if let Some(existing) = shares.iter_mut().find(|s| s.id == share.id) {
            *existing = share.clone();
        } else {
            shares.push(share.clone());
        }
        Ok(())
    }

    fn revoke_share(&self, id: &str) -> Result<(), StoreError> {
        let mut shares = self.shares.lock().unwrap();
        match shares.iter_mut().find(|s| s.id == id) {
            Some(share) => {
                share.active = false;
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}
