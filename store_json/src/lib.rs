//! JSON-file storage backend.
//!
//! One file holds the whole session blob, mirroring the browser-storage
//! layout the demo originally used: each top-level key matches a storage
//! key (`divs_user`, `divs_authenticated`, `divs_registered_users`,
//! `divs_theme`, `divs_shares`). There is no schema versioning and writes
//! are last-write-wins; an unreadable blob is dropped and replaced, the
//! same way a cleared browser profile would start fresh.

use divs_store::{ShareStore, StoreError, Theme, UserStore};
use divs_types::{IdentityShare, User};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct Blob {
    #[serde(default)]
    divs_user: Option<User>,
    #[serde(default)]
    divs_authenticated: bool,
    #[serde(default)]
    divs_registered_users: Vec<User>,
    #[serde(default)]
    divs_theme: Theme,
    #[serde(default)]
    divs_shares: Vec<IdentityShare>,
}

/// File-backed store. The blob is held in memory and written through on
/// every mutation.
pub struct JsonStore {
    path: PathBuf,
    blob: Mutex<Blob>,
}

impl JsonStore {
    /// Open a store at `path`, loading the existing blob if one is there.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let blob = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(blob) => blob,
                Err(e) => {
                    tracing::warn!("unreadable store blob at {}: {e}, starting fresh", path.display());
                    Blob::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Blob::default(),
            Err(e) => return Err(StoreError::Backend(e.to_string())),
        };
        Ok(Self {
            path,
            blob: Mutex::new(blob),
        })
    }

    fn persist(&self, blob: &Blob) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        let contents =
            serde_json::to_string_pretty(blob).map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, contents).map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut Blob) -> R) -> Result<R, StoreError> {
        let mut blob = self.blob.lock().unwrap();
        let result = f(&mut blob);
        self.persist(&blob)?;
        Ok(result)
    }
}

impl UserStore for JsonStore {
    fn current_user(&self) -> Result<Option<User>, StoreError> {
        Ok(self.blob.lock().unwrap().divs_user.clone())
    }

    fn set_current_user(&self, user: &User) -> Result<(), StoreError> {
        self.mutate(|b| b.divs_user = Some(user.clone()))
    }

    fn clear_current_user(&self) -> Result<(), StoreError> {
        self.mutate(|b| b.divs_user = None)
    }

    fn is_authenticated(&self) -> Result<bool, StoreError> {
        Ok(self.blob.lock().unwrap().divs_authenticated)
    }

    fn set_authenticated(&self, value: bool) -> Result<(), StoreError> {
        self.mutate(|b| b.divs_authenticated = value)
    }

    fn registered_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.blob.lock().unwrap().divs_registered_users.clone())
    }

    fn append_registered(&self, user: &User) -> Result<(), StoreError> {
        self.mutate(|b| b.divs_registered_users.push(user.clone()))
    }

    fn update_registered(&self, user: &User) -> Result<(), StoreError> {
        self.mutate(|b| {
            for entry in &mut b.divs_registered_users {
                if entry.phone == user.phone {
                    *entry = user.clone();
                }
            }
        })
    }

    fn remove_registered(&self, id: &str) -> Result<(), StoreError> {
        self.mutate(|b| b.divs_registered_users.retain(|u| u.id != id))
    }

    fn theme(&self) -> Result<Theme, StoreError> {
        Ok(self.blob.lock().unwrap().divs_theme)
    }

    fn set_theme(&self, theme: Theme) -> Result<(), StoreError> {
        self.mutate(|b| b.divs_theme = theme)
    }
}

impl ShareStore for JsonStore {
    fn shares(&self) -> Result<Vec<IdentityShare>, StoreError> {
        Ok(self.blob.lock().unwrap().divs_shares.clone())
    }

    fn put_share(&self, share: &IdentityShare) -> Result<(), StoreError> {
        self.mutate(|b| {
            if let Some(existing) = b.divs_shares.iter_mut().find(|s| s.id == share.id) {
                *existing = share.clone();
            } else {
                b.divs_shares.push(share.clone());
            }
        })
    }

    fn revoke_share(&self, id: &str) -> Result<(), StoreError> {
        let found = self.mutate(|b| {
            if let Some(share) = b.divs_shares.iter_mut().find(|s| s.id == id) {
                share.active = false;
                true
            } else {
                false
            }
        })?;
        if found {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use divs_types::{ExpiryWindow, Permissions, Timestamp, VerificationMethod};

    fn test_user(id: &str, phone: &str) -> User {
        User {
            id: id.to_string(),
            name: "Jane Smith".into(),
            phone: phone.to_string(),
            email: "jane@example.com".into(),
            avatar: None,
        }
    }

    fn test_share(id: &str) -> IdentityShare {
        IdentityShare {
            id: id.to_string(),
            code: Some("123456".into()),
            qr_data: None,
            permissions: Permissions::id_only(),
            expiry: ExpiryWindow::OneDay,
            expires_at: Timestamp::new(86_400_000),
            method: VerificationMethod::Code,
            created_at: Timestamp::EPOCH,
            used_at: None,
            active: true,
        }
    }

    #[test]
    fn blob_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("divs.json");

        let store = JsonStore::open(&path).unwrap();
        store.set_current_user(&test_user("1", "4155550100")).unwrap();
        store.set_authenticated(true).unwrap();
        store.append_registered(&test_user("1", "4155550100")).unwrap();
        store.set_theme(Theme::Dark).unwrap();

        let reopened = JsonStore::open(&path).unwrap();
        assert_eq!(reopened.current_user().unwrap().unwrap().id, "1");
        assert!(reopened.is_authenticated().unwrap());
        assert_eq!(reopened.registered_users().unwrap().len(), 1);
        assert_eq!(reopened.theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn corrupt_blob_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("divs.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonStore::open(&path).unwrap();
        assert!(store.current_user().unwrap().is_none());
        assert!(!store.is_authenticated().unwrap());
    }

    #[test]
    fn update_registered_matches_by_phone() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("divs.json")).unwrap();

        store.append_registered(&test_user("1", "4155550100")).unwrap();
        store.append_registered(&test_user("2", "4155550199")).unwrap();

        let mut updated = test_user("1", "4155550100");
        updated.name = "Jane Q. Smith".into();
        store.update_registered(&updated).unwrap();

        let users = store.registered_users().unwrap();
        assert_eq!(users[0].name, "Jane Q. Smith");
        assert_eq!(users[1].name, "Jane Smith");
    }

    #[test]
    fn remove_registered_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("divs.json")).unwrap();

        store.append_registered(&test_user("1", "4155550100")).unwrap();
        store.append_registered(&test_user("2", "4155550199")).unwrap();
        store.remove_registered("1").unwrap();

        let users = store.registered_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "2");
    }

    #[test]
    fn revoked_share_goes_inactive_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("divs.json");
        let store = JsonStore::open(&path).unwrap();

        store.put_share(&test_share("s1")).unwrap();
        store.revoke_share("s1").unwrap();
        assert!(store.active_shares().unwrap().is_empty());

        let reopened = JsonStore::open(&path).unwrap();
        assert!(!reopened.get_share("s1").unwrap().unwrap().active);
    }

    #[test]
    fn revoking_unknown_share_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("divs.json")).unwrap();
        assert!(matches!(
            store.revoke_share("missing"),
            Err(StoreError::NotFound(_))
        ));
    }
}
