//! Key/value storage standing in for browser `localStorage` and
//! `sessionStorage`.
//!
//! Values are strings; typed helpers on [`SessionStore`] encode them as JSON.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use secrecy::SecretString;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use threadline_core::models::User;
use tracing::{debug, warn};

use crate::checkout::CheckoutData;

/// Storage keys.
pub mod keys {
    /// Bearer token of the signed-in shopper (local scope).
    pub const TOKEN: &str = "token";

    /// JSON snapshot of the signed-in user (local scope).
    pub const USER: &str = "user";

    /// JSON summary of a placed order awaiting payment (session scope).
    pub const CHECKOUT_DATA: &str = "checkoutData";
}

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt value for {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// A string key/value store.
pub trait Storage: Send + Sync {
    /// Value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

// =============================================================================
// In-memory
// =============================================================================

/// Process-local storage; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Poisoned)?
            .clear();
        Ok(())
    }
}

// =============================================================================
// JSON file
// =============================================================================

/// Storage persisted as a single JSON object in a file.
///
/// Every write replaces the file atomically. A missing file reads as empty.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Storage backed by `path`; the file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|source| StorageError::Corrupt {
            key: self.path.display().to_string(),
            source,
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let json = serde_json::to_string_pretty(entries).map_err(|source| {
            StorageError::Corrupt {
                key: self.path.display().to_string(),
                source,
            }
        })?;
        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        std::io::Write::write_all(&mut file, json.as_bytes()).map_err(|e| self.io_error(e))?;
        file.persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;
        debug!(path = %self.path.display(), keys = entries.len(), "Storage saved");
        Ok(())
    }

    fn update(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.load()?;
        change(&mut entries);
        self.save(&entries)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.update(BTreeMap::clear)
    }
}

// =============================================================================
// Typed access
// =============================================================================

/// The two storage scopes a storefront session uses.
///
/// `local` survives restarts (auth); `session` holds state for one shopping
/// session (pending checkout) and is wiped by [`SessionStore::end_session`].
#[derive(Clone)]
pub struct SessionStore {
    local: Arc<dyn Storage>,
    session: Arc<dyn Storage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(local: Arc<dyn Storage>, session: Arc<dyn Storage>) -> Self {
        Self { local, session }
    }

    /// Both scopes in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), Arc::new(MemoryStorage::new()))
    }

    /// Both scopes as JSON files (`local.json`, `session.json`) in `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            Arc::new(FileStorage::new(dir.join("local.json"))),
            Arc::new(FileStorage::new(dir.join("session.json"))),
        )
    }

    /// Stored bearer token.
    ///
    /// # Errors
    ///
    /// Returns error if local storage cannot be read.
    pub fn token(&self) -> Result<Option<SecretString>, StorageError> {
        Ok(self
            .local
            .get(keys::TOKEN)?
            .filter(|t| !t.is_empty())
            .map(SecretString::from))
    }

    /// Persist the bearer token.
    ///
    /// # Errors
    ///
    /// Returns error if local storage cannot be written.
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.local.set(keys::TOKEN, token)
    }

    /// Stored user snapshot. A corrupt value is dropped and read as absent.
    ///
    /// # Errors
    ///
    /// Returns error if local storage cannot be read.
    pub fn user(&self) -> Result<Option<User>, StorageError> {
        match read_json(self.local.as_ref(), keys::USER) {
            Err(StorageError::Corrupt { key, source }) => {
                warn!(key, error = %source, "Discarding corrupt stored user");
                self.local.remove(keys::USER)?;
                Ok(None)
            }
            other => other,
        }
    }

    /// Persist the user snapshot.
    ///
    /// # Errors
    ///
    /// Returns error if local storage cannot be written.
    pub fn set_user(&self, user: &User) -> Result<(), StorageError> {
        write_json(self.local.as_ref(), keys::USER, user)
    }

    /// Forget the token and user.
    ///
    /// # Errors
    ///
    /// Returns error if local storage cannot be written.
    pub fn clear_auth(&self) -> Result<(), StorageError> {
        self.local.remove(keys::TOKEN)?;
        self.local.remove(keys::USER)
    }

    /// The pending checkout, if one was placed this session.
    ///
    /// # Errors
    ///
    /// Returns error if session storage cannot be read or holds a corrupt
    /// value.
    pub fn checkout_data(&self) -> Result<Option<CheckoutData>, StorageError> {
        read_json(self.session.as_ref(), keys::CHECKOUT_DATA)
    }

    /// Record the pending checkout.
    ///
    /// # Errors
    ///
    /// Returns error if session storage cannot be written.
    pub fn set_checkout_data(&self, data: &CheckoutData) -> Result<(), StorageError> {
        write_json(self.session.as_ref(), keys::CHECKOUT_DATA, data)
    }

    /// Drop the pending checkout.
    ///
    /// # Errors
    ///
    /// Returns error if session storage cannot be written.
    pub fn remove_checkout_data(&self) -> Result<(), StorageError> {
        self.session.remove(keys::CHECKOUT_DATA)
    }

    /// Wipe the session scope.
    ///
    /// # Errors
    ///
    /// Returns error if session storage cannot be written.
    pub fn end_session(&self) -> Result<(), StorageError> {
        self.session.clear()
    }
}

fn read_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    storage
        .get(key)?
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                key: key.to_owned(),
                source,
            })
        })
        .transpose()
}

fn write_json<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Corrupt {
        key: key.to_owned(),
        source,
    })?;
    storage.set(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use secrecy::ExposeSecret;
    use threadline_core::{OrderId, PaymentMethod, UserId, UserRole};

    use super::*;

    fn user() -> User {
        User {
            id: UserId::new("u1"),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            phone: None,
            role: UserRole::Customer,
            addresses: Vec::new(),
            created_at: None,
        }
    }

    fn checkout() -> CheckoutData {
        CheckoutData {
            order_id: OrderId::new("o1"),
            order_number: Some("TL-1001".to_owned()),
            subtotal: Decimal::from(80),
            delivery_charge: Decimal::from(5),
            total: Decimal::from(85),
            payment_method: PaymentMethod::Online,
        }
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("a").unwrap(), None);
        storage.set("a", "1").unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));
        storage.remove("a").unwrap();
        storage.remove("a").unwrap();
        assert_eq!(storage.get("a").unwrap(), None);
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("local.json");

        FileStorage::new(&path).set(keys::TOKEN, "abc").unwrap();
        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get(keys::TOKEN).unwrap().as_deref(), Some("abc"));

        reopened.clear().unwrap();
        assert_eq!(FileStorage::new(&path).get(keys::TOKEN).unwrap(), None);
    }

    #[test]
    fn test_file_storage_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileStorage::new(&path).get("x"),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_session_store_scopes() {
        let store = SessionStore::in_memory();
        store.set_token("tok").unwrap();
        store.set_user(&user()).unwrap();
        store.set_checkout_data(&checkout()).unwrap();

        store.end_session().unwrap();
        assert!(store.checkout_data().unwrap().is_none());
        assert_eq!(store.token().unwrap().unwrap().expose_secret(), "tok");
        assert_eq!(store.user().unwrap().unwrap().name, "Ada");

        store.clear_auth().unwrap();
        assert!(store.token().unwrap().is_none());
        assert!(store.user().unwrap().is_none());
    }

    #[test]
    fn test_checkout_data_uses_camel_case_key() {
        let local = Arc::new(MemoryStorage::new());
        let session = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(local, session.clone());
        store.set_checkout_data(&checkout()).unwrap();

        let raw = session.get("checkoutData").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["orderId"], "o1");
        assert_eq!(value["paymentMethod"], "online");
        assert_eq!(store.checkout_data().unwrap(), Some(checkout()));
    }

    #[test]
    fn test_corrupt_user_is_discarded() {
        let local = Arc::new(MemoryStorage::new());
        local.set(keys::USER, "{broken").unwrap();
        let store = SessionStore::new(local.clone(), Arc::new(MemoryStorage::new()));
        assert!(store.user().unwrap().is_none());
        assert_eq!(local.get(keys::USER).unwrap(), None);
    }

    #[test]
    fn test_in_dir_writes_two_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::in_dir(dir.path());
        store.set_token("t").unwrap();
        store.set_checkout_data(&checkout()).unwrap();
        assert!(dir.path().join("local.json").exists());
        assert!(dir.path().join("session.json").exists());
    }
}
