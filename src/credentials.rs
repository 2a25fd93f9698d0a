// src/credentials.rs
//
// One string credential: the Gemini API key.
// Valid iff non-empty after trimming. No expiry, no format checks.

use std::sync::Mutex;

use thiserror::Error;

use crate::config::consts::{API_KEY_ENV_VARS, KEYRING_SERVICE, KEYRING_USER};

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API key is empty")]
    Empty,
    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

pub trait CredentialStore: Send + Sync {
    /// `Ok(None)` when nothing (or only whitespace) is stored.
    fn load(&self) -> Result<Option<String>, CredentialError>;
    fn save(&self, key: &str) -> Result<(), CredentialError>;
    fn clear(&self) -> Result<(), CredentialError>;
}

fn validated(key: &str) -> Result<&str, CredentialError> {
    let key = key.trim();
    if key.is_empty() { Err(CredentialError::Empty) } else { Ok(key) }
}

fn non_empty(value: String) -> Option<String> {
    let t = value.trim();
    if t.is_empty() { None } else { Some(s!(t)) }
}

/// OS keyring entry under a fixed service/user pair.
pub struct KeyringStore {
    service: String,
    user: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self { service: s!(KEYRING_SERVICE), user: s!(KEYRING_USER) }
    }
}

impl KeyringStore {
    fn entry(&self) -> Result<keyring::Entry, CredentialError> {
        Ok(keyring::Entry::new(&self.service, &self.user)?)
    }
}

impl CredentialStore for KeyringStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        match self.entry()?.get_password() {
            Ok(v) => Ok(non_empty(v)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str) -> Result<(), CredentialError> {
        let key = validated(key)?;
        self.entry()?.set_password(key)?;
        logf!("Credentials: API key saved to keyring");
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                logf!("Credentials: API key removed from keyring");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local store (tests, env override, keyring-less systems).
#[derive(Default)]
pub struct MemoryStore {
    value: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn with_key(key: &str) -> Self {
        Self { value: Mutex::new(non_empty(s!(key))) }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.value.lock().map(|v| v.clone()).unwrap_or(None))
    }

    fn save(&self, key: &str) -> Result<(), CredentialError> {
        let key = validated(key)?;
        if let Ok(mut v) = self.value.lock() {
            *v = Some(s!(key));
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        if let Ok(mut v) = self.value.lock() {
            *v = None;
        }
        Ok(())
    }
}

/// First non-empty key from the environment (`GEMINI_API_KEY`, then `API_KEY`).
pub fn env_override() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().and_then(non_empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let st = MemoryStore::default();
        assert_eq!(st.load().unwrap(), None);
        st.save("  abc123  ").unwrap();
        assert_eq!(st.load().unwrap().as_deref(), Some("abc123"));
        st.clear().unwrap();
        assert_eq!(st.load().unwrap(), None);
    }

    #[test]
    fn empty_keys_are_rejected() {
        let st = MemoryStore::with_key("old");
        assert!(matches!(st.save("   "), Err(CredentialError::Empty)));
        assert_eq!(st.load().unwrap().as_deref(), Some("old"));
        assert_eq!(MemoryStore::with_key(" ").load().unwrap(), None);
    }
}
