use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::error::ClientError;

const TOKEN_KEY: &str = "token";

/// Source of the bearer token, consulted once per request.
pub trait CredentialProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

pub struct StaticCredentials(Option<String>);

impl StaticCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredentials {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Persistent key/value storage file holding the session token under the
/// `token` key. Other keys in the file are preserved on write.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_token(&self, token: &str) -> Result<(), ClientError> {
        let mut entries = self.load()?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.save(&entries)
    }

    /// Removes the stored token. Returns whether one was present.
    pub fn clear_token(&self) -> Result<bool, ClientError> {
        let mut entries = self.load()?;
        let removed = entries.remove(TOKEN_KEY).is_some();
        if removed {
            self.save(&entries)?;
        }
        Ok(removed)
    }

    fn load(&self) -> Result<BTreeMap<String, String>, ClientError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(source) => {
                return Err(ClientError::TokenStoreIo {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| ClientError::TokenStoreFormat {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), ClientError> {
        let io_err = |source| ClientError::TokenStoreIo {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = serde_json::to_string_pretty(entries).map_err(|source| {
            ClientError::TokenStoreFormat {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, raw).map_err(io_err)?;
        debug!(path = %self.path.display(), "token store updated");
        Ok(())
    }
}

impl CredentialProvider for TokenStore {
    fn token(&self) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(TOKEN_KEY),
            Err(err) => {
                warn!(error = %err, "ignoring unreadable token store");
                None
            }
        }
    }
}
