use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{BilinError, Result};

/// Saved API credentials, one optional key per provider backend.
///
/// Persisted as a flat JSON record. Saves merge into whatever is already
/// on disk so that storing one key never erases the other.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zhipu_key: Option<String>,
}

impl Credentials {
    pub fn is_empty(&self) -> bool {
        self.gemini_key.is_none() && self.zhipu_key.is_none()
    }

    /// Overlay `other` on top of `self`: set fields win, absent fields
    /// keep the existing value.
    fn merged_with(mut self, other: &Credentials) -> Credentials {
        if let Some(key) = &other.gemini_key {
            self.gemini_key = Some(key.clone());
        }
        if let Some(key) = &other.zhipu_key {
            self.zhipu_key = Some(key.clone());
        }
        self
    }
}

/// File-backed credential store.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load saved credentials. A missing or unreadable file is treated as
    /// "nothing saved" so a corrupt record never blocks startup.
    pub fn load(&self) -> Credentials {
        if !self.path.exists() {
            return Credentials::default();
        }

        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(creds) => creds,
                Err(e) => {
                    warn!("Failed to parse credential file, ignoring it: {}", e);
                    Credentials::default()
                }
            },
            Err(e) => {
                warn!("Failed to read credential file, ignoring it: {}", e);
                Credentials::default()
            }
        }
    }

    /// Save credentials with read-modify-write semantics: fields absent
    /// from `update` keep their previously saved values.
    pub fn save(&self, update: &Credentials) -> Result<()> {
        let merged = self.load().merged_with(update);

        let content = serde_json::to_string_pretty(&merged)
            .map_err(|e| BilinError::Config(format!("Failed to serialize credentials: {}", e)))?;

        std::fs::write(&self.path, content)
            .map_err(|e| BilinError::Config(format!("Failed to write credential file: {}", e)))?;

        Ok(())
    }

    /// Remove the entire credential record. Removing a record that does
    /// not exist is not an error.
    pub fn delete(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .map_err(|e| BilinError::Config(format!("Failed to delete credential file: {}", e)))?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("bilin_keys.json"))
    }

    #[test]
    fn test_load_missing_file_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_separate_saves_merge() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .save(&Credentials {
                gemini_key: Some("gm-key".to_string()),
                zhipu_key: None,
            })
            .unwrap();
        store
            .save(&Credentials {
                gemini_key: None,
                zhipu_key: Some("zp-key".to_string()),
            })
            .unwrap();

        let loaded = store.load();
        assert_eq!(loaded.gemini_key.as_deref(), Some("gm-key"));
        assert_eq!(loaded.zhipu_key.as_deref(), Some("zp-key"));
    }

    #[test]
    fn test_save_overwrites_same_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .save(&Credentials {
                gemini_key: Some("old".to_string()),
                zhipu_key: None,
            })
            .unwrap();
        store
            .save(&Credentials {
                gemini_key: Some("new".to_string()),
                zhipu_key: None,
            })
            .unwrap();

        assert_eq!(store.load().gemini_key.as_deref(), Some("new"));
    }

    #[test]
    fn test_delete_then_load_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .save(&Credentials {
                gemini_key: Some("gm-key".to_string()),
                zhipu_key: Some("zp-key".to_string()),
            })
            .unwrap();
        store.delete().unwrap();

        assert!(store.load().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_delete_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.delete().is_ok());
    }

    #[test]
    fn test_corrupt_file_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_empty());
    }
}
