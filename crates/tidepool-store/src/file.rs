//! File-backed save slot.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary sibling
//! first and are renamed into place, so a crash mid-write never leaves a
//! truncated save behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::backend::SaveStore;
use crate::error::StoreError;

/// A save slot stored as files under one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the save directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The save directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the key contains characters other
    /// than ASCII letters, digits, `_` and `-`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::Config(format!("invalid save key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SaveStore for FileStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| StoreError::Io { path, source })?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tidepool-store-{name}-{}", std::process::id()))
    }

    #[tokio::test]
    async fn missing_file_is_none() {
        let store = FileStore::new(scratch_dir("missing"));
        assert_eq!(store.load("NO_SUCH_SLOT").await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = scratch_dir("roundtrip");
        let store = FileStore::new(&dir);
        store.save("SLOT_A", r#"{"coins":1}"#).await.unwrap();
        store.save("SLOT_A", r#"{"coins":2}"#).await.unwrap();
        assert_eq!(
            store.load("SLOT_A").await.unwrap().as_deref(),
            Some(r#"{"coins":2}"#)
        );
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[test]
    fn rejects_path_like_keys() {
        let store = FileStore::new("saves");
        assert!(store.path_for("../etc/passwd").is_err());
        assert!(store.path_for("").is_err());
        assert!(store.path_for("TIDEPOOL_TANK_SAVE_V1").is_ok());
    }
}
