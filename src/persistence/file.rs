//! JSON file cookie jar for the native build

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::{CookieJar, CookieStore, read_cookie};
use crate::platform::now_ms;

#[derive(Debug, Error)]
pub enum JarError {
    #[error("failed to access cookie jar {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed cookie jar {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Cookie jar persisted to a JSON file, rewritten on every change
#[derive(Debug)]
pub struct FileJar {
    path: PathBuf,
    store: CookieStore,
}

impl FileJar {
    /// Jar with no entries that will be saved to `path`
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            store: CookieStore::new(),
        }
    }

    /// Load the jar at `path`. A missing file is an empty jar.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, JarError> {
        let path = path.into();
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No cookie jar at {}, starting empty", path.display());
                return Ok(Self::empty(path));
            }
            Err(source) => return Err(JarError::Io { path, source }),
        };

        let mut store: CookieStore = match serde_json::from_str(&json) {
            Ok(store) => store,
            Err(source) => return Err(JarError::Json { path, source }),
        };
        store.purge_expired(now_ms());
        log::info!("Loaded {} cookies from {}", store.len(), path.display());

        Ok(Self { path, store })
    }

    pub fn save(&self) -> Result<(), JarError> {
        let json = serde_json::to_string_pretty(&self.store).map_err(|source| JarError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|source| JarError::Io {
            path: self.path.clone(),
            source,
        })
    }

    pub fn store(&self) -> &CookieStore {
        &self.store
    }
}

impl CookieJar for FileJar {
    fn set(&mut self, name: &str, value: &str, days: i64) {
        self.store.set_at(now_ms(), name, value, days);
        if let Err(e) = self.save() {
            log::warn!("{}", e);
        }
    }

    fn get(&self, name: &str) -> Option<String> {
        read_cookie(&self.store.header_at(now_ms()), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PREFERENCE_TTL_DAYS;

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let jar = FileJar::open(dir.path().join("cookies.json")).unwrap();
        assert!(jar.store().is_empty());
    }

    #[test]
    fn test_set_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        let mut jar = FileJar::open(&path).unwrap();
        jar.set("autoCopy", "true", PREFERENCE_TTL_DAYS);
        drop(jar);

        let reopened = FileJar::open(&path).unwrap();
        assert_eq!(reopened.get("autoCopy").as_deref(), Some("true"));
    }

    #[test]
    fn test_remove_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        let mut jar = FileJar::open(&path).unwrap();
        jar.set("addPre", "true", PREFERENCE_TTL_DAYS);
        jar.remove("addPre");

        let reopened = FileJar::open(&path).unwrap();
        assert_eq!(reopened.get("addPre"), None);
    }

    #[test]
    fn test_open_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(FileJar::open(&path), Err(JarError::Json { .. })));
    }

    #[test]
    fn test_open_drops_expired_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        fs::write(
            &path,
            r#"{"addPre":{"value":"true","expires_ms":1000.0},"autoCopy":{"value":"true","expires_ms":null}}"#,
        )
        .unwrap();

        let jar = FileJar::open(&path).unwrap();
        assert_eq!(jar.get("addPre"), None);
        assert_eq!(jar.get("autoCopy").as_deref(), Some("true"));
        assert_eq!(jar.store().len(), 1);
    }
}
