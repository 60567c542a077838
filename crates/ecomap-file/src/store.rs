//! Credential persistence in a JSON file.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use ecomap_core::error::{Error, StorageError};
use ecomap_core::{AccessToken, CredentialStore, RefreshToken, Result, TokenPair};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

fn map_io(path: &Path, err: std::io::Error) -> Error {
    Error::Storage(StorageError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// On-disk document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredCredentials {
    access_token: Option<String>,
    refresh_token: Option<String>,
    saved_at: Option<DateTime<Utc>>,
}

/// A [`CredentialStore`] backed by a single JSON file.
///
/// Writes go to a temporary file in the same directory which then replaces
/// the credential file, so readers never observe a partial document. An
/// advisory lock on a sibling `.lock` file serialises writers across
/// processes. On Unix the file is created with mode `0600`.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store for the given credential file. Parent directories are
    /// created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a credential file currently exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Returns when the tokens were last written, if ever.
    pub fn saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.read()?.saved_at)
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn open_lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
        }
        let lock_path = self.lock_path();
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| map_io(&lock_path, e))
    }

    fn read(&self) -> Result<StoredCredentials> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoredCredentials::default()),
            Err(e) => return Err(map_io(&self.path, e)),
        };

        serde_json::from_str(&json).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })
        })
    }

    fn write(&self, stored: &StoredCredentials) -> Result<()> {
        let lock = self.open_lock()?;
        lock.lock_exclusive()
            .map_err(|e| map_io(&self.lock_path(), e))?;

        let result = self.replace(stored);

        let _ = FileExt::unlock(&lock);
        result
    }

    fn replace(&self, stored: &StoredCredentials) -> Result<()> {
        let json = serde_json::to_string_pretty(stored)?;
        let tmp_path = self
            .path
            .with_file_name(format!(".credentials-{}.tmp", Uuid::new_v4()));

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let write_tmp = || -> std::io::Result<()> {
            let mut file = options.open(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            Ok(())
        };

        if let Err(e) = write_tmp() {
            let _ = fs::remove_file(&tmp_path);
            return Err(map_io(&tmp_path, e));
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            map_io(&self.path, e)
        })?;

        // rename keeps the temp file's mode, but an existing file created by
        // an older version may be wider
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&self.path)
                .map_err(|e| map_io(&self.path, e))?
                .permissions();
            if perms.mode() & 0o777 != 0o600 {
                perms.set_mode(0o600);
                fs::set_permissions(&self.path, perms).map_err(|e| map_io(&self.path, e))?;
            }
        }

        trace!(path = %self.path.display(), "credentials written");
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn access_token(&self) -> Result<Option<AccessToken>> {
        Ok(self.read()?.access_token.map(AccessToken::new))
    }

    async fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        Ok(self.read()?.refresh_token.map(RefreshToken::new))
    }

    #[instrument(skip(self, tokens), fields(path = %self.path.display()))]
    async fn save_tokens(&self, tokens: TokenPair) -> Result<()> {
        debug!("Saving credentials");
        self.write(&StoredCredentials {
            access_token: Some(tokens.access.as_str().to_string()),
            refresh_token: Some(tokens.refresh.as_str().to_string()),
            saved_at: Some(Utc::now()),
        })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn clear_tokens(&self) -> Result<()> {
        debug!("Clearing credentials");
        let lock = self.open_lock()?;
        lock.lock_exclusive()
            .map_err(|e| map_io(&self.lock_path(), e))?;

        let result = match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(&self.path, e)),
        };

        let _ = FileExt::unlock(&lock);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileCredentialStore {
        FileCredentialStore::new(dir.path().join("nested").join("credentials.json"))
    }

    #[tokio::test]
    async fn empty_store_has_no_tokens() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(store.access_token().await.unwrap().is_none());
        assert!(store.refresh_token().await.unwrap().is_none());
        assert!(!store.exists());
    }

    #[tokio::test]
    async fn save_and_reload() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save_tokens(TokenPair::new("A1", "R1")).await.unwrap();

        let reopened = FileCredentialStore::new(store.path());
        assert_eq!(reopened.access_token().await.unwrap().unwrap().as_str(), "A1");
        assert_eq!(reopened.refresh_token().await.unwrap().unwrap().as_str(), "R1");
        assert!(reopened.saved_at().unwrap().is_some());
    }

    #[tokio::test]
    async fn save_replaces_previous_tokens() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save_tokens(TokenPair::new("A1", "R1")).await.unwrap();
        store.save_tokens(TokenPair::new("A2", "R1")).await.unwrap();

        assert_eq!(store.access_token().await.unwrap().unwrap().as_str(), "A2");

        // no temp files are left behind
        let leftovers: Vec<_> = fs::read_dir(store.path().parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save_tokens(TokenPair::new("A1", "R1")).await.unwrap();
        store.clear_tokens().await.unwrap();

        assert!(!store.exists());
        assert!(store.access_token().await.unwrap().is_none());
        // clearing twice is fine
        store.clear_tokens().await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(&path);
        let err = store.access_token().await.unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Corrupt { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_is_private() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save_tokens(TokenPair::new("A1", "R1")).await.unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
