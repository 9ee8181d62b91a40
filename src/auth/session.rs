//! Local login session storage.
//!
//! The session lives in `~/.khoj/session.json`, or under `$KHOJ_HOME` when
//! that variable is set.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// The session directory name inside the home directory.
const SESSION_DIR: &str = ".khoj";

/// The session file name.
const SESSION_FILE: &str = "session.json";

/// Environment variable overriding the session directory.
pub const HOME_ENV: &str = "KHOJ_HOME";

/// The logged-in account.
///
/// The token is stored and sent as-is, never validated locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub username: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl Session {
    pub fn new(user_id: Uuid, username: impl Into<String>, token: Option<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            token,
        }
    }

    /// Check if the session carries a bearer token.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store at the default location.
    ///
    /// Returns `None` if neither `$KHOJ_HOME` nor a home directory is available.
    pub fn new() -> Option<Self> {
        let dir = match std::env::var_os(HOME_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::home_dir()?.join(SESSION_DIR),
        };
        Some(Self::with_path(dir.join(SESSION_FILE)))
    }

    /// Create a store backed by a specific file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session.
    ///
    /// A missing file means nobody is logged in. A corrupt file is treated
    /// the same way, with a warning.
    pub fn load(&self) -> Option<Session> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Cannot open session file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Ignoring corrupt session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Save the session, creating the parent directory if needed.
    pub fn save(&self, session: &Session) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, session)?;
        writer.flush()?;
        tracing::debug!("Saved session for {} to {}", session.username, self.path.display());
        Ok(())
    }

    /// Remove the session file. Succeeds if there was none.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_store(temp_dir: &TempDir) -> SessionStore {
        SessionStore::with_path(temp_dir.path().join(SESSION_DIR).join(SESSION_FILE))
    }

    fn sample_session() -> Session {
        Session::new(Uuid::new_v4(), "ada", Some("token-123".to_string()))
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        let session = sample_session();

        store.save(&session).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load(), Some(session));
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        store.save(&sample_session()).unwrap();

        let second = Session::new(Uuid::new_v4(), "grace", None);
        store.save(&second).unwrap();
        assert_eq!(store.load(), Some(second));
    }

    #[test]
    fn test_corrupt_file_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        store.save(&sample_session()).unwrap();

        store.clear().unwrap();
        assert!(!store.path().exists());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_session_without_token_field() {
        let json = r#"{"user_id":"00000000-0000-0000-0000-000000000001","username":"ada"}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert!(!session.has_token());
    }

    #[test]
    #[serial]
    fn test_home_env_override() {
        let temp_dir = TempDir::new().unwrap();
        std::env::set_var(HOME_ENV, temp_dir.path());
        let store = SessionStore::new().unwrap();
        std::env::remove_var(HOME_ENV);
        assert_eq!(store.path(), temp_dir.path().join(SESSION_FILE));
    }
}
