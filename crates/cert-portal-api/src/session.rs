// crates/cert-portal-api/src/session.rs
// ============================================================================
// Module: Session Store
// Description: File-backed persistence for the portal session cookie.
// Purpose: Carry an authenticated session across CLI invocations.
// Dependencies: cert-portal-core, serde, toml
// ============================================================================

//! ## Overview
//! The session store persists the backend session cookie together with a
//! snapshot of the authenticated user as a small TOML file. Each CLI
//! invocation loads the file to restore authentication and deletes it on
//! logout. A missing file simply means no session.
//!
//! Security posture: the session file lives in the user's own directory and
//! is treated as trusted input, but it is still read through a size limit
//! and a UTF-8 check before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use cert_portal_core::User;
use serde::Deserialize;
use serde::Serialize;

use crate::client::ApiError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum session file size in bytes.
const MAX_SESSION_FILE_SIZE: u64 = 64 * 1024;

// ============================================================================
// SECTION: Stored Session
// ============================================================================

/// Persisted session state: the backend cookie plus a user snapshot.
///
/// # Invariants
/// - `cookie_value` is replayed verbatim; it is never logged or printed.
/// - `user` reflects the login response and may be stale until the next
///   `/api/user` fetch.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredSession {
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Opaque cookie value issued by the backend.
    pub cookie_value: String,
    /// User snapshot captured at login.
    pub user: User,
}

impl fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSession")
            .field("cookie_name", &self.cookie_name)
            .field("cookie_value", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

// ============================================================================
// SECTION: Session Store
// ============================================================================

/// File-backed store for one [`StoredSession`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Location of the session file.
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store for the given session file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Returns the session file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored session, if one exists.
    ///
    /// A missing file is not an error; it simply means no session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the file exists but cannot be read or
    /// parsed.
    pub fn load(&self) -> Result<Option<StoredSession>, ApiError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(None);
            }
            Err(err) => {
                return Err(ApiError::Session(format!("session file read failed: {err}")));
            }
        };
        if bytes.len() as u64 > MAX_SESSION_FILE_SIZE {
            return Err(ApiError::Session(format!(
                "session file exceeds size limit ({} > {} bytes)",
                bytes.len(),
                MAX_SESSION_FILE_SIZE
            )));
        }
        let text = String::from_utf8(bytes)
            .map_err(|_| ApiError::Session("session file must be utf-8".to_string()))?;
        let session = toml::from_str(&text)
            .map_err(|err| ApiError::Session(format!("session file parse failed: {err}")))?;
        Ok(Some(session))
    }

    /// Writes the session to disk, replacing any previous session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when serialization or the write fails.
    pub fn save(&self, session: &StoredSession) -> Result<(), ApiError> {
        let text = toml::to_string(session)
            .map_err(|err| ApiError::Session(format!("session serialization failed: {err}")))?;
        fs::write(&self.path, text)
            .map_err(|err| ApiError::Session(format!("session file write failed: {err}")))
    }

    /// Deletes the stored session.
    ///
    /// Clearing an absent session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), ApiError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ApiError::Session(format!("session file remove failed: {err}"))),
        }
    }
}
