use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::models::user::UserProfile;

/// Bearer token plus the signed-in user's profile, persisted as a small JSON
/// file between invocations. Passed explicitly into the client and surfaces
/// instead of being looked up ambiently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

impl Session {
    /// `Ok(None)` when nobody is signed in yet.
    pub fn load(path: &Path) -> Result<Option<Session>, SessionError> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn store(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Logout: forget the stored token and profile.
    pub fn clear(path: &Path) -> Result<(), SessionError> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
