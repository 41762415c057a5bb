//! Session token persistence between CLI invocations
//!
//! The API client never stores tokens itself; this module is the caller-side
//! keeper. Tokens land in a JSON file under the user config directory and
//! are re-applied with `set_auth_token` on the next run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Stored session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token from the last login
    pub access_token: String,
    /// Email the token was issued for
    pub email: String,
}

/// Default session file location under the user config directory
pub fn default_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("no user config directory available")?;
    Ok(base.join("snaplook").join("session.json"))
}

/// Load a stored session, if any
pub fn load(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read session file {}", path.display()))?;
    let session = serde_json::from_str(&raw)
        .with_context(|| format!("corrupt session file {}", path.display()))?;
    Ok(Some(session))
}

/// Persist a session, creating parent directories as needed
pub fn save(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let raw = serde_json::to_string_pretty(session)?;
    fs::write(path, raw)
        .with_context(|| format!("failed to write session file {}", path.display()))?;
    Ok(())
}

/// Delete the stored session
///
/// Returns whether a session existed.
pub fn clear(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(path)
        .with_context(|| format!("failed to remove session file {}", path.display()))?;
    Ok(true)
}
