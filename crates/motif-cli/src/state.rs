//! Persisted arrangement state.
//!
//! The CLI stands in for the host's per-element storage with a JSON file
//! holding the flat snapshot record.

use std::{fs, io, path::Path};

use log::{debug, info};

use motif::{MotifError, model::PersistedState};

/// Loads the snapshot at `path`.
///
/// A missing file means there is no saved state yet.
///
/// # Errors
///
/// Returns an I/O error if the file exists but cannot be read or decoded.
pub fn load_state(path: impl AsRef<Path>) -> Result<Option<PersistedState>, MotifError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = path.display().to_string(); "No saved state, using defaults");
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let state = serde_json::from_str(&content)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    info!(path = path.display().to_string(); "Loaded saved state");
    Ok(Some(state))
}

/// Writes `state` to `path`, replacing any previous snapshot.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn save_state(path: impl AsRef<Path>, state: &PersistedState) -> Result<(), MotifError> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(state)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    fs::write(path, content)?;
    debug!(path = path.display().to_string(), state:?; "Saved state");
    Ok(())
}
