use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::StoreResult;

/// A typed state container with JSON snapshot save/load.
///
/// `S` is a simulation's state struct (its collections plus sequence
/// counters). The store never interprets `S` beyond serializing it; all
/// domain logic lives in the simulation crates.
///
/// Snapshots are whole-state JSON documents. Loading replaces the entire
/// state; there is no partial merge.
#[derive(Clone, Debug, Default)]
pub struct JsonStore<S> {
    state: S,
}

impl<S> JsonStore<S>
where
    S: Serialize + DeserializeOwned + Default,
{
    /// Create a store with default (empty) state.
    pub fn new() -> Self {
        Self { state: S::default() }
    }

    /// Create a store seeded with `state`.
    pub fn seeded(state: S) -> Self {
        Self { state }
    }

    /// Load a store from a JSON snapshot file.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors or when the file is not a valid snapshot of `S`.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let bytes = fs::read(path)?;
        let state = serde_json::from_slice(&bytes)?;
        debug!(path = %path.display(), "loaded store snapshot");
        Ok(Self { state })
    }

    /// Write the current state to a JSON snapshot file.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors or when the state cannot be serialized.
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(&self.state)?;
        fs::write(path, bytes)?;
        debug!(path = %path.display(), "saved store snapshot");
        Ok(())
    }

    /// Replace the state from a snapshot file in place.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors or malformed snapshots; on failure the current
    /// state is left untouched.
    pub fn reload(&mut self, path: &Path) -> StoreResult<()> {
        let loaded = Self::load(path)?;
        self.state = loaded.state;
        Ok(())
    }

    /// Shared access to the state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Exclusive access to the state. Endpoint operations go through here,
    /// so only one operation can run at a time per store.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Consume the store, returning the state.
    pub fn into_state(self) -> S {
        self.state
    }
}
