use crate::errors::CoreError;
use crate::models::portfolio::ProfileMap;

use super::traits::ProfileStore;

/// In-process profile store. Content lives as long as the value does.
///
/// Useful for embedding without a filesystem and in tests. `fail_writes`
/// simulates a store that can be read but not written (full disk,
/// read-only mount).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    profiles: ProfileMap,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: ProfileMap) -> Self {
        Self {
            profiles,
            fail_writes: false,
        }
    }

    /// Make every subsequent `save` fail with `StoreUnavailable`.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    #[must_use]
    pub fn profiles(&self) -> &ProfileMap {
        &self.profiles
    }
}

impl ProfileStore for MemoryStore {
    fn describe(&self) -> String {
        "in-memory store".to_string()
    }

    fn load(&self) -> Result<ProfileMap, CoreError> {
        Ok(self.profiles.clone())
    }

    fn save(&mut self, profiles: &ProfileMap) -> Result<(), CoreError> {
        if self.fail_writes {
            return Err(CoreError::StoreUnavailable(
                "in-memory store is read-only".into(),
            ));
        }
        self.profiles = profiles.clone();
        Ok(())
    }
}
