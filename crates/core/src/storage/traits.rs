use crate::errors::CoreError;
use crate::models::portfolio::{Portfolio, ProfileMap};

/// Keyed persistence of portfolios by username.
///
/// The store is always read and written whole. Implementations only need
/// `load` and `save`; the per-profile helpers are built on top of them.
///
/// **Concurrency:** single writer, last write wins. There is no locking and
/// no merge: if two sessions edit the same username, the later save
/// replaces the earlier one, and a save based on a stale `load` replaces
/// whatever other profiles were written in between.
pub trait ProfileStore {
    /// Human-readable description of the backing resource (for logs/errors).
    fn describe(&self) -> String;

    /// Read every profile. A store that does not exist yet is empty, not
    /// an error.
    fn load(&self) -> Result<ProfileMap, CoreError>;

    /// Replace the whole store. A later `load` sees either the previous
    /// content or all of `profiles`, never a partial write.
    fn save(&mut self, profiles: &ProfileMap) -> Result<(), CoreError>;

    /// The profile stored under `username`, or a default record
    /// (goal 1,000,000, no holdings). Never writes.
    fn get(&self, username: &str) -> Result<Portfolio, CoreError> {
        Ok(self.load()?.remove(username).unwrap_or_default())
    }

    /// Store one profile, keeping every other profile as currently stored.
    fn put(&mut self, username: &str, portfolio: Portfolio) -> Result<(), CoreError> {
        let mut profiles = self.load()?;
        profiles.insert(username.to_string(), portfolio);
        self.save(&profiles)
    }

    /// Stored usernames in sorted order.
    fn usernames(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.load()?.into_keys().collect())
    }

    /// Whether a profile has been saved under `username`.
    fn contains(&self, username: &str) -> Result<bool, CoreError> {
        Ok(self.load()?.contains_key(username))
    }
}
