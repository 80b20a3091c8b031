use std::path::Path;

use anyhow::Result;
use tracing::warn;

use crate::models::DEFAULT_PROFILES;
use crate::prefs::Preferences;
use crate::seed;
use crate::storage::{KeyValueStore, MemoryStore, SqliteStore, UnavailableStore};
use crate::store::DayStore;
use crate::transfer::{self, ImportSummary};

/// Entry point for front ends: owns the storage area and hands out the
/// day store and preferences over it.
pub struct Tracker {
    kv: Box<dyn KeyValueStore>,
}

impl Tracker {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::with_store(SqliteStore::open(path)?))
    }

    /// Open `path`, falling back to storage that keeps nothing when it cannot be opened.
    #[must_use]
    pub fn open_or_unavailable(path: &Path) -> Self {
        match Self::open(path) {
            Ok(tracker) => tracker,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "storage unavailable, changes will not be saved");
                Self::unavailable()
            }
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_store(MemoryStore::new())
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self::with_store(UnavailableStore)
    }

    pub fn with_store(kv: impl KeyValueStore + 'static) -> Self {
        Self { kv: Box::new(kv) }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.kv.is_available()
    }

    /// Day records shared by every profile.
    #[must_use]
    pub fn days(&self) -> DayStore<'_> {
        DayStore::new(self.kv.as_ref())
    }

    /// Day records kept separately for `profile`. Fails on a blank name.
    pub fn days_for(&self, profile: &str) -> Result<DayStore<'_>> {
        DayStore::for_profile(self.kv.as_ref(), profile)
    }

    #[must_use]
    pub fn prefs(&self) -> Preferences<'_> {
        Preferences::new(self.kv.as_ref())
    }

    // --- Bulk operations ---

    pub fn export_json(&self) -> Result<String> {
        transfer::export_json(&self.days())
    }

    pub fn export_csv(&self) -> Result<String> {
        transfer::export_csv(&self.days(), &DEFAULT_PROFILES)
    }

    pub fn import_json(&self, text: &str) -> Result<ImportSummary> {
        transfer::import_json(&self.days(), text)
    }

    /// First-run seeding; does nothing once the storage has been visited.
    pub fn seed_historical_data(&self) -> Result<bool> {
        seed::seed_historical_data(&self.days(), &self.prefs())
    }

    pub fn reseed(&self) -> Result<usize> {
        seed::reseed(&self.days())
    }

    pub fn clear_all(&self) -> Result<bool> {
        self.days().clear_all()
    }
}
