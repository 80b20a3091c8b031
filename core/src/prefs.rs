use anyhow::{Result, bail};
use tracing::warn;

use crate::storage::{DARK_MODE_KEY, KeyValueStore, SELECTED_USER_KEY, VISITED_KEY};

/// Small settings kept next to the day records, each under its own key.
pub struct Preferences<'a> {
    kv: &'a dyn KeyValueStore,
}

impl<'a> Preferences<'a> {
    #[must_use]
    pub fn new(kv: &'a dyn KeyValueStore) -> Self {
        Self { kv }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.kv.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "failed to read preference");
                None
            }
        }
    }

    #[must_use]
    pub fn selected_user(&self) -> Option<String> {
        self.read(SELECTED_USER_KEY)
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
    }

    pub fn set_selected_user(&self, user: &str) -> Result<()> {
        let user = user.trim();
        if user.is_empty() {
            bail!("Profile name cannot be empty");
        }
        self.kv.set(SELECTED_USER_KEY, user)
    }

    pub fn clear_selected_user(&self) -> Result<bool> {
        self.kv.remove(SELECTED_USER_KEY)
    }

    /// Dark theme unless explicitly turned off.
    #[must_use]
    pub fn dark_mode(&self) -> bool {
        match self.read(DARK_MODE_KEY) {
            Some(v) => v.parse().unwrap_or(true),
            None => true,
        }
    }

    pub fn set_dark_mode(&self, on: bool) -> Result<()> {
        self.kv.set(DARK_MODE_KEY, if on { "true" } else { "false" })
    }

    #[must_use]
    pub fn has_visited(&self) -> bool {
        self.read(VISITED_KEY).is_some_and(|v| v == "true")
    }

    pub fn mark_visited(&self) -> Result<()> {
        self.kv.set(VISITED_KEY, "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, UnavailableStore};

    #[test]
    fn test_selected_user() {
        let kv = MemoryStore::new();
        let prefs = Preferences::new(&kv);
        assert_eq!(prefs.selected_user(), None);
        prefs.set_selected_user(" raed ").unwrap();
        assert_eq!(prefs.selected_user().as_deref(), Some("raed"));
        assert!(prefs.set_selected_user("  ").is_err());
        assert!(prefs.clear_selected_user().unwrap());
        assert_eq!(prefs.selected_user(), None);
    }

    #[test]
    fn test_dark_mode_defaults_on() {
        let kv = MemoryStore::new();
        let prefs = Preferences::new(&kv);
        assert!(prefs.dark_mode());
        prefs.set_dark_mode(false).unwrap();
        assert!(!prefs.dark_mode());
        kv.set(DARK_MODE_KEY, "garbage").unwrap();
        assert!(prefs.dark_mode());
    }

    #[test]
    fn test_visited_flag() {
        let kv = MemoryStore::new();
        let prefs = Preferences::new(&kv);
        assert!(!prefs.has_visited());
        prefs.mark_visited().unwrap();
        assert!(prefs.has_visited());
    }

    #[test]
    fn test_unavailable_storage_uses_defaults() {
        let kv = UnavailableStore;
        let prefs = Preferences::new(&kv);
        prefs.set_dark_mode(false).unwrap();
        prefs.mark_visited().unwrap();
        assert!(prefs.dark_mode());
        assert!(!prefs.has_visited());
    }
}
