//! Date-keyed day records held in a single JSON blob.
//!
//! Every mutation reads the current record, merges the change, and rewrites
//! the whole mapping. There is no locking: two processes writing the same
//! storage file are last-write-wins.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::dates::is_date_key;
use crate::models::{
    DayEntry, MealPatch, MealSlot, SleepPatch, Water, WaterPatch, Weight, WeightPatch,
    WorkoutPatch, clamp_water_goal,
};
use crate::storage::{DATA_KEY, KeyValueStore};

/// Storage key for a day: the date itself, or `<profile>-<date>` when scoped to a profile.
#[must_use]
pub fn storage_key(profile: Option<&str>, date: &str) -> String {
    match profile {
        Some(p) => format!("{p}-{date}"),
        None => date.to_string(),
    }
}

pub struct DayStore<'a> {
    kv: &'a dyn KeyValueStore,
    profile: Option<String>,
}

impl<'a> DayStore<'a> {
    #[must_use]
    pub fn new(kv: &'a dyn KeyValueStore) -> Self {
        Self { kv, profile: None }
    }

    /// A store whose records live under `<profile>-<date>` keys.
    pub fn for_profile(kv: &'a dyn KeyValueStore, profile: &str) -> Result<Self> {
        let profile = profile.trim();
        if profile.is_empty() {
            bail!("Profile name cannot be empty");
        }
        Ok(Self {
            kv,
            profile: Some(profile.to_string()),
        })
    }

    #[must_use]
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    #[must_use]
    pub fn key_for(&self, date: &str) -> String {
        storage_key(self.profile(), date)
    }

    /// The stored mapping with each record left as raw JSON. A blob that is
    /// not a JSON object yields an empty map.
    fn raw(&self) -> BTreeMap<String, Value> {
        let raw = match self.kv.get(DATA_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return BTreeMap::new(),
            Err(e) => {
                warn!(error = %e, "failed to read day records, using empty store");
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "stored day records are malformed, using empty store");
                BTreeMap::new()
            }
        }
    }

    fn decode(key: &str, value: Value) -> Option<DayEntry> {
        match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(key, error = %e, "skipping unreadable day record");
                None
            }
        }
    }

    /// Every readable record, keyed by storage key. Records that do not
    /// decode are skipped here but stay in storage untouched.
    #[must_use]
    pub fn all(&self) -> BTreeMap<String, DayEntry> {
        self.raw()
            .into_iter()
            .filter_map(|(key, value)| Self::decode(&key, value).map(|entry| (key, entry)))
            .collect()
    }

    /// The record for `date`, with any missing sections filled with defaults.
    /// Absent or unreadable days come back as a fresh empty record that is not persisted.
    #[must_use]
    pub fn get(&self, date: &str) -> DayEntry {
        let key = self.key_for(date);
        match self
            .raw()
            .remove(&key)
            .and_then(|value| Self::decode(&key, value))
        {
            Some(mut entry) => {
                if entry.date.is_empty() {
                    entry.date = date.to_string();
                }
                entry
            }
            None => DayEntry::empty(date),
        }
    }

    /// Write `entry` under its date, replacing any previous record. Other
    /// records are written back exactly as they were stored.
    pub fn save(&self, entry: &DayEntry) -> Result<()> {
        if !is_date_key(&entry.date) {
            bail!("Invalid date '{}'. Use YYYY-MM-DD", entry.date);
        }
        let mut entry = entry.clone();
        entry.normalize();
        let mut data = self.raw();
        data.insert(
            self.key_for(&entry.date),
            serde_json::to_value(&entry).context("Failed to serialize day record")?,
        );
        self.write(&data)
    }

    /// Days stored for this store's scope, ascending.
    #[must_use]
    pub fn dates(&self) -> Vec<String> {
        let data = self.raw();
        match self.profile() {
            Some(p) => {
                let prefix = format!("{p}-");
                data.keys()
                    .filter_map(|k| k.strip_prefix(&prefix))
                    .filter(|d| is_date_key(d))
                    .map(str::to_string)
                    .collect()
            }
            None => data.keys().filter(|k| is_date_key(k)).cloned().collect(),
        }
    }

    /// Remove every day record. Preferences and the first-run flag are kept.
    pub fn clear_all(&self) -> Result<bool> {
        let removed = self.kv.remove(DATA_KEY)?;
        debug!(removed, "cleared day records");
        Ok(removed)
    }

    pub(crate) fn replace_all(&self, data: &BTreeMap<String, DayEntry>) -> Result<()> {
        self.write(data)
    }

    fn write<T: Serialize>(&self, data: &BTreeMap<String, T>) -> Result<()> {
        let json = serde_json::to_string(data).context("Failed to serialize day records")?;
        self.kv
            .set(DATA_KEY, &json)
            .context("Failed to persist day records")?;
        debug!(records = data.len(), "persisted day records");
        Ok(())
    }

    /// Read-merge-write for one day. Nothing is saved if `f` fails.
    fn modify<R>(&self, date: &str, f: impl FnOnce(&mut DayEntry) -> Result<R>) -> Result<R> {
        let mut entry = self.get(date);
        let out = f(&mut entry)?;
        self.save(&entry)?;
        Ok(out)
    }

    // --- Field-scoped updates ---

    pub fn update_meal(&self, date: &str, slot: MealSlot, patch: MealPatch) -> Result<DayEntry> {
        self.modify(date, |day| {
            patch.apply(day.meals.get_mut(slot));
            Ok(day.clone())
        })
    }

    pub fn update_workout(&self, date: &str, patch: WorkoutPatch) -> Result<DayEntry> {
        self.modify(date, |day| {
            patch.apply(&mut day.workout);
            Ok(day.clone())
        })
    }

    pub fn update_sleep(&self, date: &str, patch: SleepPatch) -> Result<DayEntry> {
        self.modify(date, |day| {
            patch.apply(&mut day.sleep);
            Ok(day.clone())
        })
    }

    pub fn update_water(&self, date: &str, patch: WaterPatch) -> Result<DayEntry> {
        self.modify(date, |day| {
            patch.apply(&mut day.water);
            Ok(day.clone())
        })
    }

    pub fn update_weight(&self, date: &str, patch: WeightPatch) -> Result<DayEntry> {
        self.modify(date, |day| {
            patch.apply(&mut day.weight);
            Ok(day.clone())
        })
    }

    // --- Whole-record edits ---

    pub fn set_compliance(&self, date: &str, compliant: bool) -> Result<()> {
        self.modify(date, |day| {
            day.is_compliant = compliant;
            Ok(())
        })
    }

    /// Flip the compliance flag and return the new value.
    pub fn toggle_compliance(&self, date: &str) -> Result<bool> {
        self.modify(date, |day| {
            day.is_compliant = !day.is_compliant;
            Ok(day.is_compliant)
        })
    }

    pub fn set_observations(&self, date: &str, text: &str) -> Result<()> {
        self.modify(date, |day| {
            day.observations = text.to_string();
            Ok(())
        })
    }

    // --- Meals ---

    pub fn add_food(&self, date: &str, slot: MealSlot, food: &str) -> Result<bool> {
        self.modify(date, |day| Ok(day.meals.get_mut(slot).add_food(food)))
    }

    pub fn remove_food(&self, date: &str, slot: MealSlot, index: usize) -> Result<String> {
        self.modify(date, |day| day.meals.get_mut(slot).remove_food(index))
    }

    pub fn set_meal_time(&self, date: &str, slot: MealSlot, time: &str) -> Result<()> {
        self.modify(date, |day| {
            day.meals.get_mut(slot).time = time.to_string();
            Ok(())
        })
    }

    pub fn set_meal_notes(&self, date: &str, slot: MealSlot, notes: &str) -> Result<()> {
        self.modify(date, |day| {
            let meal = day.meals.get_mut(slot);
            meal.notes = notes.to_string();
            meal.touch();
            Ok(())
        })
    }

    // --- Water ---

    /// Log `glasses` more glasses, stamping each with the current time.
    pub fn add_glasses(&self, date: &str, glasses: u32) -> Result<Water> {
        self.modify(date, |day| {
            let now = chrono::Utc::now().to_rfc3339();
            day.water.intake = day.water.intake.saturating_add(glasses);
            day.water
                .timestamps
                .extend(std::iter::repeat_n(now, glasses as usize));
            Ok(day.water.clone())
        })
    }

    /// Take back the most recent glass. Does nothing when intake is already zero.
    pub fn remove_glass(&self, date: &str) -> Result<Water> {
        let current = self.get(date);
        if current.water.intake == 0 {
            return Ok(current.water);
        }
        self.modify(date, |day| {
            day.water.intake -= 1;
            day.water.timestamps.pop();
            Ok(day.water.clone())
        })
    }

    pub fn set_water_goal(&self, date: &str, goal: u32) -> Result<Water> {
        self.modify(date, |day| {
            day.water.goal = clamp_water_goal(goal);
            Ok(day.water.clone())
        })
    }

    // --- Weight ---

    pub fn set_weight(&self, date: &str, profile: &str, value: &str) -> Result<Weight> {
        self.modify(date, |day| {
            day.weight.set(profile, value.trim());
            Ok(day.weight.clone())
        })
    }
}
