use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const DEFAULT_WATER_GOAL: u32 = 8;
pub const MIN_WATER_GOAL: u32 = 1;
pub const MAX_WATER_GOAL: u32 = 20;

/// Profiles whose weights get their own CSV column.
pub const DEFAULT_PROFILES: [&str; 2] = ["lamisa", "raed"];

// --- Meal slots ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MealSlot {
    EarlyMorning,
    Breakfast,
    MidMorning,
    Lunch,
    Tea,
    Dinner,
    Supper,
}

impl MealSlot {
    pub const ALL: [MealSlot; 7] = [
        MealSlot::EarlyMorning,
        MealSlot::Breakfast,
        MealSlot::MidMorning,
        MealSlot::Lunch,
        MealSlot::Tea,
        MealSlot::Dinner,
        MealSlot::Supper,
    ];

    /// Key used for this slot in the persisted JSON.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            MealSlot::EarlyMorning => "earlyMorning",
            MealSlot::Breakfast => "breakfast",
            MealSlot::MidMorning => "midMorning",
            MealSlot::Lunch => "lunch",
            MealSlot::Tea => "tea",
            MealSlot::Dinner => "dinner",
            MealSlot::Supper => "supper",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MealSlot::EarlyMorning => "Early Morning",
            MealSlot::Breakfast => "Breakfast",
            MealSlot::MidMorning => "Mid Morning",
            MealSlot::Lunch => "Lunch",
            MealSlot::Tea => "Tea",
            MealSlot::Dinner => "Dinner",
            MealSlot::Supper => "Supper",
        }
    }

    /// Planned clock time, shown when the entry has no time of its own.
    #[must_use]
    pub fn default_time(self) -> &'static str {
        match self {
            MealSlot::EarlyMorning => "06:00",
            MealSlot::Breakfast => "08:00",
            MealSlot::MidMorning => "11:00",
            MealSlot::Lunch => "13:00",
            MealSlot::Tea => "16:00",
            MealSlot::Dinner => "19:00",
            MealSlot::Supper => "21:00",
        }
    }

    /// Foods from the diet plan for this slot.
    #[must_use]
    pub fn suggested_foods(self) -> &'static [&'static str] {
        match self {
            MealSlot::EarlyMorning => &["1½ glasses of water + 1½ tsp methi seeds"],
            MealSlot::Breakfast => &[
                "2 egg whites",
                "Vegetables",
                "Multigrain bread/Ezekiel bread",
                "Oats (3 tbsp steel-cut/rolled)",
            ],
            MealSlot::MidMorning => &["1 cup fruit", "3 almonds + 1 walnut"],
            MealSlot::Lunch => &[
                "Salad",
                "1½ cups quinoa/millets (4 tbsp raw)",
                "1½ cups vegetables",
                "1½ cups dal/beans",
            ],
            MealSlot::Tea => &["Greek yogurt + 2 tsp mixed seeds", "1 cup lentil chips"],
            MealSlot::Dinner => &[
                "1½ bowls soup",
                "Grilled/tandoor chicken/fish (150-200g)",
                "Salad",
                "2 cups stir-fried vegetables",
                "Chicken/tofu/paneer/beansprouts",
                "Chicken kebabs",
                "3-4 egg whites bhurji + toast",
                "2 cups lentil pasta with chicken/seafood",
                "3 moong dal/besan chillas + vegetable + chutney",
                "2 cups moong dal khichri",
                "4-5 paneer tikkis (100g paneer) + salad",
            ],
            MealSlot::Supper => &["Light snack if needed"],
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MealSlot {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "earlymorning" => Ok(MealSlot::EarlyMorning),
            "breakfast" => Ok(MealSlot::Breakfast),
            "midmorning" => Ok(MealSlot::MidMorning),
            "lunch" => Ok(MealSlot::Lunch),
            "tea" | "teatime" => Ok(MealSlot::Tea),
            "dinner" => Ok(MealSlot::Dinner),
            "supper" => Ok(MealSlot::Supper),
            _ => bail!(
                "Invalid meal slot '{s}'. Must be one of: {}",
                MealSlot::ALL.map(MealSlot::key).join(", ")
            ),
        }
    }
}

// --- Meal entries ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub foods: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default = "now_millis")]
    pub timestamp: i64,
}

impl MealEntry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: new_id(),
            time: String::new(),
            foods: Vec::new(),
            notes: String::new(),
            photo: None,
            timestamp: now_millis(),
        }
    }

    /// Append a food item. Blank input and items already present are ignored;
    /// returns whether the list changed.
    pub fn add_food(&mut self, food: &str) -> bool {
        let food = food.trim();
        if food.is_empty() || self.foods.iter().any(|f| f == food) {
            return false;
        }
        self.foods.push(food.to_string());
        self.touch();
        true
    }

    /// Remove the food at `index`, shifting later items down.
    pub fn remove_food(&mut self, index: usize) -> Result<String> {
        if index >= self.foods.len() {
            bail!(
                "No food at position {} (meal has {} item(s))",
                index + 1,
                self.foods.len()
            );
        }
        let removed = self.foods.remove(index);
        self.touch();
        Ok(removed)
    }

    pub fn touch(&mut self) {
        self.timestamp = now_millis();
    }
}

impl Default for MealEntry {
    fn default() -> Self {
        Self::empty()
    }
}

/// The seven meal slots of a day. Slots missing from stored data come back empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meals {
    #[serde(default, deserialize_with = "null_as_default")]
    pub early_morning: MealEntry,
    #[serde(default, deserialize_with = "null_as_default")]
    pub breakfast: MealEntry,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mid_morning: MealEntry,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lunch: MealEntry,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tea: MealEntry,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dinner: MealEntry,
    #[serde(default, deserialize_with = "null_as_default")]
    pub supper: MealEntry,
}

impl Meals {
    #[must_use]
    pub fn get(&self, slot: MealSlot) -> &MealEntry {
        match slot {
            MealSlot::EarlyMorning => &self.early_morning,
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::MidMorning => &self.mid_morning,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Tea => &self.tea,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Supper => &self.supper,
        }
    }

    pub fn get_mut(&mut self, slot: MealSlot) -> &mut MealEntry {
        match slot {
            MealSlot::EarlyMorning => &mut self.early_morning,
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::MidMorning => &mut self.mid_morning,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Tea => &mut self.tea,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Supper => &mut self.supper,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MealSlot, &MealEntry)> {
        MealSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }
}

// --- Other day sections ---

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workout {
    pub did_workout: bool,
    pub cardio_duration: String,
    pub weight_training: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sleep {
    pub wake_time: String,
    pub nap_time: String,
    pub sleep_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Water {
    pub intake: u32,
    pub goal: u32,
    /// RFC 3339 instants, one per logged glass.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub timestamps: Vec<String>,
}

impl Default for Water {
    fn default() -> Self {
        Self {
            intake: 0,
            goal: DEFAULT_WATER_GOAL,
            timestamps: Vec::new(),
        }
    }
}

impl Water {
    #[must_use]
    pub fn goal_reached(&self) -> bool {
        self.intake >= self.goal
    }
}

/// Weight strings keyed by profile name. Blank means not recorded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(pub BTreeMap<String, String>);

impl Weight {
    #[must_use]
    pub fn get(&self, profile: &str) -> Option<&str> {
        self.0
            .get(profile)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn set(&mut self, profile: &str, value: impl Into<String>) {
        self.0.insert(profile.to_string(), value.into());
    }
}

// --- Day entry ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    #[serde(default)]
    pub date: String,
    #[serde(default = "default_true")]
    pub is_compliant: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meals: Meals,
    #[serde(default, deserialize_with = "null_as_default")]
    pub workout: Workout,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sleep: Sleep,
    #[serde(default, deserialize_with = "null_as_default")]
    pub water: Water,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: Weight,
    #[serde(default, deserialize_with = "null_as_default")]
    pub observations: String,
}

impl DayEntry {
    #[must_use]
    pub fn empty(date: &str) -> Self {
        Self {
            date: date.to_string(),
            is_compliant: true,
            meals: Meals::default(),
            workout: Workout::default(),
            sleep: Sleep::default(),
            water: Water::default(),
            weight: Weight::default(),
            observations: String::new(),
        }
    }

    /// Bring stored values back into range.
    pub fn normalize(&mut self) {
        self.water.goal = clamp_water_goal(self.water.goal);
    }

    /// Total number of food items logged across all slots.
    #[must_use]
    pub fn food_count(&self) -> usize {
        self.meals.iter().map(|(_, m)| m.foods.len()).sum()
    }
}

// --- Partial updates ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealPatch {
    pub time: Option<String>,
    pub foods: Option<Vec<String>>,
    pub notes: Option<String>,
    pub photo: Option<Option<String>>,
    pub timestamp: Option<i64>,
}

impl MealPatch {
    pub fn apply(self, meal: &mut MealEntry) {
        if let Some(time) = self.time {
            meal.time = time;
        }
        if let Some(foods) = self.foods {
            meal.foods = foods;
        }
        if let Some(notes) = self.notes {
            meal.notes = notes;
        }
        if let Some(photo) = self.photo {
            meal.photo = photo;
        }
        if let Some(timestamp) = self.timestamp {
            meal.timestamp = timestamp;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPatch {
    pub did_workout: Option<bool>,
    pub cardio_duration: Option<String>,
    pub weight_training: Option<String>,
}

impl WorkoutPatch {
    pub fn apply(self, workout: &mut Workout) {
        if let Some(did) = self.did_workout {
            workout.did_workout = did;
        }
        if let Some(cardio) = self.cardio_duration {
            workout.cardio_duration = cardio;
        }
        if let Some(weights) = self.weight_training {
            workout.weight_training = weights;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepPatch {
    pub wake_time: Option<String>,
    pub nap_time: Option<String>,
    pub sleep_time: Option<String>,
}

impl SleepPatch {
    pub fn apply(self, sleep: &mut Sleep) {
        if let Some(wake) = self.wake_time {
            sleep.wake_time = wake;
        }
        if let Some(nap) = self.nap_time {
            sleep.nap_time = nap;
        }
        if let Some(bed) = self.sleep_time {
            sleep.sleep_time = bed;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaterPatch {
    pub intake: Option<u32>,
    pub goal: Option<u32>,
    pub timestamps: Option<Vec<String>>,
}

impl WaterPatch {
    pub fn apply(self, water: &mut Water) {
        if let Some(intake) = self.intake {
            water.intake = intake;
        }
        if let Some(goal) = self.goal {
            water.goal = clamp_water_goal(goal);
        }
        if let Some(timestamps) = self.timestamps {
            water.timestamps = timestamps;
        }
    }
}

/// Per-profile weight values; profiles not named are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct WeightPatch(pub BTreeMap<String, String>);

impl WeightPatch {
    #[must_use]
    pub fn single(profile: &str, value: impl Into<String>) -> Self {
        Self(BTreeMap::from([(profile.to_string(), value.into())]))
    }

    pub fn apply(self, weight: &mut Weight) {
        weight.0.extend(self.0);
    }
}

#[must_use]
pub fn clamp_water_goal(goal: u32) -> u32 {
    goal.clamp(MIN_WATER_GOAL, MAX_WATER_GOAL)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn default_true() -> bool {
    true
}

/// Older records may carry `null` where a section is now expected.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_day_entry_defaults() {
        let day = DayEntry::empty("2026-01-06");
        assert_eq!(day.date, "2026-01-06");
        assert!(day.is_compliant);
        assert_eq!(day.meals.iter().count(), 7);
        assert!(day.meals.iter().all(|(_, m)| m.foods.is_empty()));
        assert_eq!(day.water.intake, 0);
        assert_eq!(day.water.goal, 8);
        assert!(!day.workout.did_workout);
        assert!(day.observations.is_empty());
    }

    #[test]
    fn test_empty_meal_entries_get_distinct_ids() {
        let day = DayEntry::empty("2026-01-06");
        let ids: std::collections::HashSet<&str> =
            day.meals.iter().map(|(_, m)| m.id.as_str()).collect();
        assert_eq!(ids.len(), 7);
        assert!(Uuid::parse_str(&day.meals.lunch.id).is_ok());
        assert!(day.meals.lunch.timestamp > 0);
    }

    #[test]
    fn test_meal_slot_parse() {
        assert_eq!("earlyMorning".parse::<MealSlot>().unwrap(), MealSlot::EarlyMorning);
        assert_eq!("early-morning".parse::<MealSlot>().unwrap(), MealSlot::EarlyMorning);
        assert_eq!("Mid Morning".parse::<MealSlot>().unwrap(), MealSlot::MidMorning);
        assert_eq!("TEATIME".parse::<MealSlot>().unwrap(), MealSlot::Tea);
        assert!("brunch".parse::<MealSlot>().is_err());
    }

    #[test]
    fn test_meal_slot_serde_key_matches_key() {
        for slot in MealSlot::ALL {
            let json = serde_json::to_string(&slot).unwrap();
            assert_eq!(json, format!("\"{}\"", slot.key()));
        }
    }

    #[test]
    fn test_add_food_dedups_and_keeps_order() {
        let mut meal = MealEntry::empty();
        assert!(meal.add_food("A"));
        assert!(meal.add_food("B"));
        assert!(!meal.add_food("A"));
        assert!(!meal.add_food("   "));
        assert!(meal.add_food(" C "));
        assert_eq!(meal.foods, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_remove_food_shifts_indices() {
        let mut meal = MealEntry::empty();
        meal.foods = vec!["A".into(), "B".into(), "C".into()];
        assert_eq!(meal.remove_food(1).unwrap(), "B");
        assert_eq!(meal.foods, vec!["A", "C"]);
        assert!(meal.remove_food(2).is_err());
        assert_eq!(meal.foods, vec!["A", "C"]);
    }

    #[test]
    fn test_day_entry_json_uses_camel_case() {
        let day = DayEntry::empty("2026-01-06");
        let value = serde_json::to_value(&day).unwrap();
        assert_eq!(value["isCompliant"], true);
        assert!(value["meals"]["earlyMorning"].is_object());
        assert!(value["meals"]["midMorning"].is_object());
        assert_eq!(value["workout"]["didWorkout"], false);
        assert_eq!(value["sleep"]["wakeTime"], "");
        assert_eq!(value["water"]["goal"], 8);
        assert!(value["water"].get("timestamps").is_none());
    }

    #[test]
    fn test_legacy_record_is_backfilled() {
        let json = r#"{
            "date": "2026-01-06",
            "isCompliant": false,
            "meals": {
                "breakfast": {"id": "b1", "time": "", "foods": ["Oats"], "notes": "", "timestamp": 1}
            },
            "workout": null,
            "observations": "late start"
        }"#;
        let day: DayEntry = serde_json::from_str(json).unwrap();
        assert!(!day.is_compliant);
        assert_eq!(day.meals.breakfast.id, "b1");
        assert_eq!(day.meals.breakfast.foods, vec!["Oats"]);
        assert!(day.meals.supper.foods.is_empty());
        assert_eq!(day.workout, Workout::default());
        assert_eq!(day.water, Water::default());
        assert_eq!(day.observations, "late start");
    }

    #[test]
    fn test_partial_water_object_keeps_default_goal() {
        let water: Water = serde_json::from_str(r#"{"intake": 3}"#).unwrap();
        assert_eq!(water.intake, 3);
        assert_eq!(water.goal, 8);
    }

    #[test]
    fn test_water_patch_leaves_other_fields() {
        let mut water = Water {
            intake: 3,
            goal: 8,
            timestamps: vec![],
        };
        WaterPatch {
            intake: Some(4),
            ..Default::default()
        }
        .apply(&mut water);
        assert_eq!(water.intake, 4);
        assert_eq!(water.goal, 8);
    }

    #[test]
    fn test_water_patch_clamps_goal() {
        let mut water = Water::default();
        WaterPatch {
            goal: Some(25),
            ..Default::default()
        }
        .apply(&mut water);
        assert_eq!(water.goal, MAX_WATER_GOAL);

        WaterPatch {
            goal: Some(0),
            ..Default::default()
        }
        .apply(&mut water);
        assert_eq!(water.goal, MIN_WATER_GOAL);
    }

    #[test]
    fn test_meal_patch_merges_fields() {
        let mut meal = MealEntry::empty();
        meal.notes = "keep".into();
        MealPatch {
            time: Some("07:30".into()),
            foods: Some(vec!["Eggs".into()]),
            ..Default::default()
        }
        .apply(&mut meal);
        assert_eq!(meal.time, "07:30");
        assert_eq!(meal.foods, vec!["Eggs"]);
        assert_eq!(meal.notes, "keep");
    }

    #[test]
    fn test_weight_patch_merges_profiles() {
        let mut weight = Weight::default();
        weight.set("lamisa", "140");
        WeightPatch::single("raed", "180").apply(&mut weight);
        assert_eq!(weight.get("lamisa"), Some("140"));
        assert_eq!(weight.get("raed"), Some("180"));
    }

    #[test]
    fn test_weight_blank_reads_as_missing() {
        let mut weight = Weight::default();
        weight.set("lamisa", "  ");
        assert_eq!(weight.get("lamisa"), None);
        assert_eq!(weight.get("nobody"), None);
    }

    #[test]
    fn test_normalize_clamps_stored_goal() {
        let mut day = DayEntry::empty("2026-01-06");
        day.water.goal = 40;
        day.normalize();
        assert_eq!(day.water.goal, 20);
    }
}
