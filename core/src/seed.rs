//! Two weeks of historical days loaded on first run.

use anyhow::Result;
use tracing::info;

use crate::models::{DayEntry, MealEntry, MealSlot, Sleep, Workout};
use crate::prefs::Preferences;
use crate::store::DayStore;

struct HistoricalDay {
    date: &'static str,
    compliant: bool,
    /// Foods per slot, in `MealSlot::ALL` order.
    meals: [&'static [&'static str]; 7],
    workout: (bool, &'static str, &'static str),
    /// Wake, nap, bed.
    sleep: (&'static str, &'static str, &'static str),
    observations: &'static str,
}

const NONE: &[&str] = &[];
const NO_WORKOUT: (bool, &str, &str) = (false, "N/A", "N/A");

const HISTORY: [HistoricalDay; 14] = [
    HistoricalDay {
        date: "2026-01-06",
        compliant: false,
        meals: [
            NONE,
            &["1 Slice sourdough", "1 egg + 2 egg whites", "1 slice cheese"],
            &["Rice, Daal, Salad (cucumber, Onion, Tomato, Tuna, Ham Napoli, Mushrooms, Pumpkin Seed, Sunflower Seed"],
            NONE,
            &["1 Chicken breast, Salad (Lettuce, Cucumber, Onion, Tomato, Feta, Hemp, Hearts, Sunflower, Pumpkin Seed, Sunflower Seed, Baby spinach"],
            &["2 squares of 85% Dark Chocolate, 3 slices of cheese"],
            NONE,
        ],
        workout: NO_WORKOUT,
        sleep: ("10:00:00", "", "17:00:00"),
        observations: "Started the day late, meals got pushed out and did workout. Need to plan day earlier.",
    },
    HistoricalDay {
        date: "2026-01-07",
        compliant: false,
        meals: [
            NONE,
            &[
                "Coffee with cream, Scrambled Omelette (1/2 a",
                "Tomato, 1/2 jalapenos, 1 egg + 2 egg whites, 1 slice mushroom",
            ],
            &["1 party, 3 jalapeños, 2 waffles"],
            &["Rice, Salad, (Tuna, Salad, broccoli, Courgette, Kidney beans, cilantro, sunflower seeds, pumpkin seeds, 1/2 chipote pepper, 1 baby yogurt, 4 baby spinach"],
            NONE,
            &["200g chicken, chicken broth soup"],
            &["1.5 low mashi seeds, Scrambled Omelette (1/2 a Tomato, Onion, Spinach, 2 Mushrooms, 1 egg + 2 egg whites"],
        ],
        workout: NO_WORKOUT,
        sleep: ("10:00:00", "", "2:00:30"),
        observations: "Started the day late again, getting towards the end of the day. Need to start day earlier, need to prep food for ingredients in advance",
    },
    HistoricalDay {
        date: "2026-01-08",
        compliant: false,
        meals: [
            NONE,
            &["1 Slice sourdough, Onion, Spinach, 2 Mushrooms, 1 egg + 2 egg whites"],
            &[
                "5 almonds, 1 cup Pomegranate",
                "Salad (1/2 can chickpea, 1/2 tomato, lettuce, 1/2 onion, 1/2 avocado, 1/2 cucumber)",
            ],
            NONE,
            NONE,
            &["1.5 cup Tow yum chop, 1 big chilli ari fried chicken"],
            NONE,
        ],
        workout: NO_WORKOUT,
        sleep: ("11:00:00", "", "2:00:30"),
        observations: "Almost got a workout in but had a family emergency to attend. Not happy with sleeping late as well",
    },
    HistoricalDay {
        date: "2026-01-09",
        compliant: false,
        meals: [
            NONE,
            &["1 egg + 2 egg whites, Salad (lettuce, onion, 1/4 cucumber, and a sm of chickpea, sunflower seeds, pumpkin seeds, 5 almonds, 2 walnuts, 2 strawberries"],
            NONE,
            NONE,
            &["2 slices sourdough toast, yogurt spread (1.5 blackberries, peanut butter, cinnamon, mini 1/2kg smoked salmon"],
            NONE,
            NONE,
        ],
        workout: NO_WORKOUT,
        sleep: ("11:00:00", "", "4:00:30"),
        observations: "Woke up late so combined with lunch and ate three meals. Better for macro tracking",
    },
    HistoricalDay {
        date: "2026-01-10",
        compliant: false,
        meals: [
            NONE,
            &["1 Slice sourdough, 1 egg + 2 egg whites, 1 slice mushroom"],
            &[
                "5 almonds, 1 walnut",
                "Stir Fry vegetables (mushroom, carrot, bell peppers, chickpea",
            ],
            NONE,
            &["1 cup miso soup with greaser, 1 bass fillet"],
            NONE,
            NONE,
        ],
        workout: NO_WORKOUT,
        sleep: ("11:00:00", "", "2:00:30"),
        observations: "Went to David's for dinner but didn't eat cheat meal",
    },
    HistoricalDay {
        date: "2026-01-11",
        compliant: false,
        meals: [
            NONE,
            &["Salad, Ladyfish, 5 almonds, 2 walnuts"],
            &["2 bowls of rice and sour soup, 2 bass chicken breast, sliced chicken, 7 bass chicken pakora"],
            &["Manchurian chicken, 1 chicken pakora"],
            NONE,
            &["1/2 cup rice, 2 pieces of lamb shoulder, 1 sambe, 1 Dosa"],
            NONE,
        ],
        workout: NO_WORKOUT,
        sleep: ("12:00:00", "", "5:00:30"),
        observations: "Cheat day",
    },
    HistoricalDay {
        date: "2026-01-12",
        compliant: false,
        meals: [
            NONE,
            &[
                "1 egg + 2 egg whites + 1 slice sourdough",
                "1 sliced fish soup, 1 slice of hearts, tomfalis, 1 bowl smoked salmon",
            ],
            NONE,
            &["1 bowl kidney beans, Salad (lettuce, onion, cucumber, avocado, sunflower seeds, pumpkin seeds, chickpeas, cranberries"],
            &["2 oranges"],
            &["1 bowl fish soup, 2 slices of hearts, tomfalis, 1 bowl smoked salmon"],
            &["3 pieces dark chocolate"],
        ],
        workout: NO_WORKOUT,
        sleep: ("1:00:00", "", "2:30:30"),
        observations: "",
    },
    HistoricalDay {
        date: "2026-01-13",
        compliant: true,
        meals: [
            &["Stir Fry vegetables (bell pepper, onion), 1 egg + 2 egg whites"],
            &["3 free whites"],
            &["Patch paneer, Salad"],
            NONE,
            &["200g chicken, vegetable soup"],
            NONE,
            NONE,
        ],
        workout: (true, "80", "60"),
        sleep: ("7:00:00", "", ""),
        observations: "",
    },
    HistoricalDay {
        date: "2026-01-14",
        compliant: true,
        meals: [
            NONE,
            &["Burrito bowl (lettuce, onion, cucumber, red beans, 1/2 chipotle pepper, sweet potato crackers, 1 lime yogurt"],
            &["5 almonds, 1 walnut, 1 orange"],
            &["Carnie, 100g chicken"],
            NONE,
            NONE,
            NONE,
        ],
        workout: (true, "60", "N/A"),
        sleep: ("9:00:00", "", "2:30:30"),
        observations: "",
    },
    HistoricalDay {
        date: "2026-01-15",
        compliant: true,
        meals: [
            NONE,
            &["Burrito bowl (lettuce, onion, cucumber, red beans, 1/2 chipotle pepper, sweet potato crackers, 1 lime yogurt"],
            &["5 almonds, 1 walnut, 1 lime yogurt, 1 egg + 2 egg whites"],
            NONE,
            &["1/4 cup okra, 200g chicken"],
            NONE,
            NONE,
        ],
        workout: (true, "60", "N/A"),
        sleep: ("10:00:00", "", ""),
        observations: "",
    },
    HistoricalDay {
        date: "2026-01-16",
        compliant: true,
        meals: [
            &["1 egg + 2 egg whites, 1 slice sourdough"],
            &["5 almonds, 2 walnuts"],
            &["1 lime quinoa, red curry (carrot puree, peas, beans, tomato onion)"],
            NONE,
            &["Salad (cucumber, tomatoes, onion, coriander, 1/2 kilo toned milk chicken, fish soup (white beans, 1 kgs, 1/2 cup broth)"],
            NONE,
            NONE,
        ],
        workout: (true, "60", "N/A"),
        sleep: ("10:00:00", "", "2:00:30"),
        observations: "",
    },
    HistoricalDay {
        date: "2026-01-17",
        compliant: true,
        meals: [
            &["1 egg + 2 egg whites, 1 slice sourdough, 1 pineapple laughing cow light"],
            &["5 almonds, 1 walnut, 1 apple"],
            &["Salad (lettuce, cucumber, onion, tomato, dressing, seeds, 1/2 chipotle breast, fish soup (chicken broth)"],
            NONE,
            NONE,
            NONE,
            NONE,
        ],
        workout: NO_WORKOUT,
        sleep: ("10:00:00", "", ""),
        observations: "",
    },
    HistoricalDay {
        date: "2026-01-18",
        compliant: true,
        meals: [
            &["1 Alfredo pats, motor with fries"],
            &["5 almonds, 1 walnut"],
            &["1 small bowl moons, 2 chicken thighs, 1/2 cup rice"],
            NONE,
            NONE,
            NONE,
            NONE,
        ],
        workout: NO_WORKOUT,
        sleep: ("", "", "1:00:30"),
        observations: "",
    },
    HistoricalDay {
        date: "2026-01-19",
        compliant: true,
        meals: [
            &["Falafel Takka burger, Salad"],
            &["1 orange, 5 almonds, 2 walnuts, 2 walnut"],
            NONE,
            NONE,
            &["200g chicken, vegetable soup"],
            &["1 orange, 30 dark chocolate covered acai berry"],
            NONE,
        ],
        workout: (true, "60", "N/A"),
        sleep: ("", "", "3:00:30"),
        observations: "Clean Bulk day",
    },
];

impl HistoricalDay {
    fn to_entry(&self) -> DayEntry {
        let mut day = DayEntry::empty(self.date);
        day.is_compliant = self.compliant;
        for (slot, foods) in MealSlot::ALL.into_iter().zip(self.meals) {
            *day.meals.get_mut(slot) = MealEntry {
                foods: foods.iter().map(|f| (*f).to_string()).collect(),
                ..MealEntry::empty()
            };
        }
        let (did_workout, cardio, weights) = self.workout;
        day.workout = Workout {
            did_workout,
            cardio_duration: cardio.to_string(),
            weight_training: weights.to_string(),
        };
        let (wake, nap, bed) = self.sleep;
        day.sleep = Sleep {
            wake_time: wake.to_string(),
            nap_time: nap.to_string(),
            sleep_time: bed.to_string(),
        };
        day.observations = self.observations.to_string();
        day
    }
}

/// Number of days written by a seed.
pub const HISTORICAL_DAYS: usize = HISTORY.len();

/// The historical days as fresh records (new meal ids and timestamps each call).
#[must_use]
pub fn historical_days() -> Vec<DayEntry> {
    HISTORY.iter().map(HistoricalDay::to_entry).collect()
}

/// Load the historical days unless this storage has been seeded before.
/// Returns whether anything was written.
pub fn seed_historical_data(store: &DayStore, prefs: &Preferences) -> Result<bool> {
    if prefs.has_visited() {
        return Ok(false);
    }
    let count = reseed(store)?;
    prefs.mark_visited()?;
    info!(count, "seeded historical data on first run");
    Ok(true)
}

/// Save every historical day, overwriting those dates. Ignores the first-run flag.
pub fn reseed(store: &DayStore) -> Result<usize> {
    let days = historical_days();
    for day in &days {
        store.save(day)?;
    }
    info!(count = days.len(), "saved historical days");
    Ok(days.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_historical_days_cover_two_weeks() {
        let days = historical_days();
        assert_eq!(days.len(), 14);
        assert_eq!(days[0].date, "2026-01-06");
        assert_eq!(days[13].date, "2026-01-19");
        assert_eq!(days.iter().filter(|d| d.is_compliant).count(), 7);
        assert!(days.iter().all(|d| crate::dates::is_date_key(&d.date)));
    }

    #[test]
    fn test_historical_day_contents() {
        let days = historical_days();
        let jan13 = days.iter().find(|d| d.date == "2026-01-13").unwrap();
        assert!(jan13.workout.did_workout);
        assert_eq!(jan13.workout.cardio_duration, "80");
        assert_eq!(jan13.meals.tea.foods, vec!["200g chicken, vegetable soup"]);
        assert_eq!(jan13.water.goal, 8);
        assert_eq!(days[13].observations, "Clean Bulk day");
    }

    #[test]
    fn test_first_run_seed_count_ignores_existing_days() {
        let kv = MemoryStore::new();
        let store = DayStore::new(&kv);
        let prefs = Preferences::new(&kv);
        store.set_observations("2025-12-31", "before seeding").unwrap();

        assert!(seed_historical_data(&store, &prefs).unwrap());
        assert_eq!(HISTORICAL_DAYS, historical_days().len());
        assert_eq!(HISTORICAL_DAYS, 14);
        assert_eq!(store.dates().len(), HISTORICAL_DAYS + 1);
    }

    #[test]
    fn test_seed_runs_once() {
        let kv = MemoryStore::new();
        let store = DayStore::new(&kv);
        let prefs = Preferences::new(&kv);

        assert!(seed_historical_data(&store, &prefs).unwrap());
        assert_eq!(store.dates().len(), 14);
        assert!(prefs.has_visited());

        store.set_observations("2026-01-06", "edited").unwrap();
        assert!(!seed_historical_data(&store, &prefs).unwrap());
        assert_eq!(store.get("2026-01-06").observations, "edited");
    }

    #[test]
    fn test_seed_keeps_unrelated_days() {
        let kv = MemoryStore::new();
        let store = DayStore::new(&kv);
        store.set_observations("2026-02-01", "mine").unwrap();
        reseed(&store).unwrap();
        assert_eq!(store.dates().len(), 15);
        assert_eq!(store.get("2026-02-01").observations, "mine");
    }

    #[test]
    fn test_reseed_ignores_flag_and_overwrites() {
        let kv = MemoryStore::new();
        let store = DayStore::new(&kv);
        let prefs = Preferences::new(&kv);
        prefs.mark_visited().unwrap();
        store.set_observations("2026-01-19", "edited").unwrap();

        assert_eq!(reseed(&store).unwrap(), 14);
        assert_eq!(store.get("2026-01-19").observations, "Clean Bulk day");
    }
}
