use anyhow::{Context, Result};
use std::process;
use tabled::{Table, Tabled, settings::Style};

use healthbook_core::models::MealSlot;
use healthbook_core::store::DayStore;

use super::helpers::{day_key, food_index, json_error};

pub(crate) fn cmd_meal_add(
    store: &DayStore,
    slot: MealSlot,
    foods: &[String],
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let key = day_key(date)?;
    let mut added = Vec::new();
    let mut skipped = Vec::new();
    for food in foods {
        if store.add_food(&key, slot, food)? {
            added.push(food.trim());
        } else {
            skipped.push(food.trim());
        }
    }
    let meal = store.get(&key).meals.get(slot).clone();

    if json {
        println!("{}", serde_json::to_string_pretty(&meal)?);
    } else {
        for food in &added {
            println!("Added {food} to {slot} on {key}");
        }
        for food in skipped.iter().filter(|f| !f.is_empty()) {
            eprintln!("{food} is already in {slot}");
        }
    }
    Ok(())
}

pub(crate) fn cmd_meal_remove(
    store: &DayStore,
    slot: MealSlot,
    position: usize,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let key = day_key(date)?;
    let index = food_index(position)?;

    match store.remove_food(&key, slot, index) {
        Ok(food) => {
            if json {
                println!("{}", serde_json::json!({ "removed": food, "slot": slot }));
            } else {
                println!("Removed {food} from {slot} on {key}");
            }
            Ok(())
        }
        Err(e) => {
            if json {
                println!("{}", json_error(&e.to_string()));
            } else {
                eprintln!("{e}");
            }
            process::exit(2);
        }
    }
}

pub(crate) fn cmd_meal_notes(
    store: &DayStore,
    slot: MealSlot,
    notes: &str,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let key = day_key(date)?;
    store.set_meal_notes(&key, slot, notes.trim())?;

    if json {
        let meal = store.get(&key).meals.get(slot).clone();
        println!("{}", serde_json::to_string_pretty(&meal)?);
    } else {
        println!("Updated {slot} notes on {key}");
    }
    Ok(())
}

pub(crate) fn cmd_meal_time(
    store: &DayStore,
    slot: MealSlot,
    time: &str,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let key = day_key(date)?;
    let time = time.trim();
    let time = if time.is_empty() {
        String::new()
    } else {
        chrono::NaiveTime::parse_from_str(time, "%H:%M")
            .with_context(|| format!("Invalid time '{time}'. Use HH:MM (24-hour)"))?
            .format("%H:%M")
            .to_string()
    };
    store.set_meal_time(&key, slot, &time)?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "date": key, "slot": slot, "time": time })
        );
    } else if time.is_empty() {
        println!("Cleared {slot} time on {key}");
    } else {
        println!("{slot} on {key} at {time}");
    }
    Ok(())
}

pub(crate) fn cmd_meal_suggest(slot: Option<MealSlot>, json: bool) -> Result<()> {
    let slots: Vec<MealSlot> = slot.map_or_else(|| MealSlot::ALL.to_vec(), |s| vec![s]);

    if json {
        let plan: Vec<serde_json::Value> = slots
            .iter()
            .map(|s| {
                serde_json::json!({
                    "slot": s,
                    "time": s.default_time(),
                    "foods": s.suggested_foods(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    #[derive(Tabled)]
    struct PlanRow {
        #[tabled(rename = "Meal")]
        meal: &'static str,
        #[tabled(rename = "Time")]
        time: &'static str,
        #[tabled(rename = "Suggested")]
        food: &'static str,
    }

    let rows: Vec<PlanRow> = slots
        .iter()
        .flat_map(|s| {
            s.suggested_foods()
                .iter()
                .enumerate()
                .map(move |(i, &food)| PlanRow {
                    meal: if i == 0 { s.label() } else { "" },
                    time: if i == 0 { s.default_time() } else { "" },
                    food,
                })
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
    Ok(())
}
