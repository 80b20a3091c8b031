use anyhow::{Result, bail};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use healthbook_core::models::{DEFAULT_PROFILES, DayEntry, SleepPatch, WorkoutPatch};
use healthbook_core::store::DayStore;

use super::helpers::{day_key, meal_time, or_dash, truncate, water_line, yes_no};

pub(crate) fn cmd_show(store: &DayStore, date: Option<&str>, json: bool) -> Result<()> {
    let key = day_key(date)?;
    let day = store.get(&key);

    if json {
        println!("{}", serde_json::to_string_pretty(&day)?);
        return Ok(());
    }

    print_day(&day);
    Ok(())
}

fn print_day(day: &DayEntry) {
    let status = if day.is_compliant {
        "on plan"
    } else {
        "off plan"
    };
    println!("=== {} ({status}) ===\n", day.date);

    for (slot, meal) in day.meals.iter() {
        println!("  {} {}", slot.label().to_uppercase(), meal_time(slot, meal));
        if meal.foods.is_empty() {
            println!("    -");
        }
        for (i, food) in meal.foods.iter().enumerate() {
            println!("    {}. {food}", i + 1);
        }
        if !meal.notes.is_empty() {
            println!("    Notes: {}", meal.notes);
        }
    }
    println!();

    let workout = &day.workout;
    println!(
        "  Workout: {} | cardio {} | weights {}",
        yes_no(workout.did_workout),
        or_dash(&workout.cardio_duration),
        or_dash(&workout.weight_training)
    );
    let sleep = &day.sleep;
    println!(
        "  Sleep:   wake {} | nap {} | bed {}",
        or_dash(&sleep.wake_time),
        or_dash(&sleep.nap_time),
        or_dash(&sleep.sleep_time)
    );
    println!("  Water:   {}", water_line(day));

    let weights: Vec<String> = day
        .weight
        .0
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(p, v)| format!("{p} {v} lbs"))
        .collect();
    if !weights.is_empty() {
        println!("  Weight:  {}", weights.join(", "));
    }
    if !day.observations.is_empty() {
        println!("\n  {}", day.observations);
    }
}

pub(crate) fn cmd_history(store: &DayStore, days: Option<usize>, json: bool) -> Result<()> {
    let mut dates = store.dates();
    if let Some(n) = days {
        dates = dates.split_off(dates.len().saturating_sub(n));
    }
    let entries: Vec<DayEntry> = dates.iter().map(|d| store.get(d)).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        eprintln!("No days recorded yet. Use `healthbook seed` to load sample history.");
        return Ok(());
    }

    #[derive(Tabled)]
    struct HistoryRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "On plan")]
        compliant: &'static str,
        #[tabled(rename = "Foods")]
        foods: usize,
        #[tabled(rename = "Workout")]
        workout: &'static str,
        #[tabled(rename = "Water")]
        water: String,
        #[tabled(rename = "Lamisa (lbs)")]
        lamisa: String,
        #[tabled(rename = "Raed (lbs)")]
        raed: String,
        #[tabled(rename = "Observations")]
        observations: String,
    }

    let [first, second] = DEFAULT_PROFILES;
    let rows: Vec<HistoryRow> = entries
        .iter()
        .map(|d| HistoryRow {
            date: d.date.clone(),
            compliant: yes_no(d.is_compliant),
            foods: d.food_count(),
            workout: yes_no(d.workout.did_workout),
            water: format!("{}/{}", d.water.intake, d.water.goal),
            lamisa: d.weight.get(first).unwrap_or("-").to_string(),
            raed: d.weight.get(second).unwrap_or("-").to_string(),
            observations: truncate(&d.observations, 40),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..3)).with(Alignment::right()))
        .with(Modify::new(Columns::new(4..7)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    let compliant = entries.iter().filter(|d| d.is_compliant).count();
    println!("{compliant}/{} days on plan", entries.len());
    Ok(())
}

pub(crate) fn cmd_comply(
    store: &DayStore,
    date: Option<&str>,
    value: Option<bool>,
    json: bool,
) -> Result<()> {
    let key = day_key(date)?;
    let compliant = match value {
        Some(v) => {
            store.set_compliance(&key, v)?;
            v
        }
        None => store.toggle_compliance(&key)?,
    };

    if json {
        println!(
            "{}",
            serde_json::json!({ "date": key, "isCompliant": compliant })
        );
    } else if compliant {
        println!("{key} marked on plan");
    } else {
        println!("{key} marked off plan");
    }
    Ok(())
}

pub(crate) fn cmd_workout(
    store: &DayStore,
    date: Option<&str>,
    patch: WorkoutPatch,
    json: bool,
) -> Result<()> {
    let key = day_key(date)?;
    let day = if patch.did_workout.is_none()
        && patch.cardio_duration.is_none()
        && patch.weight_training.is_none()
    {
        store.get(&key)
    } else {
        store.update_workout(&key, patch)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&day.workout)?);
    } else {
        let w = &day.workout;
        println!(
            "{key} workout: {} | cardio {} | weights {}",
            yes_no(w.did_workout),
            or_dash(&w.cardio_duration),
            or_dash(&w.weight_training)
        );
    }
    Ok(())
}

pub(crate) fn cmd_sleep(
    store: &DayStore,
    date: Option<&str>,
    patch: SleepPatch,
    json: bool,
) -> Result<()> {
    let key = day_key(date)?;
    let day = if patch.wake_time.is_none() && patch.nap_time.is_none() && patch.sleep_time.is_none()
    {
        store.get(&key)
    } else {
        store.update_sleep(&key, patch)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&day.sleep)?);
    } else {
        let s = &day.sleep;
        println!(
            "{key} sleep: wake {} | nap {} | bed {}",
            or_dash(&s.wake_time),
            or_dash(&s.nap_time),
            or_dash(&s.sleep_time)
        );
    }
    Ok(())
}

pub(crate) fn cmd_observe(
    store: &DayStore,
    date: Option<&str>,
    text: &str,
    append: bool,
    json: bool,
) -> Result<()> {
    let key = day_key(date)?;
    let text = text.trim();
    if text.is_empty() && append {
        bail!("Nothing to append");
    }
    let observations = if append {
        let current = store.get(&key).observations;
        if current.is_empty() {
            text.to_string()
        } else {
            format!("{current}\n{text}")
        }
    } else {
        text.to_string()
    };
    store.set_observations(&key, &observations)?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "date": key, "observations": observations })
        );
    } else if observations.is_empty() {
        println!("Cleared observations for {key}");
    } else {
        println!("Saved observations for {key}");
    }
    Ok(())
}
