use anyhow::{Result, bail};

use healthbook_core::models::{MAX_WATER_GOAL, MIN_WATER_GOAL, Water};
use healthbook_core::store::DayStore;

use super::helpers::day_key;

fn print_water(key: &str, water: &Water, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(water)?);
    } else {
        let remaining = water.goal.saturating_sub(water.intake);
        if remaining == 0 {
            println!("{key}: {}/{} glasses, goal reached", water.intake, water.goal);
        } else {
            println!(
                "{key}: {}/{} glasses, {remaining} to go",
                water.intake, water.goal
            );
        }
    }
    Ok(())
}

pub(crate) fn cmd_water_show(store: &DayStore, date: Option<&str>, json: bool) -> Result<()> {
    let key = day_key(date)?;
    print_water(&key, &store.get(&key).water, json)
}

pub(crate) fn cmd_water_add(
    store: &DayStore,
    glasses: u32,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    if glasses == 0 {
        bail!("Number of glasses must be at least 1");
    }
    let key = day_key(date)?;
    let water = store.add_glasses(&key, glasses)?;
    print_water(&key, &water, json)
}

pub(crate) fn cmd_water_remove(store: &DayStore, date: Option<&str>, json: bool) -> Result<()> {
    let key = day_key(date)?;
    let water = store.remove_glass(&key)?;
    print_water(&key, &water, json)
}

pub(crate) fn cmd_water_goal(
    store: &DayStore,
    goal: u32,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let key = day_key(date)?;
    let water = store.set_water_goal(&key, goal)?;
    if water.goal != goal && !json {
        eprintln!("Goal must be {MIN_WATER_GOAL}-{MAX_WATER_GOAL} glasses, using {}", water.goal);
    }
    print_water(&key, &water, json)
}
