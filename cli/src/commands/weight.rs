use anyhow::{Context, Result};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use healthbook_core::prefs::Preferences;
use healthbook_core::store::DayStore;
use healthbook_core::units::{WeightUnit, convert, parse_weight, round_to_tenth};

use super::helpers::day_key;

/// Weights are stored in pounds.
pub(crate) fn cmd_weight_set(
    store: &DayStore,
    prefs: &Preferences,
    value: &str,
    unit: WeightUnit,
    user: Option<&str>,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let user = match user {
        Some(u) => u.trim().to_string(),
        None => prefs
            .selected_user()
            .context("No profile selected. Pass --user or run `healthbook profile set <name>`")?,
    };
    let parsed = parse_weight(value)?;
    let lbs = round_to_tenth(convert(parsed, unit, WeightUnit::Lbs));
    if unit == WeightUnit::Kg {
        eprintln!("Converting {parsed:.1} kg → {lbs:.1} lbs");
    }

    let key = day_key(date)?;
    let weight = store.set_weight(&key, &user, &lbs.to_string())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&weight)?);
    } else {
        let kg = round_to_tenth(convert(lbs, WeightUnit::Lbs, WeightUnit::Kg));
        println!("Logged {lbs:.1} lbs ({kg:.1} kg) for {user} on {key}");
    }
    Ok(())
}

pub(crate) fn cmd_weight_show(store: &DayStore, date: Option<&str>, json: bool) -> Result<()> {
    let key = day_key(date)?;
    let weight = store.get(&key).weight;

    if json {
        println!("{}", serde_json::to_string_pretty(&weight)?);
        return Ok(());
    }

    #[derive(Tabled)]
    struct WeightRow {
        #[tabled(rename = "Profile")]
        profile: String,
        #[tabled(rename = "Weight (lbs)")]
        lbs: String,
        #[tabled(rename = "Weight (kg)")]
        kg: String,
    }

    let rows: Vec<WeightRow> = weight
        .0
        .iter()
        .filter_map(|(profile, value)| {
            let lbs = parse_weight(value).ok()?;
            Some(WeightRow {
                profile: profile.clone(),
                lbs: format!("{lbs:.1}"),
                kg: format!(
                    "{:.1}",
                    round_to_tenth(convert(lbs, WeightUnit::Lbs, WeightUnit::Kg))
                ),
            })
        })
        .collect();

    if rows.is_empty() {
        eprintln!("No weight recorded for {key}");
        return Ok(());
    }

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..3)).with(Alignment::right()))
        .to_string();
    println!("{table}");
    Ok(())
}

pub(crate) fn cmd_weight_convert(value: &str, from: WeightUnit, json: bool) -> Result<()> {
    let parsed = parse_weight(value)?;
    let to = from.other();
    let converted = round_to_tenth(convert(parsed, from, to));

    if json {
        println!(
            "{}",
            serde_json::json!({ "value": converted, "unit": to, "from": { "value": parsed, "unit": from } })
        );
    } else {
        println!("{parsed} {from} = {converted:.1} {to}");
    }
    Ok(())
}
