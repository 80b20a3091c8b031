//! Whole-store export to JSON and CSV, and JSON import.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dates::{format_date, is_date_key};
use crate::models::{DayEntry, MealSlot};
use crate::store::DayStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `health-tracker-<date>.<ext>`
#[must_use]
pub fn export_filename(format: ExportFormat, date: NaiveDate) -> String {
    format!("health-tracker-{}.{}", format_date(date), format.extension())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub days_imported: usize,
    /// Records in the store before the import replaced them.
    pub days_replaced: usize,
}

// --- JSON ---

/// Pretty-printed JSON of every stored record, keyed by storage key.
pub fn export_json(store: &DayStore) -> Result<String> {
    serde_json::to_string_pretty(&store.all()).context("Failed to serialize export")
}

/// Replace the whole store with the records in `text`.
///
/// Every key must be a date (optionally prefixed with `<profile>-`) and every
/// record's date must match its key. On any error the store is left as it was.
pub fn import_json(store: &DayStore, text: &str) -> Result<ImportSummary> {
    let mut data: BTreeMap<String, DayEntry> =
        serde_json::from_str(text).context("Import file is not a valid day-record export")?;

    for (key, entry) in &mut data {
        let key_date = key_date(key).ok_or_else(|| anyhow!("Invalid record key '{key}'"))?;
        if entry.date.is_empty() {
            entry.date = key_date.to_string();
        } else if entry.date != key_date {
            bail!(
                "Record '{key}' has mismatched date '{}'",
                entry.date
            );
        }
        entry.normalize();
    }

    let days_replaced = store.all().len();
    store.replace_all(&data)?;
    info!(days = data.len(), days_replaced, "imported day records");
    Ok(ImportSummary {
        days_imported: data.len(),
        days_replaced,
    })
}

/// The date part of a storage key: the key itself or its last ten characters
/// after a `<profile>-` prefix.
fn key_date(key: &str) -> Option<&str> {
    if is_date_key(key) {
        return Some(key);
    }
    let split = key.len().checked_sub(11)?;
    let (prefix, rest) = key.split_at_checked(split)?;
    let date = rest.strip_prefix('-')?;
    (!prefix.is_empty() && is_date_key(date)).then_some(date)
}

// --- CSV ---

const CSV_HEADERS: [&str; 15] = [
    "Date",
    "Wake Time",
    "Nap Time",
    "Sleep Time",
    "Early Morning",
    "Breakfast",
    "Mid Morning",
    "Lunch",
    "Teatime",
    "Dinner",
    "Supper",
    "Did you workout today?",
    "Cardio Duration",
    "Weight Training",
    "Water Intake (glasses)",
];

/// Spreadsheet export: a header and one row per stored record in key order.
/// The Date column holds the storage key, so profile rows keep their prefix.
/// `profiles` name the two weight columns.
pub fn export_csv(store: &DayStore, profiles: &[&str; 2]) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header: Vec<String> = CSV_HEADERS.iter().map(|h| plain(h)).collect();
    header.extend(
        profiles
            .iter()
            .map(|p| plain(&format!("{} Weight (lbs)", capitalize(p)))),
    );
    header.push("Observations".to_string());
    wtr.write_record(&header)?;

    for (key, day) in store.all() {
        wtr.write_record(csv_row(&key, &day, profiles))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("Failed to finish CSV export: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV export is not valid UTF-8")
}

fn csv_row(key: &str, day: &DayEntry, profiles: &[&str; 2]) -> Vec<String> {
    let mut row = vec![
        plain(key),
        plain(&day.sleep.wake_time),
        plain(&day.sleep.nap_time),
        plain(&day.sleep.sleep_time),
    ];
    row.extend(
        MealSlot::ALL
            .iter()
            .map(|slot| quoted(&day.meals.get(*slot).foods.join("; "))),
    );
    row.push(if day.workout.did_workout { "Yes" } else { "No" }.to_string());
    row.push(plain(or_na(&day.workout.cardio_duration)));
    row.push(plain(or_na(&day.workout.weight_training)));
    row.push(day.water.intake.to_string());
    for profile in profiles {
        row.push(plain(day.weight.get(profile).unwrap_or_default()));
    }
    row.push(quoted(&day.observations));
    row
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() { "N/A" } else { value }
}

/// Always wrapped in double quotes, internal quotes doubled.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Quoted only when needed to keep the row shape.
fn plain(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quoted(value)
    } else {
        value.to_string()
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_PROFILES;
    use crate::storage::{DATA_KEY, KeyValueStore, MemoryStore};

    fn populated(kv: &MemoryStore) -> DayStore<'_> {
        let store = DayStore::new(kv);
        store
            .add_food("2026-01-13", MealSlot::Breakfast, "Oats")
            .unwrap();
        store
            .add_food("2026-01-13", MealSlot::Breakfast, "2 egg whites")
            .unwrap();
        store.add_glasses("2026-01-13", 5).unwrap();
        store.set_weight("2026-01-13", "raed", "181.4").unwrap();
        store
            .set_observations("2026-01-06", "Said \"no\" to dessert, mostly")
            .unwrap();
        store.set_compliance("2026-01-06", false).unwrap();
        store
    }

    fn parse(csv_text: &str) -> Vec<csv::StringRecord> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(csv_text.as_bytes())
            .records()
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
        assert_eq!(
            export_filename(ExportFormat::Json, date),
            "health-tracker-2026-01-19.json"
        );
        assert_eq!(
            export_filename(ExportFormat::Csv, date),
            "health-tracker-2026-01-19.csv"
        );
    }

    #[test]
    fn test_json_round_trip() {
        let kv = MemoryStore::new();
        let store = populated(&kv);
        let before = store.all();
        let exported = export_json(&store).unwrap();
        assert!(exported.contains("\n  \""));

        let other_kv = MemoryStore::new();
        let other = DayStore::new(&other_kv);
        let summary = import_json(&other, &exported).unwrap();
        assert_eq!(summary.days_imported, 2);
        assert_eq!(summary.days_replaced, 0);
        assert_eq!(other.all(), before);
    }

    #[test]
    fn test_import_replaces_rather_than_merges() {
        let kv = MemoryStore::new();
        let store = populated(&kv);
        let text = r#"{"2026-03-01": {"date": "2026-03-01", "observations": "only me"}}"#;
        let summary = import_json(&store, text).unwrap();
        assert_eq!(summary.days_imported, 1);
        assert_eq!(summary.days_replaced, 2);
        assert_eq!(store.dates(), vec!["2026-03-01"]);
        let day = store.get("2026-03-01");
        assert_eq!(day.observations, "only me");
        assert_eq!(day.water.goal, 8);
        assert!(day.is_compliant);
    }

    #[test]
    fn test_malformed_import_leaves_store_untouched() {
        let kv = MemoryStore::new();
        let store = populated(&kv);
        let before = kv.get(DATA_KEY).unwrap();

        for bad in [
            "{not json",
            "[1, 2, 3]",
            r#"{"2026-01-06": {"isCompliant": "yes"}}"#,
            r#"{"someday": {"date": "someday"}}"#,
            r#"{"2026-01-06": {"date": "2026-01-07"}}"#,
        ] {
            assert!(import_json(&store, bad).is_err(), "accepted: {bad}");
            assert_eq!(kv.get(DATA_KEY).unwrap(), before);
        }
    }

    #[test]
    fn test_import_clamps_goal_and_fills_date() {
        let kv = MemoryStore::new();
        let store = DayStore::new(&kv);
        import_json(
            &store,
            r#"{"2026-01-06": {"water": {"intake": 2, "goal": 99}}, "raed-2026-01-07": {}}"#,
        )
        .unwrap();
        let day = store.get("2026-01-06");
        assert_eq!(day.date, "2026-01-06");
        assert_eq!(day.water.goal, 20);
        assert_eq!(day.water.intake, 2);
        assert_eq!(
            DayStore::for_profile(&kv, "raed").unwrap().get("2026-01-07").date,
            "2026-01-07"
        );
    }

    #[test]
    fn test_key_date() {
        assert_eq!(key_date("2026-01-06"), Some("2026-01-06"));
        assert_eq!(key_date("raed-2026-01-06"), Some("2026-01-06"));
        assert_eq!(key_date("-2026-01-06"), None);
        assert_eq!(key_date("raed2026-01-06"), None);
        assert_eq!(key_date("short"), None);
    }

    #[test]
    fn test_csv_shape() {
        let kv = MemoryStore::new();
        let store = populated(&kv);
        let text = export_csv(&store, &DEFAULT_PROFILES).unwrap();
        assert_eq!(text.lines().count(), 3);

        let records = parse(&text);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.len() == 18));

        let header = &records[0];
        assert_eq!(&header[0], "Date");
        assert_eq!(&header[8], "Teatime");
        assert_eq!(&header[15], "Lamisa Weight (lbs)");
        assert_eq!(&header[16], "Raed Weight (lbs)");
        assert_eq!(&header[17], "Observations");
    }

    #[test]
    fn test_csv_row_values() {
        let kv = MemoryStore::new();
        let store = populated(&kv);
        let text = export_csv(&store, &DEFAULT_PROFILES).unwrap();
        let records = parse(&text);

        let jan06 = &records[1];
        assert_eq!(&jan06[0], "2026-01-06");
        assert_eq!(&jan06[11], "No");
        assert_eq!(&jan06[12], "N/A");
        assert_eq!(&jan06[13], "N/A");
        assert_eq!(&jan06[14], "0");
        assert_eq!(&jan06[17], "Said \"no\" to dessert, mostly");

        let jan13 = &records[2];
        assert_eq!(&jan13[5], "Oats; 2 egg whites");
        assert_eq!(&jan13[14], "5");
        assert_eq!(&jan13[15], "");
        assert_eq!(&jan13[16], "181.4");
    }

    #[test]
    fn test_csv_meal_and_observation_columns_always_quoted() {
        let kv = MemoryStore::new();
        let store = DayStore::new(&kv);
        store.set_observations("2026-01-06", "fine").unwrap();
        let text = export_csv(&store, &DEFAULT_PROFILES).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("2026-01-06,,,,\"\",\"\""));
        assert!(row.ends_with(",\"fine\""));
    }

    #[test]
    fn test_csv_plain_fields_quoted_when_needed() {
        let kv = MemoryStore::new();
        let store = DayStore::new(&kv);
        store
            .update_sleep(
                "2026-01-06",
                crate::models::SleepPatch {
                    wake_time: Some("7:00, roughly".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        let records = parse(&export_csv(&store, &DEFAULT_PROFILES).unwrap());
        assert_eq!(records[1].len(), 18);
        assert_eq!(&records[1][1], "7:00, roughly");
    }

    #[test]
    fn test_csv_date_column_keeps_profile_keys() {
        let kv = MemoryStore::new();
        let raed = DayStore::for_profile(&kv, "raed").unwrap();
        let lamisa = DayStore::for_profile(&kv, "lamisa").unwrap();
        raed.set_observations("2026-01-06", "r6").unwrap();
        lamisa.set_observations("2026-01-07", "l7").unwrap();
        lamisa.set_observations("2026-01-06", "l6").unwrap();

        let records = parse(&export_csv(&DayStore::new(&kv), &DEFAULT_PROFILES).unwrap());
        let dates: Vec<&str> = records[1..].iter().map(|r| &r[0]).collect();
        assert_eq!(
            dates,
            vec!["lamisa-2026-01-06", "lamisa-2026-01-07", "raed-2026-01-06"]
        );
        assert_eq!(&records[3][17], "r6");
    }

    #[test]
    fn test_csv_of_empty_store_is_header_only() {
        let kv = MemoryStore::new();
        let store = DayStore::new(&kv);
        let text = export_csv(&store, &DEFAULT_PROFILES).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with('\n'));
    }
}
