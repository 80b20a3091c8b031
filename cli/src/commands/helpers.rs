use anyhow::{Result, bail};
use serde::Serialize;

use healthbook_core::dates::{format_date, resolve_date};
use healthbook_core::models::{DayEntry, MealEntry, MealSlot};

/// Resolve `--date` style input (`today`, `yesterday`, `tomorrow`, `YYYY-MM-DD`) to a day key.
pub(crate) fn day_key(date: Option<&str>) -> Result<String> {
    Ok(format_date(resolve_date(date)?))
}

/// 1-based food position from the command line to a list index.
pub(crate) fn food_index(position: usize) -> Result<usize> {
    if position == 0 {
        bail!("Food positions start at 1");
    }
    Ok(position - 1)
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// `-` for blank strings.
pub(crate) fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

pub(crate) fn meal_time(slot: MealSlot, meal: &MealEntry) -> String {
    if meal.time.is_empty() {
        format!("({})", slot.default_time())
    } else {
        meal.time.clone()
    }
}

pub(crate) fn water_line(day: &DayEntry) -> String {
    let water = &day.water;
    let mark = if water.goal_reached() { " ✓" } else { "" };
    format!("{}/{} glasses{mark}", water.intake, water.goal)
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s
            .char_indices()
            .nth(max.saturating_sub(3))
            .map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_day_key_defaults_to_today() {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(day_key(None).unwrap(), today);
        assert_eq!(day_key(Some("today")).unwrap(), today);
    }

    #[test]
    fn test_day_key_iso() {
        assert_eq!(day_key(Some("2026-01-06")).unwrap(), "2026-01-06");
        assert!(day_key(Some("06/01/2026")).is_err());
    }

    #[test]
    fn test_food_index() {
        assert_eq!(food_index(1).unwrap(), 0);
        assert_eq!(food_index(3).unwrap(), 2);
        assert!(food_index(0).is_err());
    }

    #[test]
    fn test_json_error() {
        assert_eq!(json_error("nope"), r#"{"error":"nope"}"#);
        assert_eq!(json_error("say \"hi\""), r#"{"error":"say \"hi\""}"#);
    }

    #[test]
    fn test_meal_time_falls_back_to_plan() {
        let mut meal = MealEntry::empty();
        assert_eq!(meal_time(MealSlot::Lunch, &meal), "(13:00)");
        meal.time = "12:45".into();
        assert_eq!(meal_time(MealSlot::Lunch, &meal), "12:45");
    }

    #[test]
    fn test_water_line() {
        let mut day = DayEntry::empty("2026-01-06");
        assert_eq!(water_line(&day), "0/8 glasses");
        day.water.intake = 8;
        assert_eq!(water_line(&day), "8/8 glasses ✓");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(""), "-");
        assert_eq!(or_dash("  "), "-");
        assert_eq!(or_dash("07:00"), "07:00");
    }

    #[test]
    fn test_truncate_utf8() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world this is long", 10), "hello w...");
        assert_eq!(truncate("1½ cups quinoa/millets", 10), "1½ cups...");
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate("hello", 2), "...");
        assert_eq!(truncate("hello", 0), "...");
        assert_eq!(truncate("", 0), "");
    }
}
