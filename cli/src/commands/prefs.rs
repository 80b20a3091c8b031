use anyhow::Result;

use healthbook_core::models::DEFAULT_PROFILES;
use healthbook_core::prefs::Preferences;

pub(crate) fn cmd_profile_set(prefs: &Preferences, name: &str, json: bool) -> Result<()> {
    prefs.set_selected_user(name)?;
    let name = name.trim();
    if !DEFAULT_PROFILES.contains(&name) {
        eprintln!(
            "Note: '{name}' has no weight column in CSV exports ({})",
            DEFAULT_PROFILES.join(", ")
        );
    }

    if json {
        println!("{}", serde_json::json!({ "selectedUser": name }));
    } else {
        println!("Selected profile: {name}");
    }
    Ok(())
}

pub(crate) fn cmd_profile_show(prefs: &Preferences, json: bool) -> Result<()> {
    let user = prefs.selected_user();

    if json {
        println!("{}", serde_json::json!({ "selectedUser": user }));
    } else if let Some(user) = user {
        println!("{user}");
    } else {
        eprintln!("No profile selected. Use `healthbook profile set <name>`.");
    }
    Ok(())
}

pub(crate) fn cmd_profile_clear(prefs: &Preferences, json: bool) -> Result<()> {
    let cleared = prefs.clear_selected_user()?;

    if json {
        println!("{}", serde_json::json!({ "cleared": cleared }));
    } else if cleared {
        println!("Profile cleared");
    } else {
        println!("No profile was selected");
    }
    Ok(())
}

/// Show the theme, or set it when `dark` is given.
pub(crate) fn cmd_theme(prefs: &Preferences, dark: Option<bool>, json: bool) -> Result<()> {
    if let Some(dark) = dark {
        prefs.set_dark_mode(dark)?;
    }
    let dark = prefs.dark_mode();

    if json {
        println!("{}", serde_json::json!({ "darkMode": dark }));
    } else {
        println!("Theme: {}", if dark { "dark" } else { "light" });
    }
    Ok(())
}
