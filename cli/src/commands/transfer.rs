use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::process;

use healthbook_core::seed::HISTORICAL_DAYS;
use healthbook_core::service::Tracker;
use healthbook_core::transfer::{ExportFormat, export_filename};

use super::helpers::json_error;

pub(crate) fn cmd_export(
    tracker: &Tracker,
    format: ExportFormat,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let body = match format {
        ExportFormat::Json => tracker.export_json()?,
        ExportFormat::Csv => tracker.export_csv()?,
    };

    let Some(output) = output else {
        print!("{body}");
        if !body.ends_with('\n') {
            println!();
        }
        return Ok(());
    };

    let path: PathBuf = if output.is_dir() {
        output.join(export_filename(format, chrono::Local::now().date_naive()))
    } else {
        output.to_path_buf()
    };
    std::fs::write(&path, &body)
        .with_context(|| format!("Failed to write export: {}", path.display()))?;

    let days = tracker.days().all().len();
    if json {
        println!(
            "{}",
            serde_json::json!({ "path": path, "format": format, "days": days })
        );
    } else {
        println!("Exported {days} day(s) to {}", path.display());
    }
    Ok(())
}

pub(crate) fn cmd_import(tracker: &Tracker, file: &Path, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;

    match tracker.import_json(&text) {
        Ok(summary) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "Imported {} day(s), replacing {} existing",
                    summary.days_imported, summary.days_replaced
                );
            }
            Ok(())
        }
        Err(e) => {
            let message = format!("Import failed, nothing was changed: {e:#}");
            if json {
                println!("{}", json_error(&message));
            } else {
                eprintln!("{message}");
            }
            process::exit(1);
        }
    }
}

pub(crate) fn cmd_seed(tracker: &Tracker, force: bool, json: bool) -> Result<()> {
    let seeded = if force {
        Some(tracker.reseed()?)
    } else if tracker.seed_historical_data()? {
        Some(HISTORICAL_DAYS)
    } else {
        None
    };

    if json {
        println!(
            "{}",
            serde_json::json!({ "seeded": seeded.is_some(), "days": seeded.unwrap_or(0) })
        );
    } else if force {
        println!("Loaded {} historical day(s)", seeded.unwrap_or(0));
    } else if seeded.is_some() {
        println!("Loaded sample history (2026-01-06 to 2026-01-19)");
    } else {
        eprintln!("Sample history was already loaded. Use --force to load it again.");
    }
    Ok(())
}

pub(crate) fn cmd_clear(tracker: &Tracker, yes: bool, json: bool) -> Result<()> {
    if !yes {
        bail!("This deletes every day record. Re-run with --yes to confirm");
    }
    let removed = tracker.clear_all()?;

    if json {
        println!("{}", serde_json::json!({ "cleared": removed }));
    } else if removed {
        println!("Cleared all day records");
    } else {
        println!("Nothing to clear");
    }
    Ok(())
}
