use crate::cli::{OutputType, Source};
use anyhow::{anyhow, Context};
use std::io::Write;
use userjs::{load_with, ParseOptions, PrefValue, Settings, Setting, SAMPLE_SOURCE};

/// Load the settings named by `source`, or the bundled list
pub fn load_source(source: &Source, options: &ParseOptions) -> anyhow::Result<Settings> {
    match &source.file {
        Some(path) => userjs::load_file(path, options).with_context(|| {
            format!(
                "Failed to load {}. Make sure the file exists and every line looks like user_pref(\"name\", value);",
                path.display()
            )
        }),
        None => load_with(SAMPLE_SOURCE, options).context("Failed to load the bundled user.js"),
    }
}

/// Load settings and report how many declarations were found
pub fn check(source: &Source, options: &ParseOptions) -> anyhow::Result<()> {
    let settings = load_source(source, options)?;
    tracing::info!(settings = settings.len(), "settings file is valid");
    println!("ok: {} settings", settings.len());
    Ok(())
}

/// Print settings as JSON, optionally filtered by glob patterns
pub fn show(
    source: &Source,
    options: &ParseOptions,
    queries: &[String],
    output_type: OutputType,
) -> anyhow::Result<()> {
    let settings = load_source(source, options)?;

    let output = if queries.is_empty() {
        settings
    } else {
        let patterns: Vec<&str> = queries.iter().map(String::as_str).collect();
        userjs::query_settings(&settings, &patterns).context("Failed to apply query")?
    };

    let json = match output_type {
        OutputType::JsonObject => serde_json::to_string_pretty(&output)?,
        OutputType::JsonArray => {
            let entries: Vec<&Setting> = output.iter().collect();
            serde_json::to_string_pretty(&entries)?
        }
    };

    println!("{}", json);
    Ok(())
}

/// Print a single setting's value in raw form (no JSON quoting)
pub fn get(source: &Source, options: &ParseOptions, key: &str) -> anyhow::Result<()> {
    let settings = load_source(source, options)?;
    let value: &PrefValue = settings
        .value(key)
        .ok_or_else(|| anyhow!("Preference '{}' not found", key))?;
    println!("{}", value);
    Ok(())
}

/// Re-serialize settings to stdout, or in place when `write` is set
pub fn fmt(source: &Source, options: &ParseOptions, write: bool) -> anyhow::Result<()> {
    let settings = load_source(source, options)?;

    match (&source.file, write) {
        (Some(path), true) => {
            userjs::write_file(&settings, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "rewrote settings file");
        }
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(userjs::serialize(&settings).as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
