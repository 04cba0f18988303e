use crate::error::{Error, Result};
use crate::types::Settings;
use glob::Pattern;

/// Query settings by glob patterns (OR logic)
///
/// Returns the settings whose key matches any of the provided patterns, in
/// their original order.
///
/// # Example
///
/// ```rust
/// use userjs::{query_settings, sample};
///
/// let urlbar = query_settings(&sample(), &["browser.urlbar.*"])?;
/// assert!(urlbar.keys().all(|k| k.starts_with("browser.urlbar.")));
/// # Ok::<(), userjs::Error>(())
/// ```
pub fn query_settings(settings: &Settings, patterns: &[&str]) -> Result<Settings> {
    // Compile all patterns first to fail fast on invalid patterns
    let compiled_patterns: Vec<Pattern> = patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| Error::InvalidGlobPattern(format!("'{}': {}", p, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut queried = Settings::new();
    for setting in settings
        .iter()
        .filter(|s| compiled_patterns.iter().any(|pattern| pattern.matches(&s.key)))
    {
        queried.insert(setting.clone());
    }

    Ok(queried)
}
