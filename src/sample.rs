//! The bundled settings list

use crate::parser::load;
use crate::types::Settings;

/// Verbatim text of `data/user.js`
pub const SAMPLE_SOURCE: &str = include_str!("../data/user.js");

/// The bundled settings, loaded from [`SAMPLE_SOURCE`]
///
/// # Panics
///
/// Panics if the bundled file does not load. The file is checked in with the
/// crate and covered by its tests, so this indicates a broken build.
///
/// # Example
///
/// ```rust
/// use userjs::{sample, PrefValue};
///
/// let settings = sample();
/// assert_eq!(settings.value("keyword.enabled"), Some(&PrefValue::Bool(false)));
/// ```
pub fn sample() -> Settings {
    match load(SAMPLE_SOURCE) {
        Ok(settings) => settings,
        Err(e) => panic!("bundled data/user.js is invalid: {}", e),
    }
}
