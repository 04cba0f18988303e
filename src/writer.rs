//! Writing settings back out in user.js form

use crate::error::{Error, Result};
use crate::types::{PrefValue, Settings};
use std::path::Path;

/// Render settings as one declaration per line, in declaration order
///
/// Each setting keeps its declaration function. Strings are escaped so the
/// output loads back to an equal [`Settings`].
///
/// # Example
///
/// ```rust
/// use userjs::{load, serialize};
///
/// let settings = load(r#"user_pref( "keyword.enabled" ,false ) ;"#)?;
/// assert_eq!(serialize(&settings), "user_pref(\"keyword.enabled\", false);\n");
/// # Ok::<(), userjs::ParseError>(())
/// ```
pub fn serialize(settings: &Settings) -> String {
    let mut out = String::new();
    for setting in settings {
        out.push_str(setting.kind.function_name());
        out.push('(');
        write_string(&mut out, &setting.key);
        out.push_str(", ");
        write_value(&mut out, &setting.value);
        out.push_str(");\n");
    }
    out
}

/// Serialize settings and write them to `path`, replacing any existing file
pub fn write_file(settings: &Settings, path: &Path) -> Result<()> {
    std::fs::write(path, serialize(settings)).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), settings = settings.len(), "wrote settings file");
    Ok(())
}

fn write_value(out: &mut String, value: &PrefValue) {
    match value {
        PrefValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        PrefValue::Integer(n) => out.push_str(&n.to_string()),
        PrefValue::String(s) => write_string(out, s),
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::load;

    #[test]
    fn test_serialize_canonical_form() {
        let input = r#"
            // comment dropped
            user_pref("browser.startup.homepage","about:blank");
            lock_pref( "ui.caretBlinkTime", 0 );
            user_pref("keyword.enabled", false);
        "#;
        let out = serialize(&load(input).unwrap());
        assert_eq!(
            out,
            "user_pref(\"browser.startup.homepage\", \"about:blank\");\n\
             lock_pref(\"ui.caretBlinkTime\", 0);\n\
             user_pref(\"keyword.enabled\", false);\n"
        );
    }

    #[test]
    fn test_serialize_empty() {
        assert_eq!(serialize(&Settings::new()), "");
    }

    #[test]
    fn test_serialize_escapes_strings() {
        let input = r#"user_pref("a", "quote \" slash \\ nl \n tab \t bell \x07");"#;
        let out = serialize(&load(input).unwrap());
        assert_eq!(
            out,
            "user_pref(\"a\", \"quote \\\" slash \\\\ nl \\n tab \\t bell \\u0007\");\n"
        );
    }

    #[test]
    fn test_reload_after_serialize_is_equal() {
        let input = r#"
            user_pref("font.default.x-western", "sans-serif");
            pref("negative", -12);
            sticky_pref("weird", "a\u00e9\"\\\x01\r\n");
            user_pref("devtools.chrome.enabled", true);
        "#;
        let first = load(input).unwrap();
        let second = load(&serialize(&first)).unwrap();
        assert_eq!(first, second);
        assert_eq!(serialize(&first), serialize(&second));
    }

    #[test]
    fn test_write_file_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.js");
        let settings = load(r#"user_pref("signon.rememberSignons", false);"#).unwrap();

        write_file(&settings, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(load(&content).unwrap(), settings);
    }
}
