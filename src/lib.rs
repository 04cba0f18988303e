//! # userjs - Firefox user.js settings
//!
//! This crate ships a personal Firefox `user.js` settings list
//! (`data/user.js`) together with a typed loader and serializer for the
//! prefs.js family of files the list is written in.
//!
//! ## Features
//!
//! - Load `user_pref("key", value);` declarations into an ordered,
//!   key-unique [`Settings`] collection
//! - Reject malformed declarations and duplicate keys with a positioned
//!   [`ParseError`]
//! - Write settings back out in canonical form with [`serialize`]
//! - Query settings using glob patterns (e.g., `"browser.urlbar.*"`)
//! - Access the bundled list through [`sample`]
//!
//! ## Quick Start
//!
//! ```rust
//! use userjs::{load, PrefValue};
//!
//! let content = r#"
//!     // privacy
//!     user_pref("keyword.enabled", false);
//!     user_pref("network.cookie.cookieBehavior", 5);
//! "#;
//!
//! let settings = load(content)?;
//! assert_eq!(settings.value("keyword.enabled"), Some(&PrefValue::Bool(false)));
//! assert_eq!(settings.value("network.cookie.cookieBehavior").and_then(PrefValue::as_i64), Some(5));
//! # Ok::<(), userjs::ParseError>(())
//! ```
//!
//! ### Round-tripping
//!
//! ```rust
//! use userjs::{load, sample, serialize};
//!
//! let settings = sample();
//! assert_eq!(load(&serialize(&settings))?, settings);
//! # Ok::<(), userjs::ParseError>(())
//! ```
//!
//! ## Error Handling
//!
//! Loading text returns [`ParseError`], which always carries the offending
//! line. File and query functions return the crate-wide [`Error`]:
//!
//! ```rust
//! use userjs::{load, ParseError};
//!
//! let content = "user_pref(\"a\", 1);\nuser_pref(\"b\", 2)\n";
//! match load(content) {
//!     Ok(_) => unreachable!(),
//!     Err(ParseError::Syntax { line, message, .. }) => {
//!         assert_eq!(line, 2);
//!         eprintln!("line {}: {}", line, message);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

pub use types::{PrefKind, PrefValue, Setting, Settings};

pub use error::{Error, ParseError, Result};

pub use parser::{load, load_file, load_with, DuplicatePolicy, ParseOptions};
pub use query::query_settings;
pub use sample::{sample, SAMPLE_SOURCE};
pub use writer::{serialize, write_file};

// All modules are private - use re-exports above for public API
mod error;
mod lexer;
mod parser;
mod query;
mod sample;
mod types;
mod writer;
