//! Loader for user.js settings files
//!
//! A recursive descent parser over lexer tokens. Every declaration has
//! the shape:
//!
//! ```text
//! user_pref("dotted.key.name", value);
//! ```
//!
//! where `value` is `true`, `false`, an integer, or a double-quoted string.
//! The declaration function may also be `pref`, `lock_pref` or `sticky_pref`.
//! Each declaration sits on a line of its own; only a comment may follow the
//! `;` on the same line.
//!
//! # Example
//!
//! ```rust
//! use userjs::{load, PrefValue};
//!
//! let content = r#"
//!     // comments carry no meaning
//!     user_pref("browser.startup.homepage", "about:blank");
//!     user_pref("ui.caretBlinkTime", 0);
//! "#;
//!
//! let settings = load(content)?;
//! assert_eq!(settings.len(), 2);
//! assert_eq!(
//!     settings.value("browser.startup.homepage"),
//!     Some(&PrefValue::String("about:blank".to_string()))
//! );
//! # Ok::<(), userjs::ParseError>(())
//! ```

use crate::error::{Error, ParseError, Result};
use crate::lexer::{Lexer, Spanned, Token};
use crate::types::{PrefKind, PrefValue, Setting, Settings};
use std::path::Path;

/// What to do when a key is declared more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with [`ParseError::DuplicateKey`]
    #[default]
    Reject,
    /// Later declaration replaces the earlier one, as the browser does.
    /// The setting keeps the position of its first declaration.
    LastWins,
}

/// Options controlling how settings are loaded
///
/// # Example
///
/// ```rust
/// use userjs::{load_with, DuplicatePolicy, ParseOptions, PrefValue};
///
/// let options = ParseOptions {
///     duplicates: DuplicatePolicy::LastWins,
/// };
/// let content = r#"
///     user_pref("browser.cache.disk.enable", true);
///     user_pref("browser.cache.disk.enable", false);
/// "#;
/// let settings = load_with(content, &options)?;
/// assert_eq!(settings.value("browser.cache.disk.enable"), Some(&PrefValue::Bool(false)));
/// # Ok::<(), userjs::ParseError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub duplicates: DuplicatePolicy,
}

/// Load settings from text, rejecting duplicate keys
///
/// Fails on the first malformed declaration or repeated key. There are no
/// partial results.
pub fn load(content: &str) -> std::result::Result<Settings, ParseError> {
    load_with(content, &ParseOptions::default())
}

/// Load settings from text with explicit options
pub fn load_with(content: &str, options: &ParseOptions) -> std::result::Result<Settings, ParseError> {
    let mut parser = Parser::new(content, options)?;
    let settings = parser.parse()?;
    tracing::debug!(settings = settings.len(), "loaded settings");
    Ok(settings)
}

/// Read a settings file and load it
///
/// This is a convenience function that reads the file and loads it in one step.
pub fn load_file(path: &Path, options: &ParseOptions) -> Result<Settings> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "reading settings file");
    Ok(load_with(&content, options)?)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    options: &'a ParseOptions,
    /// Current lookahead token
    current: Spanned,
    /// Where the last consumed token ended, for "missing terminator" errors
    previous_end: (usize, usize),
    /// Where the declaration being parsed starts
    statement_start: (usize, usize),
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: &'a ParseOptions) -> std::result::Result<Self, ParseError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            options,
            current,
            previous_end: (1, 1),
            statement_start: (1, 1),
        })
    }

    fn parse(&mut self) -> std::result::Result<Settings, ParseError> {
        let mut settings = Settings::new();

        while self.current.token != Token::Eof {
            let setting = self.parse_statement()?;
            if self.current.token != Token::Eof && self.current.line == setting.line {
                return Err(self.error_at_current(format!(
                    "Only one declaration per line; unexpected {} after ';'",
                    self.current.token.describe()
                )));
            }
            self.add(&mut settings, setting)?;
        }

        Ok(settings)
    }

    fn add(&self, settings: &mut Settings, setting: Setting) -> std::result::Result<(), ParseError> {
        if let Some(existing) = settings.get(&setting.key) {
            match self.options.duplicates {
                DuplicatePolicy::Reject => {
                    return Err(ParseError::DuplicateKey {
                        key: setting.key,
                        line: setting.line,
                        first_line: existing.line,
                    });
                }
                DuplicatePolicy::LastWins => {
                    tracing::warn!(
                        key = %setting.key,
                        line = setting.line,
                        first_line = existing.line,
                        "duplicate key overrides earlier declaration"
                    );
                }
            }
        }
        settings.insert(setting);
        Ok(())
    }

    /// function "(" key "," value ")" ";"
    fn parse_statement(&mut self) -> std::result::Result<Setting, ParseError> {
        let line = self.current.line;
        self.statement_start = (line, self.current.column);

        let kind = self.parse_function()?;
        self.expect(Token::LeftParen)?;
        let key = self.parse_key()?;
        self.expect(Token::Comma)?;
        let value = self.parse_value()?;
        self.expect_terminator(Token::RightParen)?;
        self.expect_terminator(Token::Semicolon)?;

        Ok(Setting {
            key,
            value,
            kind,
            line,
        })
    }

    fn parse_function(&mut self) -> std::result::Result<PrefKind, ParseError> {
        let kind = match &self.current.token {
            Token::Identifier(ident) => PrefKind::from_function(ident).ok_or_else(|| {
                self.error_at_current(format!(
                    "Unknown function '{}'. Expected user_pref, pref, lock_pref, or sticky_pref",
                    ident
                ))
            })?,
            other => {
                return Err(self.error_at_current(format!(
                    "Expected a declaration such as user_pref(...), got {}",
                    other.describe()
                )))
            }
        };
        self.consume()?;
        Ok(kind)
    }

    fn parse_key(&mut self) -> std::result::Result<String, ParseError> {
        match &self.current.token {
            Token::String(s) if s.is_empty() => {
                return Err(self.error_at_current("Preference name must not be empty"))
            }
            Token::String(_) => {}
            other => {
                return Err(self.error_at_current(format!(
                    "Expected preference name string, got {}",
                    other.describe()
                )))
            }
        }
        match self.consume()? {
            Token::String(s) => Ok(s),
            _ => unreachable!(),
        }
    }

    fn parse_value(&mut self) -> std::result::Result<PrefValue, ParseError> {
        match &self.current.token {
            Token::Boolean(_) | Token::Integer(_) | Token::String(_) => {}
            Token::Identifier(ident) if ident == "null" => {
                return Err(self.error_at_current("null is not a valid preference value"))
            }
            other => {
                return Err(self.error_at_current(format!(
                    "Expected value (bool, integer, or string), got {}",
                    other.describe()
                )))
            }
        }
        match self.consume()? {
            Token::Boolean(b) => Ok(PrefValue::Bool(b)),
            Token::Integer(n) => Ok(PrefValue::Integer(n)),
            Token::String(s) => Ok(PrefValue::String(s)),
            _ => unreachable!(),
        }
    }

    fn expect(&mut self, expected: Token) -> std::result::Result<(), ParseError> {
        if self.current.token == expected {
            self.consume()?;
            return Ok(());
        }
        Err(self.error_at_current(format!(
            "Expected {}, got {}",
            expected.describe(),
            self.current.token.describe()
        )))
    }

    /// Like [`Self::expect`], but a missing `)` or `;` is reported where the
    /// declaration stopped rather than where the next token starts
    fn expect_terminator(&mut self, expected: Token) -> std::result::Result<(), ParseError> {
        if self.current.token == expected {
            self.consume()?;
            return Ok(());
        }
        let (line, column) = self.previous_end;
        Err(ParseError::syntax(
            line,
            column,
            format!(
                "Expected {} to end the declaration, got {}",
                expected.describe(),
                self.current.token.describe()
            ),
        ))
    }

    fn error_at_current(&self, message: impl Into<String>) -> ParseError {
        ParseError::syntax(self.current.line, self.current.column, message)
    }

    /// Consume a token of the current declaration, which must stay on the
    /// line the declaration started on
    fn consume(&mut self) -> std::result::Result<Token, ParseError> {
        let (line, column) = self.statement_start;
        if self.current.line != line || self.current.end_line != line {
            return Err(ParseError::syntax(
                line,
                column,
                "Declaration must start and end on the same line",
            ));
        }
        self.advance()
    }

    /// Move to the next token, returning the one just consumed
    fn advance(&mut self) -> std::result::Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        let consumed = std::mem::replace(&mut self.current, next);
        self.previous_end = (consumed.end_line, consumed.end_column);
        Ok(consumed.token)
    }
}
