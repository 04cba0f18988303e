//! Lexer for tokenizing user.js settings files
//!
//! Converts the character stream into tokens, processing string escape
//! sequences and recording the line and column every token starts on so the
//! parser can point errors at the offending declaration.

use crate::error::ParseError;
use std::iter::Peekable;
use std::str::Chars;

/// Largest and smallest integers the browser stores (32-bit signed)
pub const INT_MAX: i64 = i32::MAX as i64;
pub const INT_MIN: i64 = i32::MIN as i64;

/// Token types produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier (e.g., user_pref, pref, lock_pref, sticky_pref)
    Identifier(String),
    /// String value with escape sequences already processed
    String(String),
    /// Integer value
    Integer(i64),
    /// Boolean value
    Boolean(bool),
    LeftParen,
    RightParen,
    Comma,
    Semicolon,
    /// End of input
    Eof,
}

impl Token {
    /// Short human-readable form for error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Identifier(ident) => format!("identifier '{}'", ident),
            Token::String(s) => format!("string \"{}\"", s),
            Token::Integer(n) => format!("integer {}", n),
            Token::Boolean(b) => format!("'{}'", b),
            Token::LeftParen => "'('".to_string(),
            Token::RightParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Semicolon => "';'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// A token with the position it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    /// Line the token starts on (1-indexed)
    pub line: usize,
    /// Column the token starts on (1-indexed)
    pub column: usize,
    /// Position just past the token's last character; `end_line` differs
    /// from `line` only for strings that span a newline
    pub end_line: usize,
    pub end_column: usize,
}

/// Lexer for tokenizing user.js settings files
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        // a leading byte order mark is not part of the text
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        Lexer {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Spanned, ParseError> {
        self.skip_whitespace_and_comments()?;

        let line = self.line;
        let column = self.column;

        let token = match self.chars.peek() {
            None => Token::Eof,
            Some('(') => self.single(Token::LeftParen),
            Some(')') => self.single(Token::RightParen),
            Some(',') => self.single(Token::Comma),
            Some(';') => self.single(Token::Semicolon),
            Some('"') => self.lex_string()?,
            Some('-' | '+' | '0'..='9') => self.lex_integer()?,
            Some('a'..='z' | 'A'..='Z' | '_') => self.lex_identifier(),
            Some(&c) => {
                return Err(self.error_at(line, column, format!("Unexpected character: '{}'", c)))
            }
        };

        Ok(Spanned {
            token,
            line,
            column,
            end_line: self.line,
            end_column: self.column,
        })
    }

    /// Consume one character, keeping line/column in step
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn single(&mut self, token: Token) -> Token {
        self.bump();
        token
    }

    fn error_at(&self, line: usize, column: usize, message: impl Into<String>) -> ParseError {
        ParseError::syntax(line, column, message)
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.line, self.column, message)
    }

    /// Skip whitespace, `//` line comments and `/* */` block comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), ParseError> {
        loop {
            while let Some(&c) = self.chars.peek() {
                if c.is_whitespace() {
                    self.bump();
                } else {
                    break;
                }
            }

            if self.chars.peek() != Some(&'/') {
                return Ok(());
            }

            let start_line = self.line;
            let start_col = self.column;
            self.bump();

            match self.chars.peek() {
                Some('/') => {
                    while let Some(&c) = self.chars.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some('*') => {
                    self.bump();
                    let mut closed = false;
                    while let Some(c) = self.bump() {
                        if c == '*' && self.chars.peek() == Some(&'/') {
                            self.bump();
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        return Err(self.error_at(start_line, start_col, "Unterminated block comment"));
                    }
                }
                _ => return Err(self.error_at(start_line, start_col, "Unexpected character: '/'")),
            }
        }
    }

    /// Lex an identifier (e.g., user_pref, pref, true, false)
    fn lex_identifier(&mut self) -> Token {
        let mut ident = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "true" => Token::Boolean(true),
            "false" => Token::Boolean(false),
            _ => Token::Identifier(ident),
        }
    }

    /// Lex a double-quoted string literal
    fn lex_string(&mut self) -> Result<Token, ParseError> {
        let start_line = self.line;
        let start_col = self.column;

        // opening quote
        self.bump();

        let mut result = String::new();

        loop {
            match self.bump() {
                Some('"') => return Ok(Token::String(result)),
                Some('\\') => {
                    let escape = self.lex_escape()?;
                    result.push(escape);
                }
                Some(c) => result.push(c),
                None => {
                    return Err(self.error_at(start_line, start_col, "Unterminated string literal"))
                }
            }
        }
    }

    /// Decode one escape sequence; the backslash is already consumed
    fn lex_escape(&mut self) -> Result<char, ParseError> {
        let c = match self.bump() {
            Some(c) => c,
            None => return Err(self.error_here("Unexpected end of input in escape sequence")),
        };

        match c {
            '"' => Ok('"'),
            '\'' => Ok('\''),
            '\\' => Ok('\\'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'b' => Ok('\x08'),
            'f' => Ok('\x0c'),
            '0' => {
                // \0 followed by another digit would be an octal escape
                if self.chars.peek().is_some_and(|d| d.is_ascii_digit()) {
                    Err(self.error_here("Octal escape sequences are not supported"))
                } else {
                    Ok('\0')
                }
            }
            'x' => {
                let code = self.lex_hex_digits(2, 'x')?;
                // two hex digits always fit in a char
                Ok(char::from_u32(code).unwrap_or('\u{FFFD}'))
            }
            'u' => {
                let code = self.lex_hex_digits(4, 'u')?;
                if (0xD800..0xDC00).contains(&code) {
                    self.lex_low_surrogate(code)
                } else {
                    char::from_u32(code)
                        .ok_or_else(|| self.error_here(format!("Invalid unicode escape: \\u{:04X}", code)))
                }
            }
            other => Err(self.error_here(format!("Invalid escape sequence: \\{}", other))),
        }
    }

    /// Combine a high surrogate with the `\uDC00`-`\uDFFF` escape that must follow it
    fn lex_low_surrogate(&mut self, high: u32) -> Result<char, ParseError> {
        if self.bump() != Some('\\') || self.bump() != Some('u') {
            return Err(self.error_here(format!(
                "Unpaired surrogate in unicode escape: \\u{:04X}",
                high
            )));
        }
        let low = self.lex_hex_digits(4, 'u')?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(self.error_here(format!(
                "Unpaired surrogate in unicode escape: \\u{:04X}",
                high
            )));
        }
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(code)
            .ok_or_else(|| self.error_here(format!("Invalid unicode escape: \\u{:04X}", high)))
    }

    fn lex_hex_digits(&mut self, count: usize, prefix: char) -> Result<u32, ParseError> {
        let mut hex = String::new();
        for _ in 0..count {
            match self.chars.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    hex.push(*c);
                    self.bump();
                }
                _ => break,
            }
        }
        if hex.len() != count {
            return Err(self.error_here(format!("Incomplete escape: \\{}{}", prefix, hex)));
        }
        u32::from_str_radix(&hex, 16)
            .map_err(|_| self.error_here(format!("Invalid escape: \\{}{}", prefix, hex)))
    }

    /// Lex a signed decimal integer
    fn lex_integer(&mut self) -> Result<Token, ParseError> {
        let start_line = self.line;
        let start_col = self.column;

        let mut num_str = String::new();
        if let Some(&sign @ ('-' | '+')) = self.chars.peek() {
            num_str.push(sign);
            self.bump();
        }

        let mut has_digit = false;
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                num_str.push(c);
                self.bump();
                has_digit = true;
            } else {
                break;
            }
        }

        if !has_digit {
            return Err(self.error_at(start_line, start_col, format!("Expected digits after '{}'", num_str)));
        }

        if let Some('.' | 'e' | 'E') = self.chars.peek() {
            return Err(self.error_at(
                start_line,
                start_col,
                "Floating point values are not supported; use a string",
            ));
        }

        match num_str.parse::<i64>() {
            Ok(n) if (INT_MIN..=INT_MAX).contains(&n) => Ok(Token::Integer(n)),
            _ => Err(self.error_at(
                start_line,
                start_col,
                format!("Integer out of range: {}", num_str),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let spanned = lexer.next_token().unwrap();
            let done = spanned.token == Token::Eof;
            out.push(spanned.token);
            if done {
                return out;
            }
        }
    }

    fn single(input: &str) -> Token {
        Lexer::new(input).next_token().unwrap().token
    }

    #[test]
    fn test_lexer_basic_tokens() {
        assert_eq!(
            tokens("( ) , ;"),
            vec![
                Token::LeftParen,
                Token::RightParen,
                Token::Comma,
                Token::Semicolon,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_lexer_single_line_comment() {
        assert_eq!(
            tokens("( // this is a comment\n )"),
            vec![Token::LeftParen, Token::RightParen, Token::Eof]
        );
    }

    #[test]
    fn test_lexer_multiline_comment() {
        assert_eq!(
            tokens("( /* this is a\nmultiline comment */ )"),
            vec![Token::LeftParen, Token::RightParen, Token::Eof]
        );
    }

    #[test]
    fn test_lexer_unterminated_block_comment() {
        let err = Lexer::new("\n  /* never closed").next_token().unwrap_err();
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_lexer_lone_slash_rejected() {
        assert!(Lexer::new("/ user_pref").next_token().is_err());
    }

    #[test]
    fn test_lexer_skips_leading_byte_order_mark() {
        let spanned = Lexer::new("\u{FEFF}user_pref").next_token().unwrap();
        assert_eq!(spanned.token, Token::Identifier("user_pref".to_string()));
        assert_eq!((spanned.line, spanned.column), (1, 1));
    }

    #[test]
    fn test_lexer_byte_order_mark_mid_input_rejected() {
        let mut lexer = Lexer::new("(\u{FEFF}");
        assert_eq!(lexer.next_token().unwrap().token, Token::LeftParen);
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_lexer_identifiers_and_booleans() {
        assert_eq!(
            tokens("user_pref lock_pref true false"),
            vec![
                Token::Identifier("user_pref".to_string()),
                Token::Identifier("lock_pref".to_string()),
                Token::Boolean(true),
                Token::Boolean(false),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_lexer_positions() {
        let mut lexer = Lexer::new("user_pref(\n  \"a.b\", 5);");
        let first = lexer.next_token().unwrap();
        assert_eq!((first.line, first.column), (1, 1));
        let paren = lexer.next_token().unwrap();
        assert_eq!((paren.line, paren.column), (1, 10));
        let key = lexer.next_token().unwrap();
        assert_eq!((key.line, key.column), (2, 3));
    }

    #[test]
    fn test_lexer_string_spanning_lines_records_end_line() {
        let spanned = Lexer::new("\"one\ntwo\"").next_token().unwrap();
        assert_eq!(spanned.token, Token::String("one\ntwo".to_string()));
        assert_eq!(spanned.line, 1);
        assert_eq!(spanned.end_line, 2);
    }

    #[test]
    fn test_lexer_string_escapes() {
        assert_eq!(
            single(r#""value with \"quotes\"""#),
            Token::String("value with \"quotes\"".to_string())
        );
        assert_eq!(
            single(r#""C:\\path\\to\\file""#),
            Token::String("C:\\path\\to\\file".to_string())
        );
        assert_eq!(
            single(r#""line1\nline2\ttab\r""#),
            Token::String("line1\nline2\ttab\r".to_string())
        );
        assert_eq!(single(r#""\b\f\0""#), Token::String("\x08\x0c\x00".to_string()));
        assert_eq!(single(r#""\x41\u0042""#), Token::String("AB".to_string()));
    }

    #[test]
    fn test_lexer_surrogate_pair_escape() {
        assert_eq!(single(r#""\uD83D\uDE00""#), Token::String("\u{1F600}".to_string()));
        assert!(Lexer::new(r#""\uD83D""#).next_token().is_err());
    }

    #[test]
    fn test_lexer_octal_escape_rejected() {
        assert!(Lexer::new(r#""test\01""#).next_token().is_err());
    }

    #[test]
    fn test_lexer_invalid_escape_rejected() {
        assert!(Lexer::new(r#""\q""#).next_token().is_err());
        assert!(Lexer::new(r#""\x4""#).next_token().is_err());
    }

    #[test]
    fn test_lexer_unterminated_string() {
        let err = Lexer::new("\n\n   \"abc").next_token().unwrap_err();
        assert_eq!(
            err,
            ParseError::syntax(3, 4, "Unterminated string literal")
        );
    }

    #[test]
    fn test_lexer_integers() {
        assert_eq!(single("42"), Token::Integer(42));
        assert_eq!(single("-42"), Token::Integer(-42));
        assert_eq!(single("+7"), Token::Integer(7));
        assert_eq!(single("6000000"), Token::Integer(6_000_000));
    }

    #[test]
    fn test_lexer_integer_range() {
        assert_eq!(single("2147483647"), Token::Integer(INT_MAX));
        assert_eq!(single("-2147483648"), Token::Integer(INT_MIN));
        assert!(Lexer::new("2147483648").next_token().is_err());
    }

    #[test]
    fn test_lexer_floats_rejected() {
        assert!(Lexer::new("2.5").next_token().is_err());
        assert!(Lexer::new("1e10").next_token().is_err());
        assert!(Lexer::new("-").next_token().is_err());
    }

    #[test]
    fn test_lexer_statement() {
        assert_eq!(
            tokens(r#"user_pref("keyword.enabled", false);"#),
            vec![
                Token::Identifier("user_pref".to_string()),
                Token::LeftParen,
                Token::String("keyword.enabled".to_string()),
                Token::Comma,
                Token::Boolean(false),
                Token::RightParen,
                Token::Semicolon,
                Token::Eof
            ]
        );
    }
}
