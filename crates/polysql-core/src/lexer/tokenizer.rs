//! SQL Tokenizer implementation.

use super::{Span, Token, TokenKind};
use crate::dialect::{Dialect, DialectKind};

/// A lexer that tokenizes SQL input.
///
/// The lexer never fails: bytes it cannot make sense of become
/// [`TokenKind::Illegal`] tokens whose literal describes the problem. Once the
/// input is exhausted every call returns an EOF token.
#[derive(Debug)]
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// Current line (1-based).
    line: usize,
    /// Current column in characters (1-based).
    column: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Line at the start of the current token.
    start_line: usize,
    /// Column at the start of the current token.
    start_column: usize,
    dialect: &'static dyn Dialect,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer using the default (SQL Server) dialect.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, DialectKind::default())
    }

    /// Creates a new lexer for the given dialect.
    #[must_use]
    pub fn with_dialect(input: &'a str, kind: DialectKind) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            start: 0,
            start_line: 1,
            start_column: 1,
            dialect: kind.dialect(),
        }
    }

    /// Switches the dialect used for the tokens that follow.
    pub fn set_dialect(&mut self, kind: DialectKind) {
        self.dialect = kind.dialect();
    }

    /// Returns the dialect in use.
    #[must_use]
    pub fn dialect(&self) -> DialectKind {
        self.dialect.kind()
    }

    /// Returns the input being tokenized.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.input
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Advances until `target` is reached.
    fn advance_to(&mut self, target: usize) {
        while self.pos < target && self.advance().is_some() {}
    }

    /// Marks the current position as the start of a token.
    fn mark_start(&mut self) {
        self.start = self.pos;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    /// Skips whitespace and comments.
    ///
    /// Returns an illegal token if a block comment is never closed.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            let line_comment = (self.peek() == Some('-') && self.peek_next() == Some('-'))
                || (self.peek() == Some('#') && self.dialect.supports_hash_comments());
            if line_comment {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.mark_start();
                self.advance(); // /
                self.advance(); // *
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => {
                            return Some(
                                self.make_token(TokenKind::Illegal, "unterminated block comment"),
                            );
                        }
                        _ => {}
                    }
                }
                continue;
            }

            return None;
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos, self.start_line, self.start_column)
    }

    /// Creates a token with the current span.
    fn make_token(&self, kind: TokenKind, literal: impl Into<String>) -> Token {
        Token::new(kind, literal, self.make_span())
    }

    /// Creates a token whose literal is the source text of the token.
    fn make_text_token(&self, kind: TokenKind) -> Token {
        self.make_token(kind, &self.input[self.start..self.pos])
    }

    /// Characters allowed after the first one of an identifier: any Unicode
    /// alphanumeric, `_`, `$` and the dialect's prefixes. The first character
    /// is always an ASCII letter, `_` or a prefix.
    fn is_identifier_char(&self, c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '$' || self.dialect.is_identifier_prefix(c)
    }

    /// Scans an identifier or keyword. The first character is already consumed.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(|c| self.is_identifier_char(c)) {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        let prefixed = text.starts_with(|c: char| self.dialect.is_identifier_prefix(c));
        match self.dialect.keyword(text) {
            Some(keyword) if !prefixed => self.make_text_token(TokenKind::Keyword(keyword)),
            _ => self.make_text_token(TokenKind::Identifier),
        }
    }

    /// Scans a quoted identifier. The opening quote is already consumed.
    fn scan_quoted_identifier(&mut self, close: char) -> Token {
        let mut value = String::new();

        loop {
            match self.peek() {
                Some(c) if c == close => {
                    // Doubled closing quote escapes itself
                    if self.peek_next() == Some(close) {
                        value.push(close);
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => {
                    return self.make_token(TokenKind::Illegal, "unterminated quoted identifier");
                }
            }
        }

        self.advance(); // consume closing quote
        self.make_token(TokenKind::QuotedIdentifier, value)
    }

    /// Scans a number. The integer part may be empty when the literal starts
    /// with `.`.
    fn scan_number(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // A fraction needs a digit after the dot, so `1..10` stays a range
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let rest = &self.input[self.pos + 1..];
            let signed = rest.starts_with(['+', '-']);
            let digits = if signed { &rest[1..] } else { rest };
            if digits.starts_with(|c: char| c.is_ascii_digit()) {
                self.advance(); // consume e/E
                if signed {
                    self.advance();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        self.make_text_token(TokenKind::Number)
    }

    /// Scans a string literal. The opening quote is already consumed.
    ///
    /// A doubled quote stands for one quote character. Backslashes are kept
    /// as written.
    fn scan_string(&mut self, quote: char) -> Token {
        let mut value = String::new();

        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    if self.peek_next() == Some(quote) {
                        value.push(quote);
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => {
                    return self.make_token(TokenKind::Illegal, "unterminated string literal");
                }
            }
        }

        self.advance(); // consume closing quote
        self.make_token(TokenKind::String, value)
    }

    /// Scans a `$tag$ ... $tag$` string. The leading `$` is already consumed.
    ///
    /// Returns `None` (without consuming anything further) if the input at
    /// this point is not a dollar-quote opener.
    fn scan_dollar_quote(&mut self) -> Option<Token> {
        let input = self.input;
        let rest = &input[self.pos..];
        let tag_len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let tag = &rest[..tag_len];
        if !rest[tag_len..].starts_with('$') || tag.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }

        let delimiter = format!("${tag}$");
        let body_start = self.pos + tag_len + 1;
        self.advance_to(body_start);

        let Some(body_len) = input[body_start..].find(&delimiter) else {
            self.advance_to(input.len());
            return Some(self.make_token(TokenKind::Illegal, "unterminated dollar-quoted string"));
        };

        let body = &input[body_start..body_start + body_len];
        self.advance_to(body_start + body_len + delimiter.len());
        Some(self.make_token(TokenKind::DollarQuote, body))
    }

    /// Consumes `next` if it is the upcoming character.
    fn consume_if(&mut self, next: char) -> bool {
        if self.peek() == Some(next) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        if let Some(illegal) = self.skip_whitespace_and_comments() {
            return illegal;
        }
        self.mark_start();

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof, "");
        };

        match c {
            // Single-character tokens
            '(' => self.make_text_token(TokenKind::LeftParen),
            ')' => self.make_text_token(TokenKind::RightParen),
            ',' => self.make_text_token(TokenKind::Comma),
            ';' => self.make_text_token(TokenKind::Semicolon),
            '+' => self.make_text_token(TokenKind::Plus),
            '-' => self.make_text_token(TokenKind::Minus),
            '*' => self.make_text_token(TokenKind::Star),
            '/' => self.make_text_token(TokenKind::Slash),
            '%' => self.make_text_token(TokenKind::Percent),

            // Potentially multi-character tokens
            '.' => {
                if self.consume_if('.') {
                    self.make_text_token(TokenKind::DotDot)
                } else if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number()
                } else {
                    self.make_text_token(TokenKind::Dot)
                }
            }
            ':' => {
                if self.consume_if(':') {
                    self.make_text_token(TokenKind::DoubleColon)
                } else if self.consume_if('=') {
                    self.make_text_token(TokenKind::ColonAssign)
                } else {
                    self.make_text_token(TokenKind::Colon)
                }
            }
            '=' => {
                if self.consume_if('=') {
                    self.make_text_token(TokenKind::Eq)
                } else {
                    self.make_text_token(TokenKind::Assign)
                }
            }
            '<' => {
                if self.consume_if('=') {
                    self.make_text_token(TokenKind::LtEq)
                } else if self.consume_if('>') {
                    self.make_text_token(TokenKind::NotEq)
                } else {
                    self.make_text_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.consume_if('=') {
                    self.make_text_token(TokenKind::GtEq)
                } else {
                    self.make_text_token(TokenKind::Gt)
                }
            }
            '!' => {
                if self.consume_if('=') {
                    self.make_text_token(TokenKind::NotEq)
                } else {
                    self.make_token(TokenKind::Illegal, "unexpected character '!'")
                }
            }
            '|' => {
                if self.consume_if('|') {
                    self.make_text_token(TokenKind::Concat)
                } else {
                    self.make_token(TokenKind::Illegal, "unexpected character '|'")
                }
            }

            // National strings (N'...')
            'N' | 'n' if self.peek() == Some('\'') && self.dialect.supports_national_strings() => {
                self.advance();
                self.scan_string('\'')
            }

            // String literals and quoted identifiers
            c if self.dialect.is_string_quote(c) => self.scan_string(c),
            c if self.dialect.closing_identifier_quote(c).is_some() => {
                let close = self.dialect.closing_identifier_quote(c).unwrap_or(c);
                self.scan_quoted_identifier(close)
            }
            '[' => self.make_text_token(TokenKind::LeftBracket),
            ']' => self.make_text_token(TokenKind::RightBracket),

            // Dollar quotes and positional parameters ($1)
            '$' if self.dialect.supports_dollar_quoting() => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                        self.advance();
                    }
                    return self.make_text_token(TokenKind::Identifier);
                }
                self.scan_dollar_quote().unwrap_or_else(|| {
                    self.make_token(TokenKind::Illegal, "unexpected character '$'")
                })
            }

            // Numbers
            c if c.is_ascii_digit() => self.scan_number(),

            // Identifiers and keywords
            c if c.is_ascii_alphabetic() || c == '_' || self.dialect.is_identifier_prefix(c) => {
                self.scan_identifier()
            }

            _ => self.make_token(TokenKind::Illegal, format!("unexpected character '{c}'")),
        }
    }

    /// Tokenizes the entire input and returns all tokens, including the
    /// final EOF token.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
