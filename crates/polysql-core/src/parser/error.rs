//! Parser error types.

use thiserror::Error;

use crate::dialect::{DialectKind, Feature};
use crate::lexer::{Span, Token, TokenKind};

/// The category of a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParseErrorKind {
    /// The lexer produced an illegal token.
    Lexical,
    /// A token did not match the grammar.
    Syntax,
    /// A production violated a rule the grammar cannot express locally.
    Structural,
    /// The deadline expired.
    Cancelled,
    /// The construct is recognized but not implemented.
    Unsupported,
}

impl ParseErrorKind {
    /// Returns the lowercase name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Syntax => "syntax",
            Self::Structural => "structural",
            Self::Cancelled => "cancelled",
            Self::Unsupported => "unsupported",
        }
    }
}

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {span}")]
pub struct ParseError {
    /// The error category.
    pub kind: ParseErrorKind,
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// Description of the token found.
    pub found: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an "expected X, got Y" error for `found`.
    ///
    /// Illegal tokens become lexical errors carrying the lexer's message.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        let expected: String = expected.into();
        if found.kind == TokenKind::Illegal {
            return Self {
                kind: ParseErrorKind::Lexical,
                message: found.literal.clone(),
                span: found.span,
                expected: Some(expected),
                found: Some(found.describe()),
            };
        }
        let described = found.describe();
        Self {
            kind: ParseErrorKind::Syntax,
            message: format!("expected {expected}, got {described}"),
            span: found.span,
            expected: Some(expected),
            found: Some(described),
        }
    }

    /// Creates a structural error.
    #[must_use]
    pub fn structural(message: impl Into<String>, span: Span) -> Self {
        Self::new(ParseErrorKind::Structural, message, span)
    }

    /// Creates the error reported when a feature is gated off by the dialect.
    #[must_use]
    pub fn feature_not_supported(feature: Feature, dialect: DialectKind, span: Span) -> Self {
        Self::structural(
            format!("feature {feature} not supported in dialect {dialect}"),
            span,
        )
    }

    /// Creates an error for a recognized but unimplemented construct.
    #[must_use]
    pub fn unsupported(what: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::Unsupported,
            format!("not yet implemented: {what}"),
            span,
        )
    }

    /// Creates the deadline expiry error.
    #[must_use]
    pub fn cancelled(span: Span) -> Self {
        Self::new(ParseErrorKind::Cancelled, "parsing cancelled", span)
    }

    /// Returns true if this error was caused by the deadline.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.kind == ParseErrorKind::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Keyword;

    #[test]
    fn test_unexpected_message() {
        let token = Token::new(TokenKind::Identifier, "usr", Span::new(7, 10, 1, 8));
        let error = ParseError::unexpected("FROM", &token);
        assert_eq!(error.kind, ParseErrorKind::Syntax);
        assert_eq!(error.message, "expected FROM, got identifier \"usr\"");
        assert_eq!(
            error.to_string(),
            "expected FROM, got identifier \"usr\" at line 1, column 8"
        );
    }

    #[test]
    fn test_unexpected_keyword() {
        let token = Token::new(
            TokenKind::Keyword(Keyword::Where),
            "where",
            Span::new(0, 5, 2, 3),
        );
        let error = ParseError::unexpected("identifier", &token);
        assert_eq!(error.found.as_deref(), Some("WHERE"));
        assert_eq!(error.span.line, 2);
    }

    #[test]
    fn test_illegal_token_is_lexical() {
        let token = Token::new(
            TokenKind::Illegal,
            "unterminated string literal",
            Span::new(4, 9, 1, 5),
        );
        let error = ParseError::unexpected("expression", &token);
        assert_eq!(error.kind, ParseErrorKind::Lexical);
        assert_eq!(error.message, "unterminated string literal");
    }

    #[test]
    fn test_feature_not_supported() {
        let error = ParseError::feature_not_supported(
            Feature::MaterializedView,
            DialectKind::MySql,
            Span::default(),
        );
        assert_eq!(error.kind, ParseErrorKind::Structural);
        assert_eq!(
            error.message,
            "feature MATERIALIZED VIEW not supported in dialect mysql"
        );
    }

    #[test]
    fn test_cancelled() {
        let error = ParseError::cancelled(Span::default());
        assert!(error.is_cancelled());
        assert_eq!(error.to_string(), "parsing cancelled at line 1, column 1");
    }
}
