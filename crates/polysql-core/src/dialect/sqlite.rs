//! SQLite dialect.

use super::{Dialect, DialectKind, Feature};
use crate::lexer::Keyword;

/// SQLite accepts `"`, `` ` `` and `[ ]` identifier quoting, and `@name` or
/// `$name` parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Sqlite
    }

    fn closing_identifier_quote(&self, open: char) -> Option<char> {
        match open {
            '"' => Some('"'),
            '`' => Some('`'),
            '[' => Some(']'),
            _ => None,
        }
    }

    fn is_identifier_prefix(&self, c: char) -> bool {
        c == '@' || c == '$'
    }

    fn demoted_keywords(&self) -> &'static [Keyword] {
        &[Keyword::Top]
    }

    fn supports_feature(&self, feature: Feature) -> bool {
        matches!(feature, Feature::Autoincrement | Feature::InsteadOf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_dialect() {
        let dialect = SqliteDialect::new();
        assert_eq!(dialect.name(), "sqlite");
        assert_eq!(dialect.closing_identifier_quote('['), Some(']'));
        assert_eq!(dialect.closing_identifier_quote('`'), Some('`'));
        assert!(dialect.is_identifier_prefix('$'));
        assert!(dialect.supports_feature(Feature::Autoincrement));
        assert!(!dialect.supports_feature(Feature::AutoIncrement));
    }
}
