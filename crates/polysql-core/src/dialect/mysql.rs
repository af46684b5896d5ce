//! MySQL dialect.

use super::{Dialect, DialectKind, Feature};
use crate::lexer::Keyword;

/// MySQL: backtick identifiers, double-quoted strings, `#` comments and
/// `AUTO_INCREMENT` columns.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::MySql
    }

    fn quote_char_for_identifier(&self) -> char {
        '`'
    }

    fn closing_identifier_quote(&self, open: char) -> Option<char> {
        (open == '`').then_some('`')
    }

    fn is_string_quote(&self, c: char) -> bool {
        c == '\'' || c == '"'
    }

    fn supports_hash_comments(&self) -> bool {
        true
    }

    fn supports_national_strings(&self) -> bool {
        true
    }

    fn is_identifier_prefix(&self, c: char) -> bool {
        c == '@'
    }

    fn demoted_keywords(&self) -> &'static [Keyword] {
        &[Keyword::Top]
    }

    fn supports_feature(&self, feature: Feature) -> bool {
        matches!(feature, Feature::AutoIncrement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_dialect() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.name(), "mysql");
        assert_eq!(dialect.quote_char_for_identifier(), '`');
        assert!(dialect.is_string_quote('"'));
        assert!(dialect.supports_hash_comments());
        assert!(dialect.keyword("top").is_none());
        assert!(!dialect.supports_feature(Feature::MaterializedView));
    }
}
