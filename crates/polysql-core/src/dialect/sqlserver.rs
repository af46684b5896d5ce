//! Microsoft SQL Server (T-SQL) dialect.

use super::{Dialect, DialectKind, Feature};

/// T-SQL: `[bracketed]` identifiers, `@variables`, `#temp` tables, `TOP n`,
/// and `GO` batch separators.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::SqlServer
    }

    fn quote_char_for_identifier(&self) -> char {
        '['
    }

    fn closing_identifier_quote(&self, open: char) -> Option<char> {
        match open {
            '[' => Some(']'),
            '"' => Some('"'),
            _ => None,
        }
    }

    fn supports_national_strings(&self) -> bool {
        true
    }

    fn is_identifier_prefix(&self, c: char) -> bool {
        c == '@' || c == '#'
    }

    fn supports_feature(&self, feature: Feature) -> bool {
        matches!(
            feature,
            Feature::Identity | Feature::InsteadOf | Feature::Top
        )
    }

    fn batch_separator(&self) -> Option<&'static str> {
        Some("GO")
    }
}
