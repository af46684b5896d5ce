//! PostgreSQL dialect.

use super::{Dialect, DialectKind, Feature};
use crate::lexer::Keyword;

/// PostgreSQL: double-quoted identifiers, dollar-quoted bodies, materialized
/// views and PL/pgSQL routines.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::PostgreSql
    }

    fn supports_dollar_quoting(&self) -> bool {
        true
    }

    fn demoted_keywords(&self) -> &'static [Keyword] {
        &[Keyword::Top]
    }

    fn supports_feature(&self, feature: Feature) -> bool {
        !matches!(
            feature,
            Feature::AutoIncrement | Feature::Autoincrement | Feature::Top
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_dialect() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.name(), "postgresql");
        assert_eq!(dialect.quote_char_for_identifier(), '"');
        assert!(dialect.supports_dollar_quoting());
        assert!(dialect.supports_feature(Feature::Plpgsql));
        assert!(!dialect.supports_hash_comments());
    }
}
