//! SQL Dialect support.
//!
//! The four supported vendors differ in identifier quoting, string quoting,
//! comment syntax, which words are keywords, and which grammar features they
//! accept. Each vendor is a unit struct implementing [`Dialect`]; callers name
//! one with the [`DialectKind`] symbol.

mod mysql;
mod postgres;
mod sqlite;
mod sqlserver;

use std::fmt;
use std::str::FromStr;

pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;
pub use sqlserver::SqlServerDialect;

use crate::lexer::Keyword;

/// Grammar features that only some dialects accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Feature {
    /// MySQL `AUTO_INCREMENT` column attribute.
    AutoIncrement,
    /// SQLite `AUTOINCREMENT` column attribute.
    Autoincrement,
    /// `IDENTITY` columns.
    Identity,
    /// `CREATE MATERIALIZED VIEW` and `DROP MATERIALIZED VIEW`.
    MaterializedView,
    /// `INSTEAD OF` triggers.
    InsteadOf,
    /// `VARIADIC` routine parameters.
    Variadic,
    /// PL/pgSQL routine bodies.
    Plpgsql,
    /// `SELECT TOP n`.
    Top,
}

impl Feature {
    /// All features, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::AutoIncrement,
        Self::Autoincrement,
        Self::Identity,
        Self::MaterializedView,
        Self::InsteadOf,
        Self::Variadic,
        Self::Plpgsql,
        Self::Top,
    ];

    /// Returns the SQL spelling of the feature (e.g., `MATERIALIZED VIEW`).
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::AutoIncrement => "AUTO_INCREMENT",
            Self::Autoincrement => "AUTOINCREMENT",
            Self::Identity => "IDENTITY",
            Self::MaterializedView => "MATERIALIZED VIEW",
            Self::InsteadOf => "INSTEAD OF",
            Self::Variadic => "VARIADIC",
            Self::Plpgsql => "PLPGSQL",
            Self::Top => "TOP",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Feature {
    type Err = UnknownFeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(' ', "_");
        match normalized.as_str() {
            "AUTO_INCREMENT" => Ok(Self::AutoIncrement),
            "AUTOINCREMENT" => Ok(Self::Autoincrement),
            "IDENTITY" => Ok(Self::Identity),
            "MATERIALIZED_VIEW" => Ok(Self::MaterializedView),
            "INSTEAD_OF" => Ok(Self::InsteadOf),
            "VARIADIC" => Ok(Self::Variadic),
            "PLPGSQL" => Ok(Self::Plpgsql),
            "TOP" => Ok(Self::Top),
            _ => Err(UnknownFeatureError(s.to_string())),
        }
    }
}

/// Returned when a dialect name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect '{0}' (expected one of: sqlserver, mysql, postgresql, sqlite)")]
pub struct UnknownDialectError(pub String);

/// Returned when a feature tag is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect feature '{0}'")]
pub struct UnknownFeatureError(pub String);

/// Trait for SQL dialect-specific behavior.
///
/// Default methods describe ANSI behavior; vendors override what differs.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the symbol naming this dialect.
    fn kind(&self) -> DialectKind;

    /// Returns the preferred identifier quote character.
    fn quote_char_for_identifier(&self) -> char {
        '"'
    }

    /// Returns the closing quote for a quoted identifier opened with `open`,
    /// or `None` if `open` does not start a quoted identifier.
    fn closing_identifier_quote(&self, open: char) -> Option<char> {
        (open == '"').then_some('"')
    }

    /// Returns true if `c` delimits string literals.
    fn is_string_quote(&self, c: char) -> bool {
        c == '\''
    }

    /// Returns true if `N'...'` national string literals are accepted.
    fn supports_national_strings(&self) -> bool {
        false
    }

    /// Returns true if `#` starts a line comment.
    fn supports_hash_comments(&self) -> bool {
        false
    }

    /// Returns true if `c` may start an identifier in addition to letters and
    /// `_` (e.g., `@` for variables).
    fn is_identifier_prefix(&self, _c: char) -> bool {
        false
    }

    /// Returns true if `$$ ... $$` and `$tag$ ... $tag$` strings are accepted.
    fn supports_dollar_quoting(&self) -> bool {
        false
    }

    /// Keywords this dialect treats as plain identifiers.
    fn demoted_keywords(&self) -> &'static [Keyword] {
        &[]
    }

    /// Looks up a keyword in this dialect, ignoring case.
    fn keyword(&self, text: &str) -> Option<Keyword> {
        Keyword::from_str(text).filter(|kw| !self.demoted_keywords().contains(kw))
    }

    /// Returns true if the uppercased text is a keyword in this dialect.
    fn is_keyword(&self, upper: &str) -> bool {
        self.keyword(upper).is_some()
    }

    /// Returns true if the dialect accepts the given feature.
    fn supports_feature(&self, feature: Feature) -> bool;

    /// Returns true if the dialect accepts the feature spelled `tag`.
    ///
    /// Unknown tags are never supported.
    fn supports_feature_tag(&self, tag: &str) -> bool {
        tag.parse::<Feature>()
            .is_ok_and(|feature| self.supports_feature(feature))
    }

    /// Returns the batch separator word, if the dialect has one.
    fn batch_separator(&self) -> Option<&'static str> {
        None
    }
}

/// The supported dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DialectKind {
    /// Microsoft SQL Server (T-SQL).
    #[default]
    SqlServer,
    /// MySQL and MariaDB.
    MySql,
    /// PostgreSQL (including PL/pgSQL).
    PostgreSql,
    /// SQLite.
    Sqlite,
}

static SQL_SERVER: SqlServerDialect = SqlServerDialect::new();
static MYSQL: MySqlDialect = MySqlDialect::new();
static POSTGRES: PostgresDialect = PostgresDialect::new();
static SQLITE: SqliteDialect = SqliteDialect::new();

impl DialectKind {
    /// All dialects.
    pub const ALL: [Self; 4] = [Self::SqlServer, Self::MySql, Self::PostgreSql, Self::Sqlite];

    /// Returns the dialect implementation.
    #[must_use]
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::SqlServer => &SQL_SERVER,
            Self::MySql => &MYSQL,
            Self::PostgreSql => &POSTGRES,
            Self::Sqlite => &SQLITE,
        }
    }

    /// Returns the configuration name of the dialect.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SqlServer => "sqlserver",
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectKind {
    type Err = UnknownDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlserver" | "mssql" | "tsql" => Ok(Self::SqlServer),
            "mysql" => Ok(Self::MySql),
            "postgresql" | "postgres" | "pg" => Ok(Self::PostgreSql),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(UnknownDialectError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialect_is_sqlserver() {
        assert_eq!(DialectKind::default(), DialectKind::SqlServer);
    }

    #[test]
    fn test_dialect_kind_from_str() {
        assert_eq!("mssql".parse::<DialectKind>(), Ok(DialectKind::SqlServer));
        assert_eq!("MySQL".parse::<DialectKind>(), Ok(DialectKind::MySql));
        assert_eq!("pg".parse::<DialectKind>(), Ok(DialectKind::PostgreSql));
        assert_eq!("sqlite".parse::<DialectKind>(), Ok(DialectKind::Sqlite));
        let err = "oracle".parse::<DialectKind>().unwrap_err();
        assert!(err.to_string().contains("oracle"));
    }

    #[test]
    fn test_dialect_kind_round_trips_through_name() {
        for kind in DialectKind::ALL {
            assert_eq!(kind.to_string().parse::<DialectKind>(), Ok(kind));
            assert_eq!(kind.dialect().kind(), kind);
            assert_eq!(kind.dialect().name(), kind.as_str());
        }
    }

    #[test]
    fn test_feature_tags_parse() {
        for feature in Feature::ALL {
            assert_eq!(feature.tag().parse::<Feature>(), Ok(feature));
        }
        assert_eq!("instead_of".parse::<Feature>(), Ok(Feature::InsteadOf));
        assert!("WINDOW".parse::<Feature>().is_err());
        assert!("LIMIT".parse::<Feature>().is_err());
    }

    #[test]
    fn test_feature_matrix() {
        let expected: [(Feature, [bool; 4]); 8] = [
            (Feature::AutoIncrement, [false, true, false, false]),
            (Feature::Autoincrement, [false, false, false, true]),
            (Feature::Identity, [true, false, true, false]),
            (Feature::MaterializedView, [false, false, true, false]),
            (Feature::InsteadOf, [true, false, true, true]),
            (Feature::Variadic, [false, false, true, false]),
            (Feature::Plpgsql, [false, false, true, false]),
            (Feature::Top, [true, false, false, false]),
        ];
        for (feature, support) in expected {
            for (kind, supported) in DialectKind::ALL.into_iter().zip(support) {
                assert_eq!(
                    kind.dialect().supports_feature(feature),
                    supported,
                    "{feature} in {kind}"
                );
            }
        }
    }

    #[test]
    fn test_supports_feature_tag() {
        let pg = DialectKind::PostgreSql.dialect();
        assert!(pg.supports_feature_tag("MATERIALIZED VIEW"));
        assert!(!pg.supports_feature_tag("TOP"));
        assert!(!pg.supports_feature_tag("NOT A FEATURE"));
    }

    #[test]
    fn test_top_is_only_a_keyword_in_sqlserver() {
        assert!(DialectKind::SqlServer.dialect().is_keyword("TOP"));
        assert!(!DialectKind::MySql.dialect().is_keyword("TOP"));
        assert!(DialectKind::MySql.dialect().is_keyword("SELECT"));
    }
}
