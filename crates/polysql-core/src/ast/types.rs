//! SQL data type definitions.

use std::fmt;

/// The parenthesized part of a data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeModifier {
    /// `(n)`
    Length(u64),
    /// `(MAX)`, as in `VARCHAR(MAX)`.
    Max,
    /// `(precision, scale)`
    PrecisionScale {
        /// Total number of digits.
        precision: u64,
        /// Number of digits after the decimal point.
        scale: u64,
    },
}

/// A data type as written in the source.
///
/// Vendors disagree too much on type names for a closed enum; the name is
/// kept in uppercase with multi-word names joined by single spaces (e.g.,
/// `DOUBLE PRECISION`, `TIMESTAMP WITH TIME ZONE`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataType {
    /// Uppercased type name.
    pub name: String,
    /// Length or precision.
    pub modifier: Option<TypeModifier>,
    /// MySQL `UNSIGNED`.
    pub unsigned: bool,
    /// PostgreSQL array dimensions, one per `[]` or `[n]`.
    pub array_dimensions: Vec<Option<u64>>,
}

impl DataType {
    /// Creates a data type without modifiers.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            modifier: None,
            unsigned: false,
            array_dimensions: Vec::new(),
        }
    }

    /// Adds one array dimension, with an optional declared size.
    #[must_use]
    pub fn with_array_dimension(mut self, size: Option<u64>) -> Self {
        self.array_dimensions.push(size);
        self
    }

    /// Returns true for array types such as `INT[]`.
    #[must_use]
    pub fn is_array(&self) -> bool {
        !self.array_dimensions.is_empty()
    }

    /// Sets the modifier.
    #[must_use]
    pub const fn with_modifier(mut self, modifier: TypeModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// Returns the declared length, if any.
    #[must_use]
    pub const fn length(&self) -> Option<u64> {
        match self.modifier {
            Some(TypeModifier::Length(n)) => Some(n),
            _ => None,
        }
    }

    /// Returns true for integer, decimal and floating point types.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        !self.is_array()
            && matches!(
                self.name.as_str(),
                "INT"
                    | "INTEGER"
                    | "SMALLINT"
                    | "TINYINT"
                    | "MEDIUMINT"
                    | "BIGINT"
                    | "SERIAL"
                    | "BIGSERIAL"
                    | "DECIMAL"
                    | "NUMERIC"
                    | "REAL"
                    | "FLOAT"
                    | "DOUBLE"
                    | "DOUBLE PRECISION"
                    | "MONEY"
            )
    }

    /// Returns true for character string types.
    #[must_use]
    pub fn is_textual(&self) -> bool {
        !self.is_array()
            && matches!(
                self.name.as_str(),
                "CHAR"
                    | "VARCHAR"
                    | "NCHAR"
                    | "NVARCHAR"
                    | "TEXT"
                    | "NTEXT"
                    | "CHARACTER"
                    | "CHARACTER VARYING"
                    | "TINYTEXT"
                    | "MEDIUMTEXT"
                    | "LONGTEXT"
                    | "CLOB"
            )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match self.modifier {
            Some(TypeModifier::Length(n)) => write!(f, "({n})")?,
            Some(TypeModifier::Max) => f.write_str("(MAX)")?,
            Some(TypeModifier::PrecisionScale { precision, scale }) => {
                write!(f, "({precision}, {scale})")?;
            }
            None => {}
        }
        for size in &self.array_dimensions {
            match size {
                Some(n) => write!(f, "[{n}]")?,
                None => f.write_str("[]")?,
            }
        }
        if self.unsigned {
            f.write_str(" UNSIGNED")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_display() {
        assert_eq!(DataType::new("int").to_string(), "INT");
        assert_eq!(
            DataType::new("varchar")
                .with_modifier(TypeModifier::Length(64))
                .to_string(),
            "VARCHAR(64)"
        );
        assert_eq!(
            DataType::new("DECIMAL")
                .with_modifier(TypeModifier::PrecisionScale {
                    precision: 10,
                    scale: 2
                })
                .to_string(),
            "DECIMAL(10, 2)"
        );
        assert_eq!(
            DataType::new("NVARCHAR")
                .with_modifier(TypeModifier::Max)
                .to_string(),
            "NVARCHAR(MAX)"
        );
        assert_eq!(
            DataType::new("int")
                .with_array_dimension(None)
                .with_array_dimension(Some(3))
                .to_string(),
            "INT[][3]"
        );
    }

    #[test]
    fn test_data_type_classification() {
        assert!(DataType::new("bigint").is_numeric());
        assert!(DataType::new("DOUBLE PRECISION").is_numeric());
        assert!(DataType::new("nvarchar").is_textual());
        assert!(!DataType::new("DATE").is_numeric());
        assert!(!DataType::new("INT").with_array_dimension(None).is_numeric());
        assert!(DataType::new("TEXT").with_array_dimension(None).is_array());
        assert_eq!(
            DataType::new("CHAR")
                .with_modifier(TypeModifier::Length(3))
                .length(),
            Some(3)
        );
    }
}
