//! Field values and their dynamic SQL representation.
//!
//! [`FieldValue`] is implemented by every Rust type a generated entity field
//! may hold. It supplies the natural three-way ordering used when evaluating
//! predicates in memory and the [`SqlValue`] handed to query translators.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// A SQL value that can be used as a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns the SQL representation for inline use (escaped).
    ///
    /// **Warning**: Prefer using parameterized queries instead.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(true) => String::from("TRUE"),
            Self::Bool(false) => String::from("FALSE"),
            Self::Int(n) => format!("{n}"),
            Self::Float(f) => format!("{f}"),
            Self::Text(s) => {
                let escaped = s.replace('\'', "''");
                format!("'{escaped}'")
            }
            Self::Blob(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
                format!("X'{hex}'")
            }
        }
    }

    /// Returns the parameter placeholder.
    #[must_use]
    pub const fn placeholder() -> &'static str {
        "?"
    }
}

/// The declared type of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `bool`
    Bool,
    /// Signed integers.
    Int,
    /// Unsigned integers.
    UInt,
    /// `f32` / `f64`
    Float,
    /// A single character.
    Char,
    /// `String`
    Text,
    /// Raw bytes.
    Bytes,
    /// Calendar date.
    Date,
    /// Date and time without zone.
    DateTime,
    /// UTC timestamp.
    Timestamp,
}

impl ValueType {
    /// Returns the canonical name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Float => "float",
            Self::Char => "char",
            Self::Text => "text",
            Self::Bytes => "bytes",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value an entity field can hold.
///
/// `compare` must be a total order consistent with the type's natural
/// ordering. Integral equality is exact; floats use IEEE total ordering,
/// so no epsilon is applied and `-0.0 < 0.0`.
pub trait FieldValue: Clone + fmt::Debug + Send + Sync + 'static {
    /// The declared type tag for this value.
    const VALUE_TYPE: ValueType;

    /// Three-way comparison against another value of the same type.
    fn compare(&self, other: &Self) -> Ordering;

    /// Converts the value to a `SqlValue`.
    fn to_sql_value(&self) -> SqlValue;
}

macro_rules! impl_field_value_int {
    ($value_type:expr => $($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                const VALUE_TYPE: ValueType = $value_type;

                fn compare(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                #[allow(clippy::useless_conversion)]
                fn to_sql_value(&self) -> SqlValue {
                    SqlValue::Int(i64::from(*self))
                }
            }
        )+
    };
}

impl_field_value_int!(ValueType::Int => i8, i16, i32, i64);
impl_field_value_int!(ValueType::UInt => u8, u16, u32);

impl FieldValue for f64 {
    const VALUE_TYPE: ValueType = ValueType::Float;

    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Float(*self)
    }
}

impl FieldValue for f32 {
    const VALUE_TYPE: ValueType = ValueType::Float;

    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Float(f64::from(*self))
    }
}

impl FieldValue for bool {
    const VALUE_TYPE: ValueType = ValueType::Bool;

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Bool(*self)
    }
}

impl FieldValue for char {
    const VALUE_TYPE: ValueType = ValueType::Char;

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.to_string())
    }
}

impl FieldValue for String {
    const VALUE_TYPE: ValueType = ValueType::Text;

    fn compare(&self, other: &Self) -> Ordering {
        crate::naming::compare_names(self, other)
    }

    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.clone())
    }
}

impl FieldValue for Vec<u8> {
    const VALUE_TYPE: ValueType = ValueType::Bytes;

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Blob(self.clone())
    }
}

impl FieldValue for NaiveDate {
    const VALUE_TYPE: ValueType = ValueType::Date;

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.format("%Y-%m-%d").to_string())
    }
}

impl FieldValue for NaiveDateTime {
    const VALUE_TYPE: ValueType = ValueType::DateTime;

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.format("%Y-%m-%d %H:%M:%S%.f").to_string())
    }
}

impl FieldValue for DateTime<Utc> {
    const VALUE_TYPE: ValueType = ValueType::Timestamp;

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.to_rfc3339())
    }
}
