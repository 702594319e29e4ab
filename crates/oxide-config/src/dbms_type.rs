//! Known database server types and their connection defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A supported database server type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DbmsType {
    /// MySQL.
    #[default]
    MySql,
    /// MariaDB.
    MariaDb,
    /// PostgreSQL.
    PostgreSql,
    /// SQLite (file based, no port).
    Sqlite,
    /// DuckDB (file based, no port).
    DuckDb,
}

impl DbmsType {
    /// Every known type.
    pub const ALL: [Self; 5] = [
        Self::MySql,
        Self::MariaDb,
        Self::PostgreSql,
        Self::Sqlite,
        Self::DuckDb,
    ];

    /// Returns the canonical type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::MariaDb => "MariaDB",
            Self::PostgreSql => "PostgreSQL",
            Self::Sqlite => "SQLite",
            Self::DuckDb => "DuckDB",
        }
    }

    /// Returns the default TCP port, if the type listens on one.
    #[must_use]
    pub const fn default_port(self) -> Option<u16> {
        match self {
            Self::MySql | Self::MariaDb => Some(3306),
            Self::PostgreSql => Some(5432),
            Self::Sqlite | Self::DuckDb => None,
        }
    }

    /// Returns the system schemas that introspection should skip.
    #[must_use]
    pub const fn schema_excludes(self) -> &'static [&'static str] {
        match self {
            Self::MySql | Self::MariaDb => {
                &["information_schema", "mysql", "performance_schema", "sys"]
            }
            Self::PostgreSql => &["information_schema", "pg_catalog"],
            Self::Sqlite | Self::DuckDb => &[],
        }
    }
}

impl fmt::Display for DbmsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DbmsType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownDbmsType(s.to_string()))
    }
}
