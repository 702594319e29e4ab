//! Kind-specific node attributes.
//!
//! [`ConfigNode`] is the tagged union of the attributes each node kind
//! carries. The tree stores exactly one variant per node, matching the
//! node's [`NodeKind`]. All attribute types are serde-friendly so external
//! loaders can round-trip them; missing fields take their defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dbms_type::DbmsType;
use crate::kind::NodeKind;

/// Attributes of the root project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectAttributes {
    /// Package or module generated code is placed in.
    pub package_name: Option<String>,
    /// Directory generated code is written to.
    pub package_location: Option<String>,
}

/// Connection attributes of a database server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbmsAttributes {
    /// Host name or IP address.
    pub host: String,
    /// TCP port; `None` uses the type's default.
    pub port: Option<u16>,
    /// User to connect as.
    pub username: String,
    /// Password for `username`.
    pub password: String,
    /// Name of the DBMS type (see [`DbmsType`]).
    pub type_name: String,
}

impl Default for DbmsAttributes {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: None,
            username: String::from("root"),
            password: String::new(),
            type_name: DbmsType::default().name().to_string(),
        }
    }
}

impl DbmsAttributes {
    /// Parses `type_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownDbmsType`](crate::ConfigError::UnknownDbmsType)
    /// if the name is not a known type.
    pub fn dbms_type(&self) -> crate::Result<DbmsType> {
        self.type_name.parse()
    }

    /// Sets `type_name` from a known type.
    pub fn set_dbms_type(&mut self, dbms_type: DbmsType) {
        self.type_name = dbms_type.name().to_string();
    }

    /// The configured port, falling back to the type's default.
    #[must_use]
    pub fn effective_port(&self) -> Option<u16> {
        self.port
            .or_else(|| self.dbms_type().ok().and_then(DbmsType::default_port))
    }
}

/// Attributes of a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaAttributes {
    /// Catalog the schema lives in, where the DBMS has catalogs.
    pub catalog_name: Option<String>,
    /// Whether generated code may omit the schema qualifier.
    pub default_schema: bool,
}

/// Attributes of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableAttributes {
    /// Name used for the generated entity instead of the table name.
    pub alias: Option<String>,
}

/// Attributes of a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnAttributes {
    /// 1-based position within the table.
    pub ordinal_position: u32,
    /// Declared value type name (e.g. `BIGINT`).
    pub type_name: String,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the database generates the value.
    pub auto_increment: bool,
    /// Name used for the generated field instead of the column name.
    pub alias: Option<String>,
}

/// Attributes of an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexAttributes {
    /// Whether the index enforces uniqueness.
    pub unique: bool,
    /// Indexed columns in key order.
    pub columns: Vec<String>,
}

/// Attributes of a foreign key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForeignKeyAttributes {
    /// Referencing columns in this table.
    pub columns: Vec<String>,
    /// Referenced table.
    pub referenced_table: String,
    /// Referenced columns, paired with `columns`.
    pub referenced_columns: Vec<String>,
}

/// Opaque plugin settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginDataAttributes {
    /// Key/value settings, sorted by key.
    pub values: BTreeMap<String, String>,
}

/// Kind-specific attributes, one variant per [`NodeKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ConfigNode {
    /// Project attributes.
    Project(ProjectAttributes),
    /// DBMS attributes.
    Dbms(DbmsAttributes),
    /// Schema attributes.
    Schema(SchemaAttributes),
    /// Table attributes.
    Table(TableAttributes),
    /// Column attributes.
    Column(ColumnAttributes),
    /// Index attributes.
    Index(IndexAttributes),
    /// Foreign key attributes.
    ForeignKey(ForeignKeyAttributes),
    /// Plugin data attributes.
    PluginData(PluginDataAttributes),
}

impl ConfigNode {
    /// Default attributes for a kind.
    #[must_use]
    pub fn default_for(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Project => Self::Project(ProjectAttributes::default()),
            NodeKind::Dbms => Self::Dbms(DbmsAttributes::default()),
            NodeKind::Schema => Self::Schema(SchemaAttributes::default()),
            NodeKind::Table => Self::Table(TableAttributes::default()),
            NodeKind::Column => Self::Column(ColumnAttributes::default()),
            NodeKind::Index => Self::Index(IndexAttributes::default()),
            NodeKind::ForeignKey => Self::ForeignKey(ForeignKeyAttributes::default()),
            NodeKind::PluginData => Self::PluginData(PluginDataAttributes::default()),
        }
    }

    /// The kind these attributes belong to.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Project(_) => NodeKind::Project,
            Self::Dbms(_) => NodeKind::Dbms,
            Self::Schema(_) => NodeKind::Schema,
            Self::Table(_) => NodeKind::Table,
            Self::Column(_) => NodeKind::Column,
            Self::Index(_) => NodeKind::Index,
            Self::ForeignKey(_) => NodeKind::ForeignKey,
            Self::PluginData(_) => NodeKind::PluginData,
        }
    }
}
