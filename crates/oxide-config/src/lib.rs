//! # oxide-config
//!
//! An in-memory, observable tree describing a database's structure:
//! project → dbms → schema → table → column / index / foreign key, plus
//! plugin data on the project.
//!
//! Every parent/child pair shares one container implementation that keeps
//! sibling names unique per kind and maintains the weak back-reference from
//! child to parent. Mutations are reported to observers registered anywhere
//! above the changed node.
//!
//! ```
//! use oxide_config::{Node, NodeKind, TreeEvent};
//!
//! let project = Node::project("shop").unwrap();
//! let _ = project.subscribe(|event: &TreeEvent| {
//!     if event.is_structural() {
//!         println!("{:?}", event.subject().path());
//!     }
//! });
//!
//! let dbms = project
//!     .add_new_child(NodeKind::Dbms, "db")
//!     .unwrap()
//!     .inserted()
//!     .unwrap();
//! let duplicate = project.add_new_child(NodeKind::Dbms, "db").unwrap();
//! assert!(!duplicate.is_inserted());
//! assert_eq!(project.find(NodeKind::Dbms, "db").unwrap().id(), dbms.id());
//! ```
//!
//! Columns hand a [`FieldSpec`](oxide_field::FieldSpec) to generated code
//! through [`Node::field_spec`]; predicates are built from there with
//! `oxide-field`.

mod attributes;
mod container;
mod dbms_type;
mod description;
mod error;
mod kind;
mod node;
mod notifier;
mod traverse;

pub use attributes::{
    ColumnAttributes, ConfigNode, DbmsAttributes, ForeignKeyAttributes, IndexAttributes,
    PluginDataAttributes, ProjectAttributes, SchemaAttributes, TableAttributes,
};
pub use container::{AddOutcome, ChildStream, ParentContainer};
pub use dbms_type::DbmsType;
pub use description::NodeDescription;
pub use error::{ConfigError, Result};
pub use kind::NodeKind;
pub use node::{Node, NodeId, NodeRef, RenameOutcome};
pub use notifier::{ChangeNotifier, SubscriptionId, TreeEvent, TreeObserver};
pub use traverse::Traverse;
