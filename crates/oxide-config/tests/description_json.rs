//! Saving and reloading trees through serde_json.

use std::collections::BTreeMap;

use oxide_config::{
    ConfigError, ConfigNode, DbmsAttributes, DbmsType, IndexAttributes, Node, NodeDescription,
    NodeKind, PluginDataAttributes,
};

fn sample() -> oxide_config::NodeRef {
    let project = Node::project("shop").unwrap();
    let dbms = project.add_new_child(NodeKind::Dbms, "db").unwrap().inserted().unwrap();
    dbms.update_attributes(|attrs| {
        if let ConfigNode::Dbms(dbms) = attrs {
            dbms.set_dbms_type(DbmsType::PostgreSql);
            dbms.username = String::from("app");
        }
    })
    .unwrap();
    let plugin = project
        .add_new_child(NodeKind::PluginData, "codegen")
        .unwrap()
        .inserted()
        .unwrap();
    plugin
        .set_attributes(ConfigNode::PluginData(PluginDataAttributes {
            values: BTreeMap::from([(String::from("style"), String::from("builder"))]),
        }))
        .unwrap();

    let schema = dbms.add_new_child(NodeKind::Schema, "public").unwrap().inserted().unwrap();
    let table = schema.add_new_child(NodeKind::Table, "users").unwrap().inserted().unwrap();
    let _ = table.add_new_child(NodeKind::Column, "id").unwrap();
    let email = table.add_new_child(NodeKind::Column, "email").unwrap().inserted().unwrap();
    email.set_enabled(false);
    let index = table.add_new_child(NodeKind::Index, "users_email").unwrap().inserted().unwrap();
    index
        .set_attributes(ConfigNode::Index(IndexAttributes {
            unique: true,
            columns: vec![String::from("email")],
        }))
        .unwrap();
    project
}

#[test]
fn test_json_round_trip() {
    let project = sample();
    let json = serde_json::to_string_pretty(&project.describe()).unwrap();
    let parsed: NodeDescription = serde_json::from_str(&json).unwrap();
    let rebuilt = Node::from_description(&parsed).unwrap();

    assert_eq!(rebuilt.describe(), project.describe());
    let email = rebuilt
        .find(NodeKind::Dbms, "db")
        .and_then(|d| d.find(NodeKind::Schema, "public"))
        .and_then(|s| s.find(NodeKind::Table, "users"))
        .and_then(|t| t.find(NodeKind::Column, "email"))
        .unwrap();
    assert!(!email.is_enabled());
    assert_eq!(email.path(), vec!["shop", "db", "public", "users", "email"]);
}

#[test]
fn test_missing_fields_take_defaults() {
    let json = r#"{
        "name": "db",
        "attributes": { "kind": "Dbms", "type_name": "SQLite" }
    }"#;
    let description: NodeDescription = serde_json::from_str(json).unwrap();
    assert!(description.enabled);
    assert!(description.children.is_empty());

    let node = Node::from_description(&description).unwrap();
    let ConfigNode::Dbms(attrs) = node.attributes() else {
        panic!("expected dbms attributes");
    };
    assert_eq!(
        attrs,
        DbmsAttributes {
            type_name: String::from("SQLite"),
            ..DbmsAttributes::default()
        }
    );
    assert_eq!(attrs.dbms_type().unwrap(), DbmsType::Sqlite);
    assert_eq!(attrs.effective_port(), None);
}

#[test]
fn test_corrupt_description_rejected() {
    let json = r#"{
        "name": "public",
        "attributes": { "kind": "Schema" },
        "children": [
            { "name": "users", "attributes": { "kind": "Table" } },
            { "name": "users", "attributes": { "kind": "Table", "alias": "people" } }
        ]
    }"#;
    let description: NodeDescription = serde_json::from_str(json).unwrap();
    assert!(matches!(
        Node::from_description(&description),
        Err(ConfigError::DuplicateName { kind: NodeKind::Table, .. })
    ));
}
