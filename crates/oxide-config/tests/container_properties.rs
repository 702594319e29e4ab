//! Property tests for the parent/child container contract.

use std::collections::BTreeSet;
use std::sync::Arc;

use oxide_config::{ConfigError, Node, NodeKind, NodeRef};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Remove(String),
}

fn op() -> impl Strategy<Value = Op> {
    let name = "[a-e]{1,2}";
    prop_oneof![
        name.prop_map(Op::Add),
        name.prop_map(Op::Remove),
    ]
}

fn schema() -> NodeRef {
    let project = Node::project("shop").unwrap();
    let dbms = project.create_child(NodeKind::Dbms, "db").unwrap();
    dbms.create_child(NodeKind::Schema, "public").unwrap()
}

fn assert_invariants(owner: &NodeRef) {
    let names: Vec<String> = owner.children().names();
    let unique: BTreeSet<&String> = names.iter().collect();
    assert_eq!(unique.len(), names.len(), "duplicate names: {names:?}");
    for child in &owner.children() {
        assert!(Arc::ptr_eq(&child.parent().unwrap(), owner));
    }
}

proptest! {
    #[test]
    fn test_random_add_remove_keeps_invariants(ops in proptest::collection::vec(op(), 1..40)) {
        let schema = schema();
        let mut detached: Vec<NodeRef> = Vec::new();
        let mut expected: BTreeSet<String> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Add(name) => {
                    let outcome = schema.add_new_child(NodeKind::Table, name.clone()).unwrap();
                    prop_assert_eq!(outcome.is_inserted(), expected.insert(name));
                }
                Op::Remove(name) => match schema.find(NodeKind::Table, &name) {
                    Ok(table) => {
                        let removed = schema.remove_child(&table).unwrap();
                        prop_assert!(removed.parent().is_none());
                        prop_assert!(expected.remove(&name));
                        detached.push(removed);
                    }
                    Err(ConfigError::NotFound { .. }) => {
                        prop_assert!(!expected.contains(&name));
                    }
                    Err(other) => panic!("unexpected error {other}"),
                },
            }
            assert_invariants(&schema);
            prop_assert_eq!(schema.count(), expected.len());
        }

        for node in detached {
            prop_assert!(node.parent().is_none());
        }
    }

    #[test]
    fn test_stream_sorted_regardless_of_insertion_order(
        names in proptest::collection::btree_set("[a-z]{1,6}", 0..20)
    ) {
        let schema = schema();
        let mut shuffled: Vec<String> = names.iter().cloned().collect();
        shuffled.reverse();
        for name in &shuffled {
            let _ = schema.add_new_child(NodeKind::Table, name.clone()).unwrap();
        }
        let streamed = schema.children_of_kind(NodeKind::Table).unwrap().names();
        let sorted: Vec<String> = names.into_iter().collect();
        prop_assert_eq!(streamed, sorted);
    }

    #[test]
    fn test_add_then_find_then_remove(name in "[A-Za-z_][A-Za-z0-9_]{0,12}") {
        let schema = schema();
        let table = schema.create_child(NodeKind::Table, name.clone()).unwrap();
        prop_assert!(schema.add_child(&table).unwrap().is_inserted());

        let found = schema.find(NodeKind::Table, &name).unwrap();
        prop_assert!(Arc::ptr_eq(&found, &table));

        let _ = schema.remove_child(&table);
        let is_not_found = matches!(
            schema.find(NodeKind::Table, &name),
            Err(ConfigError::NotFound { .. })
        );
        prop_assert!(is_not_found);
    }
}

#[test]
fn test_concurrent_adds_keep_names_unique() {
    let schema = schema();
    std::thread::scope(|scope| {
        for worker in 0..4 {
            let schema = &schema;
            scope.spawn(move || {
                for i in 0..50 {
                    let name = format!("t{}", (i + worker) % 60);
                    let _ = schema.add_new_child(NodeKind::Table, name).unwrap();
                }
            });
        }
    });
    assert_invariants(&schema);
    assert!(schema.count() <= 60);
}

#[test]
fn test_streamed_children_are_always_attached_during_adds() {
    let schema = schema();
    std::thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..500 {
                let _ = schema.add_new_child(NodeKind::Table, format!("t{i:03}")).unwrap();
            }
        });
        scope.spawn(|| {
            for _ in 0..500 {
                for child in &schema.children() {
                    let parent = child.parent().expect("published child without parent");
                    assert!(Arc::ptr_eq(&parent, &schema));
                }
            }
        });
    });
    assert_eq!(schema.count(), 500);
}

#[test]
fn test_detached_child_in_stream_is_already_gone_from_owner() {
    let schema = schema();
    std::thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..2_000 {
                let table = schema
                    .add_new_child(NodeKind::Table, format!("t{i}"))
                    .unwrap()
                    .inserted()
                    .unwrap();
                let _ = schema.remove_child(&table).unwrap();
            }
        });
        scope.spawn(|| {
            for _ in 0..2_000 {
                for child in &schema.children() {
                    match child.parent() {
                        Some(parent) => assert!(Arc::ptr_eq(&parent, &schema)),
                        // a stream may outlive a removal; the owner no longer lists the child
                        None => assert!(!schema.containers()[0].contains(child)),
                    }
                }
            }
        });
    });
    assert_eq!(schema.count(), 0);
}
