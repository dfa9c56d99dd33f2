//! Shared fixtures for policy tests.

#![allow(dead_code)]

use serde_json::{Value, json};
use std::future::Future;

/// A fully populated, valid `User` entity.
pub fn user_entity() -> Value {
    json!({
        "apiVersion": "backstage.io/v1alpha1",
        "kind": "User",
        "metadata": {
            "name": "doe",
        },
        "spec": {
            "type": "employee",
            "profile": {
                "displayName": "John Doe",
                "email": "john@doe.org",
                "picture": "https://doe.org/john.jpeg",
            },
            "memberOf": ["org-a", "department-b", "team-c", "developers"],
            "directMemberOf": ["team-c", "developers"],
        },
    })
}

/// A fully populated, valid `Group` entity.
pub fn group_entity() -> Value {
    json!({
        "apiVersion": "backstage.io/v1alpha1",
        "kind": "Group",
        "metadata": {
            "name": "team-c",
        },
        "spec": {
            "type": "team",
            "parent": "department-b",
            "ancestors": ["department-b", "org-a"],
            "children": [],
            "descendants": [],
        },
    })
}

/// Sets the value at a JSON pointer, creating the last key if needed.
pub fn set(entity: &mut Value, pointer: &str, value: Value) {
    let (parent, key) = pointer.rsplit_once('/').expect("pointer must contain '/'");
    match entity.pointer_mut(parent).expect("parent must exist") {
        Value::Object(map) => {
            map.insert(key.to_string(), value);
        }
        Value::Array(items) => {
            items[key.parse::<usize>().expect("array index")] = value;
        }
        other => panic!("cannot set {key} on {other}"),
    }
}

/// Removes the key at a JSON pointer.
pub fn remove(entity: &mut Value, pointer: &str) {
    let (parent, key) = pointer.rsplit_once('/').expect("pointer must contain '/'");
    entity
        .pointer_mut(parent)
        .and_then(Value::as_object_mut)
        .expect("parent must be an object")
        .remove(key);
}

/// Runs a future to completion on a fresh current-thread runtime.
pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(future)
}

/// Routes `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
