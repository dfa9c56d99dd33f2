//! Property-based tests for the User policy.
//!
//! These check the acceptance and rejection rules over generated documents
//! rather than the handful of fixed fixtures in `user_policy_tests.rs`.

mod common;

use catalog_model::{EntityPolicy, PolicyError, UserEntityPolicy};
use common::{block_on, remove, set};
use proptest::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn non_empty_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 @:/._-]{1,24}"
}

fn group_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9-]{0,15}", 0..6)
}

fn profile() -> impl Strategy<Value = Option<Value>> {
    prop::option::of(
        (
            prop::option::of(non_empty_string()),
            prop::option::of(non_empty_string()),
            prop::option::of(non_empty_string()),
        )
            .prop_map(|(display_name, email, picture)| {
                let mut profile = serde_json::Map::new();
                if let Some(v) = display_name {
                    profile.insert("displayName".into(), json!(v));
                }
                if let Some(v) = email {
                    profile.insert("email".into(), json!(v));
                }
                if let Some(v) = picture {
                    profile.insert("picture".into(), json!(v));
                }
                Value::Object(profile)
            }),
    )
}

fn valid_user() -> impl Strategy<Value = Value> {
    (
        prop::sample::select(vec!["backstage.io/v1alpha1", "backstage.io/v1beta1"]),
        "[a-z][a-z0-9-]{0,15}",
        non_empty_string(),
        profile(),
        group_list(),
        group_list(),
    )
        .prop_map(|(api_version, name, user_type, profile, member_of, direct)| {
            let mut entity = json!({
                "apiVersion": api_version,
                "kind": "User",
                "metadata": { "name": name },
                "spec": {
                    "type": user_type,
                    "memberOf": member_of,
                    "directMemberOf": direct,
                },
            });
            if let Some(profile) = profile {
                set(&mut entity, "/spec/profile", profile);
            }
            entity
        })
}

/// JSON values that are not strings.
fn non_string() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        Just(json!([])),
        Just(json!({})),
    ]
}

/// Pointers to every string field the policy checks.
const STRING_FIELDS: &[&str] = &[
    "/spec/type",
    "/spec/profile/displayName",
    "/spec/profile/email",
    "/spec/profile/picture",
];

fn enforce(entity: &Value) -> Result<bool, PolicyError> {
    block_on(UserEntityPolicy::new().enforce(entity)).map(|accepted| std::ptr::eq(accepted, entity))
}

fn with_full_profile(mut entity: Value) -> Value {
    set(
        &mut entity,
        "/spec/profile",
        json!({ "displayName": "A", "email": "a@b.c", "picture": "https://b.c/a.png" }),
    );
    entity
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    /// Any valid entity is accepted and the same reference comes back.
    #[test]
    fn valid_entities_are_returned_unchanged(entity in valid_user()) {
        let before = entity.clone();
        prop_assert!(enforce(&entity).unwrap());
        prop_assert_eq!(entity, before);
    }

    /// Unknown keys anywhere in `spec` never cause a rejection.
    #[test]
    fn extra_spec_fields_are_ignored(
        entity in valid_user(),
        key in "x[a-zA-Z]{1,10}",
        value in non_string(),
    ) {
        let mut entity = entity;
        set(&mut entity, &format!("/spec/{key}"), value);
        prop_assert!(enforce(&entity).is_ok());
    }

    /// A non-string in any string field is rejected naming that field.
    #[test]
    fn non_string_values_are_rejected(
        entity in valid_user(),
        field in prop::sample::select(STRING_FIELDS),
        value in non_string(),
    ) {
        let mut entity = with_full_profile(entity);
        set(&mut entity, field, value);
        let err = enforce(&entity).unwrap_err();
        let name = field.rsplit('/').next().unwrap();
        prop_assert!(err.to_string().contains(name), "{} not in {}", name, err);
        let is_type_mismatch = matches!(err, PolicyError::TypeMismatch { .. });
        prop_assert!(is_type_mismatch);
    }

    /// An empty string is rejected as empty, not as missing.
    #[test]
    fn empty_strings_are_rejected(
        entity in valid_user(),
        field in prop::sample::select(STRING_FIELDS),
    ) {
        let mut entity = with_full_profile(entity);
        set(&mut entity, field, json!(""));
        let err = enforce(&entity).unwrap_err();
        let is_empty_value = matches!(err, PolicyError::EmptyValue { .. });
        prop_assert!(is_empty_value);
        prop_assert_eq!(err.path().unwrap().to_string(), field[1..].replace('/', "."));
    }

    /// Removing an optional profile field keeps the entity valid.
    #[test]
    fn optional_fields_may_be_removed(
        entity in valid_user(),
        field in prop::sample::select(vec!["displayName", "email", "picture"]),
    ) {
        let mut entity = with_full_profile(entity);
        remove(&mut entity, &format!("/spec/profile/{field}"));
        prop_assert!(enforce(&entity).unwrap());
    }

    /// Removing a required field is always reported as that missing field.
    #[test]
    fn required_fields_may_not_be_removed(
        entity in valid_user(),
        field in prop::sample::select(vec!["type", "memberOf", "directMemberOf"]),
    ) {
        let mut entity = entity;
        remove(&mut entity, &format!("/spec/{field}"));
        let err = enforce(&entity).unwrap_err();
        prop_assert_eq!(err.to_string(), format!("missing required field spec.{}", field));
    }

    /// Dialects outside the allow-list are rejected.
    #[test]
    fn unknown_dialects_are_rejected(
        entity in valid_user(),
        api_version in "[a-z./0-9]{1,24}",
    ) {
        prop_assume!(api_version != "backstage.io/v1alpha1" && api_version != "backstage.io/v1beta1");
        let mut entity = entity;
        set(&mut entity, "/apiVersion", json!(api_version));
        let err = enforce(&entity).unwrap_err();
        prop_assert!(err.to_string().contains("apiVersion"));
    }
}
