use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The envelope shared by every catalog entity.
///
/// Decoding into this type does not validate anything; run the kind's policy
/// first. `spec` stays untyped here, see [`UserEntity`] and [`GroupEntity`]
/// for typed kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub api_version: String,
    pub kind: String,
    pub metadata: EntityMeta,
    #[serde(default)]
    pub spec: serde_json::Value,
}

impl Entity {
    /// Extract a string value from `spec` using a JSON pointer (e.g., "/type").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.spec.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract an array of strings from `spec` using a JSON pointer.
    /// Non-string elements are skipped.
    pub fn get_str_list(&self, pointer: &str) -> Option<Vec<&str>> {
        self.spec
            .pointer(pointer)
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(|v| v.as_str()).collect())
    }
}

/// Entity metadata. Keys other than the ones modelled here are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A person in the organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    pub api_version: String,
    pub kind: String,
    pub metadata: EntityMeta,
    pub spec: UserSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSpec {
    /// Classification such as "employee" or "contractor".
    #[serde(rename = "type")]
    pub user_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    /// Every group containing the user, directly or transitively.
    pub member_of: Vec<String>,
    /// Groups the user is a direct member of.
    pub direct_member_of: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// URL of an avatar image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// A team, department or other organizational unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEntity {
    pub api_version: String,
    pub kind: String,
    pub metadata: EntityMeta,
    pub spec: GroupSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpec {
    #[serde(rename = "type")]
    pub group_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub ancestors: Vec<String>,
    pub children: Vec<String>,
    pub descendants: Vec<String>,
}
