use crate::error::{PolicyError, PolicyResult};
use crate::kinds::{GroupEntityPolicy, UserEntityPolicy};
use crate::policy::{describe, EntityPolicy};
use crate::settings::PolicySettings;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Looks up the policy for an entity's `kind` and runs it.
///
/// The registry is itself an [`EntityPolicy`], so it can be handed to code
/// that validates entities without knowing which kinds exist.
#[derive(Default, Clone)]
pub struct EntityPolicies {
    by_kind: BTreeMap<String, Arc<dyn EntityPolicy>>,
}

impl EntityPolicies {
    /// An empty registry. Every entity is rejected until a kind is registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// `User` and `Group` with their default dialects.
    pub fn with_defaults() -> Self {
        Self::from_settings(&PolicySettings::default())
    }

    /// `User` and `Group`, with dialects taken from `settings` where set.
    pub fn from_settings(settings: &PolicySettings) -> Self {
        let user = match settings.api_versions_for(UserEntityPolicy::KIND) {
            Some(versions) => UserEntityPolicy::with_api_versions(versions.to_vec()),
            None => UserEntityPolicy::new(),
        };
        let group = match settings.api_versions_for(GroupEntityPolicy::KIND) {
            Some(versions) => GroupEntityPolicy::with_api_versions(versions.to_vec()),
            None => GroupEntityPolicy::new(),
        };

        let mut registry = Self::new();
        registry.register(UserEntityPolicy::KIND, Arc::new(user));
        registry.register(GroupEntityPolicy::KIND, Arc::new(group));
        registry
    }

    /// Registers `policy` for `kind`, returning the policy it replaced.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        policy: Arc<dyn EntityPolicy>,
    ) -> Option<Arc<dyn EntityPolicy>> {
        let kind = kind.into();
        debug!(kind = %kind, "registering entity policy");
        self.by_kind.insert(kind, policy)
    }

    pub fn get(&self, kind: &str) -> Option<&Arc<dyn EntityPolicy>> {
        self.by_kind.get(kind)
    }

    /// Registered kind names, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.by_kind.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}

#[async_trait]
impl EntityPolicy for EntityPolicies {
    async fn enforce<'a>(&self, entity: &'a Value) -> PolicyResult<&'a Value> {
        let kind = entity.get("kind");
        let policy = kind.and_then(Value::as_str).and_then(|k| self.by_kind.get(k));
        match policy {
            Some(policy) => policy.enforce(entity).await,
            None => {
                let err = PolicyError::InvalidKind {
                    found: describe(kind),
                    expected: format!("one of [{}]", self.kinds().collect::<Vec<_>>().join(", ")),
                };
                debug!(error = %err, "no policy for entity kind");
                Err(err)
            }
        }
    }
}
