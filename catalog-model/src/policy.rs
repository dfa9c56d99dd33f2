use crate::error::{PolicyError, PolicyResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A check applied to an entity document before it is trusted.
///
/// Implementations never modify the document. On success they hand back the
/// very reference they were given, so callers can tell that nothing was
/// rewritten. The operation is async so that kinds whose checks need lookups
/// share one interface with kinds that are purely structural.
#[async_trait]
pub trait EntityPolicy: Send + Sync {
    /// Accepts the entity unchanged or rejects it with the first violation found.
    async fn enforce<'a>(&self, entity: &'a Value) -> PolicyResult<&'a Value>;
}

#[async_trait]
impl<P: EntityPolicy + ?Sized> EntityPolicy for Arc<P> {
    async fn enforce<'a>(&self, entity: &'a Value) -> PolicyResult<&'a Value> {
        (**self).enforce(entity).await
    }
}

pub(crate) fn describe(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "<missing>".to_string(),
    }
}

/// The `apiVersion` and `kind` gate every kind policy starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindHeader {
    kind: String,
    api_versions: Vec<String>,
}

impl KindHeader {
    /// `api_versions` is the full allow-list; the first entry is treated as current.
    pub fn new(kind: impl Into<String>, api_versions: Vec<String>) -> Self {
        Self {
            kind: kind.into(),
            api_versions,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn api_versions(&self) -> &[String] {
        &self.api_versions
    }

    pub fn accepts_api_version(&self, api_version: &str) -> bool {
        self.api_versions.iter().any(|v| v == api_version)
    }

    /// Checks `apiVersion` first, then `kind`.
    pub fn check(&self, entity: &Value) -> PolicyResult<()> {
        let api_version = entity.get("apiVersion");
        match api_version.and_then(Value::as_str) {
            Some(v) if self.accepts_api_version(v) => {}
            _ => {
                return Err(PolicyError::InvalidApiVersion {
                    kind: self.kind.clone(),
                    found: describe(api_version),
                    expected: self.api_versions.clone(),
                });
            }
        }

        let kind = entity.get("kind");
        match kind.and_then(Value::as_str) {
            Some(k) if k == self.kind => Ok(()),
            _ => Err(PolicyError::InvalidKind {
                found: describe(kind),
                expected: self.kind.clone(),
            }),
        }
    }
}

/// Runs several policies in order; the first rejection wins.
#[derive(Default, Clone)]
pub struct AllOf {
    policies: Vec<Arc<dyn EntityPolicy>>,
}

impl AllOf {
    pub fn new(policies: Vec<Arc<dyn EntityPolicy>>) -> Self {
        Self { policies }
    }

    #[must_use]
    pub fn with(mut self, policy: Arc<dyn EntityPolicy>) -> Self {
        self.policies.push(policy);
        self
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

#[async_trait]
impl EntityPolicy for AllOf {
    async fn enforce<'a>(&self, entity: &'a Value) -> PolicyResult<&'a Value> {
        for policy in &self.policies {
            policy.enforce(entity).await?;
        }
        Ok(entity)
    }
}
