use crate::entity::GroupEntity;
use crate::error::PolicyResult;
use crate::path::FieldPath;
use crate::policy::{EntityPolicy, KindHeader};
use crate::validators::{array_of, optional, require_non_empty_string, ObjectShape, Validator};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace};

/// Validates `Group` entities: `type`, optional `parent`, then the
/// `ancestors`, `children` and `descendants` lists.
#[derive(Debug)]
pub struct GroupEntityPolicy {
    header: KindHeader,
    spec: ObjectShape,
}

impl GroupEntityPolicy {
    pub const KIND: &'static str = "Group";

    pub fn new() -> Self {
        Self::with_api_versions(super::default_api_versions())
    }

    pub fn with_api_versions(api_versions: Vec<String>) -> Self {
        let spec = ObjectShape::new()
            .field("type", require_non_empty_string())
            .field("parent", optional(require_non_empty_string()))
            .field("ancestors", array_of(require_non_empty_string()))
            .field("children", array_of(require_non_empty_string()))
            .field("descendants", array_of(require_non_empty_string()));

        Self {
            header: KindHeader::new(Self::KIND, api_versions),
            spec,
        }
    }

    pub fn api_versions(&self) -> &[String] {
        self.header.api_versions()
    }

    pub async fn parse(&self, entity: &Value) -> PolicyResult<GroupEntity> {
        let entity = self.enforce(entity).await?;
        Ok(serde_json::from_value(entity.clone())?)
    }
}

impl Default for GroupEntityPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityPolicy for GroupEntityPolicy {
    async fn enforce<'a>(&self, entity: &'a Value) -> PolicyResult<&'a Value> {
        let result = self
            .header
            .check(entity)
            .and_then(|()| self.spec.validate(entity.get("spec"), &FieldPath::parse("spec")));
        match result {
            Ok(()) => {
                trace!(kind = Self::KIND, "entity accepted");
                Ok(entity)
            }
            Err(err) => {
                debug!(kind = Self::KIND, error = %err, "entity rejected");
                Err(err)
            }
        }
    }
}
