use crate::entity::UserEntity;
use crate::error::PolicyResult;
use crate::path::FieldPath;
use crate::policy::{EntityPolicy, KindHeader};
use crate::validators::{array_of, optional, require_non_empty_string, ObjectShape, Validator};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace};

/// Validates `User` entities.
///
/// After the `apiVersion` and `kind` gates, `spec` is checked field by field
/// in this order: `type`, `profile`, `memberOf`, `directMemberOf`. Fields the
/// policy does not know about are left alone.
#[derive(Debug)]
pub struct UserEntityPolicy {
    header: KindHeader,
    spec: ObjectShape,
}

impl UserEntityPolicy {
    pub const KIND: &'static str = "User";

    /// A policy accepting the default dialects.
    pub fn new() -> Self {
        Self::with_api_versions(super::default_api_versions())
    }

    /// A policy accepting exactly the given `apiVersion` values.
    pub fn with_api_versions(api_versions: Vec<String>) -> Self {
        let profile = ObjectShape::new()
            .field("displayName", optional(require_non_empty_string()))
            .field("email", optional(require_non_empty_string()))
            .field("picture", optional(require_non_empty_string()));

        let spec = ObjectShape::new()
            .field("type", require_non_empty_string())
            .field("profile", optional(profile))
            .field("memberOf", array_of(require_non_empty_string()))
            .field("directMemberOf", array_of(require_non_empty_string()));

        Self {
            header: KindHeader::new(Self::KIND, api_versions),
            spec,
        }
    }

    pub fn api_versions(&self) -> &[String] {
        self.header.api_versions()
    }

    fn check(&self, entity: &Value) -> PolicyResult<()> {
        self.header.check(entity)?;
        self.spec.validate(entity.get("spec"), &FieldPath::parse("spec"))
    }

    /// Enforces the policy, then decodes the entity into its typed form.
    pub async fn parse(&self, entity: &Value) -> PolicyResult<UserEntity> {
        let entity = self.enforce(entity).await?;
        Ok(serde_json::from_value(entity.clone())?)
    }
}

impl Default for UserEntityPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityPolicy for UserEntityPolicy {
    async fn enforce<'a>(&self, entity: &'a Value) -> PolicyResult<&'a Value> {
        match self.check(entity) {
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
