//! Catalog entity model and kind-specific validation policies.
//!
//! Entities arrive as already-parsed JSON ([`serde_json::Value`]). Before a
//! document is trusted it goes through the [`EntityPolicy`] for its kind:
//! - [`validators`] — composable shape checks (string, non-empty string,
//!   optional, array-of, object-shape)
//! - [`UserEntityPolicy`] / [`GroupEntityPolicy`] — the `apiVersion` and
//!   `kind` gates followed by a fixed, ordered pipeline of field checks
//! - [`EntityPolicies`] — dispatches to the right policy by `kind`
//! - [`Entity`], [`UserEntity`], [`GroupEntity`] — typed views, decoded only
//!   after a policy accepted the document
//!
//! A policy reports the first violation it finds as a [`PolicyError`] whose
//! message names the offending field. On success it returns the same
//! reference it was given.

mod entity;
mod error;
mod kinds;
mod path;
mod policy;
mod registry;
pub mod settings;
pub mod validators;

pub use entity::{
    Entity, EntityMeta, GroupEntity, GroupSpec, UserEntity, UserProfile, UserSpec,
};
pub use error::{PolicyError, PolicyResult};
pub use kinds::{
    CURRENT_API_VERSION, DEFAULT_API_VERSIONS, GroupEntityPolicy, UserEntityPolicy,
};
pub use path::{FieldPath, Segment};
pub use policy::{AllOf, EntityPolicy, KindHeader};
pub use registry::EntityPolicies;
pub use settings::{KindSettings, PolicySettings};
