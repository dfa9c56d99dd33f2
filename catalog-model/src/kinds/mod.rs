//! Policies for the built-in entity kinds.

mod group;
mod user;

pub use group::GroupEntityPolicy;
pub use user::UserEntityPolicy;

/// Dialect every built-in kind is currently written in.
pub const CURRENT_API_VERSION: &str = "backstage.io/v1alpha1";

/// Dialects accepted by default. Entries after the first are older or
/// compatible dialects that are still accepted silently.
pub const DEFAULT_API_VERSIONS: &[&str] = &[CURRENT_API_VERSION, "backstage.io/v1beta1"];

pub(crate) fn default_api_versions() -> Vec<String> {
    DEFAULT_API_VERSIONS.iter().map(|v| (*v).to_string()).collect()
}
