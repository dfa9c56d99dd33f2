//! Optional configuration of accepted dialects, read from a TOML file.
//!
//! ```toml
//! [kinds.User]
//! api-versions = ["backstage.io/v1alpha1", "backstage.io/v1beta1"]
//!
//! [kinds.Group]
//! api-versions = ["backstage.io/v1alpha1"]
//! ```
//!
//! Kinds that are not listed keep the built-in dialects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Per-kind overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KindSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_versions: Option<Vec<String>>,
}

/// Settings for building the policy registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySettings {
    #[serde(default)]
    pub kinds: BTreeMap<String, KindSettings>,
}

impl PolicySettings {
    /// Loads settings from `path`. A missing, unreadable or malformed file
    /// yields the defaults, logged at `info`/`warn`.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No policy settings at {:?}, using built-in dialects", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(settings) => {
                    info!("Loaded policy settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!(
                        "Failed to parse policy settings {:?}: {}. Using built-in dialects.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read policy settings {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// The configured dialects for `kind`, if overridden. An empty list counts
    /// as not overridden, since a kind with no dialects could never validate.
    pub fn api_versions_for(&self, kind: &str) -> Option<&[String]> {
        self.kinds
            .get(kind)
            .and_then(|k| k.api_versions.as_deref())
            .filter(|versions| !versions.is_empty())
    }
}
