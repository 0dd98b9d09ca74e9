use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::LinkKind;

/// Replacement `href` per link kind. An empty value blanks the link.
///
/// Loaded once before processing and shared read-only across workers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ReplacementTable {
    pub twitter: String,
    pub instagram: String,
    pub facebook: String,
    pub linkedin: String,
    pub privacy_policy: String,
    pub state_contractor: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid replacement table in {}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ReplacementTable {
    pub fn get(&self, kind: LinkKind) -> &str {
        match kind {
            LinkKind::Twitter => &self.twitter,
            LinkKind::Facebook => &self.facebook,
            LinkKind::Instagram => &self.instagram,
            LinkKind::Linkedin => &self.linkedin,
            LinkKind::PrivacyPolicy => &self.privacy_policy,
            LinkKind::StateContractor => &self.state_contractor,
        }
    }

    pub fn with(mut self, kind: LinkKind, replacement: impl Into<String>) -> Self {
        let slot = match kind {
            LinkKind::Twitter => &mut self.twitter,
            LinkKind::Facebook => &mut self.facebook,
            LinkKind::Instagram => &mut self.instagram,
            LinkKind::Linkedin => &mut self.linkedin,
            LinkKind::PrivacyPolicy => &mut self.privacy_policy,
            LinkKind::StateContractor => &mut self.state_contractor,
        };
        *slot = replacement.into();
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }
}
