//! TOML-backed requester registries.
//!
//! `TomlRequesterRegistry` holds an already-parsed registry and is always
//! available. `FileRequesterRegistry` reads its file when the gate asks for
//! it: a file that does not exist means there is nothing to evaluate, while
//! a file that exists but does not parse is a configuration error.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tracing::{debug, warn};

use privgate_contracts::{
    error::{PrivgateError, PrivgateResult},
    policy::{Registry, RegistryLookup},
};
use privgate_core::traits::RequesterRegistry;

use crate::config::RegistryConfig;

fn parse_registry(s: &str) -> PrivgateResult<Registry> {
    let config: RegistryConfig = toml::from_str(s).map_err(|e| PrivgateError::ConfigError {
        reason: format!("failed to parse requester registry TOML: {}", e),
    })?;
    Ok(config.into_registry())
}

/// A `RequesterRegistry` over a registry parsed up front.
///
/// ```rust,ignore
/// use privgate_policy::TomlRequesterRegistry;
///
/// let registry = TomlRequesterRegistry::from_file(Path::new(".github/privgate.toml"))?;
/// ```
#[derive(Debug, Clone)]
pub struct TomlRequesterRegistry {
    registry: Registry,
}

impl TomlRequesterRegistry {
    /// Parse `s` as a TOML registry.
    ///
    /// Returns `PrivgateError::ConfigError` if the TOML is malformed or does
    /// not match `RegistryConfig`.
    pub fn from_toml_str(s: &str) -> PrivgateResult<Self> {
        Ok(Self {
            registry: parse_registry(s)?,
        })
    }

    /// Read and parse the registry file at `path`.
    ///
    /// Any read failure, including a missing file, is a `ConfigError`.
    pub fn from_file(path: &Path) -> PrivgateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PrivgateError::ConfigError {
            reason: format!("failed to read requester registry '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

#[async_trait]
impl RequesterRegistry for TomlRequesterRegistry {
    async fn requesters(&self) -> PrivgateResult<RegistryLookup> {
        Ok(RegistryLookup::Available(self.registry.clone()))
    }
}

/// A `RequesterRegistry` that reads its TOML file on demand.
#[derive(Debug, Clone)]
pub struct FileRequesterRegistry {
    path: PathBuf,
}

impl FileRequesterRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RequesterRegistry for FileRequesterRegistry {
    /// Read and parse the registry file.
    ///
    /// A missing file yields `RegistryLookup::Unavailable`. Other read
    /// failures and parse failures are `ConfigError`s.
    async fn requesters(&self) -> PrivgateResult<RegistryLookup> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "requester registry file not found");
                return Ok(RegistryLookup::Unavailable);
            }
            Err(e) => {
                return Err(PrivgateError::ConfigError {
                    reason: format!(
                        "failed to read requester registry '{}': {}",
                        self.path.display(),
                        e
                    ),
                });
            }
        };

        let registry = parse_registry(&contents)?;
        debug!(
            path = %self.path.display(),
            requesters = registry.len(),
            "requester registry loaded"
        );
        Ok(RegistryLookup::Available(registry))
    }
}
