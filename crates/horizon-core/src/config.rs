use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "horizon.yaml";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HorizonConfig {
    /// Publish the wait flag alongside every restart request.
    pub fast_termination: bool,

    /// Master name prefix. Defaults to the slugged host name.
    pub prefix: Option<String>,

    /// SQLite file holding the restart marker and wait flag.
    pub store_path: PathBuf,

    /// Registry snapshot listing known master supervisors.
    pub registry_path: PathBuf,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            fast_termination: false,
            prefix: None,
            store_path: PathBuf::from(".horizon/state.db"),
            registry_path: PathBuf::from(".horizon/masters.yaml"),
        }
    }
}

impl HorizonConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    /// Load an explicitly named config, or fall back to `horizon.yaml`
    /// (defaults when that is absent too).
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::from_file(Path::new(DEFAULT_CONFIG_PATH)) {
                Err(ConfigError::NotFound(_)) => Ok(Self::default()),
                other => other,
            },
        }
    }
}
