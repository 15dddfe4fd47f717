use super::types::{RegistrySnapshot, SupervisorEntry};
use super::SupervisorRepository;
use crate::errors::RegistryError;
use std::path::{Path, PathBuf};

/// Registry snapshot stored as YAML, or JSON when the extension is `.json`.
///
/// A missing file means no master has registered yet and reads as empty.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, bytes: &[u8]) -> Result<RegistrySnapshot, RegistryError> {
        let parsed = if self.path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::from_slice(bytes).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_slice(bytes).map_err(|e| e.to_string())
        };
        parsed.map_err(|detail| RegistryError::Parse {
            path: self.path.clone(),
            detail,
        })
    }
}

impl SupervisorRepository for FileRegistry {
    fn all(&self) -> Result<Vec<SupervisorEntry>, RegistryError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "registry file absent, treating as empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(RegistryError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        // An empty document is a registry with no masters.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(self.parse(&bytes)?.masters)
    }
}

/// Fixed in-memory registry.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    entries: Vec<SupervisorEntry>,
}

impl StaticRegistry {
    pub fn new(entries: Vec<SupervisorEntry>) -> Self {
        Self { entries }
    }
}

impl SupervisorRepository for StaticRegistry {
    fn all(&self) -> Result<Vec<SupervisorEntry>, RegistryError> {
        Ok(self.entries.clone())
    }
}
