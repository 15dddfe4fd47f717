use serde::{Deserialize, Serialize};

/// One master supervisor as known to the registry at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorEntry {
    pub name: String,
    pub pid: u32,
}

impl SupervisorEntry {
    pub fn new(name: impl Into<String>, pid: u32) -> Self {
        Self {
            name: name.into(),
            pid,
        }
    }
}

/// On-disk registry document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    #[serde(default)]
    pub masters: Vec<SupervisorEntry>,
}
