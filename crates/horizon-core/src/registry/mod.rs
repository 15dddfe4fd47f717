//! Master supervisor registry: read seam, adapters and the local filter.

pub mod file;
pub mod naming;
pub mod types;


pub use file::{FileRegistry, StaticRegistry};
pub use naming::{local_master_prefix, master_basename};
pub use types::{RegistrySnapshot, SupervisorEntry};

use crate::errors::RegistryError;

/// Source of known master supervisors. Returns everything it knows about;
/// callers filter.
pub trait SupervisorRepository {
    fn all(&self) -> Result<Vec<SupervisorEntry>, RegistryError>;
}

/// Entries whose name starts with `prefix`, in registry order.
pub fn filter_masters(entries: &[SupervisorEntry], prefix: &str) -> Vec<SupervisorEntry> {
    entries
        .iter()
        .filter(|e| e.name.starts_with(prefix))
        .cloned()
        .collect()
}
