//! SBOM repository adapters
mod file_system;
mod in_memory;

pub use file_system::FileSystemSbomRepository;
pub use in_memory::{InMemorySbomRepository, StoredSbom};
