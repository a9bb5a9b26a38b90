//! Domain core: canonical components, manifest parsers, license policy
//! and SBOM document synthesis.

pub mod domain;
pub mod parsers;
pub mod policies;
pub mod services;
