mod license_catalog;

pub use license_catalog::{LicenseCatalog, DEFAULT_POLICY};
