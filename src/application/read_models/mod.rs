//! Read models for CQRS-lite pattern
//!
//! This module contains the view struct every export formatter renders
//! from, plus the builder that assembles it from domain objects.

pub mod sbom_read_model;
pub mod sbom_read_model_builder;

pub use sbom_read_model::SbomReadModel;
pub use sbom_read_model_builder::SbomReadModelBuilder;
