//! # pupil-schema
//!
//! JSON Schema generation, validation, and registry for Pupil.
//!
//! Entity types are defined in `pupil-core` with `#[derive(JsonSchema)]`.
//! This crate builds the registry from those types and validates migrated
//! documents against it before they are handed to the application.

pub mod error;
pub mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
