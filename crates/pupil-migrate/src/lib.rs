//! # pupil-migrate
//!
//! Brings a persisted Pupil document of any historical shape up to the
//! current schema.
//!
//! The pipeline has two stages:
//! - [`rehydrate`] walks the raw tree and moves legacy inline files into the
//!   blob store, leaving `{id, name}` references behind. It is the only
//!   asynchronous step.
//! - The [`MigrationRegistry`] runs the per-entity field migrators in a fixed
//!   order. Each one is a synchronous value-in/value-out transformation that
//!   reports whether it changed anything.
//!
//! [`Orchestrator`] decides which stages run from the document's `version`
//! tag and whether the result must be written back. [`DocumentController`]
//! owns the live document afterwards.

pub mod backup;
pub mod context;
pub mod controller;
pub mod error;
pub mod migrators;
pub mod orchestrator;
pub mod registry;
pub mod rehydrate;
pub mod shape;

pub use context::MigrationContext;
pub use controller::DocumentController;
pub use error::MigrationError;
pub use migrators::Migrated;
pub use orchestrator::{MigrationOutcome, Orchestrator};
pub use registry::{FieldMigrator, MigrationRegistry};
pub use rehydrate::{Rehydrated, rehydrate};
