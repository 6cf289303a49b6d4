//! # pupil-core
//!
//! Core types, ID minting, and error types for Pupil.
//!
//! This crate provides the foundational types shared across all Pupil crates:
//! - Typed entity structs for the current document schema (students, classes,
//!   monitoring documents, teacher profile)
//! - Closed enums for NAPLAN bands, evidence tags, statuses and terms
//! - ID prefix constants and the `IdSource` abstraction used by migrations
//! - Cross-cutting error types
//! - Migration journal records, backup bundles, and report types

pub mod bundle;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod journal;
pub mod responses;

/// Schema version written by the file-rehydration upgrade path.
pub const CURRENT_VERSION: u32 = 2;
