//! Typed entities for the current (version 2) document schema.
//!
//! Persisted JSON uses camelCase keys. Fields that the migration pipeline
//! guarantees (NAPLAN data sets, note lists, learning-support lists, evidence
//! tags, class status) are required; everything the UI may legitimately omit
//! carries `#[serde(default)]`. All structs derive `JsonSchema` so the schema
//! registry can validate migrated documents.

mod class;
mod document;
mod file;
mod monitoring;
mod student;
mod teacher;

pub use class::{ClassData, SeatingChart};
pub use document::Document;
pub use file::FileReference;
pub use monitoring::{
    ConcernEntry, MonitoringDoc, ScannedWorkSamples, TermBased, TermSignOff, WorkSampleScans,
};
pub use student::{
    DifferentiationEntry, EvidenceLogEntry, HpgeEvidence, LearningSupport, LiteracyEvidenceEntry,
    Naplan, NaplanDataSet, NoteEntry, NumeracyEvidenceEntry, ReportGrade, Student,
    StudentAcademic, StudentHpge, StudentProfile, StudentWellbeing, WorkSample,
};
pub use teacher::Teacher;
