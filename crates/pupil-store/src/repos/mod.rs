//! libSQL implementations of the storage traits for `PupilDb`.

pub mod blob;
pub mod document;
