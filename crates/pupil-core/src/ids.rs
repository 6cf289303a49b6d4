//! ID prefixes and ID minting.
//!
//! Every generated ID is `{prefix}-{suffix}`. Production IDs use a random
//! v4 UUID suffix; tests use [`SequentialIds`] so migrated documents are
//! reproducible byte for byte.

use std::collections::HashMap;

use uuid::Uuid;

use crate::errors::CoreError;

/// Blob-store file references (`file-…`).
pub const PREFIX_FILE: &str = "file";
/// Concern entries inside monitoring documents (`concern-…`).
pub const PREFIX_CONCERN: &str = "concern";
/// Numeracy evidence entries (`num-ev-…`).
pub const PREFIX_NUMERACY_EVIDENCE: &str = "num-ev";

/// Source of fresh, process-unique IDs.
pub trait IdSource {
    /// Mint a new ID with the given prefix.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Entropy` if the underlying source cannot produce
    /// an ID.
    fn next_id(&mut self, prefix: &str) -> Result<String, CoreError>;
}

/// Random v4 UUID suffixes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self, prefix: &str) -> Result<String, CoreError> {
        Ok(format!("{prefix}-{}", Uuid::new_v4()))
    }
}

/// Deterministic IDs: an independent counter per prefix.
///
/// Counters are per prefix so that minting IDs for one entity class never
/// shifts the IDs minted for another.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    counters: HashMap<String, u64>,
}

impl SequentialIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> Result<String, CoreError> {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        Ok(format!("{prefix}-{counter:08}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn random_ids_are_prefixed_and_unique() {
        let mut ids = RandomIds;
        let minted: HashSet<String> = (0..200)
            .map(|_| ids.next_id(PREFIX_FILE).unwrap())
            .collect();
        assert_eq!(minted.len(), 200);
        assert!(minted.iter().all(|id| id.starts_with("file-")));
        let suffix = minted.iter().next().unwrap().trim_start_matches("file-");
        let parsed = Uuid::parse_str(suffix).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn sequential_ids_count_per_prefix() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(PREFIX_FILE).unwrap(), "file-00000001");
        assert_eq!(ids.next_id(PREFIX_CONCERN).unwrap(), "concern-00000001");
        assert_eq!(ids.next_id(PREFIX_FILE).unwrap(), "file-00000002");
    }
}
