//! Closed enumerations used by the student record schema.
//!
//! Wire names match the persisted JSON exactly (several contain spaces), so
//! every variant carries an explicit `#[serde(rename)]` where needed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// NaplanBand
// ---------------------------------------------------------------------------

/// NAPLAN proficiency band for a single subject.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum NaplanBand {
    #[serde(rename = "Needs additional support")]
    NeedsAdditionalSupport,
    Developing,
    Strong,
    Exceeding,
    #[default]
    #[serde(rename = "Not Assessed")]
    NotAssessed,
}

impl NaplanBand {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NeedsAdditionalSupport => "Needs additional support",
            Self::Developing => "Developing",
            Self::Strong => "Strong",
            Self::Exceeding => "Exceeding",
            Self::NotAssessed => "Not Assessed",
        }
    }
}

impl fmt::Display for NaplanBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five NAPLAN subjects, in the order they appear in a data set.
pub const NAPLAN_SUBJECTS: [&str; 5] = ["reading", "writing", "spelling", "grammar", "numeracy"];

// ---------------------------------------------------------------------------
// EvidenceTag
// ---------------------------------------------------------------------------

/// Category tag on an evidence log entry.
///
/// `Nccd` marks entries relevant to disability-adjustment reporting; only
/// those carry a meaningful `adjustment_level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EvidenceTag {
    Wellbeing,
    #[serde(rename = "Learning Support")]
    LearningSupport,
    #[serde(rename = "HPGE")]
    Hpge,
    #[serde(rename = "NCCD")]
    Nccd,
    Cultural,
}

impl EvidenceTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wellbeing => "Wellbeing",
            Self::LearningSupport => "Learning Support",
            Self::Hpge => "HPGE",
            Self::Nccd => "NCCD",
            Self::Cultural => "Cultural",
        }
    }
}

impl fmt::Display for EvidenceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Literacy / numeracy tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum LiteracyTag {
    Reading,
    Writing,
    Spelling,
    Grammar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum NumeracyTag {
    Number,
    Algebra,
    Measurement,
    Geometry,
    Statistics,
    ProblemSolving,
    Reasoning,
    Calculating,
}

/// Newman's error analysis stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum NewmansTag {
    #[serde(rename = "Read it")]
    ReadIt,
    What,
    How,
    #[serde(rename = "Have a Go")]
    HaveAGo,
    #[serde(rename = "Answer it")]
    AnswerIt,
}

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

/// Lifecycle status shared by classes and student profiles.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum RecordStatus {
    #[default]
    Active,
    Archived,
}

impl RecordStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Archived => "Archived",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum AtsiStatus {
    No,
    Yes,
    #[default]
    #[serde(rename = "Not Stated")]
    NotStated,
}

/// High Potential and Gifted Education identification status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum HpgeStatus {
    #[serde(rename = "Not Identified")]
    NotIdentified,
    Nominated,
    Identified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum HpgeDomain {
    #[serde(rename = "Not Applicable")]
    NotApplicable,
    Intellectual,
    Creative,
    #[serde(rename = "Social-Emotional")]
    SocialEmotional,
    Physical,
}

// ---------------------------------------------------------------------------
// Term
// ---------------------------------------------------------------------------

/// Academic term. Term-based fields are JSON objects keyed `"1"`..`"4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    One,
    Two,
    Three,
    Four,
}

impl Term {
    pub const ALL: [Self; 4] = [Self::One, Self::Two, Self::Three, Self::Four];

    /// The object key used for this term in persisted term-based fields.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
