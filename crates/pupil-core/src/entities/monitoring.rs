use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::file::FileReference;

/// A value indexed by academic term, persisted as `{"1": .., "2": .., "3": .., "4": ..}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TermBased<T> {
    #[serde(rename = "1")]
    pub one: T,
    #[serde(rename = "2")]
    pub two: T,
    #[serde(rename = "3")]
    pub three: T,
    #[serde(rename = "4")]
    pub four: T,
}

impl<T> TermBased<T> {
    /// Iterate the four term values in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.one, &self.two, &self.three, &self.four].into_iter()
    }
}

/// Per-class, per-year compliance record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringDoc {
    pub id: String,
    pub class_id: String,
    pub year: i32,
    pub certify_syllabus: bool,
    pub scope_and_sequence: Option<FileReference>,
    pub teaching_programs: TermBased<Vec<FileReference>>,
    pub semester_reports: TermBased<Option<FileReference>>,
    pub assessment_schedule: Option<FileReference>,
    pub assessment_task1: Vec<FileReference>,
    pub assessment_task2: Vec<FileReference>,
    pub assessment_task3: Vec<FileReference>,
    pub pre_post_diagnostic: Vec<FileReference>,
    pub marks_and_ranks: TermBased<Option<FileReference>>,
    pub scanned_work_samples: ScannedWorkSamples,
    pub specific_learning_needs: TermBased<bool>,
    pub students_causing_concern: TermBased<Vec<ConcernEntry>>,
    pub illness_misadventure: TermBased<Vec<FileReference>>,
    pub malpractice: TermBased<Vec<FileReference>>,
    pub teacher_sign_off: TermBased<TermSignOff>,
    pub head_teacher_sign_off: TermBased<TermSignOff>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScannedWorkSamples {
    pub task1: WorkSampleScans,
    pub task2: WorkSampleScans,
    pub task3: WorkSampleScans,
}

/// Top, middle and low work-sample scans for one assessment task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WorkSampleScans {
    pub top: Option<FileReference>,
    pub middle: Option<FileReference>,
    pub low: Option<FileReference>,
}

/// A concern record bundling an uploaded file with the students it concerns.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConcernEntry {
    pub id: String,
    pub file: FileReference,
    pub student_ids: Vec<String>,
}

/// A term sign-off. An unsigned term has an empty name and a `null` date.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TermSignOff {
    #[serde(default)]
    pub teacher_name: String,
    pub date: Option<String>,
    /// Base64-encoded signature image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_image: Option<String>,
}

impl TermSignOff {
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.date.is_some()
    }
}
