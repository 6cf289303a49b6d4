use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::file::FileReference;
use crate::enums::{
    AtsiStatus, EvidenceTag, HpgeDomain, HpgeStatus, LiteracyTag, NaplanBand, NewmansTag,
    NumeracyTag, RecordStatus,
};

/// A student record and all of its nested sub-records.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub profile: StudentProfile,
    pub academic: StudentAcademic,
    pub wellbeing: StudentWellbeing,
    pub hpge: StudentHpge,
    #[serde(default)]
    pub evidence_log: Vec<EvidenceLogEntry>,
    #[serde(default)]
    pub work_samples: Vec<WorkSample>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub atsi_status: AtsiStatus,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub pronouns: String,
    #[serde(default)]
    pub current_year_group: u32,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentAcademic {
    pub naplan: Naplan,
    #[serde(default)]
    pub report_grades: Vec<ReportGrade>,
    pub notes: Vec<NoteEntry>,
    pub learning_support: LearningSupport,
}

/// NAPLAN results for both tested year levels. Both are always present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Naplan {
    pub year7: NaplanDataSet,
    pub year9: NaplanDataSet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NaplanDataSet {
    pub reading: NaplanBand,
    pub writing: NaplanBand,
    pub spelling: NaplanBand,
    pub grammar: NaplanBand,
    pub numeracy: NaplanBand,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportGrade {
    pub id: String,
    /// Reporting period, e.g. `Y7S1`.
    pub period: String,
    pub grade: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NoteEntry {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LearningSupport {
    #[serde(default)]
    pub is_swan: bool,
    #[serde(default)]
    pub requires_learning_centre_booking: bool,
    #[serde(default)]
    pub differentiation: Vec<DifferentiationEntry>,
    pub numeracy_evidence: Vec<NumeracyEvidenceEntry>,
    pub literacy_evidence: Vec<LiteracyEvidenceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DifferentiationEntry {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileReference>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LiteracyEvidenceEntry {
    pub id: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileReference>,
    #[serde(default)]
    pub tags: Vec<LiteracyTag>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NumeracyEvidenceEntry {
    pub id: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileReference>,
    pub numeracy_tags: Vec<NumeracyTag>,
    pub newmans_tags: Vec<NewmansTag>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentWellbeing {
    #[serde(default)]
    pub has_behaviour_plan: bool,
    #[serde(default)]
    pub behaviour_plan_link: String,
    #[serde(default)]
    pub has_learning_plan: bool,
    #[serde(default)]
    pub learning_plan_link: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub proactive_strategies: Vec<String>,
    #[serde(default)]
    pub deescalation_strategies: Vec<String>,
    #[serde(default)]
    pub medical_needs: Vec<String>,
    #[serde(default)]
    pub attendance_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_log: Option<Vec<EvidenceLogEntry>>,
    #[serde(default)]
    pub sentral_behaviour_summary: String,
    pub notes: Vec<NoteEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentHpge {
    #[serde(default = "default_hpge_status")]
    pub status: HpgeStatus,
    #[serde(default = "default_hpge_domain")]
    pub domain: HpgeDomain,
    #[serde(default)]
    pub identification_evidence: Vec<HpgeEvidence>,
    #[serde(default)]
    pub talent_development_plan: String,
    pub notes: Vec<NoteEntry>,
}

const fn default_hpge_status() -> HpgeStatus {
    HpgeStatus::NotIdentified
}

const fn default_hpge_domain() -> HpgeDomain {
    HpgeDomain::NotApplicable
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HpgeEvidence {
    pub id: String,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_file: Option<FileReference>,
}

/// A tagged evidence note. `adjustment_level` is meaningful when tagged NCCD.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceLogEntry {
    pub log_id: String,
    pub date: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub note: String,
    pub tags: Vec<EvidenceTag>,
    #[serde(
        rename = "adjustment_level",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub adjustment_level: Option<String>,
    #[serde(
        rename = "adjustments_used",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub adjustments_used: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_file: Option<FileReference>,
}

impl EvidenceLogEntry {
    /// Whether this entry counts toward NCCD adjustment reporting.
    #[must_use]
    pub fn is_nccd(&self) -> bool {
        self.tags.contains(&EvidenceTag::Nccd)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkSample {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_upload: Option<FileReference>,
}
