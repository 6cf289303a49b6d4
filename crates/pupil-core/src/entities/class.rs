use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RecordStatus;

/// A class roster with optional seating-plan state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClassData {
    pub class_id: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub student_ids: Vec<String>,
    pub status: RecordStatus,
    /// Custom drag-and-drop ordering of the roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_sort_order: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seating_charts: Option<BTreeMap<String, SeatingChart>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_seating_chart_name: Option<String>,
}

/// Grid of seats; each cell holds a student ID or `null` for an empty seat.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatingChart {
    pub rows: u32,
    pub seats_per_row: u32,
    pub arrangement: Vec<Vec<Option<String>>>,
}
