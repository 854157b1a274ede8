//! Typed models of the results-API JSON payloads, version 1.
//!
//! Field names mirror the wire format. Nullable wire fields are `Option`;
//! fields beyond what the analysis consumes are carried so callers can
//! pass them through to presentation untouched.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::Observation;

/// Envelope of `GET /api/results/{project_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub status: String,
    pub project_data: ProjectData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectData {
    pub project: ProjectSummary,
    /// Keyed by subject id, serialized as a JSON object.
    pub subjects: BTreeMap<String, SubjectInfo>,
    pub samples: Vec<SampleRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: i64,
    pub project_name: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectInfo {
    pub subject_name: String,
    pub condition: String,
    pub age: i64,
}

/// One per-sample, per-population row of the results payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleRecord {
    pub id: i64,
    pub response: Option<bool>,
    pub subject_id: i64,
    pub sample_id: i64,
    pub sample_name: String,
    pub sample_type: String,
    pub time_from_treatment_start: Option<i64>,
    pub total_count: Option<i64>,
    pub population: String,
    pub count: i64,
    /// Null when the sample had no countable cells.
    pub relative_frequency: Option<f64>,
}

/// Flat project/subject/sample dataset the query module operates over,
/// shaped like the `query_results` section of the filter endpoint payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub projects: Vec<ProjectSummary>,
    pub subjects: Vec<SubjectEntry>,
    pub samples: Vec<SampleEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectEntry {
    pub id: i64,
    pub subject_name: String,
    pub condition: String,
    pub age: i64,
    pub sex: String,
    pub treatment: String,
    pub response: Option<bool>,
    pub project_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleEntry {
    pub id: i64,
    pub sample_name: String,
    pub sample_type: String,
    pub time_from_treatment_start: Option<i64>,
    pub subject_id: i64,
}

pub fn parse_results(json: &str) -> Result<ResultsResponse> {
    serde_json::from_str(json).context("malformed results payload")
}

/// Converts API sample records into analysis observations.
///
/// Records with a null relative frequency cannot enter any aggregate and
/// are dropped here, before the analysis pipeline sees them.
pub fn observations(records: &[SampleRecord]) -> Vec<Observation> {
    let rows: Vec<Observation> = records
        .iter()
        .filter_map(|record| {
            record.relative_frequency.map(|relative_frequency| Observation {
                sample_type: record.sample_type.clone(),
                population: record.population.clone(),
                response: record.response,
                relative_frequency,
            })
        })
        .collect();
    let dropped = records.len() - rows.len();
    if dropped > 0 {
        debug!(dropped, "sample records without relative frequency dropped");
    }
    rows
}
