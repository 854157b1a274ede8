//! Ad-hoc filtered queries over a project/subject/sample dataset.
//!
//! Filters cascade: projects are narrowed by name, subjects must belong to
//! a kept project and match the subject-level constraints, samples must
//! belong to a kept subject and match the sample-level constraints. A kept
//! project with no matching subjects still appears in the results.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::v1::{Dataset, ProjectSummary, SampleEntry, SubjectEntry};

/// Comparison operator for the numeric query fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Eq,
    Lt,
    Gt,
}

impl Comparison {
    pub fn matches(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Comparison::Eq => lhs == rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Gt => lhs > rhs,
        }
    }
}

impl FromStr for Comparison {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Comparison::Eq),
            "lt" => Ok(Comparison::Lt),
            "gt" => Ok(Comparison::Gt),
            other => bail!("unknown comparison operator: {}", other),
        }
    }
}

/// Optional query constraints. An omitted field means "no constraint", not
/// zero or false. String fields match exactly; a numeric value without an
/// operator defaults to equality, and an operator without a value is a
/// no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryFilters {
    pub project: Option<String>,
    pub condition: Option<String>,
    pub sex: Option<String>,
    pub treatment: Option<String>,
    pub sample_type: Option<String>,
    pub age: Option<i64>,
    pub age_op: Option<Comparison>,
    pub time_from_treatment_start: Option<i64>,
    pub time_op: Option<Comparison>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResults {
    pub projects: Vec<ProjectSummary>,
    pub subjects: Vec<SubjectEntry>,
    pub samples: Vec<SampleEntry>,
}

/// Summary counts over the kept subjects and samples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryStats {
    pub responders: usize,
    pub non_responders: usize,
    pub males: usize,
    pub females: usize,
    /// Kept samples counted under their project's name.
    pub samples_per_project: BTreeMap<String, usize>,
}

#[derive(Debug, Clone)]
pub struct QueryOutput {
    pub results: QueryResults,
    pub stats: QueryStats,
}

pub fn run_query(dataset: &Dataset, filters: &QueryFilters) -> QueryOutput {
    let projects: Vec<ProjectSummary> = dataset
        .projects
        .iter()
        .filter(|project| match &filters.project {
            Some(name) => project.project_name == *name,
            None => true,
        })
        .cloned()
        .collect();
    let project_ids: HashSet<i64> = projects.iter().map(|p| p.id).collect();

    let subjects: Vec<SubjectEntry> = dataset
        .subjects
        .iter()
        .filter(|subject| project_ids.contains(&subject.project_id) && matches_subject(subject, filters))
        .cloned()
        .collect();
    let subject_project: HashMap<i64, i64> =
        subjects.iter().map(|s| (s.id, s.project_id)).collect();

    let samples: Vec<SampleEntry> = dataset
        .samples
        .iter()
        .filter(|sample| {
            subject_project.contains_key(&sample.subject_id) && matches_sample(sample, filters)
        })
        .cloned()
        .collect();

    debug!(
        projects = projects.len(),
        subjects = subjects.len(),
        samples = samples.len(),
        "query filters applied"
    );

    let stats = compute_stats(&projects, &subjects, &samples, &subject_project);
    QueryOutput {
        results: QueryResults {
            projects,
            subjects,
            samples,
        },
        stats,
    }
}

fn matches_subject(subject: &SubjectEntry, filters: &QueryFilters) -> bool {
    if let Some(condition) = &filters.condition {
        if subject.condition != *condition {
            return false;
        }
    }
    if let Some(sex) = &filters.sex {
        if subject.sex != *sex {
            return false;
        }
    }
    if let Some(treatment) = &filters.treatment {
        if subject.treatment != *treatment {
            return false;
        }
    }
    if let Some(age) = filters.age {
        let op = filters.age_op.unwrap_or(Comparison::Eq);
        if !op.matches(subject.age, age) {
            return false;
        }
    }
    true
}

fn matches_sample(sample: &SampleEntry, filters: &QueryFilters) -> bool {
    if let Some(sample_type) = &filters.sample_type {
        if sample.sample_type != *sample_type {
            return false;
        }
    }
    if let Some(time) = filters.time_from_treatment_start {
        let op = filters.time_op.unwrap_or(Comparison::Eq);
        // A sample with no recorded time never satisfies a time constraint.
        match sample.time_from_treatment_start {
            Some(value) => {
                if !op.matches(value, time) {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

fn compute_stats(
    projects: &[ProjectSummary],
    subjects: &[SubjectEntry],
    samples: &[SampleEntry],
    subject_project: &HashMap<i64, i64>,
) -> QueryStats {
    let mut stats = QueryStats::default();

    for subject in subjects {
        match subject.response {
            Some(true) => stats.responders += 1,
            Some(false) => stats.non_responders += 1,
            None => {}
        }
        let sex = subject.sex.to_lowercase();
        if sex.starts_with('m') {
            stats.males += 1;
        } else if sex.starts_with('f') {
            stats.females += 1;
        }
    }

    let project_names: HashMap<i64, &str> = projects
        .iter()
        .map(|p| (p.id, p.project_name.as_str()))
        .collect();
    for sample in samples {
        let name = subject_project
            .get(&sample.subject_id)
            .and_then(|project_id| project_names.get(project_id));
        if let Some(name) = name {
            *stats.samples_per_project.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    stats
}
