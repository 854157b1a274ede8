//! Responder vs. non-responder analysis over one project's observation rows.
//!
//! The pipeline is linear: filter by sample type, partition by response
//! flag, then aggregate per-population means, merge them into a comparison
//! table, collect raw value distributions, and test each population for a
//! significant location difference. Every stage is a pure function over its
//! arguments; [`analyze_project`] just wires them together.

pub mod aggregate;
pub mod significance;

use tracing::{debug, info};

use crate::analysis::aggregate::{
    average_by_population, collect_population_values, filter_by_sample_type, merge_comparison,
    partition_by_response,
};
use crate::analysis::significance::significance_by_population;

pub const DEFAULT_ALPHA: f64 = 0.05;
pub const DEFAULT_SAMPLE_TYPE: &str = "PBMC";

/// One row of per-sample, per-population measurement data, as delivered by
/// the results API. `response` is absent for samples whose subject is not
/// response-evaluable.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub sample_type: String,
    pub population: String,
    pub response: Option<bool>,
    /// Percentage scale, 0 to 100.
    pub relative_frequency: f64,
}

/// Mean relative frequency of one population within one partition.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationAverage {
    pub population: String,
    pub average: f64,
}

/// One population's averages from both partitions, keyed on group A.
/// `group_b` is 0.0 when the population has no group-B average.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub population: String,
    pub group_a: f64,
    pub group_b: f64,
}

/// Raw relative-frequency values of one population, split by response.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationValues {
    pub population: String,
    pub responders: Vec<f64>,
    pub non_responders: Vec<f64>,
}

/// Outcome of the per-population significance test. `p_value` is `None`
/// when either partition held fewer than 2 values for the population.
#[derive(Debug, Clone, PartialEq)]
pub struct SignificanceResult {
    pub population: String,
    pub p_value: Option<f64>,
    pub significant: bool,
}

#[derive(Debug, Clone)]
pub struct AnalysisParams {
    /// Exact, case-sensitive sample type the analysis is restricted to.
    pub sample_type: String,
    /// Significance threshold for the two-sample test.
    pub alpha: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            sample_type: DEFAULT_SAMPLE_TYPE.to_string(),
            alpha: DEFAULT_ALPHA,
        }
    }
}

/// Everything the dashboard renders for one project.
#[derive(Debug, Clone)]
pub struct ProjectAnalysis {
    /// Per-population mean comparison, responders as group A.
    pub comparison: Vec<ComparisonRow>,
    /// Raw value lists per population, for distribution-style display.
    pub distributions: Vec<PopulationValues>,
    /// One result per population, same order as `distributions`.
    pub significance: Vec<SignificanceResult>,
    /// Rows of the target sample type whose response flag was absent and
    /// which therefore entered neither partition.
    pub excluded_no_response: usize,
}

/// Runs the full analysis pipeline over one project's rows.
///
/// Recomputes everything from scratch; no state is carried between calls.
/// The population universe for `distributions` and `significance` is taken
/// from the full row set, so a population seen only outside the target
/// sample type still appears, with empty value lists and no p-value.
pub fn analyze_project(rows: &[Observation], params: &AnalysisParams) -> ProjectAnalysis {
    let filtered = filter_by_sample_type(rows, &params.sample_type);
    debug!(
        rows = rows.len(),
        matching = filtered.len(),
        sample_type = %params.sample_type,
        "sample type filter applied"
    );

    let partition = partition_by_response(&filtered);
    let excluded_no_response = filtered.len() - partition.responders.len() - partition.non_responders.len();
    debug!(
        responders = partition.responders.len(),
        non_responders = partition.non_responders.len(),
        excluded = excluded_no_response,
        "response partition built"
    );

    let responder_averages = average_by_population(&partition.responders);
    let non_responder_averages = average_by_population(&partition.non_responders);
    let comparison = merge_comparison(&responder_averages, &non_responder_averages);

    let distributions =
        collect_population_values(rows, &partition.responders, &partition.non_responders);
    let significance = significance_by_population(&distributions, params.alpha);

    info!(
        populations = distributions.len(),
        compared = comparison.len(),
        significant = significance.iter().filter(|r| r.significant).count(),
        "project analysis finished"
    );

    ProjectAnalysis {
        comparison,
        distributions,
        significance,
        excluded_no_response,
    }
}
