//! Filter, partition, aggregation and merge stages.
//!
//! All stages preserve first-occurrence order of populations and never
//! allocate a group without at least one member.

use std::collections::{HashMap, HashSet};

use crate::analysis::{ComparisonRow, Observation, PopulationAverage, PopulationValues};

/// Rows split by response flag. Rows with no flag land in neither side.
#[derive(Debug, Clone, Default)]
pub struct ResponsePartition {
    pub responders: Vec<Observation>,
    pub non_responders: Vec<Observation>,
}

/// Exact, case-sensitive restriction to one sample type, order preserved.
pub fn filter_by_sample_type(rows: &[Observation], sample_type: &str) -> Vec<Observation> {
    rows.iter()
        .filter(|row| row.sample_type == sample_type)
        .cloned()
        .collect()
}

pub fn partition_by_response(rows: &[Observation]) -> ResponsePartition {
    let mut partition = ResponsePartition::default();
    for row in rows {
        match row.response {
            Some(true) => partition.responders.push(row.clone()),
            Some(false) => partition.non_responders.push(row.clone()),
            None => {}
        }
    }
    partition
}

/// Mean relative frequency per population, emitted in first-occurrence
/// order. Only populations with at least one row appear.
pub fn average_by_population(rows: &[Observation]) -> Vec<PopulationAverage> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();
    for row in rows {
        let slot = *index.entry(row.population.as_str()).or_insert_with(|| {
            groups.push((row.population.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row.relative_frequency);
    }

    groups
        .into_iter()
        .map(|(population, values)| PopulationAverage {
            population: population.to_string(),
            average: values.iter().sum::<f64>() / values.len() as f64,
        })
        .collect()
}

/// Joins two per-population average lists, keyed on `a`. A population
/// missing from `b` gets 0.0 as its B value; populations only in `b` are
/// dropped. Output order is the order of `a`.
pub fn merge_comparison(a: &[PopulationAverage], b: &[PopulationAverage]) -> Vec<ComparisonRow> {
    a.iter()
        .map(|entry| {
            let matched = b
                .iter()
                .find(|other| other.population == entry.population)
                .map(|other| other.average)
                .unwrap_or(0.0);
            ComparisonRow {
                population: entry.population.clone(),
                group_a: entry.average,
                group_b: matched,
            }
        })
        .collect()
}

/// Raw value lists per population for both partitions. The population
/// universe comes from `all_rows`, in first-occurrence order, so it can be
/// wider than what either partition holds.
pub fn collect_population_values(
    all_rows: &[Observation],
    responders: &[Observation],
    non_responders: &[Observation],
) -> Vec<PopulationValues> {
    distinct_populations(all_rows)
        .into_iter()
        .map(|population| PopulationValues {
            responders: values_for(responders, &population),
            non_responders: values_for(non_responders, &population),
            population,
        })
        .collect()
}

fn distinct_populations(rows: &[Observation]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut populations = Vec::new();
    for row in rows {
        if seen.insert(row.population.as_str()) {
            populations.push(row.population.clone());
        }
    }
    populations
}

fn values_for(rows: &[Observation], population: &str) -> Vec<f64> {
    rows.iter()
        .filter(|row| row.population == population)
        .map(|row| row.relative_frequency)
        .collect()
}
