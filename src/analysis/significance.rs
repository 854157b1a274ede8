//! Per-population significance testing.

use tracing::debug;

use crate::analysis::{PopulationValues, SignificanceResult};
use crate::math::stats::t_test_p_value;

/// Tests each population for a location difference between responders and
/// non-responders with an unpaired two-sided Student's t-test.
///
/// A population is only tested when both partitions hold at least 2 values;
/// otherwise it is reported with `p_value: None` and `significant: false`.
/// Output order matches the input order. Never panics, whatever the input
/// shape.
pub fn significance_by_population(
    groups: &[PopulationValues],
    alpha: f64,
) -> Vec<SignificanceResult> {
    groups
        .iter()
        .map(|group| {
            if group.responders.len() > 1 && group.non_responders.len() > 1 {
                let p_value = t_test_p_value(&group.responders, &group.non_responders);
                SignificanceResult {
                    population: group.population.clone(),
                    p_value,
                    significant: p_value.is_some_and(|p| p < alpha),
                }
            } else {
                debug!(
                    population = %group.population,
                    responders = group.responders.len(),
                    non_responders = group.non_responders.len(),
                    "not enough data for significance test"
                );
                SignificanceResult {
                    population: group.population.clone(),
                    p_value: None,
                    significant: false,
                }
            }
        })
        .collect()
}
