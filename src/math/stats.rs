//! Statistical primitives for two-group comparison.

use statrs::distribution::{ContinuousCDF, StudentsT};

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance (n - 1 denominator). Zero for fewer than 2 values.
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Two-sided p-value of an unpaired Student's t-test with pooled variance
/// and a null difference-in-means of zero, df = nA + nB - 2.
///
/// Returns `None` when either group has fewer than 2 values. Total over all
/// other inputs: zero pooled spread yields 1.0 for equal means and 0.0
/// otherwise.
pub fn t_test_p_value(a: &[f64], b: &[f64]) -> Option<f64> {
    let na = a.len();
    let nb = b.len();
    if na < 2 || nb < 2 {
        return None;
    }

    let df = (na + nb - 2) as f64;
    let pooled_variance = ((na - 1) as f64 * sample_variance(a)
        + (nb - 1) as f64 * sample_variance(b))
        / df;
    let std_error = (pooled_variance * (1.0 / na as f64 + 1.0 / nb as f64)).sqrt();

    let mean_a = mean(a);
    let mean_b = mean(b);
    if std_error == 0.0 {
        return Some(if mean_a == mean_b { 1.0 } else { 0.0 });
    }

    let t = (mean_a - mean_b) / std_error;
    let dist = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => dist,
        Err(_) => return None,
    };
    Some(2.0 * dist.cdf(-t.abs()))
}
