use cytoview::math::stats::{mean, sample_variance, t_test_p_value};

#[test]
fn mean_basic() {
    assert_eq!(mean(&[10.0, 20.0, 30.0]), 20.0);
}

#[test]
fn mean_empty() {
    assert_eq!(mean(&[]), 0.0);
}

#[test]
fn sample_variance_basic() {
    let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    assert!((sample_variance(&v) - 2.5).abs() < 1e-12);
}

#[test]
fn sample_variance_singleton() {
    assert_eq!(sample_variance(&[7.0]), 0.0);
}

#[test]
fn t_test_requires_two_per_group() {
    assert_eq!(t_test_p_value(&[5.0], &[3.0, 4.0]), None);
    assert_eq!(t_test_p_value(&[3.0, 4.0], &[5.0]), None);
    assert_eq!(t_test_p_value(&[], &[]), None);
}

#[test]
fn t_test_separated_groups() {
    let a = vec![10.0, 12.0, 11.0, 13.0];
    let b = vec![20.0, 22.0, 19.0, 21.0];
    let p = t_test_p_value(&a, &b).unwrap();
    assert!(p > 0.0);
    assert!(p < 0.001);
}

#[test]
fn t_test_symmetric() {
    let a = vec![10.0, 12.0, 11.0, 13.0];
    let b = vec![20.0, 22.0, 19.0, 21.0];
    let p_ab = t_test_p_value(&a, &b).unwrap();
    let p_ba = t_test_p_value(&b, &a).unwrap();
    assert!((p_ab - p_ba).abs() < 1e-12);
}

#[test]
fn t_test_overlapping_groups_not_small() {
    let a = vec![10.0, 12.0, 11.0, 13.0];
    let b = vec![11.0, 13.0, 10.0, 12.0];
    let p = t_test_p_value(&a, &b).unwrap();
    assert!(p > 0.05);
    assert!(p <= 1.0);
}

#[test]
fn t_test_zero_variance_equal_means() {
    let p = t_test_p_value(&[5.0, 5.0], &[5.0, 5.0]).unwrap();
    assert_eq!(p, 1.0);
}

#[test]
fn t_test_zero_variance_distinct_means() {
    let p = t_test_p_value(&[5.0, 5.0], &[7.0, 7.0]).unwrap();
    assert_eq!(p, 0.0);
}
