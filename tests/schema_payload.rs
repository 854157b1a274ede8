use cytoview::analysis::{analyze_project, AnalysisParams};
use cytoview::schema::v1::{observations, parse_results};

const PAYLOAD: &str = r#"{
  "status": "success",
  "project_data": {
    "project": { "id": 1, "project_name": "prj1", "date": "2025-06-01" },
    "subjects": {
      "1": { "subject_name": "sbj1", "condition": "melanoma", "age": 62 },
      "2": { "subject_name": "sbj2", "condition": "melanoma", "age": 45 }
    },
    "samples": [
      {
        "id": 10, "response": true, "subject_id": 1, "sample_id": 5,
        "sample_name": "s1", "sample_type": "PBMC",
        "time_from_treatment_start": 0, "total_count": 5000,
        "population": "cd8_t_cell", "count": 500, "relative_frequency": 10.0
      },
      {
        "id": 11, "response": false, "subject_id": 2, "sample_id": 6,
        "sample_name": "s2", "sample_type": "PBMC",
        "time_from_treatment_start": null, "total_count": 4000,
        "population": "cd8_t_cell", "count": 1200, "relative_frequency": 30.0
      },
      {
        "id": 12, "response": true, "subject_id": 1, "sample_id": 5,
        "sample_name": "s1", "sample_type": "PBMC",
        "time_from_treatment_start": 0, "total_count": null,
        "population": "nk_cell", "count": 0, "relative_frequency": null
      }
    ]
  }
}"#;

#[test]
fn parses_results_payload() {
    let response = parse_results(PAYLOAD).unwrap();
    assert_eq!(response.status, "success");
    assert_eq!(response.project_data.project.project_name, "prj1");
    assert_eq!(response.project_data.subjects.len(), 2);
    assert_eq!(response.project_data.subjects["1"].age, 62);
    assert_eq!(response.project_data.samples.len(), 3);
    assert_eq!(response.project_data.samples[1].time_from_treatment_start, None);
}

#[test]
fn rejects_malformed_payload() {
    assert!(parse_results("{\"status\": \"success\"}").is_err());
    assert!(parse_results("not json").is_err());
}

#[test]
fn observations_drop_records_without_relative_frequency() {
    let response = parse_results(PAYLOAD).unwrap();
    let rows = observations(&response.project_data.samples);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].population, "cd8_t_cell");
    assert_eq!(rows[0].relative_frequency, 10.0);
    assert_eq!(rows[1].response, Some(false));
}

#[test]
fn payload_feeds_the_analysis_pipeline() {
    let response = parse_results(PAYLOAD).unwrap();
    let rows = observations(&response.project_data.samples);
    let analysis = analyze_project(&rows, &AnalysisParams::default());
    assert_eq!(analysis.comparison.len(), 1);
    assert_eq!(analysis.comparison[0].group_a, 10.0);
    assert_eq!(analysis.comparison[0].group_b, 30.0);
}

#[test]
fn payload_roundtrip() {
    let response = parse_results(PAYLOAD).unwrap();
    let json = serde_json::to_string(&response).unwrap();
    let decoded = parse_results(&json).unwrap();
    assert_eq!(decoded.project_data.samples.len(), 3);
    assert_eq!(decoded.project_data.samples[2].relative_frequency, None);
}
