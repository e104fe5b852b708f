//! Serde roundtrip and JsonSchema validation tests for entity and draft types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use schemars::schema_for;
use lab_core::drafts::*;
use lab_core::entities::*;
use lab_core::enums::*;
use lab_core::paging::{ListEnvelope, Page};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn at(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap()
}

roundtrip_and_validate!(
    method_roundtrip,
    Method,
    Method {
        id: 3,
        name: "Nhân giống vô tính".into(),
        description: Some("Protocorm-like bodies".into()),
        method_type: MethodType::Clonal,
    }
);

roundtrip_and_validate!(
    batch_roundtrip,
    Batch,
    Batch {
        id: 7,
        name: "Batch 2024-07".into(),
        description: None,
        lab_name: Some("Lab A".into()),
    }
);

roundtrip_and_validate!(
    experiment_log_roundtrip,
    ExperimentLog,
    ExperimentLog {
        id: "el-1".into(),
        name: "Vanda cross #4".into(),
        description: None,
        method_name: Some("Lai tạo".into()),
        tissue_culture_batch_id: 7,
        tissue_culture_batch_name: Some("Batch 2024-07".into()),
        status: ExperimentLogStatus::InProcess,
        number_of_sample: 12,
        start_date: Some(at(2024, 1, 1)),
        end_date: Some(at(2024, 6, 1)),
    }
);

roundtrip_and_validate!(
    notification_roundtrip,
    Notification,
    Notification {
        id: "n-1".into(),
        user_id: "u-1".into(),
        title: "Task assigned".into(),
        content: "You have a new task".into(),
        is_read: false,
        created_at: at(2024, 3, 2),
    }
);

roundtrip_and_validate!(
    report_roundtrip,
    Report,
    Report {
        id: "r-1".into(),
        name: "Weekly check".into(),
        content: "Leaves yellowing".into(),
        status: ReportStatus::Pending,
        technician_name: Some("Lan".into()),
        created_at: at(2024, 3, 9),
    }
);

roundtrip_and_validate!(
    disease_analysis_roundtrip,
    DiseaseAnalysis,
    DiseaseAnalysis {
        stage: "seedling".into(),
        disease: Disease {
            predict: "soft_rot".into(),
            probability: BTreeMap::from([("soft_rot".into(), 0.8), ("healthy".into(), 0.2)]),
        },
    }
);

roundtrip_and_validate!(
    draft_task_roundtrip,
    DraftTask,
    DraftTask {
        name: "Measure height".into(),
        experiment_log_ref: "el-1".into(),
        stage_ref: "st-2".into(),
        is_daily: true,
        attributes: vec![Attribute {
            reference_element_id: "4".into(),
            display_name: "Chiều cao".into(),
            unit: "cm".into(),
            numeric_value: "3".into(),
            description: String::new(),
        }],
        assigned_technicians: vec!["t-1".into()],
        ..DraftTask::default()
    }
);

roundtrip_and_validate!(
    draft_experiment_log_roundtrip,
    DraftExperimentLog,
    DraftExperimentLog {
        name: "Cross".into(),
        method_id: "3".into(),
        method_type: Some(MethodType::Sexual),
        technician_ids: vec!["t-1".into(), "t-2".into()],
        ..DraftExperimentLog::default()
    }
);

#[test]
fn list_envelope_of_seedlings_parses() {
    let json = r#"{
        "value": {
            "data": [
                {"id": "s1", "localName": "Vanda X", "scientificName": "Vanda coerulea",
                 "dateOfBirth": "2024-01-01T00:00:00"}
            ],
            "totalCount": 1,
            "pageCount": 1
        }
    }"#;
    let envelope: ListEnvelope<Seedling> = serde_json::from_str(json).unwrap();
    let page: Page<Seedling> = envelope.value;
    assert_eq!(page.data[0].local_name, "Vanda X");
    assert!(page.data[0].mother_name.is_none());
}

#[test]
fn method_type_field_is_named_type_on_the_wire() {
    let json = r#"{"id": 1, "name": "Clone", "type": 0}"#;
    let method: Method = serde_json::from_str(json).unwrap();
    assert_eq!(method.method_type, MethodType::Clonal);
}
