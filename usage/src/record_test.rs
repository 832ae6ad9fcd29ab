use super::*;
use serde_json::json;

fn compute() -> ComputeUsageRecord {
    ComputeUsageRecord {
        username: "jdoe".into(),
        local_project_id: "TG-ABC123".into(),
        local_record_id: "12345.sched".into(),
        resource: "bridges2.psc.xsede.org".into(),
        submit_time: "2021-03-01T10:00:00Z".into(),
        start_time: "2021-03-01T10:05:00Z".into(),
        end_time: "2021-03-01T11:05:00Z".into(),
        charge: 128.0,
        attributes: ComputeAttributes {
            node_count: 2,
            queue: Some("RM".into()),
            ..ComputeAttributes::default()
        },
        parent_record_id: None,
    }
}

#[test]
fn compute_record_uses_wire_names() {
    let value = serde_json::to_value(compute()).unwrap();
    assert_eq!(value["Username"], "jdoe");
    assert_eq!(value["LocalProjectID"], "TG-ABC123");
    assert_eq!(value["LocalRecordID"], "12345.sched");
    assert_eq!(value["SubmitTime"], "2021-03-01T10:00:00Z");
    assert_eq!(value["Charge"], 128.0);
    assert_eq!(value["Attributes"], json!({"NodeCount": 2, "Queue": "RM"}));
    assert!(value.get("ParentRecordID").is_none());
}

#[test]
fn compute_record_keeps_parent_id() {
    let mut record = compute();
    record.parent_record_id = Some("12000".into());
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["ParentRecordID"], "12000");
    let back: ComputeUsageRecord = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}

#[test]
fn storage_attributes_default_when_absent() {
    let value = json!({
        "Username": "jdoe",
        "LocalProjectID": "TG-ABC123",
        "LocalRecordID": "snap-1",
        "Resource": "ranch.tacc.xsede.org",
        "CollectionTime": "2021-03-01T00:00:00Z",
        "Charge": 1.5
    });
    let record = UsageRecord::from_value(UsageType::Storage, value).unwrap();
    let UsageRecord::Storage(storage) = &record else {
        panic!("expected storage record, got {record:?}");
    };
    assert_eq!(storage.attributes, StorageAttributes::default());
    assert_eq!(record.local_record_id(), "snap-1");
}

#[test]
fn adjustment_types_are_kebab_case() {
    assert_eq!(serde_json::to_value(AdjustmentType::StorageCredit).unwrap(), json!("storage-credit"));
    assert_eq!(
        serde_json::from_value::<AdjustmentType>(json!("reservation")).unwrap(),
        AdjustmentType::Reservation
    );
    assert!(serde_json::from_value::<AdjustmentType>(json!("bonus")).is_err());
}

#[test]
fn from_value_checks_layout_for_type() {
    let value = serde_json::to_value(compute()).unwrap();
    assert!(UsageRecord::from_value(UsageType::Compute, value.clone()).is_ok());
    let err = UsageRecord::from_value(UsageType::Adjustment, value).unwrap_err();
    assert!(matches!(err, UsageError::Json(_)));
}

#[test]
fn untagged_record_serializes_bare() {
    let record = UsageRecord::from(compute());
    assert_eq!(record.usage_type(), UsageType::Compute);
    assert_eq!(serde_json::to_value(&record).unwrap(), serde_json::to_value(compute()).unwrap());
}
