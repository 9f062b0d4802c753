//! Endpoint handlers end to end over the in-memory store.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use worklog::worklog::{
    adapters::memory::InMemoryWorkLogStore,
    api::{ApiError, BulkDeleteParams, ListLogsParams, WorkLogApi},
};

type TestApi = WorkLogApi<InMemoryWorkLogStore, DefaultClock>;

#[fixture]
fn api() -> TestApi {
    WorkLogApi::new(Arc::new(InMemoryWorkLogStore::new()), Arc::new(DefaultClock))
}

fn to_json(value: &impl serde::Serialize) -> Value {
    serde_json::to_value(value).expect("response serialises")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_then_fetch_uses_camel_case_wire_names(api: TestApi) {
    let body = json!({
        "taskName": "Wire format",
        "taskType": "bug",
        "taskStatus": "pr",
        "notes": "check casing",
        "startedAt": "2024-06-01T10:00:00+02:00",
        "priority": 7
    });

    let created = api
        .create_log(&body.to_string())
        .await
        .expect("create should succeed");
    let fetched = api
        .get_log(&created.log.id().to_string())
        .await
        .expect("get should succeed");
    let value = to_json(&fetched);

    assert_eq!(value.pointer("/message"), Some(&json!("Ok")));
    assert_eq!(value.pointer("/log/taskName"), Some(&json!("Wire format")));
    assert_eq!(value.pointer("/log/taskType"), Some(&json!("bug")));
    assert_eq!(value.pointer("/log/priority"), Some(&json!(7)));
    assert_eq!(
        value.pointer("/log/startedAt"),
        Some(&json!("2024-06-01T08:00:00Z"))
    );
    assert!(value.pointer("/log/logId").is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_through_handlers(api: TestApi) {
    let created = api
        .create_log(
            &json!({"taskName": "Lifecycle", "taskType": "task", "taskStatus": "backlog"})
                .to_string(),
        )
        .await
        .expect("create should succeed");
    let id = created.log.id().to_string();

    let updated = api
        .update_log(&json!({"logId": id, "taskStatus": "progress"}).to_string())
        .await
        .expect("update should succeed");
    assert_eq!(to_json(&updated).pointer("/log/taskStatus"), Some(&json!("progress")));

    let deleted = api.delete_log(&id).await.expect("delete should succeed");
    assert_eq!(to_json(&deleted), json!({"message": "Log deleted successfully"}));

    let error = api.get_log(&id).await.expect_err("log is gone");
    assert_eq!(error.status(), ApiError::NOT_FOUND);
    assert_eq!(
        to_json(&error.body()),
        json!({"message": "No records found with this log id", "logId": id})
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_rejects_non_numeric_limit(api: TestApi) {
    let params = ListLogsParams {
        limit: Some("lots".to_owned()),
        ..ListLogsParams::default()
    };

    let error = api.list_logs(&params).await.expect_err("limit is invalid");

    assert_eq!(error.status(), ApiError::UNPROCESSABLE_ENTITY);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_delete_without_ids_is_rejected(api: TestApi) {
    let error = api
        .delete_logs(&BulkDeleteParams::default())
        .await
        .expect_err("ids are required");

    assert_eq!(error.status(), ApiError::UNPROCESSABLE_ENTITY);
    assert_eq!(error.message(), "At least 1 log id is required.");
}
