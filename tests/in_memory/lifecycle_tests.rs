//! Create, fetch, update and delete flows through the log service.

use super::helpers::{TestService, create_all, service, task};
use chrono::{FixedOffset, TimeZone};
use rstest::rstest;
use worklog::worklog::{
    domain::{ListQuery, Priority, TaskStatus, TaskType, WorkLogDomainError, WorkLogId},
    ports::WorkLogRepositoryError,
    services::{CreateWorkLogRequest, UpdateWorkLogRequest, WorkLogServiceError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_log_round_trips_with_defaults(service: TestService) {
    let created = service
        .create(CreateWorkLogRequest::new("Ship release notes", "story", "progress"))
        .await
        .expect("create should succeed");

    let fetched = service.get(created.id()).await.expect("get should succeed");

    assert_eq!(fetched, created);
    assert_eq!(fetched.task_type(), TaskType::Story);
    assert_eq!(fetched.task_status(), TaskStatus::Progress);
    assert_eq!(fetched.priority(), Priority::default());
    assert_eq!(fetched.notes().as_str(), "N/A");
    assert_eq!(fetched.created_at(), fetched.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn offset_timestamps_are_stored_in_utc(service: TestService) {
    let plus_two = FixedOffset::east_opt(2 * 3600).expect("valid offset");
    let started = plus_two
        .with_ymd_and_hms(2024, 6, 1, 10, 0, 0)
        .single()
        .expect("valid timestamp");

    let created = service
        .create(task("Offset start").with_started_at(started))
        .await
        .expect("create should succeed");

    let stored = created.started_at().expect("start is kept");
    assert_eq!(stored.to_rfc3339(), "2024-06-01T08:00:00+00:00");
}

#[rstest]
#[case(CreateWorkLogRequest::new("  ", "task", "backlog"), WorkLogDomainError::EmptyTaskName)]
#[case(
    CreateWorkLogRequest::new("Epic", "epic", "backlog"),
    WorkLogDomainError::InvalidTaskType("epic".to_owned())
)]
#[case(
    CreateWorkLogRequest::new("Done", "task", "done"),
    WorkLogDomainError::InvalidTaskStatus("done".to_owned())
)]
#[case(
    CreateWorkLogRequest::new("Urgent", "bug", "pending").with_priority(3),
    WorkLogDomainError::InvalidPriority(3)
)]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_create_is_rejected_and_not_stored(
    service: TestService,
    #[case] request: CreateWorkLogRequest,
    #[case] expected: WorkLogDomainError,
) {
    let error = service.create(request).await.expect_err("create should fail");
    assert!(matches!(error, WorkLogServiceError::Domain(ref domain) if *domain == expected));

    let page = service
        .list(&ListQuery::new())
        .await
        .expect("listing should succeed");
    assert_eq!(page.total_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_names_are_rejected(service: TestService) {
    create_all(&service, [task("Unique")]).await;

    let error = service
        .create(CreateWorkLogRequest::new("Unique", "bug", "pr"))
        .await
        .expect_err("duplicate should fail");

    assert!(matches!(
        error,
        WorkLogServiceError::Repository(WorkLogRepositoryError::DuplicateTaskName(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sparse_update_changes_only_supplied_fields(service: TestService) {
    let created = service
        .create(task("Sparse").with_notes("first draft").with_priority(7))
        .await
        .expect("create should succeed");

    let updated = service
        .update(
            created.id(),
            UpdateWorkLogRequest::new().with_task_status("staging"),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.task_status(), TaskStatus::Staging);
    assert_eq!(updated.task_name(), created.task_name());
    assert_eq!(updated.notes().as_str(), "first draft");
    assert_eq!(updated.priority(), created.priority());
    assert_eq!(updated.created_at(), created.created_at());
    assert!(updated.updated_at() >= created.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn renaming_onto_a_taken_name_conflicts(service: TestService) {
    let logs = create_all(&service, [task("Alpha"), task("Beta")]).await;
    let beta = logs.last().expect("two logs created");

    let error = service
        .update(beta.id(), UpdateWorkLogRequest::new().with_task_name("Alpha"))
        .await
        .expect_err("rename should conflict");

    assert!(matches!(
        error,
        WorkLogServiceError::Repository(WorkLogRepositoryError::DuplicateTaskName(_))
    ));
    let unchanged = service.get(beta.id()).await.expect("beta still exists");
    assert_eq!(unchanged.task_name().as_str(), "Beta");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_with_only_blank_fields_is_rejected(service: TestService) {
    let created = service
        .create(task("Blank update"))
        .await
        .expect("create should succeed");

    let error = service
        .update(
            created.id(),
            UpdateWorkLogRequest::new()
                .with_task_name("  ")
                .with_notes(""),
        )
        .await
        .expect_err("update should fail");

    assert!(matches!(error, WorkLogServiceError::NoFieldsToUpdate));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_ids_report_not_found(service: TestService) {
    let id = WorkLogId::new();

    let get = service.get(id).await.expect_err("get should fail");
    let update = service
        .update(id, UpdateWorkLogRequest::new().with_notes("x"))
        .await
        .expect_err("update should fail");
    let delete = service.delete(id).await.expect_err("delete should fail");

    for error in [get, update, delete] {
        assert!(matches!(
            error,
            WorkLogServiceError::Repository(WorkLogRepositoryError::NotFound(missing))
                if missing == id
        ));
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_twice_reports_not_found_the_second_time(service: TestService) {
    let created = service
        .create(task("Short lived"))
        .await
        .expect("create should succeed");

    service
        .delete(created.id())
        .await
        .expect("first delete should succeed");
    let error = service
        .delete(created.id())
        .await
        .expect_err("second delete should fail");

    assert!(matches!(
        error,
        WorkLogServiceError::Repository(WorkLogRepositoryError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_delete_counts_only_existing_rows(service: TestService) {
    let logs = create_all(&service, [task("One"), task("Two"), task("Three")]).await;
    let mut ids: Vec<WorkLogId> = logs.iter().take(2).map(|log| log.id()).collect();
    ids.push(WorkLogId::new());

    let removed = service
        .delete_many(&ids)
        .await
        .expect("bulk delete should succeed");

    assert_eq!(removed, 2);
    let page = service
        .list(&ListQuery::new())
        .await
        .expect("listing should succeed");
    assert_eq!(page.total_count(), 1);
}
