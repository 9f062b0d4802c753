//! Round trips, name uniqueness and deletion against `PostgreSQL`.

use super::helpers::{prepared_context, task, utc};
use chrono::{DateTime, TimeDelta};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use worklog::worklog::{
    domain::{ListQuery, TaskStatus, WorkLog, WorkLogId},
    ports::{WorkLogRepository, WorkLogRepositoryError},
    services::{UpdateWorkLogRequest, WorkLogServiceError},
};

#[rstest]
fn created_log_reads_back_unchanged(shared_test_cluster: &'static TestCluster) {
    let ctx = prepared_context(shared_test_cluster, "round_trip").expect("context setup");
    let started = DateTime::parse_from_rfc3339("2024-03-19T08:15:00.987654321+01:00")
        .expect("valid timestamp");

    let created = ctx
        .runtime
        .block_on(
            ctx.logs.create(
                task("Migrate billing")
                    .with_notes("phase one")
                    .with_priority(7)
                    .with_started_at(started),
            ),
        )
        .expect("create should succeed");
    let fetched = ctx
        .runtime
        .block_on(ctx.logs.get(created.id()))
        .expect("get should succeed");

    assert_eq!(fetched, created);
    assert_eq!(
        fetched.started_at(),
        Some(utc(2024, 3, 19, 7, 15) + TimeDelta::microseconds(987_654))
    );
    assert_eq!(
        fetched.created_at(),
        utc(2024, 3, 20, 12, 0) + TimeDelta::microseconds(123_456)
    );
}

#[rstest]
fn omitted_notes_store_the_write_default(shared_test_cluster: &'static TestCluster) {
    let ctx = prepared_context(shared_test_cluster, "default_notes").expect("context setup");
    let created = ctx.create_all([task("No notes yet")]).remove(0);

    let fetched = ctx
        .runtime
        .block_on(ctx.repository.find_by_id(created.id()))
        .expect("find should succeed")
        .expect("log should exist");

    assert_eq!(fetched.notes().as_str(), "N/A");
}

#[rstest]
fn store_rejects_duplicate_task_name(shared_test_cluster: &'static TestCluster) {
    let ctx = prepared_context(shared_test_cluster, "dup_insert").expect("context setup");
    ctx.create_all([task("Release 2.0")]);
    let draft = task("Release 2.0").into_draft().expect("valid draft");
    let duplicate = WorkLog::create(draft, &DefaultClock);

    let result = ctx.runtime.block_on(ctx.repository.store(&duplicate));

    assert!(
        matches!(
            result,
            Err(WorkLogRepositoryError::DuplicateTaskName(ref name)) if name.as_str() == "Release 2.0"
        ),
        "expected DuplicateTaskName, got {result:?}"
    );
    let page = ctx
        .runtime
        .block_on(ctx.repository.list(&ListQuery::new()))
        .expect("listing should succeed");
    assert_eq!(page.total_count(), 1);
}

#[rstest]
fn rename_onto_taken_name_is_rejected(shared_test_cluster: &'static TestCluster) {
    let ctx = prepared_context(shared_test_cluster, "dup_rename").expect("context setup");
    let logs = ctx.create_all([task("Taken"), task("Free")]);
    let free = logs.get(1).expect("second log seeded");

    let result = ctx.runtime.block_on(
        ctx.logs
            .update(free.id(), UpdateWorkLogRequest::new().with_task_name("Taken")),
    );

    assert!(
        matches!(
            result,
            Err(WorkLogServiceError::Repository(
                WorkLogRepositoryError::DuplicateTaskName(_)
            ))
        ),
        "expected DuplicateTaskName, got {result:?}"
    );
    let unchanged = ctx
        .runtime
        .block_on(ctx.logs.get(free.id()))
        .expect("log still exists");
    assert_eq!(unchanged.task_name().as_str(), "Free");
}

#[rstest]
fn sparse_update_sets_only_supplied_columns(shared_test_cluster: &'static TestCluster) {
    let ctx = prepared_context(shared_test_cluster, "sparse_update").expect("context setup");
    let created = ctx
        .create_all([task("Write changelog").with_notes("draft").with_priority(5)])
        .remove(0);

    let updated = ctx
        .runtime
        .block_on(ctx.logs.update(
            created.id(),
            UpdateWorkLogRequest::new().with_task_status("progress"),
        ))
        .expect("update should succeed");

    assert_eq!(updated.task_status(), TaskStatus::Progress);
    assert_eq!(updated.notes(), created.notes());
    assert_eq!(updated.priority(), created.priority());
    assert_eq!(updated.created_at(), created.created_at());
    assert!(updated.updated_at() > created.updated_at());
    let fetched = ctx
        .runtime
        .block_on(ctx.logs.get(created.id()))
        .expect("get should succeed");
    assert_eq!(fetched, updated);
}

#[rstest]
fn bulk_delete_counts_only_existing_rows(shared_test_cluster: &'static TestCluster) {
    let ctx = prepared_context(shared_test_cluster, "bulk_delete").expect("context setup");
    let logs = ctx.create_all([task("One"), task("Two"), task("Three")]);
    let mut ids: Vec<WorkLogId> = logs.iter().take(2).map(WorkLog::id).collect();
    ids.push(WorkLogId::new());

    let removed = ctx
        .runtime
        .block_on(ctx.logs.delete_many(&ids))
        .expect("bulk delete should succeed");

    assert_eq!(removed, 2);
    let page = ctx
        .runtime
        .block_on(ctx.logs.list(&ListQuery::new()))
        .expect("listing should succeed");
    let remaining: Vec<&str> = page
        .logs()
        .iter()
        .map(|log| log.task_name().as_str())
        .collect();
    assert_eq!(remaining, ["Three"]);
}

#[rstest]
fn delete_of_missing_log_is_not_found(shared_test_cluster: &'static TestCluster) {
    let ctx = prepared_context(shared_test_cluster, "delete_missing").expect("context setup");
    let missing = WorkLogId::new();

    let result = ctx.runtime.block_on(ctx.repository.delete(missing));

    assert!(matches!(result, Err(WorkLogRepositoryError::NotFound(id)) if id == missing));
}
