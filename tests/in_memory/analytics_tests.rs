//! Dashboard aggregations over logs created through the service.

use super::helpers::{Services, create_all, services};
use chrono::{TimeDelta, Utc};
use rstest::rstest;
use worklog::worklog::{
    domain::{
        BucketGranularity, CompletedCountWindow, Lookback, LookbackUnit, TaskStatus, TaskType,
    },
    services::CreateWorkLogRequest,
};

fn mixed_requests() -> Vec<CreateWorkLogRequest> {
    vec![
        CreateWorkLogRequest::new("Crash on save", "bug", "progress").with_priority(10),
        CreateWorkLogRequest::new("Flaky upload", "bug", "backlog"),
        CreateWorkLogRequest::new("Onboarding flow", "story", "progress"),
        CreateWorkLogRequest::new("Rotate keys", "task", "backlog").with_priority(10),
    ]
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_shares_split_evenly_between_present_statuses(services: Services) {
    create_all(&services.logs, mixed_requests()).await;

    let shares = services
        .analytics
        .status_summary()
        .await
        .expect("status summary should succeed");

    let statuses: Vec<TaskStatus> = shares.iter().map(|share| share.task_status).collect();
    assert_eq!(statuses, [TaskStatus::Backlog, TaskStatus::Progress]);
    for share in &shares {
        assert_eq!(share.status_count, 2);
        assert_eq!(share.percentage, 50.0);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn type_shares_omit_absent_types(services: Services) {
    create_all(&services.logs, mixed_requests()).await;

    let shares = services
        .analytics
        .type_summary()
        .await
        .expect("type summary should succeed");

    let bug = shares
        .iter()
        .find(|share| share.task_type == TaskType::Bug)
        .expect("bugs are present");
    assert_eq!(bug.type_count, 2);
    assert_eq!(bug.percentage, 50.0);
    assert_eq!(shares.len(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_yields_empty_summaries(services: Services) {
    let statuses = services
        .analytics
        .status_summary()
        .await
        .expect("status summary should succeed");
    let summary = services
        .analytics
        .task_summary()
        .await
        .expect("task summary should succeed");

    assert!(statuses.is_empty());
    assert_eq!(summary.total_tasks, 0);
    assert_eq!(summary.highest_priority_tasks, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_summary_counts_each_category(services: Services) {
    create_all(&services.logs, mixed_requests()).await;

    let summary = services
        .analytics
        .task_summary()
        .await
        .expect("task summary should succeed");

    assert_eq!(summary.total_tasks, 4);
    assert_eq!(summary.total_bugs, 2);
    assert_eq!(summary.total_progress_tasks, 2);
    assert_eq!(summary.highest_priority_tasks, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn daily_counts_group_todays_logs(services: Services) {
    create_all(&services.logs, mixed_requests()).await;

    let daily = services
        .analytics
        .daily_task_counts()
        .await
        .expect("daily counts should succeed");

    let total: u64 = daily.iter().map(|day| day.task_count).sum();
    assert_eq!(total, 4);
    assert!(
        daily
            .iter()
            .all(|day| day.formatted_date == day.formatted_date.to_uppercase())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_series_counts_recent_completions_only(services: Services) {
    let now = Utc::now();
    let yesterday = (now - TimeDelta::days(1)).fixed_offset();
    let long_ago = (now - TimeDelta::days(800)).fixed_offset();
    create_all(
        &services.logs,
        [
            CreateWorkLogRequest::new("Recent", "task", "staging").with_completed_at(yesterday),
            CreateWorkLogRequest::new("Ancient", "task", "staging").with_completed_at(long_ago),
            CreateWorkLogRequest::new("Open", "task", "pending"),
        ],
    )
    .await;
    let window = CompletedCountWindow::new(
        BucketGranularity::Week,
        Lookback::new(1, LookbackUnit::Month).expect("valid lookback"),
    );

    let series = services
        .analytics
        .completed_task_counts(window)
        .await
        .expect("completed counts should succeed");

    assert!(series.len() >= 4);
    assert!(series.windows(2).all(|pair| {
        matches!(pair, [first, second] if first.completed_at < second.completed_at)
    }));
    let total: u64 = series.iter().map(|bucket| bucket.task_count).sum();
    assert_eq!(total, 1);
}
