//! Zero-based paging, sorting and ranked search against `PostgreSQL`.

use super::helpers::{PgContext, prepared_context, task};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use worklog::worklog::domain::{ListQuery, LogPage, PageIndex, PageSize, SortField, SortOrder};

fn names(page: &LogPage) -> Vec<&str> {
    page.logs()
        .iter()
        .map(|log| log.task_name().as_str())
        .collect()
}

fn list(ctx: &PgContext, query: &ListQuery) -> LogPage {
    ctx.runtime
        .block_on(ctx.logs.list(query))
        .expect("listing should succeed")
}

#[rstest]
#[case(0, &["Alpha", "Bravo"])]
#[case(1, &["Charlie", "Delta"])]
#[case(2, &["Echo"])]
#[case(3, &[])]
fn pages_are_zero_based_slices_of_the_sorted_set(
    shared_test_cluster: &'static TestCluster,
    #[case] page: i64,
    #[case] expected: &[&str],
) {
    let ctx = prepared_context(shared_test_cluster, "paging").expect("context setup");
    ctx.create_all(["Delta", "Alpha", "Echo", "Charlie", "Bravo"].map(task));
    let query = ListQuery::new()
        .with_sort_field(SortField::TaskName)
        .with_sort_order(SortOrder::Asc)
        .with_page_size(PageSize::new(2).expect("valid page size"))
        .with_page(PageIndex::new(page).expect("valid page"));

    let result = list(&ctx, &query);

    assert_eq!(names(&result), expected);
    assert_eq!(result.total_count(), 5);
    assert_eq!(result.total_pages(), 3);
}

#[rstest]
fn default_listing_shows_recent_updates_first(shared_test_cluster: &'static TestCluster) {
    let ctx = prepared_context(shared_test_cluster, "default_sort").expect("context setup");
    ctx.create_all(["First", "Second", "Third"].map(task));

    let result = list(&ctx, &ListQuery::new());

    assert_eq!(names(&result), ["Third", "Second", "First"]);
}

#[rstest]
fn priority_sort_places_highest_first(shared_test_cluster: &'static TestCluster) {
    let ctx = prepared_context(shared_test_cluster, "priority_sort").expect("context setup");
    ctx.create_all([
        task("Low").with_priority(1),
        task("Critical").with_priority(10),
        task("Medium").with_priority(5),
    ]);

    let result = list(&ctx, &ListQuery::new().with_sort_field(SortField::Priority));

    assert_eq!(names(&result), ["Critical", "Medium", "Low"]);
}

fn seed_search_rows(ctx: &PgContext) {
    ctx.create_all([
        task("Refactor billing"),
        task("Fix login bug"),
        task("Login page redesign").with_notes("login form and login button"),
        task("Logging cleanup"),
    ]);
}

#[rstest]
fn search_ranks_text_matches_before_similarity_only_rows(
    shared_test_cluster: &'static TestCluster,
) {
    let ctx = prepared_context(shared_test_cluster, "search_rank").expect("context setup");
    seed_search_rows(&ctx);

    let result = list(&ctx, &ListQuery::new().with_search("login"));

    assert_eq!(
        names(&result),
        ["Login page redesign", "Fix login bug", "Logging cleanup"]
    );
    assert_eq!(result.total_count(), 3);
}

#[rstest]
fn search_page_past_the_end_still_counts_matches(shared_test_cluster: &'static TestCluster) {
    let ctx = prepared_context(shared_test_cluster, "search_past_end").expect("context setup");
    seed_search_rows(&ctx);
    let query = ListQuery::new()
        .with_search("login")
        .with_page_size(PageSize::new(2).expect("valid page size"))
        .with_page(PageIndex::new(5).expect("valid page"));

    let result = list(&ctx, &query);

    assert!(result.logs().is_empty());
    assert_eq!(result.total_count(), 3);
    assert_eq!(result.total_pages(), 2);
}
