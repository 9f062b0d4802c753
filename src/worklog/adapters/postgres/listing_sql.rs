//! Listing and search statement construction.
//!
//! Caller text only ever reaches the database as bound parameters. The
//! sort column and direction come from closed enums, so they are the only
//! fragments formatted into the SQL text.

use crate::worklog::domain::{ListQuery, SearchText, SortField, SortOrder};
use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Text};
use std::num::TryFromIntError;

/// Boxed raw statement with its bound parameters.
pub type BoxedStatement = BoxedSqlQuery<'static, Pg, SqlQuery>;

const LOG_COLUMNS: &str = "log_id, task_name, task_type, task_status, priority, notes, \
                           started_at, completed_at, created_at, updated_at";

const SEARCH_FILTER: &str = "ts @@ to_tsquery('english', $1) \
                             OR similarity($2, task_name || ' ' || coalesce(notes, '')) > 0";

/// Returns the plain listing SQL for the sort column and direction.
#[must_use]
pub fn plain_listing_sql(sort_field: SortField, sort_order: SortOrder) -> String {
    format!(
        "SELECT {LOG_COLUMNS}, count(*) OVER () AS total_count \
         FROM logs \
         ORDER BY {column} {direction}, log_id ASC \
         OFFSET $1 LIMIT $2",
        column = sort_field.column(),
        direction = sort_order.as_sql(),
    )
}

/// Returns the ranked search SQL.
///
/// Binds: `$1` tsquery text, `$2` raw search text, `$3` offset, `$4` limit.
#[must_use]
pub fn search_listing_sql() -> String {
    format!(
        "WITH filtered_logs AS ( \
             SELECT {LOG_COLUMNS}, \
                    ts_rank(ts, to_tsquery('english', $1)) AS text_rank, \
                    similarity($2, task_name || ' ' || coalesce(notes, '')) AS similarity_score \
             FROM logs \
             WHERE {SEARCH_FILTER} \
         ) \
         SELECT {LOG_COLUMNS}, count(*) OVER () AS total_count \
         FROM filtered_logs \
         ORDER BY text_rank DESC, similarity_score DESC, updated_at DESC \
         OFFSET $3 LIMIT $4"
    )
}

fn bind_search(statement: BoxedStatement, search: &SearchText) -> BoxedStatement {
    statement
        .bind::<Text, _>(search.ts_query())
        .bind::<Text, _>(search.raw().to_owned())
}

/// Builds the page statement for a listing query.
///
/// # Errors
///
/// Returns [`TryFromIntError`] when the offset or limit does not fit a
/// `BIGINT`.
pub fn listing_statement(query: &ListQuery) -> Result<BoxedStatement, TryFromIntError> {
    let offset = i64::try_from(query.offset())?;
    let limit = i64::try_from(query.limit())?;
    let statement = match query.search() {
        Some(search) => bind_search(
            diesel::sql_query(search_listing_sql()).into_boxed(),
            search,
        ),
        None => diesel::sql_query(plain_listing_sql(query.sort_field(), query.sort_order()))
            .into_boxed(),
    };
    Ok(statement
        .bind::<BigInt, _>(offset)
        .bind::<BigInt, _>(limit))
}

/// Builds the statement counting every row the listing query matches.
///
/// Used when a page past the end returns no rows, so the window count is
/// unavailable.
#[must_use]
pub fn count_statement(query: &ListQuery) -> BoxedStatement {
    match query.search() {
        Some(search) => bind_search(
            diesel::sql_query(format!(
                "SELECT count(*) AS total_count FROM logs WHERE {SEARCH_FILTER}"
            ))
            .into_boxed(),
            search,
        ),
        None => diesel::sql_query("SELECT count(*) AS total_count FROM logs").into_boxed(),
    }
}
