//! `PostgreSQL` repository implementation for work log storage.

use super::{
    listing_sql::{count_statement, listing_statement},
    mapping::{row_to_work_log, to_new_row},
    models::{CountRow, ListedWorkLogRow, WorkLogChangeset, WorkLogRow},
    schema::logs,
};
use crate::worklog::{
    domain::{ListQuery, LogPage, TaskName, WorkLog, WorkLogId, WorkLogPatch},
    ports::{WorkLogRepository, WorkLogRepositoryError, WorkLogRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by work log adapters.
pub type WorkLogPgPool = Pool<ConnectionManager<PgConnection>>;

/// Unique constraint enforcing one log per task name.
const TASK_NAME_UNIQUE_CONSTRAINT: &str = "logs_task_name_key";

/// `PostgreSQL`-backed work log repository.
#[derive(Debug, Clone)]
pub struct PostgresWorkLogRepository {
    pool: WorkLogPgPool,
}

impl PostgresWorkLogRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkLogPgPool) -> Self {
        Self { pool }
    }

    pub(super) async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: PersistenceFailure + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(E::from_persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(E::from_persistence)?
    }
}

/// Port error types that can wrap an infrastructure failure.
pub(super) trait PersistenceFailure: Sized {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

impl PersistenceFailure for WorkLogRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

fn is_task_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == TASK_NAME_UNIQUE_CONSTRAINT)
}

fn to_work_log(row: WorkLogRow) -> WorkLogRepositoryResult<WorkLog> {
    row_to_work_log(row).map_err(WorkLogRepositoryError::persistence)
}

fn count_to_u64(count: i64) -> WorkLogRepositoryResult<u64> {
    u64::try_from(count).map_err(WorkLogRepositoryError::persistence)
}

fn load_page(connection: &mut PgConnection, query: &ListQuery) -> WorkLogRepositoryResult<LogPage> {
    let rows = listing_statement(query)
        .map_err(WorkLogRepositoryError::persistence)?
        .load::<ListedWorkLogRow>(connection)
        .map_err(WorkLogRepositoryError::persistence)?;

    let total_count = match rows.first() {
        Some(row) => count_to_u64(row.total_count)?,
        None => {
            let counted = count_statement(query)
                .get_result::<CountRow>(connection)
                .map_err(WorkLogRepositoryError::persistence)?;
            count_to_u64(counted.total_count)?
        }
    };

    let logs = rows
        .into_iter()
        .map(|row| to_work_log(row.log))
        .collect::<WorkLogRepositoryResult<Vec<_>>>()?;
    Ok(LogPage::new(logs, total_count, query.page_size()))
}

#[async_trait]
impl WorkLogRepository for PostgresWorkLogRepository {
    async fn store(&self, log: &WorkLog) -> WorkLogRepositoryResult<()> {
        let log_id = log.id();
        let task_name = log.task_name().clone();
        let new_row = to_new_row(log);

        self.run_blocking(move |connection| {
            diesel::insert_into(logs::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_task_name_unique_violation(info.as_ref()) =>
                    {
                        WorkLogRepositoryError::DuplicateTaskName(task_name.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkLogRepositoryError::DuplicateLog(log_id)
                    }
                    _ => WorkLogRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: WorkLogId) -> WorkLogRepositoryResult<Option<WorkLog>> {
        self.run_blocking(move |connection| {
            let row = logs::table
                .find(id.into_inner())
                .select(WorkLogRow::as_select())
                .first::<WorkLogRow>(connection)
                .optional()
                .map_err(WorkLogRepositoryError::persistence)?;
            row.map(to_work_log).transpose()
        })
        .await
    }

    async fn exists(&self, id: WorkLogId) -> WorkLogRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(logs::table.find(id.into_inner())))
                .get_result::<bool>(connection)
                .map_err(WorkLogRepositoryError::persistence)
        })
        .await
    }

    async fn exists_by_name(&self, task_name: &TaskName) -> WorkLogRepositoryResult<bool> {
        let name = task_name.as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                logs::table.filter(logs::task_name.eq(name)),
            ))
            .get_result::<bool>(connection)
            .map_err(WorkLogRepositoryError::persistence)
        })
        .await
    }

    async fn update(
        &self,
        id: WorkLogId,
        patch: &WorkLogPatch,
        updated_at: DateTime<Utc>,
    ) -> WorkLogRepositoryResult<WorkLog> {
        let changeset = WorkLogChangeset::from_patch(patch, updated_at);
        let new_name = patch.task_name().cloned();

        self.run_blocking(move |connection| {
            let row = diesel::update(logs::table.find(id.into_inner()))
                .set(&changeset)
                .returning(WorkLogRow::as_returning())
                .get_result::<WorkLogRow>(connection)
                .optional()
                .map_err(|err| match (err, new_name.as_ref()) {
                    (
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info),
                        Some(name),
                    ) if is_task_name_unique_violation(info.as_ref()) => {
                        WorkLogRepositoryError::DuplicateTaskName(name.clone())
                    }
                    (other, _) => WorkLogRepositoryError::persistence(other),
                })?;
            row.map_or_else(|| Err(WorkLogRepositoryError::NotFound(id)), to_work_log)
        })
        .await
    }

    async fn delete(&self, id: WorkLogId) -> WorkLogRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(logs::table.find(id.into_inner()))
                .execute(connection)
                .map_err(WorkLogRepositoryError::persistence)?;
            if removed == 0 {
                return Err(WorkLogRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_many(&self, ids: &[WorkLogId]) -> WorkLogRepositoryResult<u64> {
        let raw_ids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let removed = diesel::delete(logs::table.filter(logs::log_id.eq_any(raw_ids)))
                .execute(connection)
                .map_err(WorkLogRepositoryError::persistence)?;
            u64::try_from(removed).map_err(WorkLogRepositoryError::persistence)
        })
        .await
    }

    async fn list(&self, query: &ListQuery) -> WorkLogRepositoryResult<LogPage> {
        let owned_query = query.clone();
        self.run_blocking(move |connection| load_page(connection, &owned_query))
            .await
    }
}
