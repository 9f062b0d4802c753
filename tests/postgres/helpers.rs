//! Shared fixtures for `PostgreSQL` integration tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::Clock;
use pg_embedded_setup_unpriv::TestCluster;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::runtime::Runtime;
use worklog::worklog::{
    adapters::postgres::PostgresWorkLogRepository,
    domain::WorkLog,
    services::{AnalyticsService, CreateWorkLogRequest, WorkLogService},
};

/// Boxed error used by fixture setup.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SQL creating the `logs` table and its search indexes.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2024-01-01-000000_create_logs/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "worklog_test_template";

/// Log service over a Postgres store.
pub type PgService = WorkLogService<PostgresWorkLogRepository, SteppingClock>;

/// Analytics service over the same Postgres store.
pub type PgAnalytics = AnalyticsService<PostgresWorkLogRepository, SteppingClock>;

/// Clock that advances one second on every reading.
///
/// Readings carry sub-microsecond digits so storage precision is exercised.
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl Default for SteppingClock {
    /// Starts at [`reference_now`].
    fn default() -> Self {
        Self {
            start: reference_now(),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + TimeDelta::seconds(tick)
    }
}

/// Wednesday 2024-03-20 12:00:00.123456789 UTC.
pub fn reference_now() -> DateTime<Utc> {
    utc(2024, 3, 20, 12, 0) + TimeDelta::nanoseconds(123_456_789)
}

/// Builds a whole-minute UTC timestamp.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid test timestamp")
}

/// Creates a tokio runtime for async operations in tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_SCHEMA_SQL)
                .map_err(|e| eyre::eyre!("schema setup failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Drops the test database when the context goes out of scope.
struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        // A database still held open is reclaimed with the cluster.
        drop(self.cluster.drop_database(self.db_name.as_str()));
    }
}

/// Services and runtime over one freshly cloned database.
///
/// Fields drop in order, so every pooled connection is closed before the
/// database is dropped.
pub struct PgContext {
    /// Log lifecycle service.
    pub logs: PgService,
    /// Dashboard aggregation service.
    pub analytics: PgAnalytics,
    /// Store shared by both services.
    pub repository: Arc<PostgresWorkLogRepository>,
    /// Runtime driving the async calls.
    pub runtime: Runtime,
    _guard: CleanupGuard,
}

impl PgContext {
    /// Creates each request in order, failing the test on any rejection.
    pub fn create_all(
        &self,
        requests: impl IntoIterator<Item = CreateWorkLogRequest>,
    ) -> Vec<WorkLog> {
        requests
            .into_iter()
            .map(|request| {
                self.runtime
                    .block_on(self.logs.create(request))
                    .expect("seed log is valid")
            })
            .collect()
    }
}

/// Clones the template into a new database and wires services over it.
pub fn prepared_context(cluster: &'static TestCluster, label: &str) -> Result<PgContext, BoxError> {
    ensure_template(cluster)?;
    let db_name = format!("{label}_{}", uuid::Uuid::new_v4().simple());
    cluster
        .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
        .map_err(|e| Box::new(e) as BoxError)?;
    let guard = CleanupGuard {
        cluster,
        db_name: db_name.clone(),
    };

    let url = cluster.connection().database_url(&db_name);
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| Box::new(e) as BoxError)?;
    let repository = Arc::new(PostgresWorkLogRepository::new(pool));

    let clock = || Arc::new(SteppingClock::default());
    Ok(PgContext {
        logs: WorkLogService::new(Arc::clone(&repository), clock()),
        analytics: AnalyticsService::new(Arc::clone(&repository), clock()),
        repository,
        runtime: test_runtime(),
        _guard: guard,
    })
}

/// Builds a backlog task request.
pub fn task(name: &str) -> CreateWorkLogRequest {
    CreateWorkLogRequest::new(name, "task", "backlog")
}
