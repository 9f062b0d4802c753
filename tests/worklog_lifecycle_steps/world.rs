//! Shared world state for work log lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use worklog::worklog::{
    adapters::memory::InMemoryWorkLogStore,
    api::{ApiError, WorkLogApi},
    domain::{WorkLog, WorkLogId},
};

/// Handler type used by the BDD world.
pub type TestApi = WorkLogApi<InMemoryWorkLogStore, DefaultClock>;

/// Scenario world for work log lifecycle behaviour tests.
pub struct WorkLogWorld {
    pub api: TestApi,
    pub ids_by_name: HashMap<String, WorkLogId>,
    pub last_result: Option<Result<(), ApiError>>,
    pub last_row_count: Option<u64>,
}

impl WorkLogWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api: WorkLogApi::new(
                Arc::new(InMemoryWorkLogStore::new()),
                Arc::new(DefaultClock),
            ),
            ids_by_name: HashMap::new(),
            last_result: None,
            last_row_count: None,
        }
    }

    /// Looks up the id recorded for a task name.
    pub fn id_of(&self, name: &str) -> Result<WorkLogId, eyre::Report> {
        self.ids_by_name
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no log named {name} was created in this scenario"))
    }

    /// Records a created log so later steps can refer to it by name.
    pub fn remember(&mut self, log: &WorkLog) {
        self.ids_by_name
            .insert(log.task_name().as_str().to_owned(), log.id());
    }

    /// Fetches the current state of a named log.
    pub fn fetch(&self, name: &str) -> Result<WorkLog, eyre::Report> {
        let id = self.id_of(name)?;
        run_async(self.api.get_log(&id.to_string()))
            .map(|response| response.log)
            .map_err(|err| eyre::eyre!("fetching {name} failed: {err}"))
    }
}

impl Default for WorkLogWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> WorkLogWorld {
    WorkLogWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
