//! In-memory work log store for tests and local runs.

use super::search::{similarity, text_matches, text_rank};
use crate::worklog::{
    domain::{
        CompletedBucketCount, CompletedCountWindow, ListQuery, LogPage, Priority, SearchText,
        SortField, SortOrder, TaskName, TaskStatus, TaskSummary, TaskType, WorkLog, WorkLogId,
        WorkLogPatch,
    },
    ports::{
        AnalyticsError, AnalyticsResult, WorkLogAnalytics, WorkLogRepository,
        WorkLogRepositoryError, WorkLogRepositoryResult,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory work log store implementing both the repository
/// and analytics ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkLogStore {
    state: Arc<RwLock<InMemoryWorkLogState>>,
}

#[derive(Debug, Default)]
struct InMemoryWorkLogState {
    logs: HashMap<WorkLogId, WorkLog>,
    name_index: HashMap<String, WorkLogId>,
}

impl InMemoryWorkLogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, InMemoryWorkLogState>, std::io::Error> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, InMemoryWorkLogState>, std::io::Error> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}

/// Orders `None` after every value, matching `PostgreSQL` ascending order.
fn nulls_last<T: Ord>(left: Option<T>, right: Option<T>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_by(field: SortField, left: &WorkLog, right: &WorkLog) -> Ordering {
    match field {
        SortField::TaskName => left.task_name().as_str().cmp(right.task_name().as_str()),
        SortField::TaskType => left.task_type().as_str().cmp(right.task_type().as_str()),
        SortField::TaskStatus => left.task_status().as_str().cmp(right.task_status().as_str()),
        SortField::Priority => left.priority().cmp(&right.priority()),
        SortField::StartedAt => nulls_last(left.started_at(), right.started_at()),
        SortField::CompletedAt => nulls_last(left.completed_at(), right.completed_at()),
        SortField::CreatedAt => left.created_at().cmp(&right.created_at()),
        SortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
    }
}

fn sorted(mut logs: Vec<WorkLog>, field: SortField, order: SortOrder) -> Vec<WorkLog> {
    logs.sort_by(|left, right| {
        let primary = compare_by(field, left, right);
        let directed = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        directed.then_with(|| left.id().cmp(&right.id()))
    });
    logs
}

fn haystack(log: &WorkLog) -> String {
    format!("{} {}", log.task_name(), log.notes())
}

fn ranked(logs: Vec<WorkLog>, search: &SearchText) -> Vec<WorkLog> {
    let mut scored: Vec<(usize, f64, WorkLog)> = logs
        .into_iter()
        .filter_map(|log| {
            let text = haystack(&log);
            let score = similarity(search.raw(), &text);
            let matched = text_matches(search.tokens(), &text);
            let rank = if matched {
                text_rank(search.tokens(), &text)
            } else {
                0
            };
            (matched || score > 0.0).then_some((rank, score, log))
        })
        .collect();
    scored.sort_by(|left, right| {
        right
            .0
            .cmp(&left.0)
            .then_with(|| right.1.total_cmp(&left.1))
            .then_with(|| right.2.updated_at().cmp(&left.2.updated_at()))
    });
    scored.into_iter().map(|(_, _, log)| log).collect()
}

fn page_of(matching: Vec<WorkLog>, query: &ListQuery) -> LogPage {
    let total_count = u64::try_from(matching.len()).unwrap_or(u64::MAX);
    let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(query.limit()).unwrap_or(usize::MAX);
    let logs = matching.into_iter().skip(offset).take(limit).collect();
    LogPage::new(logs, total_count, query.page_size())
}

#[async_trait]
impl WorkLogRepository for InMemoryWorkLogStore {
    async fn store(&self, log: &WorkLog) -> WorkLogRepositoryResult<()> {
        let mut state = self.write().map_err(WorkLogRepositoryError::persistence)?;
        if state.logs.contains_key(&log.id()) {
            return Err(WorkLogRepositoryError::DuplicateLog(log.id()));
        }
        let name_key = log.task_name().as_str().to_owned();
        if state.name_index.contains_key(&name_key) {
            return Err(WorkLogRepositoryError::DuplicateTaskName(
                log.task_name().clone(),
            ));
        }
        state.name_index.insert(name_key, log.id());
        state.logs.insert(log.id(), log.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: WorkLogId) -> WorkLogRepositoryResult<Option<WorkLog>> {
        let state = self.read().map_err(WorkLogRepositoryError::persistence)?;
        Ok(state.logs.get(&id).cloned())
    }

    async fn exists(&self, id: WorkLogId) -> WorkLogRepositoryResult<bool> {
        let state = self.read().map_err(WorkLogRepositoryError::persistence)?;
        Ok(state.logs.contains_key(&id))
    }

    async fn exists_by_name(&self, task_name: &TaskName) -> WorkLogRepositoryResult<bool> {
        let state = self.read().map_err(WorkLogRepositoryError::persistence)?;
        Ok(state.name_index.contains_key(task_name.as_str()))
    }

    async fn update(
        &self,
        id: WorkLogId,
        patch: &WorkLogPatch,
        updated_at: DateTime<Utc>,
    ) -> WorkLogRepositoryResult<WorkLog> {
        let mut state = self.write().map_err(WorkLogRepositoryError::persistence)?;
        let mut log = state
            .logs
            .get(&id)
            .cloned()
            .ok_or(WorkLogRepositoryError::NotFound(id))?;

        if let Some(new_name) = patch.task_name() {
            let held_by_other = state
                .name_index
                .get(new_name.as_str())
                .is_some_and(|owner| *owner != id);
            if held_by_other {
                return Err(WorkLogRepositoryError::DuplicateTaskName(new_name.clone()));
            }
            state.name_index.remove(log.task_name().as_str());
            state.name_index.insert(new_name.as_str().to_owned(), id);
        }

        log.apply_patch(patch, updated_at);
        state.logs.insert(id, log.clone());
        Ok(log)
    }

    async fn delete(&self, id: WorkLogId) -> WorkLogRepositoryResult<()> {
        let mut state = self.write().map_err(WorkLogRepositoryError::persistence)?;
        let removed = state
            .logs
            .remove(&id)
            .ok_or(WorkLogRepositoryError::NotFound(id))?;
        state.name_index.remove(removed.task_name().as_str());
        Ok(())
    }

    async fn delete_many(&self, ids: &[WorkLogId]) -> WorkLogRepositoryResult<u64> {
        let mut state = self.write().map_err(WorkLogRepositoryError::persistence)?;
        let mut removed_count = 0_u64;
        for id in ids {
            if let Some(removed) = state.logs.remove(id) {
                state.name_index.remove(removed.task_name().as_str());
                removed_count += 1;
            }
        }
        Ok(removed_count)
    }

    async fn list(&self, query: &ListQuery) -> WorkLogRepositoryResult<LogPage> {
        let state = self.read().map_err(WorkLogRepositoryError::persistence)?;
        let logs: Vec<WorkLog> = state.logs.values().cloned().collect();
        let matching = match query.search() {
            Some(search) => ranked(logs, search),
            None => sorted(logs, query.sort_field(), query.sort_order()),
        };
        Ok(page_of(matching, query))
    }
}

fn count_where(state: &InMemoryWorkLogState, predicate: impl Fn(&WorkLog) -> bool) -> u64 {
    state
        .logs
        .values()
        .fold(0, |count, log| if predicate(log) { count + 1 } else { count })
}

#[async_trait]
impl WorkLogAnalytics for InMemoryWorkLogStore {
    async fn status_counts(&self) -> AnalyticsResult<Vec<(TaskStatus, u64)>> {
        let state = self.read().map_err(AnalyticsError::persistence)?;
        Ok(TaskStatus::ALL
            .into_iter()
            .map(|status| (status, count_where(&state, |log| log.task_status() == status)))
            .filter(|(_, count)| *count > 0)
            .collect())
    }

    async fn type_counts(&self) -> AnalyticsResult<Vec<(TaskType, u64)>> {
        let state = self.read().map_err(AnalyticsError::persistence)?;
        Ok(TaskType::ALL
            .into_iter()
            .map(|task_type| (task_type, count_where(&state, |log| log.task_type() == task_type)))
            .filter(|(_, count)| *count > 0)
            .collect())
    }

    async fn daily_counts(&self) -> AnalyticsResult<Vec<(NaiveDate, u64)>> {
        let state = self.read().map_err(AnalyticsError::persistence)?;
        let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for log in state.logs.values() {
            *per_day.entry(log.created_at().date_naive()).or_default() += 1;
        }
        Ok(per_day.into_iter().collect())
    }

    async fn completed_counts(
        &self,
        window: CompletedCountWindow,
        now: DateTime<Utc>,
    ) -> AnalyticsResult<Vec<CompletedBucketCount>> {
        let state = self.read().map_err(AnalyticsError::persistence)?;
        let granularity = window.granularity;
        Ok(window
            .bucket_starts(now)
            .into_iter()
            .map(|bucket_start| CompletedBucketCount {
                completed_at: bucket_start,
                task_count: count_where(&state, |log| {
                    log.completed_at()
                        .is_some_and(|completed| granularity.truncate(completed) == bucket_start)
                }),
            })
            .collect())
    }

    async fn task_summary(&self) -> AnalyticsResult<TaskSummary> {
        let state = self.read().map_err(AnalyticsError::persistence)?;
        Ok(TaskSummary {
            total_tasks: count_where(&state, |_| true),
            total_bugs: count_where(&state, |log| log.task_type() == TaskType::Bug),
            total_progress_tasks: count_where(&state, |log| {
                log.task_status() == TaskStatus::Progress
            }),
            highest_priority_tasks: count_where(&state, |log| {
                log.priority() == Priority::Highest
            }),
        })
    }
}
