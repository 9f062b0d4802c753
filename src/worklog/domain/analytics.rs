//! Read-only analytic shapes and the bucketed time window used for
//! completed-task charts.

use super::{TaskStatus, TaskType, WorkLogDomainError};
use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Width of a completed-task bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BucketGranularity {
    /// ISO week starting on Monday.
    #[default]
    Week,
    /// Calendar month.
    Month,
}

impl BucketGranularity {
    /// Returns the `date_trunc` field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Returns the `generate_series` step as an interval literal.
    #[must_use]
    pub const fn step_interval(self) -> &'static str {
        match self {
            Self::Week => "1 week",
            Self::Month => "1 month",
        }
    }

    /// Truncates a timestamp to the start of its bucket in UTC.
    #[must_use]
    pub fn truncate(self, timestamp: DateTime<Utc>) -> DateTime<Utc> {
        let date = timestamp.date_naive();
        let start = match self {
            Self::Week => {
                date - TimeDelta::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Self::Month => date.with_day(1).unwrap_or(date),
        };
        start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Returns the start of the bucket following `bucket_start`.
    #[must_use]
    pub fn next(self, bucket_start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Week => bucket_start.checked_add_signed(TimeDelta::weeks(1)),
            Self::Month => bucket_start.checked_add_months(Months::new(1)),
        }
    }
}

impl TryFrom<&str> for BucketGranularity {
    type Error = WorkLogDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(WorkLogDomainError::InvalidGranularity(value.to_owned())),
        }
    }
}

/// Unit of a lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookbackUnit {
    /// Calendar days.
    Day,
    /// Seven-day weeks.
    Week,
    /// Calendar months.
    Month,
    /// Calendar years.
    Year,
}

impl LookbackUnit {
    const fn plural(self) -> &'static str {
        match self {
            Self::Day => "days",
            Self::Week => "weeks",
            Self::Month => "months",
            Self::Year => "years",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "day" | "days" => Some(Self::Day),
            "week" | "weeks" => Some(Self::Week),
            "month" | "months" | "mon" | "mons" => Some(Self::Month),
            "year" | "years" => Some(Self::Year),
            _ => None,
        }
    }
}

/// How far back a completed-task series reaches, such as `1 months`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lookback {
    amount: u32,
    unit: LookbackUnit,
}

impl Lookback {
    /// Largest accepted amount.
    pub const MAX_AMOUNT: u32 = 365;

    /// Creates a validated lookback window.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogDomainError::InvalidLookback`] unless the amount is
    /// between 1 and [`Self::MAX_AMOUNT`].
    pub fn new(amount: u32, unit: LookbackUnit) -> Result<Self, WorkLogDomainError> {
        if !(1..=Self::MAX_AMOUNT).contains(&amount) {
            return Err(WorkLogDomainError::InvalidLookback(format!(
                "{amount} {}",
                unit.plural()
            )));
        }
        Ok(Self { amount, unit })
    }

    /// Returns the amount.
    #[must_use]
    pub const fn amount(self) -> u32 {
        self.amount
    }

    /// Returns the unit.
    #[must_use]
    pub const fn unit(self) -> LookbackUnit {
        self.unit
    }

    /// Renders the window as a `PostgreSQL` interval literal.
    #[must_use]
    pub fn as_interval(self) -> String {
        self.to_string()
    }

    /// Subtracts the window from `now`, clamping month ends the way
    /// interval arithmetic does.
    #[must_use]
    pub fn before(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.unit {
            LookbackUnit::Day => now.checked_sub_signed(TimeDelta::days(i64::from(self.amount))),
            LookbackUnit::Week => now.checked_sub_signed(TimeDelta::weeks(i64::from(self.amount))),
            LookbackUnit::Month => now.checked_sub_months(Months::new(self.amount)),
            LookbackUnit::Year => self
                .amount
                .checked_mul(12)
                .and_then(|months| now.checked_sub_months(Months::new(months))),
        }
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Self {
            amount: 1,
            unit: LookbackUnit::Month,
        }
    }
}

impl FromStr for Lookback {
    type Err = WorkLogDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || WorkLogDomainError::InvalidLookback(value.to_owned());
        let trimmed = value.trim();
        let split_at = trimmed
            .find(|ch: char| !ch.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (digits, rest) = trimmed.split_at(split_at);
        let amount = digits.parse::<u32>().map_err(|_| invalid())?;
        let unit = LookbackUnit::parse(rest.trim()).ok_or_else(invalid)?;
        Self::new(amount, unit).map_err(|_| invalid())
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit.plural())
    }
}

/// Bucket granularity and lookback for the completed-task series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CompletedCountWindow {
    /// Bucket width.
    pub granularity: BucketGranularity,
    /// How far back the series starts.
    pub lookback: Lookback,
}

impl CompletedCountWindow {
    /// Creates a window.
    #[must_use]
    pub const fn new(granularity: BucketGranularity, lookback: Lookback) -> Self {
        Self {
            granularity,
            lookback,
        }
    }

    /// Returns every bucket start from `trunc(now - lookback)` to
    /// `trunc(now)` inclusive, ascending.
    #[must_use]
    pub fn bucket_starts(self, now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let end = self.granularity.truncate(now);
        let Some(window_start) = self.lookback.before(now) else {
            return vec![end];
        };
        let mut cursor = Some(self.granularity.truncate(window_start));
        let mut starts = Vec::new();
        while let Some(start) = cursor.filter(|start| *start <= end) {
            starts.push(start);
            cursor = self.granularity.next(start);
        }
        starts
    }
}

/// Share of logs in one status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusShare {
    /// Status being counted.
    pub task_status: TaskStatus,
    /// Number of logs in the status.
    pub status_count: u64,
    /// Share of all logs, 0 to 100.
    pub percentage: f64,
}

/// Share of logs of one type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeShare {
    /// Type being counted.
    pub task_type: TaskType,
    /// Number of logs of the type. Serialised as `statusCount` for
    /// existing dashboard clients.
    #[serde(rename = "statusCount")]
    pub type_count: u64,
    /// Share of all logs, 0 to 100.
    pub percentage: f64,
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "percentages are display values; counts far below 2^52 are exact"
)]
fn percentage_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Builds status shares from grouped counts, in status declaration order.
///
/// Statuses with no logs are omitted.
#[must_use]
pub fn status_shares(counts: &[(TaskStatus, u64)]) -> Vec<StatusShare> {
    let total = counts.iter().map(|(_, count)| count).sum();
    let mut shares: Vec<StatusShare> = counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|&(task_status, status_count)| StatusShare {
            task_status,
            status_count,
            percentage: percentage_of(status_count, total),
        })
        .collect();
    shares.sort_by_key(|share| share.task_status);
    shares
}

/// Builds type shares from grouped counts, in type declaration order.
///
/// Types with no logs are omitted.
#[must_use]
pub fn type_shares(counts: &[(TaskType, u64)]) -> Vec<TypeShare> {
    let total = counts.iter().map(|(_, count)| count).sum();
    let mut shares: Vec<TypeShare> = counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|&(task_type, type_count)| TypeShare {
            task_type,
            type_count,
            percentage: percentage_of(type_count, total),
        })
        .collect();
    shares.sort_by_key(|share| share.task_type);
    shares
}

/// Number of logs created on one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTaskCount {
    /// Calendar day.
    pub created_date: NaiveDate,
    /// Day rendered as `DD MON YYYY`, for example `05 MAR 2024`.
    pub formatted_date: String,
    /// Logs created that day.
    pub task_count: u64,
}

impl DailyTaskCount {
    /// Creates a daily count, deriving the formatted date.
    #[must_use]
    pub fn new(created_date: NaiveDate, task_count: u64) -> Self {
        Self {
            created_date,
            formatted_date: created_date.format("%d %b %Y").to_string().to_uppercase(),
            task_count,
        }
    }
}

/// Completed logs in one bucket of the series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedBucketCount {
    /// Bucket start.
    pub completed_at: DateTime<Utc>,
    /// Logs completed within the bucket; zero for empty buckets.
    pub task_count: u64,
}

/// Headline counters for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    /// Every log.
    pub total_tasks: u64,
    /// Logs of type `bug`.
    pub total_bugs: u64,
    /// Logs in status `progress`.
    pub total_progress_tasks: u64,
    /// Logs at priority 10.
    pub highest_priority_tasks: u64,
}
