//! Task entity and the value objects that travel with it.
//!
//! [`Task`] mirrors one row of the `tasks` table. [`CreateRequest`] and
//! [`UpdateRequest`] carry caller input into the repository, and [`Filter`]
//! narrows a listing. None of these types touch storage.
//!
//! ## Priority
//!
//! [`Priority`] is a closed set. Strings are parsed at the boundary, so an
//! unknown priority is rejected with [`TaskError::InvalidArgument`] before
//! any statement runs:
//!
//! ```rust
//! use taskdeck::libs::task::Priority;
//!
//! assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
//! assert!("urgent".parse::<Priority>().is_err());
//! ```
//!
//! ## Due-date buckets
//!
//! [`DueBucket`] names a window relative to "now" rather than a literal
//! date. Windows are local calendar days; `week` covers today plus the six
//! following days.

use crate::libs::error::{Result, TaskError};
use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest title accepted, in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// Task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities, most urgent first.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Sort rank: high=1, medium=2, low=3.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(TaskError::invalid(format!("unknown priority '{}', expected low, medium or high", s))),
        }
    }
}

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier, never reused.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub is_done: bool,
    /// `None` means no deadline.
    pub due_at: Option<DateTime<Utc>>,
    pub priority: Priority,
    /// Set once when the row is inserted.
    pub created_at: DateTime<Utc>,
    /// Re-stamped by every successful update or toggle.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task. The store assigns id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to [`Priority::Medium`] when unset.
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
}

impl CreateRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }
}

/// Full replacement of a task's editable fields.
///
/// This is not a patch: every field is written. An unset priority stores
/// `medium` and an unset due date clears the deadline. `is_done` and
/// `created_at` are never touched by an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
}

impl UpdateRequest {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            priority: None,
            due_at: None,
        }
    }

    /// Starts from the current values of `task`, so callers only change
    /// what they mean to change.
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            priority: Some(task.priority),
            due_at: task.due_at,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn due_at(mut self, due_at: Option<DateTime<Utc>>) -> Self {
        self.due_at = due_at;
        self
    }
}

/// Symbolic due-date window, resolved against "now" when a listing runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueBucket {
    Today,
    Tomorrow,
    Week,
    /// Past due and not yet done.
    Overdue,
}

/// Half-open instant range `[start, end)` a due date must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueWindow {
    /// `None` means unbounded below.
    pub start: Option<DateTime<Utc>>,
    pub end: DateTime<Utc>,
}

impl DueBucket {
    /// Resolves the bucket to a concrete window around `now`, using local
    /// calendar days.
    pub fn window(self, now: DateTime<Utc>) -> DueWindow {
        let today = now.with_timezone(&Local).date_naive();
        let day = |offset: u64| local_midnight(today + Days::new(offset));

        match self {
            DueBucket::Today => DueWindow {
                start: Some(day(0)),
                end: day(1),
            },
            DueBucket::Tomorrow => DueWindow {
                start: Some(day(1)),
                end: day(2),
            },
            DueBucket::Week => DueWindow {
                start: Some(day(0)),
                end: day(7),
            },
            DueBucket::Overdue => DueWindow { start: None, end: now },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DueBucket::Today => "today",
            DueBucket::Tomorrow => "tomorrow",
            DueBucket::Week => "week",
            DueBucket::Overdue => "overdue",
        }
    }
}

impl fmt::Display for DueBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DueBucket {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(DueBucket::Today),
            "tomorrow" => Ok(DueBucket::Tomorrow),
            "week" => Ok(DueBucket::Week),
            "overdue" => Ok(DueBucket::Overdue),
            _ => Err(TaskError::invalid(format!(
                "unknown due bucket '{}', expected today, tomorrow, week or overdue",
                s
            ))),
        }
    }
}

/// Listing criteria. Every field is optional; unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub is_done: Option<bool>,
    #[serde(default)]
    pub due: Option<DueBucket>,
    /// Case-insensitive substring over title and description.
    #[serde(default)]
    pub search: Option<String>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn done(mut self, is_done: bool) -> Self {
        self.is_done = Some(is_done);
        self
    }

    pub fn due(mut self, bucket: DueBucket) -> Self {
        self.due = Some(bucket);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }
}

/// Checks a title against the entity rules.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(TaskError::invalid("title must not be empty"));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(TaskError::invalid(format!(
            "title is {} characters long, the limit is {}",
            len, MAX_TITLE_LEN
        )));
    }
    Ok(())
}

/// Parses user-supplied due dates.
///
/// Accepts RFC 3339 (`2026-06-10T17:00:00Z`), local `YYYY-MM-DD HH:MM[:SS]`
/// and a bare local `YYYY-MM-DD`, which means midnight at the start of that
/// day.
pub fn parse_due_date(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(local_to_utc(naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(local_midnight(date));
    }

    Err(TaskError::invalid(format!("malformed due date '{}'", input)))
}

fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    local_to_utc(date.and_time(NaiveTime::MIN))
}

// Ambiguous local times take the earlier instant; times skipped by a DST
// jump are read as UTC.
fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!(" HIGH ".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("Low".parse::<Priority>().unwrap(), Priority::Low);
    }

    #[test]
    fn unknown_priority_is_invalid_argument() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert!(matches!(err, TaskError::InvalidArgument(_)));
    }

    #[test]
    fn priority_rank_orders_most_urgent_first() {
        let ranks: Vec<u8> = Priority::ALL.iter().map(|p| p.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let parsed: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, Priority::Low);
    }

    #[test]
    fn title_validation() {
        assert!(validate_title("Write spec").is_ok());
        assert!(matches!(validate_title(""), Err(TaskError::InvalidArgument(_))));
        assert!(matches!(validate_title("   \t"), Err(TaskError::InvalidArgument(_))));
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN)).is_ok());
        assert!(matches!(validate_title(&"x".repeat(MAX_TITLE_LEN + 1)), Err(TaskError::InvalidArgument(_))));
    }

    #[test]
    fn bucket_windows_follow_local_days() {
        let now = local(2026, 6, 10, 15, 30);

        let today = DueBucket::Today.window(now);
        assert_eq!(today.start, Some(local(2026, 6, 10, 0, 0)));
        assert_eq!(today.end, local(2026, 6, 11, 0, 0));

        let tomorrow = DueBucket::Tomorrow.window(now);
        assert_eq!(tomorrow.start, Some(local(2026, 6, 11, 0, 0)));
        assert_eq!(tomorrow.end, local(2026, 6, 12, 0, 0));

        let week = DueBucket::Week.window(now);
        assert_eq!(week.start, Some(local(2026, 6, 10, 0, 0)));
        assert_eq!(week.end, local(2026, 6, 17, 0, 0));
    }

    #[test]
    fn week_includes_today_and_excludes_day_eight() {
        let now = local(2026, 6, 10, 9, 0);
        let week = DueBucket::Week.window(now);
        assert_eq!(week.start, Some(local(2026, 6, 10, 0, 0)));
        assert_eq!(week.end - Duration::minutes(1), local(2026, 6, 16, 23, 59));
    }

    #[test]
    fn overdue_window_ends_now() {
        let now = local(2026, 6, 10, 9, 0);
        let overdue = DueBucket::Overdue.window(now);
        assert_eq!(overdue.start, None);
        assert_eq!(overdue.end, now);
    }

    #[test]
    fn bucket_names_parse() {
        assert_eq!("Today".parse::<DueBucket>().unwrap(), DueBucket::Today);
        assert_eq!("week".parse::<DueBucket>().unwrap(), DueBucket::Week);
        assert!(matches!("someday".parse::<DueBucket>(), Err(TaskError::InvalidArgument(_))));
    }

    #[test]
    fn due_dates_parse_in_all_accepted_forms() {
        let utc = parse_due_date("2026-06-10T17:00:00Z").unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2026, 6, 10, 17, 0, 0).unwrap());

        let offset = parse_due_date("2026-06-10T19:00:00+02:00").unwrap();
        assert_eq!(offset, utc);

        assert_eq!(parse_due_date("2026-06-10 08:15").unwrap(), local(2026, 6, 10, 8, 15));
        assert_eq!(parse_due_date("2026-06-10").unwrap(), local(2026, 6, 10, 0, 0));
    }

    #[test]
    fn malformed_due_date_is_invalid_argument() {
        for input in ["tomorrow", "2026-13-01", "10/06/2026", ""] {
            assert!(
                matches!(parse_due_date(input), Err(TaskError::InvalidArgument(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn update_request_from_task_keeps_current_values() {
        let now = Utc.with_ymd_and_hms(2026, 6, 10, 12, 0, 0).unwrap();
        let task = Task {
            id: 7,
            title: "Review PR".into(),
            description: "backend".into(),
            is_done: true,
            due_at: Some(now),
            priority: Priority::High,
            created_at: now,
            updated_at: now,
        };
        let request = UpdateRequest::from_task(&task);
        assert_eq!(request.id, 7);
        assert_eq!(request.title, "Review PR");
        assert_eq!(request.priority, Some(Priority::High));
        assert_eq!(request.due_at, Some(now));
    }
}
