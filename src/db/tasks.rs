//! Task repository: every read and write against the `tasks` table.
//!
//! Each operation is one SQL statement. Writes read the affected row back
//! with `RETURNING`, so callers always get the stored entity, including
//! store-assigned fields, without a second round trip.
//!
//! ## Ordering
//!
//! Listings are ordered by priority rank (high, medium, low), then by
//! creation time, newest first, then by id ascending so rows created in the
//! same microsecond still come back in a stable order.
//!
//! ## Last-modified stamp
//!
//! Every mutating statement sets `updated_at = MAX(now, updated_at + 1)`
//! (microseconds). The stamp therefore strictly increases on each
//! successful update or toggle, even when the clock has not moved.
//!
//! ## Usage
//!
//! ```rust
//! use taskdeck::db::db::Db;
//! use taskdeck::libs::config::Config;
//! use taskdeck::libs::task::{CreateRequest, Filter, Priority};
//!
//! let db = Db::new(&Config::in_memory())?;
//! let tasks = db.tasks();
//!
//! let task = tasks.create(&CreateRequest::new("Review PR").priority(Priority::High))?;
//! let done = tasks.toggle_done(task.id)?;
//! assert!(done.is_done);
//!
//! let high = tasks.list(&Filter::all().priority(Priority::High))?;
//! assert_eq!(high.len(), 1);
//! # Ok::<(), taskdeck::libs::error::TaskError>(())
//! ```

use crate::db::db::{ConnectionPool, PooledConnection};
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::error::{Result, TaskError};
use crate::libs::task::{validate_title, CreateRequest, DueBucket, Filter, Priority, Task, UpdateRequest};
use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Type, Value, ValueRef};
use rusqlite::{params, params_from_iter, OptionalExtension, Row, ToSql};
use std::sync::Arc;
use tracing::debug;

const INSERT_TASK: &str = "INSERT INTO tasks (title, description, is_done, due_at, priority, created_at, updated_at)
    VALUES (?1, ?2, 0, ?3, ?4, ?5, ?5)
    RETURNING id, title, description, is_done, due_at, priority, created_at, updated_at";

const UPDATE_TASK: &str = "UPDATE tasks
    SET title = ?2, description = ?3, priority = ?4, due_at = ?5, updated_at = MAX(?6, updated_at + 1)
    WHERE id = ?1
    RETURNING id, title, description, is_done, due_at, priority, created_at, updated_at";

const TOGGLE_TASK: &str = "UPDATE tasks
    SET is_done = NOT is_done, updated_at = MAX(?2, updated_at + 1)
    WHERE id = ?1
    RETURNING id, title, description, is_done, due_at, priority, created_at, updated_at";

const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

const SELECT_TASK: &str = "SELECT id, title, description, is_done, due_at, priority, created_at, updated_at
    FROM tasks WHERE id = ?1";

const SELECT_TASKS: &str = "SELECT id, title, description, is_done, due_at, priority, created_at, updated_at FROM tasks";

const COUNT_TASKS: &str = "SELECT COUNT(*) FROM tasks";

const ORDER_TASKS: &str = "ORDER BY
    CASE priority
        WHEN 'high' THEN 1
        WHEN 'medium' THEN 2
        WHEN 'low' THEN 3
    END,
    created_at DESC,
    id ASC";

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e: TaskError| FromSqlError::Other(Box::new(e)))
    }
}

/// Reads and writes tasks through a shared connection pool.
///
/// Holds no mutable state of its own; clone it or wrap it in an `Arc` to
/// share between threads.
#[derive(Clone)]
pub struct TaskRepository {
    pool: ConnectionPool,
    clock: Arc<dyn Clock>,
}

impl TaskRepository {
    pub fn new(pool: ConnectionPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    pub fn with_system_clock(pool: ConnectionPool) -> Self {
        Self::new(pool, Arc::new(SystemClock))
    }

    fn conn(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }

    /// Tasks matching `filter`, most urgent first and newest first within
    /// a priority.
    pub fn list(&self, filter: &Filter) -> Result<Vec<Task>> {
        let (where_clause, values) = self.where_clause(filter);
        let sql = format!("{}{} {}", SELECT_TASKS, where_clause, ORDER_TASKS);

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let tasks = stmt.query_map(params_from_iter(values.iter()), map_task)?.collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(count = tasks.len(), ?filter, "listed tasks");
        Ok(tasks)
    }

    /// Number of tasks `list(filter)` would return.
    pub fn count(&self, filter: &Filter) -> Result<usize> {
        let (where_clause, values) = self.where_clause(filter);
        let sql = format!("{}{}", COUNT_TASKS, where_clause);

        let conn = self.conn()?;
        let count: i64 = conn.query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn get(&self, id: i64) -> Result<Task> {
        let conn = self.conn()?;
        conn.query_row(SELECT_TASK, params![id], map_task).optional()?.ok_or(TaskError::NotFound(id))
    }

    /// Inserts a new task and returns it as stored.
    pub fn create(&self, request: &CreateRequest) -> Result<Task> {
        validate_title(&request.title)?;

        let now = to_micros(self.clock.now());
        let priority = request.priority.unwrap_or_default();

        let conn = self.conn()?;
        let task = conn.query_row(
            INSERT_TASK,
            params![request.title, request.description, request.due_at.map(to_micros), priority, now],
            map_task,
        )?;

        debug!(task_id = task.id, priority = %task.priority, "task created");
        Ok(task)
    }

    /// Replaces title, description, priority and due date of an existing
    /// task. An invalid request is rejected before the row is touched.
    pub fn update(&self, request: &UpdateRequest) -> Result<Task> {
        validate_title(&request.title)?;

        let now = to_micros(self.clock.now());
        let priority = request.priority.unwrap_or_default();

        let conn = self.conn()?;
        let task = conn
            .query_row(
                UPDATE_TASK,
                params![request.id, request.title, request.description, priority, request.due_at.map(to_micros), now],
                map_task,
            )
            .optional()?
            .ok_or(TaskError::NotFound(request.id))?;

        debug!(task_id = task.id, "task updated");
        Ok(task)
    }

    /// Flips the done flag.
    pub fn toggle_done(&self, id: i64) -> Result<Task> {
        let now = to_micros(self.clock.now());

        let conn = self.conn()?;
        let task = conn.query_row(TOGGLE_TASK, params![id, now], map_task).optional()?.ok_or(TaskError::NotFound(id))?;

        debug!(task_id = task.id, is_done = task.is_done, "task toggled");
        Ok(task)
    }

    /// Removes a task permanently. Fails with `NotFound` when nothing was
    /// deleted.
    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let affected = conn.execute(DELETE_TASK, params![id])?;

        if affected == 0 {
            return Err(TaskError::NotFound(id));
        }

        debug!(task_id = id, "task deleted");
        Ok(())
    }

    fn where_clause(&self, filter: &Filter) -> (String, Vec<Value>) {
        let mut conditions: Vec<String> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(priority) = filter.priority {
            values.push(Value::Text(priority.as_str().to_string()));
            conditions.push(format!("priority = ?{}", values.len()));
        }

        if let Some(is_done) = filter.is_done {
            values.push(Value::Integer(is_done as i64));
            conditions.push(format!("is_done = ?{}", values.len()));
        }

        if let Some(bucket) = filter.due {
            let window = bucket.window(self.clock.now());
            if let Some(start) = window.start {
                values.push(Value::Integer(to_micros(start)));
                conditions.push(format!("due_at >= ?{}", values.len()));
            }
            values.push(Value::Integer(to_micros(window.end)));
            conditions.push(format!("due_at < ?{}", values.len()));
            if bucket == DueBucket::Overdue {
                conditions.push("is_done = 0".to_string());
            }
        }

        if let Some(text) = filter.search.as_deref().map(str::trim).filter(|text| !text.is_empty()) {
            values.push(Value::Text(format!("%{}%", escape_like(text))));
            let n = values.len();
            conditions.push(format!("(title LIKE ?{n} ESCAPE '\\' OR description LIKE ?{n} ESCAPE '\\')"));
        }

        if conditions.is_empty() {
            (String::new(), values)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), values)
        }
    }
}

fn map_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        is_done: row.get(3)?,
        due_at: row.get::<_, Option<i64>>(4)?.map(|micros| from_micros(4, micros)).transpose()?,
        priority: row.get(5)?,
        created_at: from_micros(6, row.get(6)?)?,
        updated_at: from_micros(7, row.get(7)?)?,
    })
}

fn to_micros(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_micros()
}

fn from_micros(column: usize, micros: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(column, Type::Integer, format!("timestamp {} out of range", micros).into())
    })
}

// `LIKE` is case-insensitive for ASCII only; `%`, `_` and the escape
// character itself are matched literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
