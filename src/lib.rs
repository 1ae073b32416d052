//! # taskdeck
//!
//! A task tracking store: tasks with a title, description, done flag,
//! optional due date and a three-level priority, kept in SQLite.
//!
//! ## Features
//!
//! - **Task Repository**: create, read, update, toggle and delete tasks
//! - **Ordering**: most urgent priority first, newest first within a priority
//! - **Filtering**: by priority, done flag, due-date bucket and text search
//! - **Command Line**: `taskdeck` binary driving the repository
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
//! tasks.create(&CreateRequest::new("Write spec").priority(Priority::High))?;
//! tasks.create(&CreateRequest::new("Clean desk").priority(Priority::Low))?;
//!
//! let titles: Vec<String> = tasks.list(&Filter::all())?.into_iter().map(|t| t.title).collect();
//! assert_eq!(titles, ["Write spec", "Clean desk"]);
//! # Ok::<(), taskdeck::libs::error::TaskError>(())
//! ```

pub mod commands;
pub mod db;
pub mod libs;
