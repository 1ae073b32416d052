//! Persistence layer for taskdeck.
//!
//! Built on SQLite through an `r2d2` connection pool.
//!
//! - **`db`**: pool bootstrap from a [`Config`](crate::libs::config::Config)
//! - **`migrations`**: versioned schema changes, applied on open
//! - **`tasks`**: the task repository
//!
//! ```rust
//! use taskdeck::db::db::Db;
//! use taskdeck::libs::config::Config;
//! use taskdeck::libs::task::{CreateRequest, Filter};
//!
//! let db = Db::new(&Config::in_memory())?;
//! let tasks = db.tasks();
//! tasks.create(&CreateRequest::new("Clean desk"))?;
//! assert_eq!(tasks.count(&Filter::all())?, 1);
//! # Ok::<(), taskdeck::libs::error::TaskError>(())
//! ```

/// Connection pool construction and pragma setup.
pub mod db;

/// Schema versioning.
pub mod migrations;

/// Task CRUD, toggling, ordering and filtering.
pub mod tasks;
