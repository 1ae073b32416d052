//! Core library modules for taskdeck.
//!
//! - **Entity**: `task` holds the task record, priorities, requests and filters
//! - **Errors**: `error` classifies every failure the store can report
//! - **Infrastructure**: `clock`, `config`, `data_storage`
//! - **Output**: `messages` for user-facing text and logging macros, `view` for tables
//!
//! ```rust
//! use taskdeck::libs::task::{CreateRequest, Priority};
//!
//! let request = CreateRequest::new("Write spec").priority(Priority::High);
//! assert_eq!(request.priority, Some(Priority::High));
//! ```

pub mod clock;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod messages;
pub mod task;
pub mod view;
