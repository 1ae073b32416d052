/// Every user-facing message the application prints.
///
/// Text lives in the `Display` impl in `display.rs`; call sites only pick a
/// variant and its parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(i64),               // id
    TaskUpdated(i64),               // id
    TaskDeleted(i64),               // id
    TaskToggled(i64, bool),         // id, is_done
    TasksNotFound,
    TasksHeader(usize),             // count
    ConfirmDeleteTask(i64, String), // id, title
    NoChangesDetected,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved(String), // path
    ConfigDbLocation(String),

    // === DATABASE MESSAGES ===
    DatabaseUpToDate,
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,

    // === GENERIC MESSAGES ===
    OperationCancelled,
}
