#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;
    use taskdeck::db::db::Db;
    use taskdeck::db::tasks::TaskRepository;
    use taskdeck::libs::clock::ManualClock;
    use taskdeck::libs::config::Config;
    use taskdeck::libs::error::TaskError;
    use taskdeck::libs::task::{CreateRequest, Filter, Priority, UpdateRequest};
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        clock: Arc<ManualClock>,
        tasks: TaskRepository,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
            let clock = Arc::new(ManualClock::new(start));
            let db = Db::new(&Config::in_memory()).unwrap();
            let tasks = db.tasks_with_clock(clock.clone());
            TaskTestContext { clock, tasks }
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_then_get_returns_same_task(ctx: &mut TaskTestContext) {
        let due = Utc.with_ymd_and_hms(2026, 3, 5, 17, 30, 0).unwrap();
        let created = ctx
            .tasks
            .create(&CreateRequest::new("Write spec").description("First draft").priority(Priority::High).due_at(due))
            .unwrap();

        assert!(created.id > 0);
        assert!(!created.is_done);
        assert_eq!(created.created_at, ctx.clock.peek());
        assert_eq!(created.updated_at, created.created_at);
        assert_eq!(created.due_at, Some(due));

        let fetched = ctx.tasks.get(created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_defaults(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(&CreateRequest::new("Clean desk")).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.description, "");
        assert_eq!(task.due_at, None);
        assert!(!task.is_done);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_assigns_distinct_ids(ctx: &mut TaskTestContext) {
        let first = ctx.tasks.create(&CreateRequest::new("One")).unwrap();
        let second = ctx.tasks.create(&CreateRequest::new("Two")).unwrap();
        assert_ne!(first.id, second.id);
        assert!(second.id > first.id);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_rejects_blank_title(ctx: &mut TaskTestContext) {
        for title in ["", "   ", "\t\n"] {
            let err = ctx.tasks.create(&CreateRequest::new(title)).unwrap_err();
            assert!(matches!(err, TaskError::InvalidArgument(_)), "title {title:?} gave {err:?}");
        }
        assert_eq!(ctx.tasks.count(&Filter::all()).unwrap(), 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_rejects_overlong_title(ctx: &mut TaskTestContext) {
        let err = ctx.tasks.create(&CreateRequest::new("x".repeat(256))).unwrap_err();
        assert!(matches!(err, TaskError::InvalidArgument(_)));

        let task = ctx.tasks.create(&CreateRequest::new("x".repeat(255))).unwrap();
        assert_eq!(task.title.len(), 255);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_replaces_fields(ctx: &mut TaskTestContext) {
        let due = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        let task = ctx
            .tasks
            .create(&CreateRequest::new("Original").description("Old notes").priority(Priority::Low).due_at(due))
            .unwrap();

        ctx.clock.advance(Duration::minutes(5));
        let updated = ctx
            .tasks
            .update(&UpdateRequest::new(task.id, "Renamed").description("New notes").priority(Priority::High))
            .unwrap();

        assert_eq!(updated.id, task.id);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, "New notes");
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.due_at, None);
        assert_eq!(updated.is_done, task.is_done);
        assert_eq!(updated.created_at, task.created_at);
        assert_eq!(updated.updated_at, ctx.clock.peek());
        assert!(updated.updated_at > task.updated_at);

        assert_eq!(ctx.tasks.get(task.id).unwrap(), updated);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_without_priority_resets_to_medium(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(&CreateRequest::new("Urgent").priority(Priority::High)).unwrap();
        let updated = ctx.tasks.update(&UpdateRequest::new(task.id, "Urgent")).unwrap();
        assert_eq!(updated.priority, Priority::Medium);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_from_task_keeps_values(ctx: &mut TaskTestContext) {
        let due = Utc.with_ymd_and_hms(2026, 3, 9, 8, 0, 0).unwrap();
        let task = ctx
            .tasks
            .create(&CreateRequest::new("Keep").description("same").priority(Priority::Low).due_at(due))
            .unwrap();

        let updated = ctx.tasks.update(&UpdateRequest::from_task(&task)).unwrap();
        assert_eq!(updated.title, task.title);
        assert_eq!(updated.description, task.description);
        assert_eq!(updated.priority, task.priority);
        assert_eq!(updated.due_at, task.due_at);
        assert!(updated.updated_at > task.updated_at);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_invalid_update_leaves_row_unchanged(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(&CreateRequest::new("Stable").priority(Priority::High)).unwrap();
        ctx.clock.advance(Duration::seconds(10));

        let err = ctx.tasks.update(&UpdateRequest::new(task.id, "  ")).unwrap_err();
        assert!(matches!(err, TaskError::InvalidArgument(_)));
        assert_eq!(ctx.tasks.get(task.id).unwrap(), task);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_invalid_update_of_missing_id_is_invalid_argument(ctx: &mut TaskTestContext) {
        let err = ctx.tasks.update(&UpdateRequest::new(999, "")).unwrap_err();
        assert!(matches!(err, TaskError::InvalidArgument(_)));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_missing_id_is_not_found(ctx: &mut TaskTestContext) {
        let err = ctx.tasks.update(&UpdateRequest::new(42, "Ghost")).unwrap_err();
        assert!(matches!(err, TaskError::NotFound(42)));
        assert_eq!(ctx.tasks.count(&Filter::all()).unwrap(), 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_toggle_twice_restores_flag(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(&CreateRequest::new("Flip me")).unwrap();

        let once = ctx.tasks.toggle_done(task.id).unwrap();
        assert!(once.is_done);
        assert!(once.updated_at > task.updated_at);

        let twice = ctx.tasks.toggle_done(task.id).unwrap();
        assert!(!twice.is_done);
        assert!(twice.updated_at > once.updated_at);

        assert_eq!(twice.title, task.title);
        assert_eq!(twice.priority, task.priority);
        assert_eq!(twice.created_at, task.created_at);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_toggle_missing_id_is_not_found(ctx: &mut TaskTestContext) {
        let err = ctx.tasks.toggle_done(7).unwrap_err();
        assert!(matches!(err, TaskError::NotFound(7)));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_restamp_increases_when_clock_is_frozen(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(&CreateRequest::new("Same tick")).unwrap();

        let mut last = task.updated_at;
        for _ in 0..3 {
            let toggled = ctx.tasks.toggle_done(task.id).unwrap();
            assert!(toggled.updated_at > last);
            last = toggled.updated_at;
        }
        assert!(last >= task.created_at);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_get_missing_id_is_not_found(ctx: &mut TaskTestContext) {
        let err = ctx.tasks.get(1).unwrap_err();
        assert!(matches!(err, TaskError::NotFound(1)));
        assert!(!err.is_retryable());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_removes_row(ctx: &mut TaskTestContext) {
        let keep = ctx.tasks.create(&CreateRequest::new("Keep")).unwrap();
        let gone = ctx.tasks.create(&CreateRequest::new("Drop")).unwrap();

        ctx.tasks.delete(gone.id).unwrap();

        assert!(matches!(ctx.tasks.get(gone.id), Err(TaskError::NotFound(_))));
        let remaining = ctx.tasks.list(&Filter::all()).unwrap();
        assert_eq!(remaining, vec![keep]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_missing_id_is_not_found(ctx: &mut TaskTestContext) {
        ctx.tasks.create(&CreateRequest::new("Survivor")).unwrap();

        let err = ctx.tasks.delete(12345).unwrap_err();
        assert!(matches!(err, TaskError::NotFound(12345)));
        assert_eq!(ctx.tasks.count(&Filter::all()).unwrap(), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_twice_is_not_found(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(&CreateRequest::new("Once")).unwrap();
        ctx.tasks.delete(task.id).unwrap();
        assert!(matches!(ctx.tasks.delete(task.id), Err(TaskError::NotFound(_))));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_deleted_ids_are_not_reused(ctx: &mut TaskTestContext) {
        let first = ctx.tasks.create(&CreateRequest::new("First")).unwrap();
        ctx.tasks.delete(first.id).unwrap();
        let second = ctx.tasks.create(&CreateRequest::new("Second")).unwrap();
        assert!(second.id > first.id);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_empty_store_lists_nothing(ctx: &mut TaskTestContext) {
        assert!(ctx.tasks.list(&Filter::all()).unwrap().is_empty());
        assert_eq!(ctx.tasks.count(&Filter::all()).unwrap(), 0);
    }
}
