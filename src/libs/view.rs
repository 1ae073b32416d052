use super::task::Task;
use chrono::{DateTime, Local, Utc};
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "", "PRIORITY", "TITLE", "DUE", "CREATED"]);
        for task in tasks {
            let done = if task.is_done { "✔" } else { " " };
            let due = task.due_at.map(format_local).unwrap_or_default();
            table.add_row(row![task.id, done, task.priority, task.title, due, format_local(task.created_at)]);
        }
        table.printstd();
    }

    pub fn task(task: &Task) {
        let mut table = Table::new();

        table.add_row(row!["ID", task.id]);
        table.add_row(row!["TITLE", task.title]);
        table.add_row(row!["DESCRIPTION", task.description]);
        table.add_row(row!["PRIORITY", task.priority]);
        let done = if task.is_done { "yes" } else { "no" };
        let due = task.due_at.map(format_local).unwrap_or_else(|| "-".to_string());

        table.add_row(row!["DONE", done]);
        table.add_row(row!["DUE", due]);
        table.add_row(row!["CREATED", format_local(task.created_at)]);
        table.add_row(row!["UPDATED", format_local(task.updated_at)]);
        table.printstd();
    }
}

fn format_local(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
