use crate::db::tasks::TaskRepository;
use crate::libs::messages::Message;
use crate::libs::task::{parse_due_date, CreateRequest, Priority};
use crate::msg_success;
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title
    #[arg(required = true)]
    title: String,
    /// Longer description
    #[arg(short, long, default_value = "")]
    description: String,
    /// low, medium or high (default: medium)
    #[arg(short, long)]
    priority: Option<Priority>,
    /// Due date: RFC 3339, "YYYY-MM-DD HH:MM" or "YYYY-MM-DD" (local time)
    #[arg(long, value_parser = parse_due_date)]
    due: Option<DateTime<Utc>>,
}

pub fn cmd(tasks: &TaskRepository, args: AddArgs) -> Result<()> {
    let request = CreateRequest {
        title: args.title,
        description: args.description,
        priority: args.priority,
        due_at: args.due,
    };
    let task = tasks.create(&request)?;

    msg_success!(Message::TaskCreated(task.id));
    Ok(())
}
