use crate::db::tasks::TaskRepository;
use crate::libs::messages::Message;
use crate::libs::task::{DueBucket, Filter, Priority};
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only tasks with this priority
    #[arg(short, long)]
    priority: Option<Priority>,
    /// Only completed tasks
    #[arg(long, conflicts_with = "pending")]
    done: bool,
    /// Only tasks not yet done
    #[arg(long)]
    pending: bool,
    /// today, tomorrow, week or overdue
    #[arg(long)]
    due: Option<DueBucket>,
    /// Case-insensitive text in title or description
    #[arg(short, long)]
    search: Option<String>,
}

impl ListArgs {
    fn filter(self) -> Filter {
        let is_done = match (self.done, self.pending) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        Filter {
            priority: self.priority,
            is_done,
            due: self.due,
            search: self.search,
        }
    }
}

pub fn cmd(tasks: &TaskRepository, args: ListArgs) -> Result<()> {
    let tasks = tasks.list(&args.filter())?;

    if tasks.is_empty() {
        msg_info!(Message::TasksNotFound);
        return Ok(());
    }

    msg_print!(Message::TasksHeader(tasks.len()));
    View::tasks(&tasks);
    Ok(())
}
