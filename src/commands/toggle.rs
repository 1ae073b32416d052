use crate::db::tasks::TaskRepository;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ToggleArgs {
    /// Task id
    id: i64,
}

pub fn cmd(tasks: &TaskRepository, args: ToggleArgs) -> Result<()> {
    let task = tasks.toggle_done(args.id)?;

    msg_success!(Message::TaskToggled(task.id, task.is_done));
    Ok(())
}
