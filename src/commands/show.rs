use crate::db::tasks::TaskRepository;
use crate::libs::view::View;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Task id
    id: i64,
}

pub fn cmd(tasks: &TaskRepository, args: ShowArgs) -> Result<()> {
    let task = tasks.get(args.id)?;
    View::task(&task);
    Ok(())
}
