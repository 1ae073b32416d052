pub mod add;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod show;
pub mod toggle;

use crate::db::db::Db;
use crate::db::tasks::TaskRepository;
use crate::libs::config::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create a task")]
    Add(add::AddArgs),
    #[command(about = "List tasks, most urgent first")]
    List(list::ListArgs),
    #[command(about = "Show one task")]
    Show(show::ShowArgs),
    #[command(about = "Edit a task's title, description, priority or due date")]
    Edit(edit::EditArgs),
    #[command(about = "Mark a task done, or pending again")]
    Toggle(toggle::ToggleArgs),
    #[command(about = "Delete a task permanently")]
    Delete(delete::DeleteArgs),
    #[command(about = "Write the effective configuration to the config file")]
    Init,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        let config = Config::read()?.with_env()?;

        match cli.command {
            Commands::Add(args) => add::cmd(&open(&config)?, args),
            Commands::List(args) => list::cmd(&open(&config)?, args),
            Commands::Show(args) => show::cmd(&open(&config)?, args),
            Commands::Edit(args) => edit::cmd(&open(&config)?, args),
            Commands::Toggle(args) => toggle::cmd(&open(&config)?, args),
            Commands::Delete(args) => delete::cmd(&open(&config)?, args),
            Commands::Init => init::cmd(config),
        }
    }
}

fn open(config: &Config) -> Result<TaskRepository> {
    Ok(Db::new(config)?.tasks())
}
