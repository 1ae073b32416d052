use crate::libs::config::{Config, StoreLocation};
use crate::libs::messages::Message;
use crate::{msg_print, msg_success, msg_warning};
use anyhow::Result;

pub fn cmd(config: Config) -> Result<()> {
    let path = config.save()?;
    msg_success!(Message::ConfigSaved(path.display().to_string()));

    match config.location()? {
        StoreLocation::File(db_path) => msg_print!(Message::ConfigDbLocation(db_path.display().to_string())),
        StoreLocation::Memory => msg_warning!(Message::ConfigDbLocation("in-memory, tasks are lost on exit".to_string())),
    }
    Ok(())
}
