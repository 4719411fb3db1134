use crate::cli::{ConfigArgs, ConfigCommands};
use crate::config::default_config_path;
use crate::error::Result;
use std::path::Path;

pub fn run(args: &ConfigArgs, explicit: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            let path = match explicit {
                Some(path) => path.to_path_buf(),
                None => default_config_path()?,
            };
            let status = if path.is_file() { "" } else { " (not present, using defaults)" };
            println!("{}{}", path.display(), status);
        }
    }
    Ok(())
}
