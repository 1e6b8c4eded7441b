use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::check::load_config;
use crate::cli::EXIT_ERROR;

pub fn run(config_path: Option<&Path>) -> i32 {
    match print_config(config_path) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("linkrisk: {e:#}");
            EXIT_ERROR
        }
    }
}

fn print_config(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let yaml = config.to_yaml().context("serializing config")?;
    print!("{yaml}");
    Ok(())
}
