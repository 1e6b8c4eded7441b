use anyhow::{Context, Result};
use linkrisk_core::output;

use crate::cli::EXIT_ERROR;
use crate::store;

pub fn run(json: bool) -> i32 {
    match show(json) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("linkrisk: {e:#}");
            EXIT_ERROR
        }
    }
}

fn show(json: bool) -> Result<i32> {
    let path = store::default_path().context("no data directory available")?;
    let Some(entry) = store::load(&path)? else {
        eprintln!("linkrisk: no link has been checked yet");
        return Ok(0);
    };

    if json {
        let s = serde_json::to_string_pretty(&entry)?;
        println!("{s}");
    } else {
        println!("Checked: {}", entry.checked_at);
        output::write_human_auto(&entry.result).context("writing report")?;
    }
    Ok(0)
}
