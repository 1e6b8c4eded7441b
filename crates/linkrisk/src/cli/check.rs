use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use linkrisk_core::engine;
use linkrisk_core::output;
use linkrisk_core::policy::ScoringConfig;
use linkrisk_core::verdict::{RiskLevel, RiskResult};

use crate::cli::EXIT_ERROR;
use crate::store;

pub fn run(urls: Vec<String>, json: bool, config_path: Option<&Path>, save: bool) -> i32 {
    match check(urls, json, config_path, save) {
        Ok(level) => level.exit_code(),
        Err(e) => {
            eprintln!("linkrisk: {e:#}");
            EXIT_ERROR
        }
    }
}

/// Load config once, score every link, and return the worst level seen.
fn check(urls: Vec<String>, json: bool, config_path: Option<&Path>, save: bool) -> Result<RiskLevel> {
    let config = load_config(config_path)?;
    let urls = collect_urls(urls, io::stdin().lock())?;

    let stdout = io::stdout();
    let mut results = Vec::with_capacity(urls.len());

    for (i, url) in urls.iter().enumerate() {
        let result = engine::score_url_with(url, &config);
        tracing::info!(
            url = %result.url,
            score = result.score,
            level = %result.level,
            "scored link"
        );

        if json {
            output::write_json(&result, stdout.lock()).context("writing JSON")?;
        } else {
            if i > 0 {
                println!();
            }
            output::write_human_auto(&result).context("writing report")?;
        }
        results.push(result);
    }

    record_last(results.last(), save, store::default_path());
    Ok(worst_level(&results))
}

pub(crate) fn load_config(path: Option<&Path>) -> Result<ScoringConfig> {
    match path {
        Some(p) => ScoringConfig::load(p).context("invalid scoring config"),
        None => ScoringConfig::discover().context("invalid scoring config"),
    }
}

/// Links from the command line, or one per non-blank line of `input` when none were given.
fn collect_urls(args: Vec<String>, input: impl BufRead) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }
    let urls = read_urls(input)?;
    if urls.is_empty() {
        bail!("no links to check");
    }
    Ok(urls)
}

fn read_urls(input: impl BufRead) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    for line in input.lines() {
        let line = line.context("reading links from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            urls.push(line.to_string());
        }
    }
    Ok(urls)
}

/// The most severe level across all results, `Low` when there are none.
fn worst_level(results: &[RiskResult]) -> RiskLevel {
    results
        .iter()
        .map(|r| r.level)
        .max()
        .unwrap_or(RiskLevel::Low)
}

/// Recording is best effort: a failure is logged and never changes the exit code.
fn record_last(last: Option<&RiskResult>, save: bool, path: Option<PathBuf>) {
    let Some(result) = last else { return };
    if !save {
        return;
    }
    let Some(path) = path else {
        tracing::warn!("no data directory available, last check not recorded");
        return;
    };
    if let Err(e) = store::save(&path, result) {
        tracing::warn!("failed to record last check: {e:#}");
    }
}
