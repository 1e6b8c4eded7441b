use std::io::Write;

use crate::verdict::{RiskLevel, RiskResult};

const SCHEMA_VERSION: u32 = 1;

/// JSON output wrapper with schema version.
#[derive(serde::Serialize)]
pub struct JsonOutput<'a> {
    pub schema_version: u32,
    #[serde(flatten)]
    pub result: &'a RiskResult,
}

/// Write one result as a JSON line.
pub fn write_json(result: &RiskResult, mut w: impl Write) -> std::io::Result<()> {
    let output = JsonOutput {
        schema_version: SCHEMA_VERSION,
        result,
    };
    serde_json::to_writer(&mut w, &output)?;
    writeln!(w)?;
    Ok(())
}

/// Write a human-readable report with ANSI colors.
pub fn write_human(result: &RiskResult, w: impl Write) -> std::io::Result<()> {
    write_report(result, w, true)
}

/// Write a human-readable report without ANSI colors.
pub fn write_human_no_color(result: &RiskResult, w: impl Write) -> std::io::Result<()> {
    write_report(result, w, false)
}

/// Write a human-readable report to stdout, colored only when stdout is a TTY.
pub fn write_human_auto(result: &RiskResult) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let is_tty = is_terminal::is_terminal(&stdout);
    write_report(result, stdout.lock(), is_tty)
}

fn write_report(result: &RiskResult, mut w: impl Write, color: bool) -> std::io::Result<()> {
    let (start, reset) = if color {
        let start = match result.level {
            RiskLevel::High => "\x1b[31m",   // red
            RiskLevel::Medium => "\x1b[33m", // yellow
            RiskLevel::Low => "\x1b[32m",    // green
        };
        (start, "\x1b[0m")
    } else {
        ("", "")
    };

    writeln!(w, "URL:  {}", result.url)?;
    writeln!(w, "Host: {}", result.hostname)?;
    writeln!(
        w,
        "Risk: {start}{}{reset} ({}/100)",
        result.level, result.score
    )?;
    if result.reasons.is_empty() {
        writeln!(w, "  No risk indicators found")?;
    }
    for reason in &result.reasons {
        writeln!(w, "  - {reason}")?;
    }
    Ok(())
}
