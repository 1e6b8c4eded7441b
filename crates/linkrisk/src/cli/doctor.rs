use linkrisk_core::policy::{self, ScoringConfig, CONFIG_ENV};

use crate::cli::EXIT_ERROR;
use crate::logging::LOG_ENV;
use crate::store;

pub fn run(json: bool) -> i32 {
    let info = gather_info();

    if json {
        match serde_json::to_string_pretty(&info) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("linkrisk: JSON serialization failed: {e}");
                return EXIT_ERROR;
            }
        }
    } else {
        print_human(&info);
    }
    0
}

#[derive(serde::Serialize)]
struct DoctorInfo {
    version: String,
    binary_path: String,
    config_env: Option<String>,
    config_path: Option<String>,
    config_status: String,
    brand_count: Option<usize>,
    log_filter_env: Option<String>,
    data_dir: Option<String>,
    last_check_path: Option<String>,
    last_check_at: Option<String>,
}

fn gather_info() -> DoctorInfo {
    let binary_path = std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let config_path = policy::discover_config_path();
    let (config_status, brand_count) = match ScoringConfig::discover() {
        Ok(config) if config_path.is_some() => ("ok".to_string(), Some(config.brands().len())),
        Ok(config) => ("built-in".to_string(), Some(config.brands().len())),
        Err(e) => (format!("invalid: {e}"), None),
    };

    let last_check_path = store::default_path();
    let last_check_at = last_check_path
        .as_deref()
        .and_then(|p| store::load(p).ok().flatten())
        .map(|entry| entry.checked_at);

    DoctorInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        binary_path,
        config_env: std::env::var(CONFIG_ENV).ok(),
        config_path: config_path.map(|p| p.display().to_string()),
        config_status,
        brand_count,
        log_filter_env: std::env::var(LOG_ENV).ok(),
        data_dir: policy::data_dir().map(|d| d.display().to_string()),
        last_check_path: last_check_path.map(|p| p.display().to_string()),
        last_check_at,
    }
}

fn print_human(info: &DoctorInfo) {
    eprintln!("linkrisk {}", info.version);
    eprintln!("  binary:       {}", info.binary_path);
    eprintln!(
        "  config:       {}",
        info.config_path.as_deref().unwrap_or("(none, using built-in)")
    );
    if let Some(ref env) = info.config_env {
        eprintln!("  config env:   {env} ({CONFIG_ENV})");
    }
    eprintln!("  status:       {}", info.config_status);
    if let Some(count) = info.brand_count {
        eprintln!("  brands:       {count}");
    }
    if let Some(ref filter) = info.log_filter_env {
        eprintln!("  log filter:   {filter} ({LOG_ENV})");
    }
    eprintln!(
        "  data dir:     {}",
        info.data_dir.as_deref().unwrap_or("not found")
    );
    eprintln!(
        "  last check:   {}",
        info.last_check_path.as_deref().unwrap_or("not found")
    );
    eprintln!(
        "  checked at:   {}",
        info.last_check_at.as_deref().unwrap_or("never")
    );
}
