// Career Flow Diagnostic client
// Main library entry point

pub mod admin;
pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod report;
pub mod tui;
pub mod utils;
pub mod wizard;

use anyhow::Result;
use api::client::{AssessmentApi, HttpApiClient};
use config::Settings;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Initialize logging system with dual format (JSON + human-readable)
fn init_logging(with_stdout: bool, configured_dir: Option<&Path>) -> Result<PathBuf> {
    let log_dir = utils::path_resolver::resolve_log_folder(configured_dir)?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%d-%H%M%S");
    let session = Uuid::new_v4().to_string();

    // JSON log file for structured parsing
    let json_log_file = log_dir.join(format!("careerflow-{}.log", timestamp));

    // Human-readable log file (.txt)
    let txt_log_file = log_dir.join(format!("careerflow-{}.txt", timestamp));

    // - JSON format to .log file
    // - Human-readable format to .txt file
    // - Optional: human-readable to stdout (disabled for TUI to avoid corrupting the terminal UI)
    let mut dispatch = fern::Dispatch::new()
        .level(log::LevelFilter::Debug)
        // Transport internals are noise at debug level.
        .level_for("hyper", log::LevelFilter::Info)
        .level_for("hyper_util", log::LevelFilter::Info)
        .level_for("reqwest", log::LevelFilter::Info);

    if with_stdout {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .level(log::LevelFilter::Info)
                .format(move |out, message, record| {
                    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let txt_line = utils::logging::format_human_readable_log(
                        &timestamp_local.to_string(),
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}", txt_line));
                })
                .chain(std::io::stdout()),
        );
    }

    dispatch = dispatch
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_utc = chrono::Utc::now().to_rfc3339();
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let json_line = utils::logging::format_json_log(
                        &timestamp_utc,
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                        Some(session.as_str()),
                    );
                    out.finish(format_args!("{}\n", json_line));
                })
                .chain(fern::log_file(json_log_file)?),
        )
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let txt_line = utils::logging::format_human_readable_log(
                        &timestamp_local.to_string(),
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}\n", txt_line));
                })
                .chain(fern::log_file(txt_log_file)?),
        );

    dispatch.apply()?;

    log::info!(
        "[PHASE: initialization] Logging initialized, log directory: {:?}",
        log_dir
    );
    Ok(log_dir)
}

/// Load settings and start logging. Settings failures are fatal (exit 1).
fn bootstrap(config_path: Option<&Path>, with_stdout: bool, mode: &str) -> Settings {
    let settings = match Settings::load(config_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Career Flow: failed to load settings: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(with_stdout, settings.log_dir.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] {} starting at {}",
        mode,
        chrono::Utc::now()
    );
    info!(
        "[PHASE: initialization] [STEP: settings] API base: {}",
        settings.api_base
    );
    settings
}

fn build_client(settings: &Settings) -> Arc<dyn AssessmentApi> {
    match HttpApiClient::from_settings(settings) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("[PHASE: initialization] [STEP: client] {}", e);
            eprintln!("Career Flow error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Interactive assessment wizard.
pub fn run_wizard(config_path: Option<&Path>) {
    // No stdout logging while the terminal UI is active
    let settings = bootstrap(config_path, false, "Assessment wizard");
    let api = build_client(&settings);

    if let Err(e) = tui::wizard::run(api, &settings) {
        error!("[PHASE: tui] [STEP: fatal] Wizard exited with error: {:?}", e);
        eprintln!("Career Flow error: {}", e);
        std::process::exit(1);
    }
}

/// Interactive admin dashboard.
pub fn run_admin(config_path: Option<&Path>) {
    let settings = bootstrap(config_path, false, "Admin dashboard");
    let api = build_client(&settings);

    if let Err(e) = tui::admin::run(api) {
        error!("[PHASE: tui] [STEP: fatal] Admin dashboard exited with error: {:?}", e);
        eprintln!("Career Flow error: {}", e);
        std::process::exit(1);
    }
}

/// Non-interactive TUI smoke mode (for automated checks).
/// Renders a single frame into an in-memory backend and exits 0/1.
pub fn run_tui_smoke(target: Option<String>, config_path: Option<&Path>) {
    let settings = bootstrap(config_path, false, "TUI smoke");

    let target = target.as_deref().unwrap_or("welcome");
    if let Err(e) = tui::smoke(target, &settings) {
        error!(
            "[PHASE: tui] [STEP: smoke] TUI smoke exited with error: {:?}",
            e
        );
        eprintln!("Career Flow error: {}", e);
        std::process::exit(1);
    }
}

/// Backend reachability check. Exits 0 when the backend reports healthy.
pub fn run_health(config_path: Option<&Path>) {
    let settings = bootstrap(config_path, true, "Health check");
    let api = build_client(&settings);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build();
    let result = match rt {
        Ok(rt) => rt
            .block_on(api.health())
            .map_err(|e| anyhow::anyhow!("Health check failed: {}", e)),
        Err(e) => Err(anyhow::anyhow!(
            "Failed to create async runtime for health check: {}",
            e
        )),
    };

    match result {
        Ok(status) if status.is_healthy() => {
            info!(
                "[PHASE: health] [STEP: result] {} is {}",
                api.endpoints().health(),
                status.status
            );
        }
        Ok(status) => {
            error!(
                "[PHASE: health] [STEP: result] {} reported status '{}'",
                api.endpoints().health(),
                status.status
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!("[PHASE: health] [STEP: result] {:#}", e);
            std::process::exit(1);
        }
    }
}
