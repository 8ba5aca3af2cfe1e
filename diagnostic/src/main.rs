use std::path::PathBuf;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Settings file override: --config=<path>. Default is ./careerflow.toml when present.
    let config_path = args
        .iter()
        .find_map(|a| a.strip_prefix("--config="))
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);
    let config_path = config_path.as_deref();

    // Backend reachability check (for deployment scripts).
    // Logs to stdout as well as the log files and exits 0/1.
    if args.iter().any(|a| a == "--health") {
        careerflow_diagnostic::run_health(config_path);
        return;
    }

    // Non-interactive TUI smoke test mode (for automated checks).
    // Renders a single frame for a specific page and exits 0/1.
    // Usage: --tui-smoke or --tui-smoke=welcome|compensation|technical|positioning|alignment|
    //        contact|processing|complete|complete-processing|complete-error|admin|admin-detail
    if let Some(arg) = args
        .iter()
        .find(|a| a.as_str() == "--tui-smoke" || a.starts_with("--tui-smoke="))
    {
        let target = arg
            .split_once('=')
            .map(|(_, v)| v.to_string())
            .filter(|v| !v.trim().is_empty());
        careerflow_diagnostic::run_tui_smoke(target, config_path);
        return;
    }

    if args.iter().any(|a| a == "--admin") {
        careerflow_diagnostic::run_admin(config_path);
        return;
    }

    careerflow_diagnostic::run_wizard(config_path);
}
