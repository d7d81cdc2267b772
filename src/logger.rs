use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;
use std::fs;

// Define where to store logs
const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "route_planner.log";

/// Initializes the global logger.
///
/// This function should be called once at the very beginning of the
/// application's `main` function. Calling it a second time is harmless,
/// the already installed logger is kept.
///
/// Log level is controlled by the `RUST_LOG` environment variable.
/// Example: `RUST_LOG=debug cargo run -- -s Chennai -d Zanzibar -a "Qatar Airways"`
///
/// If `RUST_LOG` is not set, it defaults to `info`.
/// Logs will be written to `logs/route_planner.log` and to stderr.
pub fn init() {
    if let Err(e) = fs::create_dir_all(LOG_DIR) {
        eprintln!("Failed to create log directory at '{}': {}", LOG_DIR, e);
    }

    let log_file_path = format!("{}/{}", LOG_DIR, LOG_FILE);

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_level_filter = log_level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);

    let base_config = Dispatch::new().level(log_level_filter).level_for("serde", LevelFilter::Warn).level_for("csv", LevelFilter::Warn);

    let console_config = Dispatch::new()
        .format(|out, message, record| {
            let colors = fern::colors::ColoredLevelConfig::new()
                .error(fern::colors::Color::Red)
                .warn(fern::colors::Color::Yellow)
                .info(fern::colors::Color::Green)
                .debug(fern::colors::Color::Blue)
                .trace(fern::colors::Color::BrightBlack);

            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let base_config = base_config.chain(console_config);

    // The file sink is optional: a read-only working directory still gets console logs.
    let base_config = match fern::log_file(&log_file_path) {
        Ok(file) => base_config.chain(
            Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!("[{} {} {}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), record.level(), record.target(), message))
                })
                .chain(file),
        ),
        Err(e) => {
            eprintln!("Failed to open log file '{}': {}", log_file_path, e);
            base_config
        }
    };

    if base_config.apply().is_err() {
        log::debug!("Logger already initialized, keeping the existing one.");
        return;
    }

    log::info!("Logger initialized. Logging to console and '{}'.", log_file_path);
}
