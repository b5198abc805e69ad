//! Usage: Tracing setup (stderr + daily rolling file in the app data dir).

use crate::app_paths;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_DIR_NAME: &str = "logs";
const LOG_FILE_PREFIX: &str = "tomodoro.log";
const LOG_FILTER_ENV: &str = "TOMODORO_LOG";

// Keeps the non-blocking writer alive for the process lifetime.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub(crate) fn init(app: &tauri::AppHandle) {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let file_layer = match open_log_dir(app) {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);

            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(writer),
            )
        }
        Err(err) => {
            eprintln!("log file setup failed, stderr only: {err}");
            None
        }
    };

    if tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        // A second init (e.g. in tests) keeps the first subscriber.
        return;
    }

    // Route `log`-based records from dependencies through tracing.
    let _ = tracing_log::LogTracer::init();
}

fn open_log_dir(app: &tauri::AppHandle) -> Result<std::path::PathBuf, String> {
    let dir = app_paths::app_data_dir(app)?.join(LOG_DIR_NAME);
    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("failed to create log dir {}: {e}", dir.display()))?;
    Ok(dir)
}
