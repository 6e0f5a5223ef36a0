use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env};

use crate::config::EngineConfig;

/// Install the global logger, appending to `<log_dir>/default.log`.
/// `RUST_LOG` overrides the configured filter.
pub fn init_logger(config: &EngineConfig) -> Result<()> {
    // Create a new dir.
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("failed to create log dir {}", config.log_dir))?;

    let log_path = Path::new(&config.log_dir).join("default.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    Builder::from_env(Env::default().default_filter_or(config.log_filter.as_str()))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:<5}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .try_init()
        .context("logger already initialised")?;

    Ok(())
}
