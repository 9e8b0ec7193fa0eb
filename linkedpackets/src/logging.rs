use anyhow::Result;
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use linkedpackets_middleware::MODULE_NAME;


/// Initialize logging to the terminal and, when enabled, to
/// `<logs_path>/linkedpackets.log`.
pub fn init_logging(logs_path: Option<PathBuf>, logs_enabled: Option<bool>, log_level: Option<String>) -> Result<()> {
    let save_logs = logs_enabled.unwrap_or(true);

    let level_str = log_level.unwrap_or_else(|| "info".to_string());
    let level_filter = parse_level(&level_str);

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&level_str));
    builder.filter_level(level_filter);

    match logs_path {
        Some(logs_dir) if save_logs => {
            std::fs::create_dir_all(&logs_dir)?;
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(logs_dir.join(format!("{}.log", MODULE_NAME)))?;
            builder.target(env_logger::Target::Pipe(Box::new(DualWriter::new(log_file))));
            builder.try_init()?;
            log::debug!("logging to terminal and {} (level: {})", logs_dir.display(), level_str);
        }
        _ => {
            builder.try_init()?;
            log::debug!("logging to terminal only (level: {})", level_str);
        }
    }

    Ok(())
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Copies every log line to a file and to stderr, keeping stdout free for
/// command output.
struct DualWriter {
    file: std::fs::File,
}

impl DualWriter {
    fn new(file: std::fs::File) -> Self {
        Self { file }
    }
}

impl Write for DualWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        io::stderr().write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        io::stderr().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("warning"), LevelFilter::Warn);
        assert_eq!(parse_level("nonsense"), LevelFilter::Info);
    }
}
