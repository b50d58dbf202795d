use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Shift-log report builder
#[derive(Parser, Debug, Clone)]
#[command(
    name = "shiftlog",
    about = "Turn a semicolon-delimited shift log into graphs, tables and pivot tables",
    version
)]
pub struct Settings {
    /// Log file to read, or a directory to scan for the newest log file
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Write the JSON report here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Keep re-reading the input and rewriting the output on an interval
    #[arg(long)]
    pub watch: bool,

    /// Refresh rate in seconds for watch mode (1-3600)
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub refresh_rate: u64,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Logging level
    #[arg(long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,

    /// Log file path (stderr when unset)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Watch mode needs somewhere to put each refreshed report.
    pub fn validate(&self) -> Result<(), crate::error::ShiftError> {
        if self.watch && self.output.is_none() {
            return Err(crate::error::ShiftError::Config(
                "--watch requires --output".to_string(),
            ));
        }
        Ok(())
    }
}
