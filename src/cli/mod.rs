//! Command-line interface for `build-dataset-xml`.
//!
//! The binary builds the ERDDAP `<dataset>` XML element for one glider
//! deployment data set and prints it to standard output. Logs go to standard
//! error so the output can be redirected straight into `datasets.xml`
//! fragments.
//!
//! # Usage
//!
//! ```bash
//! export GLIDER_DATA_HOME=/data/gliders
//!
//! build-dataset-xml ru01-20210101T1200 > ru01-raw-trajectory-rt.xml
//! build-dataset-xml ru01-20210101T1200 -d profile --level sci -m delayed
//! build-dataset-xml ru01-20210101T1200 --defs ./var_defs.yml -t ./my_template.xml
//! ```
//!
//! # Logging
//!
//! `-l/--loglevel` takes `debug`, `info`, `warning`, `error` or `critical`.
//! A `RUST_LOG` filter in the environment takes precedence.

mod build;

pub use build::{BuildCommand, BuildConfig, build, execute_with_writer};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Verbosity levels accepted by `--loglevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// The equivalent `tracing` filter directive.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

/// Runtime configuration derived from global options.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub log_level: LogLevel,
}

impl CliConfig {
    /// Install the stderr log subscriber.
    ///
    /// `RUST_LOG` overrides the configured level. Calling this more than once
    /// is harmless; only the first subscriber is installed.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.as_filter()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Create the ERDDAP <dataset /> XML element for a glider deployment data set.
#[derive(Parser, Debug)]
#[command(name = "build-dataset-xml", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    command: BuildCommand,

    /// Verbosity level
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info)]
    loglevel: LogLevel,
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        CliConfig {
            log_level: self.loglevel,
        }
    }

    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();
        self.command.execute()
    }
}
