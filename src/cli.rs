// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `autoupconvert`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "autoupconvert",
    version,
    about = "Watch a Noggit map folder and run the ADT upconversion tools on every save.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the settings file (TOML).
    #[arg(long, value_name = "PATH", default_value = "settings.toml")]
    pub config: String,

    /// Primary listfile (`<id>;<path>` per line). Required.
    #[arg(long, value_name = "PATH", default_value = "listfile.csv")]
    pub listfile: String,

    /// Optional overlay listfile; its entries replace same-id entries.
    #[arg(long, value_name = "PATH", default_value = "custom-listfile.csv")]
    pub custom_listfile: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `AUTOUPCONVERT_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load and validate settings and listfiles, print what would be written,
    /// but don't write listfiles or run converters.
    #[arg(long)]
    pub dry_run: bool,

    /// Distribute listfiles, run the conversion pipeline once, then exit.
    #[arg(long)]
    pub once: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_working_directory_layout() {
        let args = CliArgs::parse_from(["autoupconvert"]);
        assert_eq!(args.config, "settings.toml");
        assert_eq!(args.listfile, "listfile.csv");
        assert_eq!(args.custom_listfile, "custom-listfile.csv");
        assert!(!args.dry_run);
        assert!(!args.once);
    }

    #[test]
    fn flags_parse() {
        let args = CliArgs::parse_from([
            "autoupconvert",
            "--config",
            "cfg/mine.toml",
            "--once",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.config, "cfg/mine.toml");
        assert!(args.once);
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }
}
