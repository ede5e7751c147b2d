//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use tgup_core::{errors::Error, Result};

pub const USAGE: &str = "tgup --config /path/to/config.yml /path/to/data";

/// Upload a file or a folder tree to a Telegram chat through a bot.
#[derive(Parser, Debug, Clone)]
#[command(name = "tgup")]
#[command(about = "Upload a file or folder tree to a Telegram chat", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Print version information and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Path to config YAML
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// File or folder to upload
    pub path: Option<PathBuf>,
}

impl Args {
    /// The config file and upload target, both required outside `--version`.
    pub fn require(self) -> Result<(PathBuf, PathBuf)> {
        match (self.config, self.path) {
            (Some(config), Some(path)) => Ok((config, path)),
            _ => Err(Error::Usage(USAGE.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_and_target() {
        let args = Args::parse_from(["tgup", "--config", "/etc/tgup.yml", "/data/photos"]);
        assert!(!args.version);
        let (config, path) = args.require().unwrap();
        assert_eq!(config, PathBuf::from("/etc/tgup.yml"));
        assert_eq!(path, PathBuf::from("/data/photos"));
    }

    #[test]
    fn version_flags() {
        assert!(Args::parse_from(["tgup", "--version"]).version);
        assert!(Args::parse_from(["tgup", "-v"]).version);
    }

    #[test]
    fn missing_config_or_target_is_a_usage_error() {
        let no_target = Args::parse_from(["tgup", "--config", "/etc/tgup.yml"]);
        assert!(matches!(no_target.require(), Err(Error::Usage(_))));

        let no_config = Args::parse_from(["tgup", "/data/photos"]);
        assert!(matches!(no_config.require(), Err(Error::Usage(_))));
    }
}
