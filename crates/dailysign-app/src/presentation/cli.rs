use clap::Parser;
use std::path::PathBuf;

/// Daily check-in for Discuz forums with push notifications
#[derive(Debug, Parser)]
#[command(name = "dailysign", version, about)]
pub struct Cli {
    /// Config file; falls back to $DAILYSIGN_CONFIG, ./config.json, then the user config dir
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level or filter directive, overrides RUST_LOG
    #[arg(short, long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Skip ServerChan and Bark pushes
    #[arg(long)]
    pub no_push: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["dailysign"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
        assert!(!cli.no_push);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "dailysign",
            "--config",
            "/etc/dailysign.json",
            "--log-level",
            "debug",
            "--no-push",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/dailysign.json")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.no_push);
    }
}
