use std::path::PathBuf;

use clap::Parser;

/// WebBridge: a desktop window hosting a web page with a native call bridge.
#[derive(Parser, Debug, Default)]
#[command(name = "webbridge", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. `webbridge=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory holding the bundled page and its assets.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Record store database path override.
    #[arg(long)]
    pub db: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_overrides() {
        let args = Args::try_parse_from([
            "webbridge",
            "--config",
            "/tmp/c.toml",
            "--log-level",
            "webbridge=debug",
            "--assets",
            "./web",
            "--db",
            "/tmp/x.db",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(args.log_level.as_deref(), Some("webbridge=debug"));
        assert_eq!(args.assets, Some(PathBuf::from("./web")));
        assert_eq!(args.db, Some(PathBuf::from("/tmp/x.db")));
    }

    #[test]
    fn no_arguments_is_valid() {
        let args = Args::try_parse_from(["webbridge"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.db.is_none());
    }

    #[test]
    fn unknown_flag_rejected() {
        assert!(Args::try_parse_from(["webbridge", "--execute", "ls"]).is_err());
    }
}
