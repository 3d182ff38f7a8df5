use clap::Parser;
use std::path::PathBuf;

/// Command-line flags for the HTTP server. Anything left unset falls back to
/// the TOML file (when `--config` is given) and then to built-in defaults.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "calc-server")]
#[command(about = "Stateless REST service for financial and unit-conversion formulas")]
pub struct CliConfig {
    #[arg(long, env = "CALC_HOST", help = "Address to bind (default 0.0.0.0)")]
    pub host: Option<String>,

    #[arg(long, env = "PORT", help = "Port to listen on (default 3000)")]
    pub port: Option<u16>,

    #[arg(long, help = "Directory holding the static frontend (default ./public)")]
    pub static_dir: Option<PathBuf>,

    #[arg(long, short = 'c', help = "Optional TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = CliConfig::parse_from([
            "calc-server",
            "--port",
            "8080",
            "--static-dir",
            "web",
            "-v",
        ]);
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.static_dir, Some(PathBuf::from("web")));
        assert!(cli.verbose);
        assert!(!cli.log_json);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(CliConfig::try_parse_from(["calc-server", "--port", "70000"]).is_err());
    }
}
