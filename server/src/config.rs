use std::path::PathBuf;

use clap::Parser;
use cipherdir::constants::{DEFAULT_PORT, DEFAULT_RFC_HOST, LOCALHOST_DOMAIN};

/// A directory of TLS cipher suites, the algorithms they are
/// made of and the RFCs defining them.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env = "CIPHERDIR_BIND", default_value_t = default_bind())]
    pub bind: String,

    /// SQLite database file. Data is kept in memory when omitted.
    #[arg(long, env = "CIPHERDIR_DATABASE")]
    pub database: Option<PathBuf>,

    /// Mirror RFC documents are fetched from.
    #[arg(long, env = "CIPHERDIR_RFC_HOST", default_value = DEFAULT_RFC_HOST)]
    pub rfc_host: String,

    /// Log filter, e.g. `info` or `cipherdir_server=debug,tower_http=info`.
    #[arg(long, env = "CIPHERDIR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

fn default_bind() -> String {
    format!("{LOCALHOST_DOMAIN}:{DEFAULT_PORT}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["cipherdir-server"]).expect("no argument is required");

        assert_eq!(config.bind, "127.0.0.1:8000");
        assert_eq!(config.database, None);
        assert_eq!(config.rfc_host, "https://tools.ietf.org");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_arguments() {
        let config = Config::try_parse_from([
            "cipherdir-server",
            "--bind",
            "0.0.0.0:80",
            "--database",
            "/var/lib/cipherdir.sqlite",
            "--rfc-host",
            "https://www.rfc-editor.org",
            "--log-level",
            "debug",
        ])
        .expect("arguments are valid");

        assert_eq!(config.bind, "0.0.0.0:80");
        assert_eq!(
            config.database,
            Some(PathBuf::from("/var/lib/cipherdir.sqlite"))
        );
        assert_eq!(config.rfc_host, "https://www.rfc-editor.org");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unknown_argument() {
        assert!(Config::try_parse_from(["cipherdir-server", "--port", "80"]).is_err());
    }
}
