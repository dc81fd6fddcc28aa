//! Command-line and environment configuration.

use clap::Parser;
use easel_core::{HISTORY_LIMIT, UpdateMode};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Easel canvas server.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "EASEL_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "EASEL_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory for uploaded images, served under /uploads.
    #[arg(long, env = "EASEL_UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Directory for exported PDFs, served under /exports.
    #[arg(long, env = "EASEL_EXPORT_DIR", default_value = "exports")]
    pub export_dir: PathBuf,

    /// Font family for text elements. Falls back to a sans-serif face.
    #[arg(long, env = "EASEL_FONT_FAMILY", default_value = "Arial")]
    pub font_family: String,

    /// Font file for text elements. Takes precedence over the family.
    #[arg(long, env = "EASEL_FONT_FILE")]
    pub font_file: Option<PathBuf>,

    /// Keep current values for fields an update request leaves out.
    #[arg(long, env = "EASEL_PARTIAL_UPDATES")]
    pub partial_updates: bool,

    /// Undo states kept per canvas.
    #[arg(long, env = "EASEL_HISTORY_LIMIT", default_value_t = HISTORY_LIMIT)]
    pub history_limit: usize,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn update_mode(&self) -> UpdateMode {
        if self.partial_updates {
            UpdateMode::Partial
        } else {
            UpdateMode::Overwrite
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["easel-server"]).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.export_dir, PathBuf::from("exports"));
        assert_eq!(config.font_family, "Arial");
        assert!(config.font_file.is_none());
        assert_eq!(config.history_limit, HISTORY_LIMIT);
        assert_eq!(config.update_mode(), UpdateMode::Overwrite);
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "easel-server",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--partial-updates",
            "--history-limit",
            "5",
            "--font-file",
            "fonts/Tuffy.ttf",
        ])
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.update_mode(), UpdateMode::Partial);
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.font_file, Some(PathBuf::from("fonts/Tuffy.ttf")));
    }
}
