//! # Configuration Module
//!
//! The wiki reads its runtime settings from environment variables; command-line
//! flags (see [`crate::cli`]) override them.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `BRRTWIKI_ADDR` | `0.0.0.0:8081` | Listen address |
//! | `BRRTWIKI_DATA_DIR` | `.` | Directory holding the `<title>.txt` page files |
//! | `BRRTWIKI_TEMPLATE_DIR` | unset | Directory with `view.html` and `edit.html`; built-in templates when unset |
//! | `BRRTWIKI_STACK_SIZE` | `0x4000` | Coroutine stack size, decimal or `0x` hex |
//! | `BRRTWIKI_LOG_FORMAT` | `pretty` | `pretty` or `json` |
//!
//! Log filtering itself follows `RUST_LOG` (default `info`).
//!
//! ## Usage
//!
//! ```rust
//! use brrtwiki::config::WikiConfig;
//!
//! let config = WikiConfig::from_env();
//! println!("Serving pages from {}", config.data_dir.display());
//! ```

use std::env;
use std::path::PathBuf;

use crate::logging::LogFormat;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8081";
pub const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration for the wiki server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiConfig {
    /// Address and port to bind
    pub addr: String,
    /// Directory holding the page files
    pub data_dir: PathBuf,
    /// Template directory; `None` selects the built-in templates
    pub template_dir: Option<PathBuf>,
    /// Stack size for coroutines in bytes (default: 16 KB / 0x4000)
    pub stack_size: usize,
    pub log_format: LogFormat,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            data_dir: PathBuf::from("."),
            template_dir: None,
            stack_size: DEFAULT_STACK_SIZE,
            log_format: LogFormat::Pretty,
        }
    }
}

impl WikiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            addr: non_empty("BRRTWIKI_ADDR").unwrap_or(defaults.addr),
            data_dir: non_empty("BRRTWIKI_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            template_dir: non_empty("BRRTWIKI_TEMPLATE_DIR").map(PathBuf::from),
            stack_size: non_empty("BRRTWIKI_STACK_SIZE")
                .map(|v| parse_stack_size(&v))
                .unwrap_or(defaults.stack_size),
            log_format: non_empty("BRRTWIKI_LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.log_format),
        }
    }
}

/// Parse a decimal or `0x`-prefixed hex stack size, falling back to the default.
pub fn parse_stack_size(val: &str) -> usize {
    let val = val.trim();
    let parsed = match val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    };
    parsed.filter(|&n| n > 0).unwrap_or(DEFAULT_STACK_SIZE)
}
