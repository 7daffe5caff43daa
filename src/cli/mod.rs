//! # CLI Module
//!
//! Command-line entry points for the `brrtwiki` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Start the wiki server:
//!
//! ```bash
//! brrtwiki serve --addr 127.0.0.1:8081 --data-dir ./pages
//! ```
//!
//! Options (each overrides the matching `BRRTWIKI_*` environment variable):
//! - `--addr <ADDR>` - Address and port to bind
//! - `--data-dir <DIR>` - Directory holding `<title>.txt` page files
//! - `--templates <DIR>` - Directory with `view.html` and `edit.html`
//!
//! ### `check-templates`
//!
//! Load both templates and render them against an empty page:
//!
//! ```bash
//! brrtwiki check-templates --templates ./templates
//! ```

mod commands;


pub use commands::{build_service, check_templates, run_cli, serve, Cli, Commands};
