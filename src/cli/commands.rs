use crate::{
    config::WikiConfig,
    handlers::WikiContext,
    logging::init_logging,
    middleware::TracingMiddleware,
    page::{Page, PageStore},
    render::{Renderer, TEMPLATE_NAMES},
    router::Router,
    server::{HttpServer, WikiService},
};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Command-line interface for the wiki
#[derive(Parser)]
#[command(name = "brrtwiki")]
#[command(about = "Minimal file-backed personal wiki", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Serve the wiki over HTTP
    Serve {
        /// Address and port to bind the server to
        #[arg(long)]
        addr: Option<String>,

        /// Directory holding the page files
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Directory containing view.html and edit.html
        #[arg(short, long)]
        templates: Option<PathBuf>,
    },
    /// Load and trial-render the page templates
    CheckTemplates {
        /// Directory containing view.html and edit.html (built-in templates if omitted)
        #[arg(short, long)]
        templates: Option<PathBuf>,
    },
}

impl Commands {
    /// Apply command-line overrides on top of an environment-derived config.
    pub fn apply_to(&self, config: &mut WikiConfig) {
        match self {
            Commands::Serve {
                addr,
                data_dir,
                templates,
            } => {
                if let Some(addr) = addr {
                    config.addr = addr.clone();
                }
                if let Some(dir) = data_dir {
                    config.data_dir = dir.clone();
                }
                if templates.is_some() {
                    config.template_dir = templates.clone();
                }
            }
            Commands::CheckTemplates { templates } => {
                if templates.is_some() {
                    config.template_dir = templates.clone();
                }
            }
        }
    }
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if the templates or data directory are unusable, or if the
/// server cannot bind its address.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = WikiConfig::from_env();
    cli.command.apply_to(&mut config);
    init_logging(config.log_format);
    match cli.command {
        Commands::Serve { .. } => serve(&config),
        Commands::CheckTemplates { .. } => check_templates(config.template_dir.as_deref()),
    }
}

/// Build the wiki service for `config`: templates compiled, data dir checked.
///
/// # Errors
///
/// Returns an error if the data directory is missing or a template fails to load.
pub fn build_service(config: &WikiConfig) -> anyhow::Result<WikiService> {
    if !config.data_dir.is_dir() {
        bail!(
            "data directory {} does not exist or is not a directory",
            config.data_dir.display()
        );
    }
    let renderer =
        Renderer::load(config.template_dir.as_deref()).context("failed to load templates")?;
    let context = WikiContext::new(PageStore::new(&config.data_dir), renderer);
    let mut service = WikiService::new(Router::new(), context);
    service.add_middleware(Arc::new(TracingMiddleware));
    Ok(service)
}

/// Start the server and block until it exits.
///
/// # Errors
///
/// Returns an error if the service cannot be built or the address cannot be bound.
pub fn serve(config: &WikiConfig) -> anyhow::Result<()> {
    may::config().set_stack_size(config.stack_size);
    let service = build_service(config)?;
    info!(
        addr = %config.addr,
        data_dir = %config.data_dir.display(),
        templates = ?config.template_dir,
        stack_size = config.stack_size,
        "Starting wiki"
    );
    let handle = HttpServer(service)
        .start(config.addr.as_str())
        .with_context(|| format!("failed to bind {}", config.addr))?;
    handle
        .join()
        .map_err(|e| anyhow::anyhow!("server coroutine panicked: {e:?}"))
}

/// Render every template against an empty sample page.
///
/// # Errors
///
/// Returns an error if a template is missing, malformed or fails to render.
pub fn check_templates(dir: Option<&Path>) -> anyhow::Result<()> {
    let renderer = Renderer::load(dir).context("failed to load templates")?;
    let sample = Page::empty("FrontPage");
    for name in TEMPLATE_NAMES {
        let bytes = renderer
            .render(name, &sample)
            .with_context(|| format!("template '{name}' failed to render"))?;
        info!(template = %name, bytes = bytes.len(), "Template ok");
    }
    Ok(())
}
