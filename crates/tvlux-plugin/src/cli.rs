//! Command-line entry: the host's three positional invocation values.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tvlux_core::{SiteConfig, TvluxError, TvluxScraper};

use crate::host::JsonLinesHost;
use crate::plugin::Plugin;

/// TV LUX archive plugin
#[derive(Debug, Parser)]
#[command(name = "tvlux-plugin", version, about)]
pub struct Cli {
    /// Plugin base URL in plugin:// notation
    pub base_url: String,

    /// Host handle for this invocation
    #[arg(allow_negative_numbers = true)]
    pub handle: i32,

    /// Query string, leading '?' included
    #[arg(default_value = "")]
    pub query: String,

    /// Values some hosts append after the query (ignored)
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// TOML configuration file
    #[arg(long, env = "TVLUX_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse process arguments and run one invocation.
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn load_config(&self) -> Result<SiteConfig> {
        match &self.config {
            Some(path) => SiteConfig::load(path)
                .with_context(|| format!("loading config {}", path.display())),
            None => Ok(SiteConfig::default()),
        }
    }

    /// Run on a current-thread runtime, writing host events to stdout.
    pub fn run(self) -> Result<()> {
        let config = self.load_config()?;
        let scraper = TvluxScraper::with_config(config)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("building tokio runtime")?;

        let host = JsonLinesHost::new(io::stdout().lock(), self.handle);
        let mut plugin = Plugin::new(self.base_url, scraper, host);
        runtime.block_on(plugin.run(&self.query))
    }
}

/// Process exit status for a failed invocation.
///
/// A malformed plugin URL is a usage error (2); site, network and config
/// failures exit with 1.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    let routing = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<TvluxError>())
        .any(TvluxError::is_routing);
    if routing {
        2
    } else {
        1
    }
}
