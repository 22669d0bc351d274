//! TV LUX plugin boundary
//!
//! Implements the media-center invocation contract on top of `tvlux-core`:
//! the host starts the plugin with its base URL, a numeric handle and a
//! query string; the plugin routes the query, scrapes what is needed and
//! reports entries back through a [`host::Host`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use tvlux_core::TvluxScraper;
//! use tvlux_plugin::host::RecordingHost;
//! use tvlux_plugin::plugin::Plugin;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut plugin = Plugin::new(
//!     "plugin://plugin.video.tvlux/",
//!     TvluxScraper::new()?,
//!     RecordingHost::default(),
//! );
//! plugin.run("").await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod host;
pub mod logging;
pub mod plugin;

pub use cli::Cli;
pub use host::{Host, JsonLinesHost, ListItem, RecordingHost};
pub use plugin::Plugin;
