//! Shared, reloadable configuration
//!
//! Readers take an `Arc<Config>` snapshot without locking. A reload builds a
//! complete replacement off to the side and swaps it in atomically, so a
//! reader never observes a partially applied set of layers.

use std::io::Read;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;

use crate::config::Config;
use crate::error::LayerconfResult;

/// Copy-on-write holder for a [`Config`] shared across threads.
pub struct SharedConfig {
    current: ArcSwap<Config>,
}

impl SharedConfig {
    pub fn new(config: Config) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
        }
    }

    /// Current snapshot. Stays valid after later reloads.
    pub fn load(&self) -> Arc<Config> {
        self.current.load_full()
    }

    /// Rebuild from `readers` with the current format and parser, then swap.
    ///
    /// The replacement starts empty: defaults installed with
    /// [`Config::set_default`] on the old snapshot are not carried over. On a
    /// parse failure the current snapshot stays in place.
    pub fn reload<I, R>(&self, readers: I) -> LayerconfResult<()>
    where
        I: IntoIterator<Item = R>,
        R: Read,
    {
        let mut next = self.current.load().empty_like();
        next.read_config(readers)?;
        self.current.store(Arc::new(next));
        debug!("configuration reloaded");
        Ok(())
    }

    /// Swap in a config built elsewhere.
    pub fn replace(&self, config: Config) {
        self.current.store(Arc::new(config));
    }
}

impl From<Config> for SharedConfig {
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}
