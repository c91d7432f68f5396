//! Currency catalog cache.

use std::collections::BTreeMap;
use std::time::Duration;

use fx_types::{Currency, CurrencyCode};
use tokio::time::Instant;

/// How long a fetched catalog stays fresh unless configured otherwise.
pub const DEFAULT_CACHE_EXPIRY: Duration = Duration::from_secs(300);

/// The currency catalog plus the moment it was fetched.
///
/// Entries are either empty (never fetched) or all from one refresh; the map
/// is only ever replaced as a whole.
#[derive(Debug)]
pub struct CurrencyCache {
    entries: BTreeMap<CurrencyCode, Currency>,
    last_refreshed: Option<Instant>,
    expiry: Duration,
}

impl CurrencyCache {
    /// Creates an empty cache.
    pub fn new(expiry: Duration) -> Self {
        Self {
            entries: BTreeMap::new(),
            last_refreshed: None,
            expiry,
        }
    }

    /// True when the catalog is non-empty and younger than the expiry.
    pub fn is_fresh(&self) -> bool {
        match self.last_refreshed {
            Some(at) if !self.entries.is_empty() => at.elapsed() < self.expiry,
            _ => false,
        }
    }

    /// Swaps in a freshly fetched catalog and stamps the refresh time.
    pub fn replace(&mut self, entries: BTreeMap<CurrencyCode, Currency>) {
        self.entries = entries;
        self.last_refreshed = Some(Instant::now());
    }

    pub fn entries(&self) -> &BTreeMap<CurrencyCode, Currency> {
        &self.entries
    }

    pub fn last_refreshed(&self) -> Option<Instant> {
        self.last_refreshed
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }
}
