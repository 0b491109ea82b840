//! Tier Boundary
//!
//! The one concurrent edge of the system. A polling controller fetches
//! the token market capitalization on a fixed interval, maps it through
//! an ordered threshold schedule, and writes the resulting tier level
//! into a single shared cell. The frame loop reads that cell as one
//! atomic snapshot per frame and never writes it.
//!
//! Tier levels are monotonic for the life of a session: the cell only
//! raises, so a dip in reported market cap never revokes access the
//! player already has. If no source is configured, nothing writes the
//! cell and the tier stays at its initial level indefinitely.

use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

/// How often the controller polls the market-cap source.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Shared current tier level.
///
/// Single writer (the feed task), any number of readers. Raises are
/// `fetch_max`, so concurrent or stale writes can only keep the level
/// the same or move it up.
#[derive(Clone, Debug)]
pub struct TierCell(Arc<AtomicU8>);

impl TierCell {
    /// Create at an initial level (normally 0, the lowest).
    pub fn new(initial: u8) -> Self {
        Self(Arc::new(AtomicU8::new(initial)))
    }

    /// Atomic snapshot of the current level.
    #[inline]
    pub fn level(&self) -> u8 {
        self.0.load(Ordering::Acquire)
    }

    /// Raise to `level` if higher; returns the previous level.
    pub fn raise(&self, level: u8) -> u8 {
        self.0.fetch_max(level, Ordering::AcqRel)
    }
}

/// Ordered market-cap thresholds defining the tier ladder.
///
/// The tier level is the number of thresholds at or below the reported
/// value: below the first threshold is tier 0, past the last is the
/// highest tier.
#[derive(Clone, Debug, PartialEq)]
pub struct TierSchedule {
    thresholds: Vec<f64>,
}

impl TierSchedule {
    /// Build a schedule; thresholds are sorted ascending on entry.
    pub fn new(mut thresholds: Vec<f64>) -> Self {
        thresholds.sort_by(f64::total_cmp);
        Self { thresholds }
    }

    /// Tier level for a reported market cap.
    pub fn tier_for(&self, market_cap: f64) -> u8 {
        let crossed = self
            .thresholds
            .iter()
            .take_while(|&&t| market_cap >= t)
            .count();
        crossed.min(u8::MAX as usize) as u8
    }

    /// The highest tier this schedule can grant.
    pub fn max_tier(&self) -> u8 {
        self.thresholds.len().min(u8::MAX as usize) as u8
    }
}

/// Errors from a market-cap source.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The source could not be reached or answered abnormally.
    #[error("market cap source unavailable: {0}")]
    Unavailable(String),

    /// The source answered but the payload was unusable.
    #[error("market cap source returned an unusable payload")]
    Malformed,
}

/// Something that can report the current token market capitalization.
///
/// The wallet/network plumbing behind this lives with an external
/// collaborator; tests and the demo script it directly.
pub trait MarketCapSource: Send + Sync {
    /// Fetch the current market cap in quote-currency units.
    fn fetch(&self) -> impl Future<Output = Result<f64, FeedError>> + Send;
}

/// Run the polling controller until the task is dropped.
///
/// Fetch failures and non-finite samples are logged and skipped;
/// the feed never takes the simulation down with it.
pub async fn run_tier_feed<S: MarketCapSource>(
    source: S,
    schedule: TierSchedule,
    cell: TierCell,
    poll_interval: Duration,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match source.fetch().await {
            Ok(value) if value.is_finite() && value >= 0.0 => {
                let level = schedule.tier_for(value);
                let previous = cell.raise(level);
                if level > previous {
                    info!(market_cap = value, old = previous, new = level, "tier raised");
                }
            }
            Ok(value) => {
                warn!(market_cap = value, "ignoring unusable market cap sample");
            }
            Err(err) => {
                warn!(error = %err, "market cap fetch failed; keeping current tier");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
