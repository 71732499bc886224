//! # Engine Configuration
//!
//! Timing knobs for the RFQ engine. All durations are wall-clock windows
//! evaluated against explicit timestamps, so tests can drive them with
//! synthetic clocks.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default quoting window granted to dealers.
pub const DEFAULT_QUOTING_DEADLINE: Duration = Duration::from_secs(10);

/// Default validity window stamped on incoming quotes without one.
pub const DEFAULT_QUOTE_TTL: Duration = Duration::from_secs(20);

/// Default retention of terminal RFQs before the sweeper evicts them.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(300);

/// Default interval between sweeper passes.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Engine timing configuration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fx_rfq::application::config::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_quoting_deadline(Duration::from_secs(5))
///     .with_quote_ttl(Duration::from_secs(15));
/// assert_eq!(config.quoting_deadline, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How long dealers may quote before an unquoted RFQ expires.
    pub quoting_deadline: Duration,
    /// Default validity window for quotes that do not carry their own.
    pub quote_ttl: Duration,
    /// How long terminal RFQs stay queryable before eviction.
    pub retention: Duration,
    /// How often the background sweeper runs.
    pub sweep_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quoting_deadline: DEFAULT_QUOTING_DEADLINE,
            quote_ttl: DEFAULT_QUOTE_TTL,
            retention: DEFAULT_RETENTION,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl EngineConfig {
    /// Sets the quoting deadline.
    #[must_use]
    pub const fn with_quoting_deadline(mut self, quoting_deadline: Duration) -> Self {
        self.quoting_deadline = quoting_deadline;
        self
    }

    /// Sets the default quote validity window.
    #[must_use]
    pub const fn with_quote_ttl(mut self, quote_ttl: Duration) -> Self {
        self.quote_ttl = quote_ttl;
        self
    }

    /// Sets the terminal-RFQ retention window.
    #[must_use]
    pub const fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    /// Sets the sweeper interval.
    #[must_use]
    pub const fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.quoting_deadline, Duration::from_secs(10));
        assert_eq!(config.quote_ttl, Duration::from_secs(20));
        assert_eq!(config.retention, Duration::from_secs(300));
        assert_eq!(config.sweep_interval, Duration::from_secs(1));
    }

    #[test]
    fn builders_override() {
        let config = EngineConfig::default()
            .with_quoting_deadline(Duration::from_millis(500))
            .with_retention(Duration::from_secs(60))
            .with_sweep_interval(Duration::from_millis(100));
        assert_eq!(config.quoting_deadline, Duration::from_millis(500));
        assert_eq!(config.retention, Duration::from_secs(60));
        assert_eq!(config.sweep_interval, Duration::from_millis(100));
        assert_eq!(config.quote_ttl, Duration::from_secs(20));
    }
}
