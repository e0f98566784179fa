//! Error types for Mote.

use thiserror::Error;

use crate::ids::ProxyHandle;
use crate::state::ProxyState;

/// Top-level error type for Mote operations.
#[derive(Debug, Error)]
pub enum MoteError {
    /// Pool errors
    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the proxy pool and its lifecycle guards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// No particle simulation was bound at start
    #[error("no target particle simulation was provided")]
    MissingSimulation,

    /// Handle does not refer to a live proxy
    #[error("stale or unknown proxy handle: {0}")]
    StaleHandle(ProxyHandle),

    /// Guard was initialized twice
    #[error("lifecycle guard already bound to {0}")]
    GuardAlreadyBound(ProxyHandle),

    /// Lifecycle transition not allowed from the current state
    #[error("invalid proxy transition from {from} to {to}")]
    InvalidTransition {
        /// State the proxy was in
        from: ProxyState,
        /// State that was requested
        to: ProxyState,
    },
}

/// Configuration errors. Most are corrected in place by validation and
/// reported rather than returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Skip rate of zero would sample nothing and divide by zero
    #[error("collider skip rate must be at least 1")]
    ZeroSkipRate,

    /// Layer index outside 0..=31
    #[error("collider layer {0} is outside 0..=31")]
    LayerOutOfRange(u8),

    /// Size multiplier not a positive finite number
    #[error("collider size multiplier must be positive and finite, got {0}")]
    InvalidSizeMultiplier(f32),

    /// Config text could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Result type alias for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;

/// Result type alias for Mote operations.
pub type MoteResult<T> = Result<T, MoteError>;
