//! Error taxonomy for surface construction and querying.
//!
//! Three layers, matching how callers recover:
//! - [`ValidationError`]: a malformed input quote. Recoverable; skip the
//!   tenor or request a fresh quote from the feed.
//! - [`ConstructionError`]: the smile or surface could not be assembled
//!   from otherwise well-formed inputs. Recoverable by correcting input.
//! - [`QueryError`]: a misuse of the query API. Programmer error, not a
//!   data issue.
//!
//! The core never substitutes defaults for bad input. Degraded behavior
//! (a flat smile when wing quotes are missing) is flagged on the smile
//! itself, never inferred silently.

use thiserror::Error;

/// A malformed or inconsistent input quote.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// ATM volatility outside (0, 5.0) as a decimal fraction.
    #[error("atm volatility {0} outside (0, 5.0)")]
    AtmVolOutOfRange(f64),

    /// A quoted field is NaN or infinite.
    #[error("quote field `{field}` is not finite: {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// Spot rate must be strictly positive.
    #[error("spot rate must be strictly positive, got {0}")]
    NonPositiveSpot(f64),

    /// Forward rate must be strictly positive.
    #[error("forward rate must be strictly positive, got {0}")]
    NonPositiveForward(f64),

    /// Time to expiry must be strictly positive.
    #[error("time to expiry must be strictly positive, got {0} years")]
    NonPositiveExpiry(f64),

    /// RR and BF at one delta bucket must be quoted together.
    #[error("incomplete {delta_bp}-delta wing quote: risk reversal and butterfly must be quoted together")]
    IncompleteWingQuote { delta_bp: u8 },

    /// 10-delta quotes are anchored on the 25-delta smile; they cannot
    /// stand alone.
    #[error("10-delta quotes present without 25-delta quotes")]
    MissingTwentyFiveDelta,

    /// The spot-delta convention needs the foreign discount factor.
    #[error("spot-delta convention for {pair} requires a foreign rate")]
    MissingForeignRate { pair: String },

    /// Target delta outside the quotable range (0, 0.5].
    #[error("delta {0} outside (0, 0.5]")]
    InvalidDelta(f64),

    /// Cannot invert the delta definition for a non-positive volatility.
    #[error("volatility must be strictly positive, got {0}")]
    NonPositiveVolatility(f64),
}

/// Smile or surface assembly failed on otherwise valid quotes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    /// Anchor strikes must come out strictly ordered
    /// (10d put < 25d put < F < 25d call < 10d call).
    #[error("anchor strikes not strictly ordered at tenor {tenor}: {strikes:?}")]
    AnchorOrdering { tenor: String, strikes: Vec<f64> },

    /// Tenors must be added in strictly increasing time-to-expiry.
    #[error("tenors not strictly increasing: {prev} followed by {next} (years)")]
    NonMonotonicTenor { prev: f64, next: f64 },

    /// `finalize()` on a surface with no tenors.
    #[error("surface has no tenors")]
    EmptySurface,

    /// Mutation attempted after `finalize()`; build a new surface instead.
    #[error("surface already finalized; quote updates require a new surface")]
    SurfaceFinalized,

    /// All quote sets feeding one surface must share pair and as-of time.
    #[error("quote set for {found_pair}@{found_as_of} does not match surface {pair}@{as_of}")]
    MixedQuoteSets {
        pair: String,
        as_of: i64,
        found_pair: String,
        found_as_of: i64,
    },
}

/// Misuse of the query API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The surface must be finalized before it can be queried.
    #[error("surface is not finalized")]
    SurfaceNotFinalized,

    /// Query strike must be strictly positive.
    #[error("query strike must be strictly positive, got {0}")]
    NonPositiveStrike(f64),

    /// Query maturity must be strictly positive.
    #[error("query maturity must be strictly positive, got {0} years")]
    NonPositiveMaturity(f64),
}

/// Umbrella error for the one-call build pipeline in `lib.rs`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Query(#[from] QueryError),
}
