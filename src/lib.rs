//! # FXSurface-Lib: FX Implied-Volatility Surface Construction
//!
//! `fxsurface-lib` builds continuous, queryable FX implied-volatility
//! surfaces from the sparse quotes the market actually trades: per tenor,
//! an ATM volatility plus 25-delta (and optionally 10-delta) risk
//! reversals and butterflies.
//!
//! ## Core Features
//!
//! - **Vanna-Volga smiles**: market-standard 3- or 5-point construction
//!   per tenor, anchored on delta-implied strikes
//! - **Closed-form delta inversion**: quoted deltas map to absolute
//!   strikes without iterative solvers, under configurable spot- or
//!   forward-delta conventions per currency pair
//! - **Arbitrage-aware term structure**: maturities between quoted tenors
//!   interpolate total variance at fixed log-moneyness
//! - **Round-trip diagnostics**: every surface can reconstruct its own
//!   input quotes and report the discrepancy
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fxsurface_lib::{build_surface, ConventionTable, MarketQuoteSet};
//!
//! # fn load_quotes() -> Vec<MarketQuoteSet> { vec![] }
//! // One MarketQuoteSet per tenor, handed over by the quote-ingestion layer
//! let quotes: Vec<MarketQuoteSet> = load_quotes();
//!
//! let surface = build_surface("EURUSD", 1735689600, &quotes, &ConventionTable::g10())?;
//!
//! // Implied vol for strike 1.20, maturity 0.35 years
//! let vol = surface.volatility_at(1.20, 0.35)?;
//! assert!(vol > 0.0);
//!
//! // Primary correctness gate: the surface must reproduce its inputs
//! let report = surface.round_trip_check()?;
//! assert!(report.passed);
//! # Ok::<(), fxsurface_lib::Error>(())
//! ```
//!
//! ## Design
//!
//! The crate is purely computational: no I/O, no global state, no
//! environment flags. The quote-ingestion collaborator hands over typed
//! [`MarketQuoteSet`]s (real or synthetic, the core behaves identically)
//! and receives an immutable [`Surface`]; quote updates build a new
//! surface rather than mutating the old one, so finalized surfaces are
//! freely shareable across threads.

// ================================================================================================
// MODULES
// ================================================================================================

pub mod error;
pub mod market;
pub mod models;
pub mod surface;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Quote model, validation and conventions
pub use market::{
    validate_quote_set, ConventionTable, DeltaConvention, MarketQuoteSet, QuoteWarning,
    ValidatedQuoteSet,
};

// Error taxonomy
pub use error::{ConstructionError, Error, QueryError, ValidationError};

// Smile model types and functions
pub use models::vanna_volga::{
    build_smile, decompose_wing_vols, recompose_quotes, vanna_volga_weights, DeltaStrikePoint,
    Smile, SmileAnchors, WingVols,
};

// Delta/strike conversion and pricing helpers
pub use models::bs::{forward_delta, inverse_norm_cdf, spot_delta, strike_for_delta};
pub use models::traits::SmileSection;
pub use models::OptionType;

// Surface assembly and query API
pub use surface::{
    RoundTripReport, Surface, SurfaceSnapshot, TenorRoundTrip, TenorSnapshot, ATM_ROUND_TRIP_TOL,
    WING_ROUND_TRIP_TOL,
};

use std::cmp::Ordering;

/// Validate a snapshot of per-tenor quotes and assemble a finalized
/// surface in one call.
///
/// Quote sets may arrive in any order; they are sorted by time-to-expiry
/// before assembly. Duplicated tenors still fail with
/// [`ConstructionError::NonMonotonicTenor`], and every quote set must
/// carry the given pair and as-of time.
///
/// # Errors
///
/// * [`Error::Validation`] if any quote set fails validation
/// * [`Error::Construction`] if a smile or the surface cannot be built
pub fn build_surface(
    pair: &str,
    as_of: i64,
    quote_sets: &[MarketQuoteSet],
    conventions: &ConventionTable,
) -> Result<Surface, Error> {
    let mut ordered: Vec<&MarketQuoteSet> = quote_sets.iter().collect();
    ordered.sort_by(|a, b| {
        a.years_to_exp
            .partial_cmp(&b.years_to_exp)
            .unwrap_or(Ordering::Equal)
    });

    let mut surface = Surface::new(pair, as_of);
    for quotes in ordered {
        let validated = validate_quote_set(quotes)?;
        surface.add_quotes(&validated, conventions)?;
    }
    surface.finalize()?;
    Ok(surface)
}
