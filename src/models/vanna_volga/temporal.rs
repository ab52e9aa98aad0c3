//! Term-structure interpolation between quoted tenors.
//!
//! Maturities between two quoted tenors interpolate **total variance**
//! (`sigma^2 * T`) linearly in `T` at fixed log-moneyness. Interpolating
//! raw volatility instead looks harmless and quietly manufactures
//! calendar arbitrage; variance space preserves monotonicity whenever the
//! input tenors themselves are calendar-consistent. Moneyness is held
//! fixed (not absolute strike) because forwards differ across tenors.
//!
//! Boundary policy: maturities before the first quoted tenor take the
//! first tenor's smile unchanged, maturities beyond the last take the
//! last. Flat extrapolation in volatility, deliberate and documented.

use super::types::Smile;
use crate::models::traits::SmileSection;

/// Maturities within this distance of a quoted tenor resolve to that
/// tenor exactly, absorbing day-count rounding in query code.
const TENOR_EPSILON: f64 = 1e-10;

/// Locate the bracketing pair for `t`, assuming `smiles` is sorted by
/// expiry. Returns `None` when `t` falls outside the quoted range.
fn bracket(smiles: &[Smile], t: f64) -> Option<(&Smile, &Smile)> {
    if t < smiles[0].expiry() || t > smiles[smiles.len() - 1].expiry() {
        return None;
    }
    smiles
        .windows(2)
        .find(|w| t >= w[0].expiry() && t <= w[1].expiry())
        .map(|w| (&w[0], &w[1]))
}

/// Forward rate at an arbitrary maturity: linear interpolation of
/// `ln(F)` in `T` between the bracketing tenors, held flat outside the
/// quoted range. Needed so a query strike maps to a well-defined
/// log-moneyness at maturities nobody quotes.
pub fn forward_at(smiles: &[Smile], t: f64) -> f64 {
    let first = &smiles[0];
    let last = &smiles[smiles.len() - 1];
    if t <= first.expiry() {
        return first.forward();
    }
    if t >= last.expiry() {
        return last.forward();
    }

    match bracket(smiles, t) {
        Some((lo, hi)) => {
            let alpha = (t - lo.expiry()) / (hi.expiry() - lo.expiry());
            let ln_f = (1.0 - alpha) * lo.forward().ln() + alpha * hi.forward().ln();
            ln_f.exp()
        }
        None => last.forward(),
    }
}

/// Volatility at log-moneyness `x` and maturity `t`.
pub fn vol_at(smiles: &[Smile], x: f64, t: f64) -> f64 {
    let first = &smiles[0];
    let last = &smiles[smiles.len() - 1];

    if t <= first.expiry() + TENOR_EPSILON {
        return first.vol_at_moneyness(x);
    }
    if t >= last.expiry() - TENOR_EPSILON {
        return last.vol_at_moneyness(x);
    }

    match bracket(smiles, t) {
        Some((lo, hi)) => {
            let w_lo = lo.total_variance_at(x);
            let w_hi = hi.total_variance_at(x);
            let alpha = (t - lo.expiry()) / (hi.expiry() - lo.expiry());
            let w = w_lo + alpha * (w_hi - w_lo);
            (w / t).sqrt()
        }
        // Unreachable given the boundary checks above; fall back to the
        // nearest quoted smile rather than panic.
        None => last.vol_at_moneyness(x),
    }
}
