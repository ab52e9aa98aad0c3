// Black-Scholes helpers for FX smile construction: forward-form option
// prices, the two quoted delta definitions, and the closed-form inversion
// from quoted delta to absolute strike. Greeks beyond delta are
// intentionally omitted.

use statrs::distribution::{Continuous, ContinuousCDF, Normal};

use crate::error::ValidationError;
use crate::market::DeltaConvention;
use crate::models::OptionType;

fn norm_cdf(x: f64) -> f64 {
    // 0.5 * [1 + erf(x / sqrt(2))]
    0.5 * (1.0 + libm::erf(x / (2.0_f64).sqrt()))
}

/// Inverse standard normal CDF.
///
/// statrs' rational approximation plus one Newton step. Quantile error
/// propagates directly into strike error, so this must hold well below
/// 1e-10 absolute; the polish step reaches machine precision for any
/// argument away from the extreme tails.
pub fn inverse_norm_cdf(p: f64) -> f64 {
    let normal = Normal::new(0.0, 1.0).unwrap();
    let x = normal.inverse_cdf(p);
    let pdf = normal.pdf(x);
    if pdf > 0.0 {
        x - (normal.cdf(x) - p) / pdf
    } else {
        x
    }
}

#[allow(non_snake_case)]
fn d1(F: f64, K: f64, sigma: f64, T: f64) -> f64 {
    ((F / K).ln() + 0.5 * sigma * sigma * T) / (sigma * T.sqrt())
}

/// Price of a European call on the forward, discounted by `df` (domestic).
#[allow(non_snake_case)]
pub fn bs_call_price(F: f64, K: f64, df: f64, T: f64, sigma: f64) -> f64 {
    if T <= 0.0 || sigma <= 0.0 {
        return df * (F - K).max(0.0);
    }
    let d1 = d1(F, K, sigma, T);
    let d2 = d1 - sigma * T.sqrt();
    df * (F * norm_cdf(d1) - K * norm_cdf(d2))
}

/// Price of a European put on the forward, discounted by `df` (domestic).
#[allow(non_snake_case)]
pub fn bs_put_price(F: f64, K: f64, df: f64, T: f64, sigma: f64) -> f64 {
    if T <= 0.0 || sigma <= 0.0 {
        return df * (K - F).max(0.0);
    }
    let d1 = d1(F, K, sigma, T);
    let d2 = d1 - sigma * T.sqrt();
    df * (K * norm_cdf(-d2) - F * norm_cdf(-d1))
}

/// Forward delta: `N(d1)` for calls, `-N(-d1)` for puts.
pub fn forward_delta(
    option_type: OptionType,
    forward: f64,
    strike: f64,
    sigma: f64,
    t: f64,
) -> f64 {
    if sigma <= 0.0 || t <= 0.0 {
        return match option_type {
            OptionType::Call => 0.0,
            OptionType::Put => -1.0,
        };
    }
    let d1 = d1(forward, strike, sigma, t);
    match option_type {
        OptionType::Call => norm_cdf(d1),
        OptionType::Put => -norm_cdf(-d1),
    }
}

/// Spot delta: the forward delta scaled by the foreign discount factor
/// `exp(-r_f * T)`.
pub fn spot_delta(
    option_type: OptionType,
    forward: f64,
    strike: f64,
    sigma: f64,
    t: f64,
    foreign_df: f64,
) -> f64 {
    foreign_df * forward_delta(option_type, forward, strike, sigma, t)
}

/// Delta under the given convention, signed (puts negative).
/// `foreign_df` is ignored for the forward-delta convention.
pub fn delta(
    option_type: OptionType,
    forward: f64,
    strike: f64,
    sigma: f64,
    t: f64,
    convention: DeltaConvention,
    foreign_df: f64,
) -> f64 {
    match convention {
        DeltaConvention::Forward => forward_delta(option_type, forward, strike, sigma, t),
        DeltaConvention::Spot => spot_delta(option_type, forward, strike, sigma, t, foreign_df),
    }
}

/// Invert the delta definition: the strike at which an option of the
/// given type has exactly `delta` (magnitude, in (0, 0.5]).
///
/// Closed form, no solver:
///
/// ```text
/// K = F * exp(∓ N⁻¹(Δ̂) σ √T + σ²T/2)     (− for calls, + for puts)
/// ```
///
/// where `Δ̂` is the quoted delta itself under the forward-delta
/// convention and `Δ̂ = Δ / exp(-r_f T)` under spot delta. Each anchor's
/// own volatility must be passed here; feeding the ATM vol for every
/// wing produces a visibly too-narrow smile.
pub fn strike_for_delta(
    delta: f64,
    option_type: OptionType,
    forward: f64,
    sigma: f64,
    t: f64,
    convention: DeltaConvention,
    foreign_df: f64,
) -> Result<f64, ValidationError> {
    if !(delta > 0.0 && delta <= 0.5) {
        return Err(ValidationError::InvalidDelta(delta));
    }
    if sigma <= 0.0 || !sigma.is_finite() {
        return Err(ValidationError::NonPositiveVolatility(sigma));
    }
    if t <= 0.0 {
        return Err(ValidationError::NonPositiveExpiry(t));
    }

    let adjusted = match convention {
        DeltaConvention::Forward => delta,
        DeltaConvention::Spot => delta / foreign_df,
    };
    // A deep-discount foreign curve can push the undiscounted delta past
    // the invertible range.
    if !(adjusted > 0.0 && adjusted < 1.0) {
        return Err(ValidationError::InvalidDelta(adjusted));
    }

    let quantile = inverse_norm_cdf(adjusted);
    let sign = match option_type {
        OptionType::Call => -1.0,
        OptionType::Put => 1.0,
    };
    Ok(forward * (sign * quantile * sigma * t.sqrt() + 0.5 * sigma * sigma * t).exp())
}
