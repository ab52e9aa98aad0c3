//! Vanna-Volga smile construction for a single tenor.
//!
//! The pipeline is: decompose RR/BF quotes into wing volatilities, invert
//! each anchor delta to an absolute strike using that anchor's own
//! volatility, then interpolate arbitrary strikes as a Lagrange-weighted
//! sum of the anchor volatilities in log-moneyness.

use tracing::{debug, warn};

use super::types::{DeltaStrikePoint, Smile, SmileAnchors, WingVols};
use crate::error::{ConstructionError, Error};
use crate::market::{DeltaConvention, ValidatedQuoteSet};
use crate::models::bs::strike_for_delta;
use crate::models::OptionType;

/// Decompose one delta bucket's quotes into wing volatilities:
///
/// ```text
/// sigma_call = sigma_atm + RR/2 + BF
/// sigma_put  = sigma_atm - RR/2 + BF
/// ```
///
/// This is the exact algebraic inversion of the defining identities
/// `RR = sigma_call - sigma_put` and
/// `BF = (sigma_call + sigma_put)/2 - sigma_atm`.
pub fn decompose_wing_vols(atm_vol: f64, rr: f64, bf: f64) -> WingVols {
    WingVols {
        call: atm_vol + 0.5 * rr + bf,
        put: atm_vol - 0.5 * rr + bf,
    }
}

/// Recompose the RR/BF quotes from wing volatilities. Inverse of
/// [`decompose_wing_vols`]; also used by the surface round-trip check.
pub fn recompose_quotes(wings: &WingVols, atm_vol: f64) -> (f64, f64) {
    let rr = wings.call - wings.put;
    let bf = 0.5 * (wings.call + wings.put) - atm_vol;
    (rr, bf)
}

/// Lagrange weights of the anchor coordinates `xs` at query point `x`:
/// `w_i(x) = prod_{j != i} (x - x_j) / (x_i - x_j)`.
///
/// The weights sum to one and collapse to a unit vector at each anchor,
/// so anchor volatilities are reproduced exactly.
pub fn vanna_volga_weights(xs: &[f64], x: f64) -> Vec<f64> {
    let n = xs.len();
    let mut weights = Vec::with_capacity(n);
    for i in 0..n {
        let mut w = 1.0;
        for j in 0..n {
            if j != i {
                w *= (x - xs[j]) / (xs[i] - xs[j]);
            }
        }
        weights.push(w);
    }
    weights
}

fn wing_anchors(
    wings: &WingVols,
    delta: f64,
    forward: f64,
    t: f64,
    convention: DeltaConvention,
    foreign_df: f64,
) -> Result<(DeltaStrikePoint, DeltaStrikePoint), Error> {
    // Each wing inverts with its own vol, never the ATM vol.
    let put_strike = strike_for_delta(
        delta,
        OptionType::Put,
        forward,
        wings.put,
        t,
        convention,
        foreign_df,
    )?;
    let call_strike = strike_for_delta(
        delta,
        OptionType::Call,
        forward,
        wings.call,
        t,
        convention,
        foreign_df,
    )?;

    Ok((
        DeltaStrikePoint {
            delta,
            option_type: OptionType::Put,
            strike: put_strike,
            vol: wings.put,
        },
        DeltaStrikePoint {
            delta,
            option_type: OptionType::Call,
            strike: call_strike,
            vol: wings.call,
        },
    ))
}

/// Build one tenor's smile from validated quotes.
///
/// With only 25-delta quotes this is the 3-point construction
/// (25d put, ATM, 25d call); with 10-delta quotes it extends to 5 points.
/// A tenor with no wing quotes at all degenerates to a flat smile at the
/// ATM volatility, explicitly flagged and logged rather than silently
/// passed off as a smile with curvature.
pub fn build_smile(
    validated: &ValidatedQuoteSet,
    convention: DeltaConvention,
) -> Result<Smile, Error> {
    let q = validated.quotes();
    let forward = q.forward;
    let t = q.years_to_exp;

    if !q.has_wing_quotes() {
        warn!(
            pair = %q.pair,
            tenor = %q.tenor,
            degraded_smile = true,
            "no wing quotes; smile degenerates to flat ATM volatility"
        );
        return Ok(Smile {
            quotes: q.clone(),
            anchors: SmileAnchors {
                put_10: None,
                put_25: None,
                atm_strike: forward,
                atm_vol: q.atm_vol,
                call_25: None,
                call_10: None,
            },
            nodes: vec![(0.0, q.atm_vol)],
            degraded: true,
        });
    }

    let foreign_df = match convention {
        DeltaConvention::Forward => 1.0,
        DeltaConvention::Spot => validated.foreign_discount_factor()?,
    };

    // Validation guarantees RR/BF arrive in pairs, so the unwraps below
    // cannot fire; has_wing_quotes / has_ten_delta gate them.
    let wings_25 = decompose_wing_vols(q.atm_vol, q.rr_25.unwrap(), q.bf_25.unwrap());
    let (put_25, call_25) = wing_anchors(&wings_25, 0.25, forward, t, convention, foreign_df)?;

    let (put_10, call_10) = if q.has_ten_delta() {
        let wings_10 = decompose_wing_vols(q.atm_vol, q.rr_10.unwrap(), q.bf_10.unwrap());
        let (p, c) = wing_anchors(&wings_10, 0.10, forward, t, convention, foreign_df)?;
        (Some(p), Some(c))
    } else {
        (None, None)
    };

    let anchors = SmileAnchors {
        put_10,
        put_25: Some(put_25),
        atm_strike: forward,
        atm_vol: q.atm_vol,
        call_25: Some(call_25),
        call_10,
    };

    let mut points: Vec<(f64, f64)> = Vec::with_capacity(5);
    if let Some(p) = &anchors.put_10 {
        points.push((p.strike, p.vol));
    }
    points.push((put_25.strike, put_25.vol));
    points.push((forward, q.atm_vol));
    points.push((call_25.strike, call_25.vol));
    if let Some(c) = &anchors.call_10 {
        points.push((c.strike, c.vol));
    }

    let strikes: Vec<f64> = points.iter().map(|(k, _)| *k).collect();
    if strikes.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ConstructionError::AnchorOrdering {
            tenor: q.tenor.clone(),
            strikes,
        }
        .into());
    }

    let nodes: Vec<(f64, f64)> = points
        .into_iter()
        .map(|(strike, vol)| ((strike / forward).ln(), vol))
        .collect();

    debug!(
        pair = %q.pair,
        tenor = %q.tenor,
        anchor_count = nodes.len(),
        "smile constructed"
    );

    Ok(Smile {
        quotes: q.clone(),
        anchors,
        nodes,
        degraded: false,
    })
}
