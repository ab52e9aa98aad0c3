//! Quote validation: a pure function from raw quote set to either a
//! [`ValidatedQuoteSet`] or a structured rejection naming the offending
//! field.

use tracing::warn;

use super::types::{MarketQuoteSet, QuoteWarning, ValidatedQuoteSet};
use crate::error::ValidationError;

/// ATM volatility must lie in (0, 5.0) as a decimal fraction.
const MAX_ATM_VOL: f64 = 5.0;

/// Risk reversals below this magnitude are treated as zero for the
/// sign-consistency warning; a sign flip between two near-zero quotes is
/// noise, not an inversion.
const RR_SIGN_EPSILON: f64 = 1e-6;

fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field, value })
    }
}

/// Validate one tenor's quotes.
///
/// Hard failures reject the quote set with the field that failed; market
/// oddities that occasionally occur (butterfly inversion, risk-reversal
/// sign flips) are returned as warnings on the validated set and logged,
/// never silently dropped or silently accepted.
pub fn validate_quote_set(quotes: &MarketQuoteSet) -> Result<ValidatedQuoteSet, ValidationError> {
    require_finite("spot", quotes.spot)?;
    require_finite("forward", quotes.forward)?;
    require_finite("years_to_exp", quotes.years_to_exp)?;
    require_finite("atm_vol", quotes.atm_vol)?;

    if quotes.spot <= 0.0 {
        return Err(ValidationError::NonPositiveSpot(quotes.spot));
    }
    if quotes.forward <= 0.0 {
        return Err(ValidationError::NonPositiveForward(quotes.forward));
    }
    if quotes.years_to_exp <= 0.0 {
        return Err(ValidationError::NonPositiveExpiry(quotes.years_to_exp));
    }
    if quotes.atm_vol <= 0.0 || quotes.atm_vol >= MAX_ATM_VOL {
        return Err(ValidationError::AtmVolOutOfRange(quotes.atm_vol));
    }

    // RR and BF come as a pair per delta bucket. One without the other
    // is a feed defect, not a degraded market.
    if quotes.rr_25.is_some() != quotes.bf_25.is_some() {
        return Err(ValidationError::IncompleteWingQuote { delta_bp: 25 });
    }
    if quotes.rr_10.is_some() != quotes.bf_10.is_some() {
        return Err(ValidationError::IncompleteWingQuote { delta_bp: 10 });
    }
    // The 5-point construction anchors the 10-delta wings on the 25s.
    if quotes.has_ten_delta() && !quotes.has_wing_quotes() {
        return Err(ValidationError::MissingTwentyFiveDelta);
    }

    for (field, value) in [
        ("rr_25", quotes.rr_25),
        ("bf_25", quotes.bf_25),
        ("rr_10", quotes.rr_10),
        ("bf_10", quotes.bf_10),
        ("foreign_rate", quotes.foreign_rate),
    ] {
        if let Some(v) = value {
            require_finite(field, v)?;
        }
    }

    let mut warnings = Vec::new();

    if let (Some(bf_10), Some(bf_25)) = (quotes.bf_10, quotes.bf_25) {
        if bf_10 < bf_25 {
            warnings.push(QuoteWarning::ButterflyInversion { bf_10, bf_25 });
        }
    }
    if let (Some(rr_10), Some(rr_25)) = (quotes.rr_10, quotes.rr_25) {
        if rr_10.abs() > RR_SIGN_EPSILON
            && rr_25.abs() > RR_SIGN_EPSILON
            && rr_10.signum() != rr_25.signum()
        {
            warnings.push(QuoteWarning::RiskReversalSignFlip { rr_10, rr_25 });
        }
    }

    for w in &warnings {
        warn!(pair = %quotes.pair, tenor = %quotes.tenor, warning = %w, "quote warning");
    }

    Ok(ValidatedQuoteSet::new(quotes.clone(), warnings))
}
