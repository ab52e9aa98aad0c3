//! Typed market quote input for one (currency pair, tenor) bucket.
//!
//! The quote-ingestion collaborator owns ticker syntax, percentage/fraction
//! conversion and feed plumbing; this core only accepts the named numeric
//! fields below, already converted to decimal fractions. Pushing parsing to
//! the boundary keeps substring-matching ambiguity (the classic "35"
//! matching inside "5" bug class) out of the pricing path entirely.

use crate::error::ValidationError;

/// One tenor's market-standard FX volatility quotes.
///
/// All volatilities are decimal fractions (0.076375 for 7.6375%), never
/// percentages. The 10-delta quotes are optional: not every pair/tenor
/// carries them. `foreign_rate` (continuously compounded) is only needed
/// when the pair's delta convention is spot delta, which divides the
/// quoted delta by the foreign discount factor `exp(-r_f * T)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketQuoteSet {
    /// Currency pair, e.g. "EURUSD"
    pub pair: String,
    /// Tenor label, e.g. "1M" (opaque to the core; used in snapshots and logs)
    pub tenor: String,
    /// Quote snapshot time, unix seconds
    pub as_of: i64,
    /// Spot rate
    pub spot: f64,
    /// Outright forward rate for this tenor
    pub forward: f64,
    /// Time to expiry in years
    pub years_to_exp: f64,
    /// At-the-money-forward volatility
    pub atm_vol: f64,
    /// 25-delta risk reversal (call vol minus put vol)
    pub rr_25: Option<f64>,
    /// 25-delta butterfly (wing average minus ATM)
    pub bf_25: Option<f64>,
    /// 10-delta risk reversal
    pub rr_10: Option<f64>,
    /// 10-delta butterfly
    pub bf_10: Option<f64>,
    /// Foreign deposit rate, continuously compounded (spot-delta convention only)
    pub foreign_rate: Option<f64>,
}

impl MarketQuoteSet {
    /// Whether this tenor carries any wing quotes at all. Without them
    /// the smile degenerates to flat ATM volatility.
    pub fn has_wing_quotes(&self) -> bool {
        self.rr_25.is_some() && self.bf_25.is_some()
    }

    /// Whether the 10-delta bucket is quoted (both RR and BF).
    pub fn has_ten_delta(&self) -> bool {
        self.rr_10.is_some() && self.bf_10.is_some()
    }
}

/// Non-fatal oddities found during validation.
///
/// These describe market states that are unusual but do occur (and
/// revert); rejecting them outright would drop genuinely tradable
/// quotes. They are logged and carried on the [`ValidatedQuoteSet`] so
/// downstream consumers can surface a data-quality flag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuoteWarning {
    /// 10-delta butterfly below the 25-delta butterfly. Wings usually
    /// dominate; temporary inversions happen in thin markets.
    ButterflyInversion { bf_10: f64, bf_25: f64 },
    /// 10- and 25-delta risk reversals with materially opposite signs.
    RiskReversalSignFlip { rr_10: f64, rr_25: f64 },
}

impl std::fmt::Display for QuoteWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteWarning::ButterflyInversion { bf_10, bf_25 } => write!(
                f,
                "10-delta butterfly {} below 25-delta butterfly {}",
                bf_10, bf_25
            ),
            QuoteWarning::RiskReversalSignFlip { rr_10, rr_25 } => write!(
                f,
                "10-delta risk reversal {} and 25-delta risk reversal {} have opposite signs",
                rr_10, rr_25
            ),
        }
    }
}

/// A quote set that passed validation, plus any warnings raised on the way.
///
/// The inner quote set is private: the only way to obtain one is through
/// [`validate_quote_set`](crate::market::validate_quote_set), so every
/// smile is built from checked input.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedQuoteSet {
    quotes: MarketQuoteSet,
    warnings: Vec<QuoteWarning>,
}

impl ValidatedQuoteSet {
    pub(crate) fn new(quotes: MarketQuoteSet, warnings: Vec<QuoteWarning>) -> Self {
        Self { quotes, warnings }
    }

    pub fn quotes(&self) -> &MarketQuoteSet {
        &self.quotes
    }

    pub fn warnings(&self) -> &[QuoteWarning] {
        &self.warnings
    }

    /// The foreign discount factor `exp(-r_f * T)`, required by the
    /// spot-delta convention.
    pub fn foreign_discount_factor(&self) -> Result<f64, ValidationError> {
        let r_f = self
            .quotes
            .foreign_rate
            .ok_or_else(|| ValidationError::MissingForeignRate {
                pair: self.quotes.pair.clone(),
            })?;
        Ok((-r_f * self.quotes.years_to_exp).exp())
    }
}
