//! Surface assembly and the public query API.
//!
//! A [`Surface`] has exactly two states. Under construction, smiles are
//! added tenor by tenor and the surface is not queryable. After
//! [`finalize`](Surface::finalize) it is immutable: every query method
//! takes `&self`, there is no interior mutability, and a quote update
//! means building a new surface rather than mutating this one, so
//! readers on other threads can never observe a partially updated state.

use tracing::debug;

use crate::error::{ConstructionError, Error, QueryError};
use crate::market::{ConventionTable, ValidatedQuoteSet};
use crate::models::traits::SmileSection;
use crate::models::utils::price_option;
use crate::models::vanna_volga::smile::{build_smile, recompose_quotes};
use crate::models::vanna_volga::temporal;
use crate::models::vanna_volga::types::{DeltaStrikePoint, Smile, WingVols};
use crate::models::OptionType;

/// Round-trip tolerance for the reconstructed ATM volatility.
pub const ATM_ROUND_TRIP_TOL: f64 = 1e-8;
/// Round-trip tolerance for reconstructed RR/BF quotes (looser: they are
/// derived differences of wing volatilities).
pub const WING_ROUND_TRIP_TOL: f64 = 1e-6;

/// An FX implied-volatility surface for one currency pair at one as-of
/// time: a tenor-ordered collection of Vanna-Volga smiles plus the
/// term-structure interpolation between them.
#[derive(Debug, Clone)]
pub struct Surface {
    pair: String,
    as_of: i64,
    smiles: Vec<Smile>,
    finalized: bool,
}

impl Surface {
    /// Start an empty surface in the under-construction state.
    pub fn new(pair: impl Into<String>, as_of: i64) -> Self {
        Self {
            pair: pair.into(),
            as_of,
            smiles: Vec::new(),
            finalized: false,
        }
    }

    pub fn pair(&self) -> &str {
        &self.pair
    }

    /// Quote snapshot time, unix seconds.
    pub fn as_of(&self) -> i64 {
        self.as_of
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn tenor_count(&self) -> usize {
        self.smiles.len()
    }

    pub fn smiles(&self) -> &[Smile] {
        &self.smiles
    }

    /// Build and add one tenor's smile, resolving the pair's delta
    /// convention from the table. Tenors must arrive in strictly
    /// increasing time-to-expiry; violations surface at `finalize()`.
    pub fn add_quotes(
        &mut self,
        validated: &ValidatedQuoteSet,
        conventions: &ConventionTable,
    ) -> Result<(), Error> {
        let q = validated.quotes();
        if q.pair != self.pair || q.as_of != self.as_of {
            return Err(ConstructionError::MixedQuoteSets {
                pair: self.pair.clone(),
                as_of: self.as_of,
                found_pair: q.pair.clone(),
                found_as_of: q.as_of,
            }
            .into());
        }
        let convention = conventions.convention_for(&self.pair);
        let smile = build_smile(validated, convention)?;
        self.add_smile(smile)?;
        Ok(())
    }

    /// Add a pre-built smile.
    pub fn add_smile(&mut self, smile: Smile) -> Result<(), ConstructionError> {
        if self.finalized {
            return Err(ConstructionError::SurfaceFinalized);
        }
        self.smiles.push(smile);
        Ok(())
    }

    /// Transition to the finalized, queryable state.
    pub fn finalize(&mut self) -> Result<(), ConstructionError> {
        if self.finalized {
            return Ok(());
        }
        if self.smiles.is_empty() {
            return Err(ConstructionError::EmptySurface);
        }
        for w in self.smiles.windows(2) {
            if w[1].expiry() <= w[0].expiry() {
                return Err(ConstructionError::NonMonotonicTenor {
                    prev: w[0].expiry(),
                    next: w[1].expiry(),
                });
            }
        }
        self.finalized = true;
        debug!(pair = %self.pair, tenors = self.smiles.len(), "surface finalized");
        Ok(())
    }

    fn require_finalized(&self) -> Result<(), QueryError> {
        if self.finalized {
            Ok(())
        } else {
            Err(QueryError::SurfaceNotFinalized)
        }
    }

    /// Implied volatility for an absolute strike and a maturity in years.
    ///
    /// Within a tenor this is the Vanna-Volga smile; across tenors,
    /// linear total-variance interpolation at fixed log-moneyness, with
    /// the first/last smile held flat outside the quoted range.
    pub fn volatility_at(&self, strike: f64, maturity: f64) -> Result<f64, QueryError> {
        self.require_finalized()?;
        if strike <= 0.0 || !strike.is_finite() {
            return Err(QueryError::NonPositiveStrike(strike));
        }
        if maturity <= 0.0 || !maturity.is_finite() {
            return Err(QueryError::NonPositiveMaturity(maturity));
        }

        let forward = temporal::forward_at(&self.smiles, maturity);
        let x = (strike / forward).ln();
        Ok(temporal::vol_at(&self.smiles, x, maturity))
    }

    /// Price a European vanilla off the surface volatility.
    /// `domestic_df` discounts the payoff; pass 1.0 for a forward price.
    pub fn price_vanilla(
        &self,
        option_type: OptionType,
        strike: f64,
        maturity: f64,
        domestic_df: f64,
    ) -> Result<f64, Error> {
        let vol = self.volatility_at(strike, maturity)?;
        let forward = temporal::forward_at(&self.smiles, maturity);
        let section = FlatSection {
            forward,
            expiry: maturity,
            vol,
        };
        let result = price_option(option_type, strike, domestic_df, &section)?;
        Ok(result.price)
    }

    /// Recompute ATM/RR/BF off the constructed smiles at each quoted
    /// tenor and report the discrepancy against the input quotes. The
    /// primary correctness gate for the whole construction: a surface
    /// that cannot reproduce its own inputs is mispricing everything in
    /// between them.
    pub fn round_trip_check(&self) -> Result<RoundTripReport, QueryError> {
        self.require_finalized()?;

        let mut tenors = Vec::with_capacity(self.smiles.len());
        for smile in &self.smiles {
            let q = smile.quotes();
            let atm_reconstructed = smile.vol_at_strike(q.forward);
            let atm_error = (atm_reconstructed - q.atm_vol).abs();

            let wing_errors = |put: &Option<DeltaStrikePoint>,
                               call: &Option<DeltaStrikePoint>,
                               rr_quote: Option<f64>,
                               bf_quote: Option<f64>| {
                match (put, call, rr_quote, bf_quote) {
                    (Some(p), Some(c), Some(rr), Some(bf)) => {
                        let wings = WingVols {
                            call: smile.vol_at_strike(c.strike),
                            put: smile.vol_at_strike(p.strike),
                        };
                        let (rr_rt, bf_rt) = recompose_quotes(&wings, atm_reconstructed);
                        (Some((rr_rt - rr).abs()), Some((bf_rt - bf).abs()))
                    }
                    _ => (None, None),
                }
            };

            let (rr_25_error, bf_25_error) = wing_errors(
                &smile.anchors().put_25,
                &smile.anchors().call_25,
                q.rr_25,
                q.bf_25,
            );
            let (rr_10_error, bf_10_error) = wing_errors(
                &smile.anchors().put_10,
                &smile.anchors().call_10,
                q.rr_10,
                q.bf_10,
            );

            let within = |err: Option<f64>| err.is_none_or(|e| e <= WING_ROUND_TRIP_TOL);
            let passed = atm_error <= ATM_ROUND_TRIP_TOL
                && within(rr_25_error)
                && within(bf_25_error)
                && within(rr_10_error)
                && within(bf_10_error);

            tenors.push(TenorRoundTrip {
                tenor: q.tenor.clone(),
                years_to_exp: q.years_to_exp,
                atm_error,
                rr_25_error,
                bf_25_error,
                rr_10_error,
                bf_10_error,
                passed,
            });
        }

        let passed = tenors.iter().all(|t| t.passed);
        Ok(RoundTripReport { tenors, passed })
    }

    /// Serializable snapshot of the surface for external rendering
    /// collaborators: pair, as-of time, and per-tenor anchor points.
    pub fn describe(&self) -> Result<SurfaceSnapshot, QueryError> {
        self.require_finalized()?;

        let tenors = self
            .smiles
            .iter()
            .map(|smile| {
                let q = smile.quotes();
                let wing = |label: &str, p: &DeltaStrikePoint| AnchorSnapshot {
                    label: label.to_string(),
                    delta: Some(p.delta),
                    strike: p.strike,
                    vol: p.vol,
                };

                let mut anchors = Vec::with_capacity(5);
                if let Some(p) = &smile.anchors().put_10 {
                    anchors.push(wing("10d_put", p));
                }
                if let Some(p) = &smile.anchors().put_25 {
                    anchors.push(wing("25d_put", p));
                }
                anchors.push(AnchorSnapshot {
                    label: "atm".to_string(),
                    delta: None,
                    strike: smile.anchors().atm_strike,
                    vol: smile.anchors().atm_vol,
                });
                if let Some(p) = &smile.anchors().call_25 {
                    anchors.push(wing("25d_call", p));
                }
                if let Some(p) = &smile.anchors().call_10 {
                    anchors.push(wing("10d_call", p));
                }

                TenorSnapshot {
                    tenor: q.tenor.clone(),
                    years_to_exp: q.years_to_exp,
                    spot: q.spot,
                    forward: q.forward,
                    atm_vol: q.atm_vol,
                    degraded: smile.is_degraded(),
                    anchors,
                }
            })
            .collect();

        Ok(SurfaceSnapshot {
            pair: self.pair.clone(),
            as_of: self.as_of,
            tenors,
        })
    }
}

/// A constant-vol section at an interpolated maturity, used to price
/// vanillas between quoted tenors.
struct FlatSection {
    forward: f64,
    expiry: f64,
    vol: f64,
}

impl SmileSection for FlatSection {
    fn expiry(&self) -> f64 {
        self.expiry
    }
    fn forward(&self) -> f64 {
        self.forward
    }
    fn vol_at_moneyness(&self, _x: f64) -> f64 {
        self.vol
    }
}

/// Per-tenor reconstruction errors from [`Surface::round_trip_check`].
/// Wing errors are `None` for buckets the tenor did not quote.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TenorRoundTrip {
    pub tenor: String,
    pub years_to_exp: f64,
    pub atm_error: f64,
    pub rr_25_error: Option<f64>,
    pub bf_25_error: Option<f64>,
    pub rr_10_error: Option<f64>,
    pub bf_10_error: Option<f64>,
    pub passed: bool,
}

/// Result of reconstructing the input quotes from the built surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundTripReport {
    pub tenors: Vec<TenorRoundTrip>,
    pub passed: bool,
}

/// One anchor point in a [`SurfaceSnapshot`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorSnapshot {
    /// "10d_put" | "25d_put" | "atm" | "25d_call" | "10d_call"
    pub label: String,
    /// Delta magnitude; `None` for the ATM anchor
    pub delta: Option<f64>,
    pub strike: f64,
    pub vol: f64,
}

/// Per-tenor slice of a [`SurfaceSnapshot`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TenorSnapshot {
    pub tenor: String,
    pub years_to_exp: f64,
    pub spot: f64,
    pub forward: f64,
    pub atm_vol: f64,
    /// True when this tenor had no wing quotes and its smile is flat
    pub degraded: bool,
    pub anchors: Vec<AnchorSnapshot>,
}

/// Plain nested description of a finalized surface, suitable for JSON
/// serialization toward rendering or persistence collaborators.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceSnapshot {
    pub pair: String,
    pub as_of: i64,
    pub tenors: Vec<TenorSnapshot>,
}
