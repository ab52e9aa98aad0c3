use crate::market::MarketQuoteSet;
use crate::models::traits::SmileSection;
use crate::models::OptionType;

/// One anchor instrument: a quoted delta resolved to an absolute strike
/// carrying that anchor's own volatility. Immutable once computed for a
/// given quote set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeltaStrikePoint {
    /// Delta magnitude in (0, 0.5]
    pub delta: f64,
    pub option_type: OptionType,
    pub strike: f64,
    pub vol: f64,
}

/// Wing volatilities decomposed from one delta bucket's RR/BF quotes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingVols {
    pub call: f64,
    pub put: f64,
}

/// The labeled anchor set of one tenor's smile.
///
/// The wing points are `None` on a degraded (flat) smile; the 10-delta
/// points are additionally `None` when that bucket is not quoted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmileAnchors {
    pub put_10: Option<DeltaStrikePoint>,
    pub put_25: Option<DeltaStrikePoint>,
    /// ATM-forward anchor: strike = forward, log-moneyness 0
    pub atm_strike: f64,
    pub atm_vol: f64,
    pub call_25: Option<DeltaStrikePoint>,
    pub call_10: Option<DeltaStrikePoint>,
}

/// One tenor's volatility-vs-strike curve.
///
/// Holds the source quotes, the resolved anchors and the interpolation
/// nodes in log-moneyness space. Built by
/// [`build_smile`](super::build_smile) and owned by the surface that
/// built it; it has no independent update lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Smile {
    pub(crate) quotes: MarketQuoteSet,
    pub(crate) anchors: SmileAnchors,
    /// (log-moneyness, vol) sorted ascending; single node when degraded
    pub(crate) nodes: Vec<(f64, f64)>,
    pub(crate) degraded: bool,
}

impl Smile {
    /// The quotes this smile was built from.
    pub fn quotes(&self) -> &MarketQuoteSet {
        &self.quotes
    }

    pub fn anchors(&self) -> &SmileAnchors {
        &self.anchors
    }

    /// True when the tenor carried no wing quotes and the smile is a
    /// flat line at the ATM volatility.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn tenor(&self) -> &str {
        &self.quotes.tenor
    }
}

impl SmileSection for Smile {
    fn expiry(&self) -> f64 {
        self.quotes.years_to_exp
    }

    fn forward(&self) -> f64 {
        self.quotes.forward
    }

    /// Vanna-Volga interpolation: the weighted sum of anchor vols with
    /// Lagrange weights in log-moneyness. Outside the outermost anchors
    /// the vol is held flat (no wing extrapolation).
    fn vol_at_moneyness(&self, x: f64) -> f64 {
        if self.nodes.len() < 2 {
            return self.anchors.atm_vol;
        }

        let first_x = self.nodes[0].0;
        let last_x = self.nodes[self.nodes.len() - 1].0;
        let x = x.clamp(first_x, last_x);

        let xs: Vec<f64> = self.nodes.iter().map(|(x, _)| *x).collect();
        let weights = super::smile::vanna_volga_weights(&xs, x);

        self.nodes
            .iter()
            .zip(weights.iter())
            .map(|((_, vol), w)| w * vol)
            .sum()
    }
}
