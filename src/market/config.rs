//! Per-pair delta convention configuration.
//!
//! FX smiles are quoted in delta, and which delta definition applies is a
//! property of the currency pair, not of this library. Getting it wrong
//! produces plausible-looking but numerically wrong strikes, so the
//! convention is an explicit input rather than a guessed global: the
//! liquid USD majors (EURUSD, GBPUSD, AUDUSD, NZDUSD) settle on spot
//! delta, most emerging-market pairs quote forward delta.
//!
//! Premium-adjusted variants are intentionally absent: their strike
//! inversion has no closed form and would pull an iterative solver into
//! an otherwise bounded-time core. Quotes in a premium-adjusted
//! convention must be converted by the ingestion layer.

use std::collections::HashMap;

/// Which Black-Scholes delta definition the quoted deltas refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeltaConvention {
    /// Spot delta: `exp(-r_f T) * N(d1)`. Requires the foreign rate.
    Spot,
    /// Forward delta: `N(d1)`.
    #[default]
    Forward,
}

/// Maps currency pairs to their quoted delta convention.
///
/// Lookup falls back to `default` for pairs without an explicit entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConventionTable {
    /// Convention for pairs not listed in `overrides`
    #[cfg_attr(feature = "serde", serde(default))]
    pub default: DeltaConvention,
    /// Per-pair overrides, keyed by pair string (e.g. "EURUSD")
    #[cfg_attr(feature = "serde", serde(default))]
    pub overrides: HashMap<String, DeltaConvention>,
}

impl Default for ConventionTable {
    fn default() -> Self {
        let mut overrides = HashMap::new();
        for pair in ["EURUSD", "GBPUSD", "AUDUSD", "NZDUSD"] {
            overrides.insert(pair.to_string(), DeltaConvention::Spot);
        }
        Self {
            default: DeltaConvention::Forward,
            overrides,
        }
    }
}

impl ConventionTable {
    /// Standard table: spot delta for the liquid USD majors, forward
    /// delta everywhere else.
    pub fn g10() -> Self {
        Self::default()
    }

    /// Forward delta for every pair. The usual choice for
    /// emerging-market books and for tests that must not depend on a
    /// foreign rate being quoted.
    pub fn forward_only() -> Self {
        Self {
            default: DeltaConvention::Forward,
            overrides: HashMap::new(),
        }
    }

    /// Spot delta for every pair.
    pub fn spot_only() -> Self {
        Self {
            default: DeltaConvention::Spot,
            overrides: HashMap::new(),
        }
    }

    /// Convention for a given pair, falling back to the table default.
    pub fn convention_for(&self, pair: &str) -> DeltaConvention {
        self.overrides.get(pair).copied().unwrap_or(self.default)
    }

    /// Load a table from TOML, e.g.
    ///
    /// ```toml
    /// default = "Forward"
    ///
    /// [overrides]
    /// EURUSD = "Spot"
    /// USDTRY = "Forward"
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
