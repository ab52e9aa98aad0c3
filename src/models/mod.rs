pub mod bs;
pub mod vanna_volga;

/// Whether an option is a call or a put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    Call,
    Put,
}

/// Common traits used by all smile models
pub mod traits {
    /// A single-tenor volatility curve over strike.
    ///
    /// Implementors expose volatility as a function of log-moneyness
    /// `x = ln(K/F)`; strike- and variance-space views are derived.
    pub trait SmileSection {
        /// Time to expiry in years
        fn expiry(&self) -> f64;

        /// Forward rate the moneyness axis is anchored on
        fn forward(&self) -> f64;

        /// Volatility at log-moneyness `x = ln(K/F)`
        fn vol_at_moneyness(&self, x: f64) -> f64;

        /// Volatility at an absolute strike
        fn vol_at_strike(&self, strike: f64) -> f64 {
            self.vol_at_moneyness((strike / self.forward()).ln())
        }

        /// Total variance `sigma^2 * T` at log-moneyness `x`
        fn total_variance_at(&self, x: f64) -> f64 {
            let sigma = self.vol_at_moneyness(x);
            sigma * sigma * self.expiry()
        }
    }
}

/// Utility functions for option pricing off a smile
pub mod utils {
    use super::traits::SmileSection;
    use super::OptionType;
    use crate::error::ValidationError;
    use crate::models::bs::{bs_call_price, bs_put_price};

    /// Calculate log-moneyness: ln(K/F)
    pub fn log_moneyness(strike: f64, forward: f64) -> f64 {
        (strike / forward).ln()
    }

    /// Option pricing result
    #[derive(Debug, Clone, Copy)]
    pub struct OptionPricingResult {
        pub price: f64,
        pub smile_vol: f64,
    }

    /// Price a European vanilla at the smile's volatility for its strike.
    ///
    /// `domestic_df` discounts the forward-measure payoff back to today.
    pub fn price_option<S: SmileSection>(
        option_type: OptionType,
        strike: f64,
        domestic_df: f64,
        smile: &S,
    ) -> Result<OptionPricingResult, ValidationError> {
        let smile_vol = smile.vol_at_strike(strike);
        if smile_vol <= 0.0 || !smile_vol.is_finite() {
            return Err(ValidationError::NonPositiveVolatility(smile_vol));
        }

        let forward = smile.forward();
        let t = smile.expiry();
        let price = match option_type {
            OptionType::Call => bs_call_price(forward, strike, domestic_df, t, smile_vol),
            OptionType::Put => bs_put_price(forward, strike, domestic_df, t, smile_vol),
        };

        Ok(OptionPricingResult { price, smile_vol })
    }
}
