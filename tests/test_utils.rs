use fxsurface_lib::MarketQuoteSet;

/// Fixed snapshot time shared by all fixtures (2025-01-01 00:00:00 UTC)
pub const AS_OF: i64 = 1735689600;

/// Helper to create a quote set with only 25-delta wings
pub fn quote_set_25(
    tenor: &str,
    years_to_exp: f64,
    forward: f64,
    atm_vol: f64,
    rr_25: f64,
    bf_25: f64,
) -> MarketQuoteSet {
    MarketQuoteSet {
        pair: "EURUSD".to_string(),
        tenor: tenor.to_string(),
        as_of: AS_OF,
        spot: 1.1689,
        forward,
        years_to_exp,
        atm_vol,
        rr_25: Some(rr_25),
        bf_25: Some(bf_25),
        rr_10: None,
        bf_10: None,
        foreign_rate: None,
    }
}

/// EURUSD 1-month quotes from a validated market snapshot:
/// spot 1.1689, ATM 7.6375%, 25d RR -0.045%, 25d BF 0.1575%.
pub fn eurusd_1m() -> MarketQuoteSet {
    quote_set_25("1M", 1.0 / 12.0, 1.1695, 0.076375, -0.00045, 0.001575)
}

/// A three-tenor EURUSD ladder with mildly rising ATM vol and skew.
/// The 6M tenor carries 10-delta quotes as well.
pub fn eurusd_ladder() -> Vec<MarketQuoteSet> {
    let mut six_month = quote_set_25("6M", 0.5, 1.1745, 0.0815, -0.0022, 0.0021);
    six_month.rr_10 = Some(-0.0040);
    six_month.bf_10 = Some(0.0068);

    vec![
        eurusd_1m(),
        quote_set_25("3M", 0.25, 1.1718, 0.0790, -0.0012, 0.0018),
        six_month,
    ]
}
