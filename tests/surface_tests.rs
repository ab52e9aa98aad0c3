mod test_utils;

use fxsurface_lib::models::vanna_volga::temporal;
use fxsurface_lib::{
    build_surface, validate_quote_set, ConstructionError, ConventionTable, OptionType, QueryError,
    SmileSection, Surface, ATM_ROUND_TRIP_TOL, WING_ROUND_TRIP_TOL,
};
use test_utils::{eurusd_1m, eurusd_ladder, quote_set_25, AS_OF};

fn ladder_surface() -> Surface {
    build_surface(
        "EURUSD",
        AS_OF,
        &eurusd_ladder(),
        &ConventionTable::forward_only(),
    )
    .expect("surface build failed")
}

// ------------------------------------------------------------------
// Query API
// ------------------------------------------------------------------

/// The ATM volatility is an anchor point at every quoted tenor, not an
/// interpolated value; querying strike = forward there must return the
/// input ATM vol.
#[test]
fn test_atm_fixed_point_at_quoted_tenors() {
    let surface = ladder_surface();

    for quotes in eurusd_ladder() {
        let vol = surface
            .volatility_at(quotes.forward, quotes.years_to_exp)
            .expect("query failed");
        assert!(
            (vol - quotes.atm_vol).abs() < 1e-12,
            "{}: ATM vol {} came back as {}",
            quotes.tenor,
            quotes.atm_vol,
            vol
        );
    }
}

/// Between two quoted tenors the interpolated total variance lies
/// between the bracketing tenors' values at the same log-moneyness.
#[test]
fn test_interpolated_variance_is_bracketed() {
    let surface = ladder_surface();
    let smiles = surface.smiles();
    let (lo, hi) = (&smiles[1], &smiles[2]); // 3M and 6M

    let t = 0.4;
    for x in [-0.03, 0.0, 0.02] {
        let strike = temporal::forward_at(smiles, t) * x.exp();
        let vol = surface.volatility_at(strike, t).expect("query failed");
        let w = vol * vol * t;
        let (w_lo, w_hi) = (lo.total_variance_at(x), hi.total_variance_at(x));
        assert!(
            w >= w_lo.min(w_hi) - 1e-15 && w <= w_lo.max(w_hi) + 1e-15,
            "variance {} at x={} outside bracket [{}, {}]",
            w,
            x,
            w_lo,
            w_hi
        );
    }
}

/// Total variance at fixed log-moneyness must be non-decreasing in
/// maturity when the quoted tenors are themselves calendar-consistent:
/// the interpolation must not manufacture calendar arbitrage.
#[test]
fn test_calendar_consistency_in_total_variance() {
    let surface = ladder_surface();
    let smiles = surface.smiles();

    for x in [-0.04, -0.01, 0.0, 0.01, 0.04] {
        let mut prev_w = 0.0;
        let mut t = 1.0 / 12.0;
        while t <= 0.5 + 1e-9 {
            let strike = temporal::forward_at(smiles, t) * x.exp();
            let vol = surface.volatility_at(strike, t).expect("query failed");
            let w = vol * vol * t;
            assert!(
                w >= prev_w - 1e-12,
                "total variance decreased at x={}, t={}: {} -> {}",
                x,
                t,
                prev_w,
                w
            );
            prev_w = w;
            t += 0.01;
        }
    }
}

/// Maturities outside the quoted range take the nearest tenor's smile
/// unchanged: flat extrapolation on both ends, by policy.
#[test]
fn test_boundary_policy_holds_nearest_smile() {
    let surface = ladder_surface();
    let first = &surface.smiles()[0];
    let last = &surface.smiles()[surface.smiles().len() - 1];

    for strike in [1.10, 1.17, 1.25] {
        let short = surface.volatility_at(strike, 0.01).expect("query failed");
        assert_eq!(short, first.vol_at_strike(strike));

        let long = surface.volatility_at(strike, 2.0).expect("query failed");
        assert_eq!(long, last.vol_at_strike(strike));
    }
}

/// Vanilla prices off the surface satisfy put-call parity at the shared
/// smile volatility.
#[test]
fn test_price_vanilla_put_call_parity() {
    let surface = ladder_surface();
    let strike = 1.19;
    let t = 0.25;
    let df = 0.99;
    let forward = temporal::forward_at(surface.smiles(), t);

    let call = surface
        .price_vanilla(OptionType::Call, strike, t, df)
        .expect("call pricing failed");
    let put = surface
        .price_vanilla(OptionType::Put, strike, t, df)
        .expect("put pricing failed");

    assert!(call > 0.0 && put > 0.0);
    let parity = df * (forward - strike);
    assert!(
        (call - put - parity).abs() < 1e-12,
        "put-call parity violated: {} vs {}",
        call - put,
        parity
    );
}

// ------------------------------------------------------------------
// Round-trip diagnostics
// ------------------------------------------------------------------

/// The primary correctness gate: every quoted instrument must be
/// reproducible from the constructed surface within tolerance.
#[test]
fn test_round_trip_check_passes() {
    let surface = ladder_surface();
    let report = surface.round_trip_check().expect("round trip failed");

    assert!(report.passed, "round trip report failed: {:#?}", report);
    assert_eq!(report.tenors.len(), 3);
    for tenor in &report.tenors {
        assert!(tenor.atm_error <= ATM_ROUND_TRIP_TOL);
        assert!(tenor.rr_25_error.unwrap() <= WING_ROUND_TRIP_TOL);
        assert!(tenor.bf_25_error.unwrap() <= WING_ROUND_TRIP_TOL);
    }
    // Only the 6M tenor quotes the 10-delta bucket
    assert!(report.tenors[0].rr_10_error.is_none());
    assert!(report.tenors[2].rr_10_error.unwrap() <= WING_ROUND_TRIP_TOL);
}

/// RR = BF = 0 must produce a flat smile equal to ATM at every strike
/// and a round-trip report with zero discrepancy.
#[test]
fn test_degenerate_zero_quotes_round_trip_exactly() {
    let quotes = vec![
        quote_set_25("1M", 1.0 / 12.0, 1.1695, 0.08, 0.0, 0.0),
        quote_set_25("3M", 0.25, 1.1718, 0.08, 0.0, 0.0),
    ];
    let surface = build_surface("EURUSD", AS_OF, &quotes, &ConventionTable::forward_only())
        .expect("surface build failed");

    for strike in [1.05, 1.1695, 1.30] {
        let vol = surface
            .volatility_at(strike, 1.0 / 12.0)
            .expect("query failed");
        assert!(
            (vol - 0.08).abs() < 1e-12,
            "flat surface should be 8% everywhere, got {}",
            vol
        );
    }

    let report = surface.round_trip_check().expect("round trip failed");
    assert!(report.passed);
    for tenor in &report.tenors {
        assert_eq!(tenor.atm_error, 0.0);
        assert_eq!(tenor.rr_25_error, Some(0.0));
        assert_eq!(tenor.bf_25_error, Some(0.0));
    }
}

// ------------------------------------------------------------------
// State machine
// ------------------------------------------------------------------

/// Querying a surface under construction is a programmer error with a
/// dedicated error, not a panic or a stale answer.
#[test]
fn test_query_before_finalize_fails() {
    let mut surface = Surface::new("EURUSD", AS_OF);
    let validated = validate_quote_set(&eurusd_1m()).unwrap();
    surface
        .add_quotes(&validated, &ConventionTable::forward_only())
        .expect("add_quotes failed");

    assert!(matches!(
        surface.volatility_at(1.17, 0.1),
        Err(QueryError::SurfaceNotFinalized)
    ));
    assert!(matches!(
        surface.round_trip_check(),
        Err(QueryError::SurfaceNotFinalized)
    ));
    assert!(matches!(
        surface.describe(),
        Err(QueryError::SurfaceNotFinalized)
    ));
}

#[test]
fn test_finalize_empty_surface_fails() {
    let mut surface = Surface::new("EURUSD", AS_OF);
    assert!(matches!(
        surface.finalize(),
        Err(ConstructionError::EmptySurface)
    ));
}

/// Tenors must arrive strictly increasing; duplicates and reversals are
/// both rejected at finalize.
#[test]
fn test_non_monotonic_tenors_rejected() {
    let conventions = ConventionTable::forward_only();

    let mut surface = Surface::new("EURUSD", AS_OF);
    let three_month = validate_quote_set(&quote_set_25("3M", 0.25, 1.1718, 0.079, 0.0, 0.001))
        .unwrap();
    let one_month = validate_quote_set(&eurusd_1m()).unwrap();
    surface.add_quotes(&three_month, &conventions).unwrap();
    surface.add_quotes(&one_month, &conventions).unwrap();
    assert!(matches!(
        surface.finalize(),
        Err(ConstructionError::NonMonotonicTenor { .. })
    ));

    // Duplicated tenor through the one-call pipeline
    let duplicated = vec![eurusd_1m(), eurusd_1m()];
    let result = build_surface("EURUSD", AS_OF, &duplicated, &conventions);
    assert!(matches!(
        result,
        Err(fxsurface_lib::Error::Construction(
            ConstructionError::NonMonotonicTenor { .. }
        ))
    ));
}

/// A finalized surface is immutable; updates build a new surface.
#[test]
fn test_add_after_finalize_fails() {
    let mut surface = Surface::new("EURUSD", AS_OF);
    let validated = validate_quote_set(&eurusd_1m()).unwrap();
    let conventions = ConventionTable::forward_only();
    surface.add_quotes(&validated, &conventions).unwrap();
    surface.finalize().unwrap();

    let more = validate_quote_set(&quote_set_25("3M", 0.25, 1.1718, 0.079, 0.0, 0.001)).unwrap();
    assert!(matches!(
        surface.add_quotes(&more, &conventions),
        Err(fxsurface_lib::Error::Construction(
            ConstructionError::SurfaceFinalized
        ))
    ));
}

/// One surface, one pair, one as-of time.
#[test]
fn test_mixed_quote_sets_rejected() {
    let mut surface = Surface::new("GBPUSD", AS_OF);
    let eurusd = validate_quote_set(&eurusd_1m()).unwrap();
    assert!(matches!(
        surface.add_quotes(&eurusd, &ConventionTable::forward_only()),
        Err(fxsurface_lib::Error::Construction(
            ConstructionError::MixedQuoteSets { .. }
        ))
    ));
}

#[test]
fn test_query_argument_validation() {
    let surface = ladder_surface();
    assert!(matches!(
        surface.volatility_at(-1.0, 0.25),
        Err(QueryError::NonPositiveStrike(_))
    ));
    assert!(matches!(
        surface.volatility_at(1.17, 0.0),
        Err(QueryError::NonPositiveMaturity(_))
    ));
}

/// The one-call pipeline accepts tenors in any order and sorts them.
#[test]
fn test_build_surface_sorts_unordered_input() {
    let mut quotes = eurusd_ladder();
    quotes.reverse();
    let surface = build_surface("EURUSD", AS_OF, &quotes, &ConventionTable::forward_only())
        .expect("unordered input should build");

    let expiries: Vec<f64> = surface.smiles().iter().map(|s| s.expiry()).collect();
    assert!(expiries.windows(2).all(|w| w[0] < w[1]));
}

// ------------------------------------------------------------------
// Snapshots
// ------------------------------------------------------------------

/// describe() carries everything a rendering collaborator needs: pair,
/// as-of, and per-tenor anchors. It must serialize to JSON as-is.
#[test]
fn test_describe_snapshot() {
    let surface = ladder_surface();
    let snapshot = surface.describe().expect("describe failed");

    assert_eq!(snapshot.pair, "EURUSD");
    assert_eq!(snapshot.as_of, AS_OF);
    assert_eq!(snapshot.tenors.len(), 3);

    // 3-point tenors expose three anchors, the 5-point 6M tenor five
    assert_eq!(snapshot.tenors[0].anchors.len(), 3);
    assert_eq!(snapshot.tenors[2].anchors.len(), 5);
    let labels: Vec<&str> = snapshot.tenors[2]
        .anchors
        .iter()
        .map(|a| a.label.as_str())
        .collect();
    assert_eq!(
        labels,
        ["10d_put", "25d_put", "atm", "25d_call", "10d_call"]
    );

    let json = serde_json::to_string(&snapshot).expect("snapshot JSON serialization failed");
    assert!(json.contains("\"pair\":\"EURUSD\""));
}

/// A degraded tenor stays visible in the snapshot, flagged rather than
/// hidden.
#[test]
fn test_describe_flags_degraded_tenor() {
    let mut quotes = eurusd_ladder();
    quotes[1].rr_25 = None;
    quotes[1].bf_25 = None;
    quotes[1].rr_10 = None;
    quotes[1].bf_10 = None;

    let surface = build_surface("EURUSD", AS_OF, &quotes, &ConventionTable::forward_only())
        .expect("surface build failed");
    let snapshot = surface.describe().expect("describe failed");

    assert!(!snapshot.tenors[0].degraded);
    assert!(snapshot.tenors[1].degraded);
    assert_eq!(snapshot.tenors[1].anchors.len(), 1);
}

/// A finalized surface is plain owned data: shareable across threads
/// without locks.
#[test]
fn test_surface_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Surface>();
}
