// Example: surface_demo.rs
// Builds a EURUSD surface from a hardcoded three-tenor quote snapshot,
// prints the round-trip diagnostics and the describe() snapshot as JSON.
//
// Usage:
//     cargo run --example surface_demo

use anyhow::Result;
use fxsurface_lib::{build_surface, ConventionTable, MarketQuoteSet, OptionType};

fn quotes() -> Vec<MarketQuoteSet> {
    let as_of = 1735689600; // 2025-01-01 00:00:00 UTC
    let base = |tenor: &str, years_to_exp: f64, forward: f64, atm_vol: f64, rr: f64, bf: f64| {
        MarketQuoteSet {
            pair: "EURUSD".to_string(),
            tenor: tenor.to_string(),
            as_of,
            spot: 1.1689,
            forward,
            years_to_exp,
            atm_vol,
            rr_25: Some(rr),
            bf_25: Some(bf),
            rr_10: None,
            bf_10: None,
            foreign_rate: Some(0.021),
        }
    };

    let mut six_month = base("6M", 0.5, 1.1745, 0.0815, -0.0022, 0.0021);
    six_month.rr_10 = Some(-0.0040);
    six_month.bf_10 = Some(0.0068);

    vec![
        base("1M", 1.0 / 12.0, 1.1695, 0.076375, -0.00045, 0.001575),
        base("3M", 0.25, 1.1718, 0.0790, -0.0012, 0.0018),
        six_month,
    ]
}

fn main() -> Result<()> {
    let quotes = quotes();
    let surface = build_surface("EURUSD", quotes[0].as_of, &quotes, &ConventionTable::g10())?;

    println!("Surface: {} tenors for {}", surface.tenor_count(), surface.pair());

    // Round-trip diagnostics: the surface must reproduce its own inputs
    let report = surface.round_trip_check()?;
    println!("\nRound-trip check (passed = {}):", report.passed);
    println!("tenor | ATM err | RR25 err | BF25 err");
    for t in &report.tenors {
        println!(
            "{:>5} | {:.2e} | {:>8} | {:>8}",
            t.tenor,
            t.atm_error,
            t.rr_25_error.map_or("-".to_string(), |e| format!("{:.2e}", e)),
            t.bf_25_error.map_or("-".to_string(), |e| format!("{:.2e}", e)),
        );
    }

    // Query a small strike/maturity grid
    println!("\nImplied vol grid (%):");
    print!("{:>8}", "K\\T");
    for t in [0.1, 0.25, 0.4] {
        print!("{:>9.2}y", t);
    }
    println!();
    for strike in [1.12, 1.15, 1.17, 1.20, 1.23] {
        print!("{:>8.2}", strike);
        for t in [0.1, 0.25, 0.4] {
            print!("{:>10.4}", surface.volatility_at(strike, t)? * 100.0);
        }
        println!();
    }

    // Price a vanilla off the surface
    let price = surface.price_vanilla(OptionType::Call, 1.19, 0.25, 0.995)?;
    println!("\n3M 1.19 call (df 0.995): {:.6}", price);

    // Snapshot for rendering collaborators
    let snapshot = surface.describe()?;
    println!("\ndescribe():\n{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
