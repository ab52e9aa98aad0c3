// Example: plot_smile.rs
// Loads per-tenor FX vol quotes from a CSV file, builds the surface and
// produces an SVG with one smile curve per tenor.
//
// Usage:
//     cargo run --example plot_smile -- <csv_path>
//
// Expected CSV columns:
//     pair,tenor,as_of,spot,forward,years_to_exp,atm_vol,rr_25,bf_25,rr_10,bf_10,foreign_rate
// with vols as decimal fractions and the optional columns left empty
// when not quoted. The output image is written to fx_smiles.svg.

use std::env;
use std::error::Error;

use csv::ReaderBuilder;
use fxsurface_lib::{build_surface, ConventionTable, MarketQuoteSet, SmileSection};
use plotters::prelude::*;

#[derive(serde::Deserialize)]
struct CsvRow {
    pair: String,
    tenor: String,
    as_of: i64,
    spot: f64,
    forward: f64,
    years_to_exp: f64,
    atm_vol: f64,
    rr_25: Option<f64>,
    bf_25: Option<f64>,
    rr_10: Option<f64>,
    bf_10: Option<f64>,
    foreign_rate: Option<f64>,
}

impl From<CsvRow> for MarketQuoteSet {
    fn from(r: CsvRow) -> Self {
        MarketQuoteSet {
            pair: r.pair,
            tenor: r.tenor,
            as_of: r.as_of,
            spot: r.spot,
            forward: r.forward,
            years_to_exp: r.years_to_exp,
            atm_vol: r.atm_vol,
            rr_25: r.rr_25,
            bf_25: r.bf_25,
            rr_10: r.rr_10,
            bf_10: r.bf_10,
            foreign_rate: r.foreign_rate,
        }
    }
}

fn load_csv(path: &str) -> Result<Vec<MarketQuoteSet>, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut quotes = Vec::new();
    for result in rdr.deserialize() {
        let row: CsvRow = result?;
        quotes.push(row.into());
    }
    Ok(quotes)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <csv_file>", args[0]);
        std::process::exit(1);
    }

    let quotes = load_csv(&args[1])?;
    if quotes.is_empty() {
        return Err("no quote rows in CSV".into());
    }
    let pair = quotes[0].pair.clone();
    let as_of = quotes[0].as_of;

    let surface = build_surface(&pair, as_of, &quotes, &ConventionTable::g10())?;
    let report = surface.round_trip_check()?;
    println!(
        "Built {} tenors for {} (round-trip passed = {})",
        surface.tenor_count(),
        pair,
        report.passed
    );

    // Strike range: widest anchor span across tenors, padded a little
    let snapshot = surface.describe()?;
    let mut min_strike = f64::INFINITY;
    let mut max_strike = f64::NEG_INFINITY;
    for tenor in &snapshot.tenors {
        min_strike = min_strike.min(tenor.forward);
        max_strike = max_strike.max(tenor.forward);
        for a in &tenor.anchors {
            min_strike = min_strike.min(a.strike);
            max_strike = max_strike.max(a.strike);
        }
    }
    let span = max_strike - min_strike;
    let k_lo = min_strike - 0.15 * span;
    let k_hi = max_strike + 0.15 * span;

    // Sample each tenor's smile
    let steps = 200;
    let mut curves: Vec<(String, Vec<(f64, f64)>)> = Vec::new();
    let mut min_vol = f64::INFINITY;
    let mut max_vol = f64::NEG_INFINITY;
    for smile in surface.smiles() {
        let mut line = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            let strike = k_lo + (k_hi - k_lo) * (i as f64) / (steps as f64);
            let vol_pct = smile.vol_at_strike(strike) * 100.0;
            min_vol = min_vol.min(vol_pct);
            max_vol = max_vol.max(vol_pct);
            line.push((strike, vol_pct));
        }
        curves.push((smile.tenor().to_string(), line));
    }

    let pad = (max_vol - min_vol).max(0.1) * 0.1;
    let y_lo = (min_vol - pad).max(0.0);
    let y_hi = max_vol + pad;

    let root = SVGBackend::new("fx_smiles.svg", (1280, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            format!("{} Vanna-Volga smiles", pair),
            ("sans-serif", 30),
        )
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(k_lo..k_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Strike")
        .y_desc("Implied Vol (%)")
        .draw()?;

    let palette = [RED, BLUE, GREEN, MAGENTA, CYAN, BLACK];
    for (i, (tenor, line)) in curves.iter().enumerate() {
        let color = palette[i % palette.len()];
        chart
            .draw_series(vec![PathElement::new(line.clone(), color)])?
            .label(tenor.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    // Mark the quoted anchors
    for tenor in &snapshot.tenors {
        chart.draw_series(
            tenor
                .anchors
                .iter()
                .map(|a| Circle::new((a.strike, a.vol * 100.0), 3, BLACK.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    println!("Chart saved to fx_smiles.svg");
    Ok(())
}
