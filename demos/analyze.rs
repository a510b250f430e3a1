//! Density analyzer command line example
//!
//! Loads one or more charts, prints their warnings with ariadne and their density statistics.
//! Pass several charts to see averages grouped by `#PLAYLEVEL`.
//!
//! ```sh
//! RUST_LOG=pms_density=debug cargo run --example analyze -- tests/files/sample.pms
//! ```

use std::{collections::BTreeMap, path::PathBuf};

use clap::Parser;
use pms_density::{
    bms::prelude::*,
    density::{DensityResult, analyze},
    summary::{aggregate_by_difficulty, difficulty_sort_key},
};
use rand::{SeedableRng, rngs::StdRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "analyze")]
#[command(about = "Note density analyzer for BMS/PMS charts")]
struct Args {
    /// Chart files to analyze
    #[arg(required = true)]
    charts: Vec<PathBuf>,

    /// Overrides `#TOTAL` of every chart
    #[arg(long)]
    total: Option<f64>,

    /// Resolves `#RANDOM` with a seeded generator instead of taking the first branch
    #[arg(long)]
    seed: Option<u64>,

    /// Prints the full results as JSON
    #[arg(long)]
    json: bool,
}

fn parse_with(args: &Args, text: &str) -> ChartOutput {
    match args.seed {
        Some(seed) => parse_chart(
            text,
            default_config().rng(RandRng(StdRng::seed_from_u64(seed))),
        ),
        None => parse_chart(text, default_config()),
    }
}

fn print_result(chart: &Chart, result: &DensityResult) {
    println!("== {} [{}]", chart.metadata.title, chart.metadata.level);
    println!(
        "   notes: {}, length: {:.2}s, bpm: {}-{}",
        chart.notes.len(),
        chart.total_seconds,
        chart.metadata.bpm.min,
        chart.metadata.bpm.max
    );
    println!(
        "   max: {:.0}, average: {:.2}, rms: {:.2}, cms: {:.2}, chm: {:.2}",
        result.max_density,
        result.average_density,
        result.rms_density,
        result.cms_density,
        result.chm_density
    );
    println!(
        "   change: {:.3}, occupancy: {:.1}%, gustiness: {:.2}, overall: {:.2}",
        result.density_change,
        result.high_density_occupancy_rate,
        result.gustiness,
        result.overall_difficulty
    );
    match result.terminal_window {
        Some(window) => println!(
            "   terminal: {:.2}s at {:.2}/s, difficulty: {:.2} (cms {:.2}, chm {:.2})",
            window,
            result.terminal_density,
            result.terminal_difficulty,
            result.terminal_difficulty_cms,
            result.terminal_difficulty_chm
        ),
        None => println!("   terminal: not computed without #TOTAL"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut grouped: BTreeMap<String, Vec<DensityResult>> = BTreeMap::new();

    for path in &args.charts {
        let source = match read_chart_source(path) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        let name = path.display().to_string();
        let output = parse_with(&args, &source.text);
        emit_chart_warnings(&name, &source.text, &output.warnings);

        let mut chart = output.chart.compile();
        if chart.metadata.title.is_empty() {
            chart.metadata.title = name.clone();
        }
        let result = analyze(&chart.notes, args.total.or(chart.metadata.total));
        if args.json {
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("{name}: {err}"),
            }
        } else {
            print_result(&chart, &result);
        }
        grouped
            .entry(chart.metadata.level.clone())
            .or_default()
            .push(result);
    }

    if args.charts.len() > 1 {
        let summary = aggregate_by_difficulty(&grouped);
        let mut levels: Vec<_> = summary.into_iter().collect();
        levels.sort_by_key(|(level, _)| difficulty_sort_key(level));
        println!("== by level");
        for (level, summary) in levels {
            println!(
                "   {level:>6}: max {:.2}, average {:.2}, terminal {:.2}, rms {:.2}",
                summary.max_density,
                summary.average_density,
                summary.terminal_density,
                summary.rms_density
            );
        }
    }
}
