//! lineweld: CLI driver that consolidates a raster-to-vector SVG trace.
//!
//! Reads an SVG file's `<path>` elements as polylines, runs the
//! `lineweld-core` consolidation pipeline (simplify, merge collinear
//! endpoints, close near-closed outlines, simplify again), and writes
//! the result back out as SVG.
//!
//! # Usage
//!
//! ```text
//! lineweld input.svg output.svg --d-tol 50 --a-tol 15
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lineweld_core::ConsolidationConfig;
use lineweld_svg::{SvgMetadata, StrokeStyle, parse_svg, to_svg};

/// Consolidate a fragmented raster-to-vector SVG trace into clean, joined paths.
#[derive(Parser)]
#[command(name = "lineweld", version)]
struct Cli {
    /// Path to the input SVG file.
    input: PathBuf,

    /// Path to write the consolidated SVG file.
    output: PathBuf,

    /// Maximum endpoint distance for merging two polylines.
    #[arg(long, default_value_t = ConsolidationConfig::default().d_tol)]
    d_tol: f64,

    /// Maximum tangent angle difference, in degrees, for collinearity.
    #[arg(long, default_value_t = ConsolidationConfig::default().a_tol)]
    a_tol: f64,

    /// Douglas-Peucker simplification tolerance applied before and after merging.
    #[arg(long, default_value_t = ConsolidationConfig::default().simplify_tol)]
    simplify_tol: f64,

    /// Maximum perpendicular separation for two parallel segments to be
    /// considered the same line. Defaults to `d_tol / 2`.
    #[arg(long)]
    offset_tol: Option<f64>,

    /// Stroke color for exported paths.
    #[arg(long, default_value_t = StrokeStyle::default().color)]
    stroke_color: String,

    /// Stroke width for exported paths.
    #[arg(long, default_value_t = StrokeStyle::default().width)]
    stroke_width: f64,

    /// Emit a `<title>` element with this text.
    #[arg(long)]
    title: Option<String>,

    /// Print the consolidation report as JSON to stdout instead of a
    /// human-readable summary to stderr.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = ConsolidationConfig {
        d_tol: cli.d_tol,
        a_tol: cli.a_tol,
        simplify_tol: cli.simplify_tol,
        offset_tol: cli.offset_tol,
    };

    if let Err(e) = config.validate() {
        eprintln!("Error: invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let svg_text = match std::fs::read_to_string(&cli.input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };

    let (polylines, skipped) = match parse_svg(&svg_text) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error parsing {}: {e}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };

    for skip in &skipped {
        eprintln!(
            "Warning: path {} contains an unsupported `{}` command; that subpath was truncated",
            skip.path_index, skip.command,
        );
    }

    let (consolidated, report) = match lineweld_core::consolidate(polylines, &config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let metadata = SvgMetadata {
        title: cli.title.as_deref(),
        description: None,
    };
    let stroke = StrokeStyle {
        color: cli.stroke_color,
        width: cli.stroke_width,
    };
    let svg_out = to_svg(&consolidated, &metadata, &stroke, None);

    if let Err(e) = std::fs::write(&cli.output, &svg_out) {
        eprintln!("Error writing {}: {e}", cli.output.display());
        return ExitCode::FAILURE;
    }

    if cli.json {
        match serde_json::to_string_pretty(&JsonReport::from(report)) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        eprintln!(
            "{} polylines -> {} after merge -> {} final ({} written to {})",
            report.input_count,
            report.after_merge_count,
            report.output_count,
            cli.output.display(),
            svg_out.len(),
        );
    }

    ExitCode::SUCCESS
}

/// Serializable mirror of [`lineweld_core::ConsolidationReport`].
///
/// `ConsolidationReport` itself carries no `serde` dependency (it lives
/// in the sans-IO core crate); this thin wrapper is the only place that
/// needs one.
#[derive(serde::Serialize)]
struct JsonReport {
    input_count: usize,
    after_merge_count: usize,
    output_count: usize,
}

impl From<lineweld_core::ConsolidationReport> for JsonReport {
    fn from(report: lineweld_core::ConsolidationReport) -> Self {
        Self {
            input_count: report.input_count,
            after_merge_count: report.after_merge_count,
            output_count: report.output_count,
        }
    }
}
