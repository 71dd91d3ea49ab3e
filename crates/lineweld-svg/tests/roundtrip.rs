//! Integration test: read a dashed-outline SVG, consolidate it, and
//! export the result, exercising `lineweld-svg` and `lineweld-core`
//! together end to end.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use lineweld_core::{ConsolidationConfig, consolidate};
use lineweld_svg::{SvgMetadata, StrokeStyle, parse_svg, to_svg};

const DASHED_RECTANGLE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
    <path d="M 0,0 L 10,0" />
    <path d="M 10,0.05 L 10,10" />
    <path d="M 9.95,10 L 0,10" />
    <path d="M 0,9.95 L 0.05,0" />
</svg>"#;

#[test]
fn dashed_rectangle_outline_consolidates_to_one_closed_path() {
    let (polylines, skipped) = parse_svg(DASHED_RECTANGLE_SVG).expect("well-formed document");
    assert!(skipped.is_empty());
    assert_eq!(polylines.len(), 4);

    let config = ConsolidationConfig {
        d_tol: 1.0,
        a_tol: 10.0,
        simplify_tol: 0.1,
        offset_tol: None,
    };
    let (consolidated, report) = consolidate(polylines, &config).expect("valid config");
    assert_eq!(report.input_count, 4);
    assert_eq!(consolidated.len(), 1);
    assert!(consolidated[0].is_closed());
    assert_eq!(consolidated[0].len(), 5);

    let svg = to_svg(
        &consolidated,
        &SvgMetadata::default(),
        &StrokeStyle::default(),
        None,
    );
    assert!(svg.contains("<path"));
    assert_eq!(svg.matches("<path").count(), 1);
    assert!(svg.contains("</svg>") || svg.trim_end().ends_with("/>"));
}

#[test]
fn curve_commands_are_skipped_but_straight_lines_still_round_trip() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
        <path d="M 0,0 L 10,0 C 20,0 20,10 30,10 L 40,10" />
    </svg>"#;
    let (polylines, skipped) = parse_svg(svg).expect("well-formed document");
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].command, "curveto");
    assert_eq!(polylines.len(), 1);

    let (consolidated, _) =
        consolidate(polylines, &ConsolidationConfig::default()).expect("valid config");
    let out = to_svg(
        &consolidated,
        &SvgMetadata::default(),
        &StrokeStyle::default(),
        None,
    );
    assert!(out.contains("M0,0 L10,0"));
}
