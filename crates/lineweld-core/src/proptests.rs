//! Property tests over randomly generated polyline soups.
//!
//! Checks the quantified invariants: polyline count never increases,
//! every output vertex traces back to an input vertex, and the pipeline
//! reaches a fixed point after one run to quiescence.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use crate::{ConsolidationConfig, Point, Polyline, approx_eq, consolidate};

fn arb_point() -> impl Strategy<Value = Point> {
    (-50i32..50, -50i32..50).prop_map(|(x, y)| Point::new(f64::from(x), f64::from(y)))
}

fn arb_open_polyline() -> impl Strategy<Value = Polyline> {
    proptest::collection::vec(arb_point(), 2..6).prop_filter_map(
        "need at least two consecutively distinct points",
        |points| {
            let mut deduped: Vec<Point> = Vec::new();
            for p in points {
                if deduped.last().is_none_or(|&last| last != p) {
                    deduped.push(p);
                }
            }
            (deduped.len() >= 2).then(|| Polyline::new(deduped))
        },
    )
}

fn arb_polyline_soup() -> impl Strategy<Value = Vec<Polyline>> {
    proptest::collection::vec(arb_open_polyline(), 0..6)
}

fn total_points(polylines: &[Polyline]) -> usize {
    polylines.iter().map(Polyline::len).sum()
}

fn vertex_multiset(polylines: &[Polyline]) -> Vec<Point> {
    polylines.iter().flat_map(Polyline::points).copied().collect()
}

proptest! {
    #[test]
    fn polyline_count_never_increases(polylines in arb_polyline_soup()) {
        let config = ConsolidationConfig::default();
        let input_count = polylines.len();
        let (output, report) = consolidate(polylines, &config).expect("default config is valid");
        prop_assert!(output.len() <= input_count);
        prop_assert_eq!(report.output_count, output.len());
        prop_assert!(report.after_merge_count <= report.input_count);
    }

    #[test]
    fn every_output_vertex_traces_back_to_an_input_vertex(polylines in arb_polyline_soup()) {
        let config = ConsolidationConfig::default();
        let input_vertices = vertex_multiset(&polylines);
        let (output, _) = consolidate(polylines, &config).expect("default config is valid");
        for vertex in vertex_multiset(&output) {
            prop_assert!(
                input_vertices.iter().any(|&v| approx_eq(v, vertex)),
                "output vertex {:?} has no matching input vertex",
                vertex
            );
        }
    }

    #[test]
    fn quiesced_output_is_a_fixed_point(polylines in arb_polyline_soup()) {
        let config = ConsolidationConfig::default();
        let (once, _) = consolidate(polylines, &config).expect("default config is valid");
        let (twice, _) = consolidate(once.clone(), &config).expect("default config is valid");
        prop_assert_eq!(once.len(), twice.len());
        prop_assert_eq!(total_points(&once), total_points(&twice));
    }
}

#[test]
fn closed_polyline_with_zero_tolerance_passes_through_unchanged() {
    let config = ConsolidationConfig {
        simplify_tol: 0.0,
        ..ConsolidationConfig::default()
    };
    let closed = Polyline::new(vec![
        Point::new(1.0, 1.0),
        Point::new(11.0, 3.0),
        Point::new(7.0, 13.0),
        Point::new(1.0, 1.0),
    ]);
    let (output, _) = consolidate(vec![closed.clone()], &config).expect("valid config");
    assert_eq!(output.len(), 1);
    assert_eq!(output[0], closed);
}
