//! Polyline consolidation for raster-to-vector cleanup.
//!
//! Joins collinear, spatially-close open polylines into longer strokes
//! and promotes near-closed outlines to closed ones. Sans-IO: this crate
//! consumes and produces in-memory polyline lists. SVG parsing and
//! writing live in `lineweld-svg`.

mod closure;
mod geometry;
mod index;
mod merge;
mod orchestrator;
mod simplify;
mod types;

#[cfg(test)]
mod proptests;

pub use geometry::{APPROX_TOL, angle_between, approx_eq, collinear, offset, path_length};
pub use orchestrator::{ConsolidationReport, consolidate};
pub use simplify::{simplify, simplify_paths};
pub use types::{ConsolidationConfig, ConsolidationError, Point, Polyline};
