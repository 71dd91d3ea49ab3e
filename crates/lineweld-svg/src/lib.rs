//! lineweld-svg: SVG reading and writing for `lineweld` (sans-IO).
//!
//! Translates between SVG `<path>` elements and the polyline lists
//! consumed and produced by `lineweld-core`. Parsing and writing are
//! both pure functions over strings; neither module touches the
//! filesystem.

pub mod read;
pub mod svg;

pub use read::{SkippedSegment, SvgError, parse_svg};
pub use svg::{SvgMetadata, StrokeStyle, build_path_data, to_svg};
