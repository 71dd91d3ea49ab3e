//! SVG to polyline parsing.
//!
//! Walks `<path>` elements with `quick_xml`, then decomposes each `d`
//! attribute with `svgtypes::PathParser`. Only straight-line commands
//! (`M`/`L`/`H`/`V`/`Z`) are understood: curves and arcs terminate the
//! current polyline rather than failing the whole document, per the
//! driver contract that non-line commands are subpath boundaries.
//!
//! Ported from `original_source/cleanup.py`'s `svg_lines_to_segments`.

use quick_xml::Reader;
use quick_xml::events::Event;
use svgtypes::{PathParser, PathSegment};

use lineweld_core::{Point, Polyline};

/// Failures that abort parsing entirely. Unsupported path commands are
/// not among these: they terminate the current polyline in place and
/// parsing continues.
#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    /// The document is not well-formed XML.
    #[error("malformed SVG XML: {0}")]
    Xml(String),
    /// A `d` attribute's path data could not be tokenized.
    #[error("malformed path data: {0}")]
    PathSyntax(String),
}

/// A path command this driver does not understand, recorded for
/// diagnostics rather than treated as fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSegment {
    /// Index, within the document, of the `<path>` element the segment
    /// was found in.
    pub path_index: usize,
    /// Short name of the unsupported command (e.g. `"curveto"`).
    pub command: &'static str,
}

/// Accumulates points for one polyline as path commands are processed,
/// tracking enough state to resolve relative commands and `H`/`V`
/// shorthand against the last absolute point.
#[derive(Debug, Default)]
struct CurrentLine {
    points: Vec<Point>,
}

impl CurrentLine {
    fn push_absolute(&mut self, point: Point) {
        self.points.push(point);
    }

    fn push(&mut self, abs: bool, dx_or_x: f64, dy_or_y: f64) {
        if abs {
            self.push_absolute(Point::new(dx_or_x, dy_or_y));
        } else if let Some(&last) = self.points.last() {
            self.push_absolute(Point::new(last.x + dx_or_x, last.y + dy_or_y));
        } else {
            self.push_absolute(Point::new(dx_or_x, dy_or_y));
        }
    }

    fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    fn is_valid(&self) -> bool {
        self.points.len() > 1
    }

    fn close(&mut self) {
        if let Some(&first) = self.points.first() {
            self.points.push(first);
        }
    }

    fn finish(&mut self) -> Vec<Point> {
        std::mem::take(&mut self.points)
    }
}

/// Extract every `d` attribute value from `<path>` elements in document
/// order.
fn extract_path_data(svg: &str) -> Result<Vec<String>, SvgError> {
    let mut reader = Reader::from_str(svg);

    let mut paths = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) if e.local_name().as_ref() == b"path" => {
                for attr in e.attributes().filter_map(Result::ok) {
                    if attr.key.local_name().as_ref() == b"d" {
                        let value = attr
                            .unescape_value()
                            .map_err(|e| SvgError::Xml(e.to_string()))?;
                        paths.push(value.into_owned());
                        break;
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(SvgError::Xml(e.to_string())),
        }
    }
    Ok(paths)
}

/// Decompose one `d` attribute into zero or more straight-line
/// polylines, recording any unsupported commands encountered.
fn parse_path_data(
    expr: &str,
    path_index: usize,
    skipped: &mut Vec<SkippedSegment>,
) -> Result<Vec<Polyline>, SvgError> {
    let mut lines = Vec::new();
    let mut current = CurrentLine::default();

    for segment in PathParser::from(expr) {
        let segment = segment.map_err(|e| SvgError::PathSyntax(e.to_string()))?;
        match segment {
            PathSegment::MoveTo { abs, x, y } => {
                if current.is_valid() {
                    lines.push(current.finish());
                } else {
                    current.finish();
                }
                current.push(abs, x, y);
            }
            PathSegment::LineTo { abs, x, y } => current.push(abs, x, y),
            PathSegment::HorizontalLineTo { abs, x } => {
                let Some(last) = current.last() else {
                    continue;
                };
                if abs {
                    current.push_absolute(Point::new(x, last.y));
                } else {
                    current.push_absolute(Point::new(last.x + x, last.y));
                }
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let Some(last) = current.last() else {
                    continue;
                };
                if abs {
                    current.push_absolute(Point::new(last.x, y));
                } else {
                    current.push_absolute(Point::new(last.x, last.y + y));
                }
            }
            PathSegment::ClosePath { .. } => current.close(),
            other => {
                skipped.push(SkippedSegment {
                    path_index,
                    command: segment_name(&other),
                });
                if current.is_valid() {
                    lines.push(current.finish());
                } else {
                    current.finish();
                }
            }
        }
    }

    if current.is_valid() {
        lines.push(current.finish());
    }

    Ok(lines.into_iter().map(Polyline::new).collect())
}

const fn segment_name(segment: &PathSegment) -> &'static str {
    match segment {
        PathSegment::CurveTo { .. } => "curveto",
        PathSegment::SmoothCurveTo { .. } => "smooth curveto",
        PathSegment::Quadratic { .. } => "quadratic curveto",
        PathSegment::SmoothQuadratic { .. } => "smooth quadratic curveto",
        PathSegment::EllipticalArc { .. } => "elliptical arc",
        PathSegment::MoveTo { .. }
        | PathSegment::LineTo { .. }
        | PathSegment::HorizontalLineTo { .. }
        | PathSegment::VerticalLineTo { .. }
        | PathSegment::ClosePath { .. } => "line",
    }
}

/// Parse an SVG document into the polylines traced by its `<path>`
/// elements, plus any unsupported commands skipped along the way.
///
/// # Errors
///
/// Returns [`SvgError`] if the document is not well-formed XML or a `d`
/// attribute's path data cannot be tokenized.
pub fn parse_svg(svg: &str) -> Result<(Vec<Polyline>, Vec<SkippedSegment>), SvgError> {
    let path_data = extract_path_data(svg)?;
    let mut polylines = Vec::new();
    let mut skipped = Vec::new();
    for (path_index, expr) in path_data.iter().enumerate() {
        polylines.extend(parse_path_data(expr, path_index, &mut skipped)?);
    }
    Ok((polylines, skipped))
}
