//! SVG export serializer.
//!
//! Converts polylines into an SVG string with `<path>` elements using
//! the [`svg`] crate for document construction, XML escaping, and path
//! data formatting.
//!
//! Each polyline becomes a separate `<path>` element using `M` (move to)
//! and `L` (line to) commands; a closed polyline's repeated first/last
//! point comes through as a trailing `L` back to the start, matching the
//! driver contract (no `Z` shorthand).
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::{Description, Path, Title};
use svg::node::{Text, Value};

use lineweld_core::Polyline;

/// Optional accessibility metadata embedded in the exported document.
///
/// Both fields are optional. When present, a `<title>` and/or `<desc>`
/// element is emitted immediately after the opening `<svg>` tag. Text
/// values are XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgMetadata<'a> {
    /// Document title -- emitted as `<title>`.
    pub title: Option<&'a str>,
    /// Document description -- emitted as `<desc>`.
    pub description: Option<&'a str>,
}

/// Stroke appearance for exported paths.
#[derive(Debug, Clone)]
pub struct StrokeStyle {
    /// CSS color value for `stroke` (e.g. `"black"`, `"#ff0000"`).
    pub color: String,
    /// Stroke width in the document's user units.
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            width: 1.0,
        }
    }
}

/// Build an SVG path `d` attribute string from a polyline.
///
/// Uses `M` for the first point and `L` for subsequent points, including
/// a closed polyline's repeated seam point. Returns an empty string for
/// polylines with fewer than 2 points.
///
/// # Examples
///
/// ```
/// use lineweld_core::{Point, Polyline};
/// use lineweld_svg::build_path_data;
///
/// let polyline = Polyline::new(vec![
///     Point::new(10.0, 20.0),
///     Point::new(30.0, 40.0),
/// ]);
/// let d = build_path_data(&polyline);
/// assert_eq!(d, "M10,20 L30,40");
/// ```
#[must_use]
pub fn build_path_data(polyline: &Polyline) -> String {
    let points = polyline.points();
    if points.len() < 2 {
        return String::new();
    }

    let first = &points[0];
    let mut data = svg::node::element::path::Data::new().move_to((first.x, first.y));
    for p in &points[1..] {
        data = data.line_to((p.x, p.y));
    }
    String::from(Value::from(data))
}

/// Serialize polylines into an SVG document string, passed through in
/// whatever user units the caller's coordinates are already in (no
/// implicit unit conversion -- that is the driver's job, per the core's
/// sans-IO contract).
///
/// Each [`Polyline`] with 2 or more points becomes a `<path
/// fill="none">` element with the given [`StrokeStyle`]. Polylines with
/// fewer than 2 points are skipped. If `width`/`height` are `Some`, an
/// explicit `viewBox="0 0 width height"` and matching `width`/`height`
/// attributes are emitted; otherwise the document has no explicit
/// dimensions and consumers infer them from path extents.
///
/// # Examples
///
/// ```
/// use lineweld_core::{Point, Polyline};
/// use lineweld_svg::{SvgMetadata, StrokeStyle, to_svg};
///
/// let polylines = vec![
///     Polyline::new(vec![Point::new(10.0, 15.0), Point::new(12.5, 18.3)]),
/// ];
/// let svg = to_svg(&polylines, &SvgMetadata::default(), &StrokeStyle::default(), None);
/// assert!(svg.contains("M10,15 L12.5,18.3"));
/// ```
#[must_use]
pub fn to_svg(
    polylines: &[Polyline],
    metadata: &SvgMetadata<'_>,
    stroke: &StrokeStyle,
    dimensions: Option<(f64, f64)>,
) -> String {
    let mut doc = Document::new();
    if let Some((w, h)) = dimensions {
        doc = doc
            .set("width", w)
            .set("height", h)
            .set("viewBox", format!("0 0 {w} {h}"));
    }

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    for polyline in polylines {
        let d = build_path_data(polyline);
        if d.is_empty() {
            continue;
        }
        let path = Path::new()
            .set("d", d)
            .set("fill", "none")
            .set("stroke", stroke.color.as_str())
            .set("stroke-width", stroke.width);
        doc = doc.add(path);
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}
