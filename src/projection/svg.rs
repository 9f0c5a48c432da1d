//! projection::svg
//!
//! SVG rendering of a projected parallelepiped.
//!
//! # Drawing conventions
//!
//! Faces are filled translucently (the figure stays readable where faces
//! overlap) and the twelve edges are color-coded by spanning direction:
//! edges parallel to `a` are green, to `b` red, to `c` blue.

use std::fmt::Write as _;

use super::{Point2, Projection, EDGE_GROUPS, FACES};

/// Face fill colors in `FACES` order.
const FACE_FILLS: [&str; 6] = [
    "#00ffff", // bottom
    "#ff00ff", // top
    "#ffff00", // right
    "#ff0000", // left
    "#008000", // front
    "#0000ff", // back
];

/// Edge stroke colors in `EDGE_GROUPS` order (a, b, c).
const EDGE_STROKES: [&str; 3] = ["#008000", "#ff0000", "#0000ff"];

/// Rendering options.
#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Margin around the figure in pixels
    pub margin: f64,
    /// Draw corner labels next to the projected points
    pub corner_labels: bool,
    /// Figure title, drawn in the top-left corner
    pub title: Option<String>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            margin: 32.0,
            corner_labels: true,
            title: None,
        }
    }
}

/// Mapping from figure coordinates to canvas coordinates.
///
/// Uniform scale, centered, with the y axis flipped (SVG y grows downward).
struct Viewport {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    height: f64,
    min: Point2,
}

impl Viewport {
    fn fit(projection: &Projection, options: &SvgOptions) -> Self {
        let (min, max) = projection.bounds();
        let span_x = max.x - min.x;
        let span_y = max.y - min.y;

        let usable_w = f64::from(options.width) - 2.0 * options.margin;
        let usable_h = f64::from(options.height) - 2.0 * options.margin;

        // A flat extent (all points collinear along an axis) falls back to
        // the other axis' scale; a single point renders at scale 1.
        let scale_x = if span_x > 0.0 {
            Some(usable_w / span_x)
        } else {
            None
        };
        let scale_y = if span_y > 0.0 {
            Some(usable_h / span_y)
        } else {
            None
        };
        let scale = match (scale_x, scale_y) {
            (Some(sx), Some(sy)) => sx.min(sy),
            (Some(sx), None) => sx,
            (None, Some(sy)) => sy,
            (None, None) => 1.0,
        };

        let offset_x = (f64::from(options.width) - span_x * scale) / 2.0;
        let offset_y = (f64::from(options.height) - span_y * scale) / 2.0;

        Self {
            scale,
            offset_x,
            offset_y,
            height: f64::from(options.height),
            min,
        }
    }

    fn map(&self, p: Point2) -> (f64, f64) {
        let x = self.offset_x + (p.x - self.min.x) * self.scale;
        let y = self.height - (self.offset_y + (p.y - self.min.y) * self.scale);
        (x, y)
    }
}

/// Render a projection as a standalone SVG document.
pub fn render(projection: &Projection, options: &SvgOptions) -> String {
    let viewport = Viewport::fit(projection, options);
    let mapped: Vec<(f64, f64)> = projection.points.iter().map(|&p| viewport.map(p)).collect();

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = options.width,
        h = options.height,
    );
    let _ = writeln!(
        out,
        r##"  <rect width="100%" height="100%" fill="#f8f8f8"/>"##
    );

    for ((_, face), fill) in FACES.iter().zip(FACE_FILLS) {
        let points: Vec<String> = face
            .iter()
            .map(|&idx| {
                let (x, y) = mapped[idx];
                format!("{:.2},{:.2}", x, y)
            })
            .collect();
        let _ = writeln!(
            out,
            r##"  <polygon points="{}" fill="{}" fill-opacity="0.1" stroke="#000000" stroke-width="0.5"/>"##,
            points.join(" "),
            fill,
        );
    }

    for ((_, edges), stroke) in EDGE_GROUPS.iter().zip(EDGE_STROKES) {
        for &(from, to) in edges {
            let (x1, y1) = mapped[from];
            let (x2, y2) = mapped[to];
            let _ = writeln!(
                out,
                r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1.5"/>"#,
                x1, y1, x2, y2, stroke,
            );
        }
    }

    if options.corner_labels {
        for (label, point) in projection.labeled() {
            let (x, y) = viewport.map(point);
            let _ = writeln!(
                out,
                r##"  <text x="{:.2}" y="{:.2}" font-family="monospace" font-size="12" fill="#333333">{}</text>"##,
                x + 4.0,
                y - 4.0,
                label,
            );
        }
    }

    if let Some(title) = &options.title {
        let _ = writeln!(
            out,
            r##"  <text x="12" y="20" font-family="monospace" font-size="14" fill="#000000">{}</text>"##,
            title,
        );
    }

    out.push_str("</svg>\n");
    out
}
