//! projection
//!
//! Parallelepiped modeling and central projection onto the xy-plane.
//!
//! # Model
//!
//! A parallelepiped is given by a support vector `s` and three spanning
//! vectors `a`, `b`, `c`. Its eight corners carry the labels
//! `s, a, b, c, d, e, f, g` where `d = s+a+b`, `e = s+b+c`, `f = s+a+c`,
//! and `g = s+a+b+c`.
//!
//! # Invariants
//!
//! - Every corner lies strictly inside the first octant (all coordinates
//!   positive)
//! - A projection center lies strictly inside the first octant and strictly
//!   above the solid's highest corner, so the solid sits between the center
//!   and the image plane z = 0
//! - A point already on the image plane projects to itself

pub mod scene;
pub mod svg;

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parallelepiped construction and projection.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("corner '{label}' at {point} lies outside the first octant")]
    OutsideFirstOctant { label: &'static str, point: Vec3 },

    #[error("projection center {center} must lie inside the first octant")]
    CenterOutsideFirstOctant { center: Vec3 },

    #[error(
        "projection center must sit above the solid: center z {center_z} \
         is not greater than the highest corner z {max_z}"
    )]
    CenterTooLow { center_z: f64, max_z: f64 },

    #[error("cannot project a point at the center's height z = {z}")]
    DegenerateRay { z: f64 },
}

/// A point or vector in three-dimensional space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True if every coordinate is strictly positive.
    pub fn in_first_octant(&self) -> bool {
        self.x > 0.0 && self.y > 0.0 && self.z > 0.0
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Vec3::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A projected point on the image plane z = 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

/// Corner labels in storage order.
pub const CORNER_LABELS: [&str; 8] = ["s", "a", "b", "c", "d", "e", "f", "g"];

/// The twelve edges as corner-index pairs, grouped by spanning direction.
///
/// Group order matches the spanning vectors: all edges parallel to `a`,
/// then `b`, then `c`.
pub const EDGE_GROUPS: [(&str, [(usize, usize); 4]); 3] = [
    ("a", [(0, 1), (2, 4), (3, 6), (5, 7)]),
    ("b", [(0, 2), (1, 4), (3, 5), (6, 7)]),
    ("c", [(0, 3), (1, 6), (2, 5), (4, 7)]),
];

/// The six quad faces as corner-index cycles.
pub const FACES: [(&str, [usize; 4]); 6] = [
    ("bottom", [0, 1, 4, 2]),
    ("top", [3, 6, 7, 5]),
    ("right", [1, 6, 7, 4]),
    ("left", [0, 2, 5, 3]),
    ("front", [0, 3, 6, 1]),
    ("back", [2, 4, 7, 5]),
];

/// A parallelepiped with derived corners, validated to lie in the first
/// octant.
#[derive(Debug, Clone, PartialEq)]
pub struct Parallelepiped {
    support: Vec3,
    span_a: Vec3,
    span_b: Vec3,
    span_c: Vec3,
    corners: [Vec3; 8],
}

impl Parallelepiped {
    /// Build a parallelepiped from a support vector and three spanning
    /// vectors.
    ///
    /// # Errors
    ///
    /// Returns `ProjectionError::OutsideFirstOctant` naming the first corner
    /// with a coordinate <= 0.
    pub fn new(support: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Result<Self, ProjectionError> {
        let corners = [
            support,
            support + a,
            support + b,
            support + c,
            support + a + b,
            support + b + c,
            support + a + c,
            support + a + b + c,
        ];

        for (label, corner) in CORNER_LABELS.iter().zip(corners.iter()) {
            if !corner.in_first_octant() {
                return Err(ProjectionError::OutsideFirstOctant {
                    label,
                    point: *corner,
                });
            }
        }

        Ok(Self {
            support,
            span_a: a,
            span_b: b,
            span_c: c,
            corners,
        })
    }

    /// The eight corners in label order `s, a, b, c, d, e, f, g`.
    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    /// The spanning vectors `(a, b, c)`.
    pub fn spans(&self) -> (Vec3, Vec3, Vec3) {
        (self.span_a, self.span_b, self.span_c)
    }

    /// The support vector.
    pub fn support(&self) -> Vec3 {
        self.support
    }

    /// The z coordinate of the highest corner.
    pub fn max_z(&self) -> f64 {
        self.corners
            .iter()
            .map(|p| p.z)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Project all corners through `center` onto the plane z = 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the center is invalid for this solid (outside the
    /// first octant or not above it).
    pub fn project(&self, center: Vec3) -> Result<Projection, ProjectionError> {
        validate_center(center, self)?;

        let mut points = [Point2::new(0.0, 0.0); 8];
        for (slot, corner) in points.iter_mut().zip(self.corners.iter()) {
            *slot = project_point(*corner, center)?;
        }
        Ok(Projection { points })
    }
}

/// Check that a projection center is admissible for the given solid.
///
/// The center must lie strictly inside the first octant and strictly above
/// the solid's highest corner.
pub fn validate_center(center: Vec3, solid: &Parallelepiped) -> Result<(), ProjectionError> {
    if !center.in_first_octant() {
        return Err(ProjectionError::CenterOutsideFirstOctant { center });
    }

    let max_z = solid.max_z();
    if center.z <= max_z {
        return Err(ProjectionError::CenterTooLow {
            center_z: center.z,
            max_z,
        });
    }

    Ok(())
}

/// Project one coordinate axis.
///
/// For a point coordinate `p` and the matching center coordinate `u`, the
/// image coordinate on z = 0 is `(p - u * z_p / z_u) / (1 - z_p / z_u)`.
fn project_axis(p: f64, u: f64, z_p: f64, z_u: f64) -> f64 {
    (p - u * z_p / z_u) / (1.0 - z_p / z_u)
}

/// Project a single point through `center` onto the plane z = 0.
///
/// # Errors
///
/// Returns `ProjectionError::DegenerateRay` when the point sits at the
/// center's height (the ray never meets the plane).
pub fn project_point(point: Vec3, center: Vec3) -> Result<Point2, ProjectionError> {
    if point.z == center.z {
        return Err(ProjectionError::DegenerateRay { z: point.z });
    }

    Ok(Point2::new(
        project_axis(point.x, center.x, point.z, center.z),
        project_axis(point.y, center.y, point.z, center.z),
    ))
}

/// The projected corners of a parallelepiped, in label order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub points: [Point2; 8],
}

impl Projection {
    /// Iterate corners with their labels.
    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, Point2)> + '_ {
        CORNER_LABELS.iter().copied().zip(self.points.iter().copied())
    }

    /// Bounding box of the projected figure as `(min, max)`.
    pub fn bounds(&self) -> (Point2, Point2) {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}
