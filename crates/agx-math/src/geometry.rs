//! Minimal 2D geometry on the chromaticity plane.
//!
//! Working space derivation only needs a handful of operations: rotating and
//! scaling points about an origin, and intersecting a ray cast from the
//! whitepoint with the edges of a gamut triangle. This module provides just
//! those, on top of [`glam::DVec2`].
//!
//! # Usage
//!
//! ```rust
//! use agx_math::{Point2, Ray2, Triangle};
//!
//! let gamut = Triangle::new([
//!     Point2::new(0.64, 0.33),
//!     Point2::new(0.30, 0.60),
//!     Point2::new(0.15, 0.06),
//! ]);
//! let white = Point2::new(0.3127, 0.3290);
//!
//! // Straight up from the whitepoint hits the red-green edge.
//! let hit = gamut.intersect_ray(&Ray2::new(white, (0.0, 1.0))).unwrap();
//! assert_eq!(hit.edge, 0);
//! ```

use glam::DVec2;
use std::fmt;

/// Edge parameters this close to an end are snapped onto the vertex.
const VERTEX_SNAP: f64 = 1e-9;

/// Ray/edge pairs whose direction cross product is below this are parallel.
const PARALLEL_EPSILON: f64 = 1e-15;

/// A point (or offset) on the chromaticity plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    /// x chromaticity coordinate
    pub x: f64,
    /// y chromaticity coordinate
    pub y: f64,
}

impl Point2 {
    /// Creates a point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates from an `[x, y]` array.
    #[inline]
    pub const fn from_array(a: [f64; 2]) -> Self {
        Self::new(a[0], a[1])
    }

    /// Converts to an `[x, y]` array.
    #[inline]
    pub const fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Converts to a glam vector.
    #[inline]
    pub fn to_glam(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Creates from a glam vector.
    #[inline]
    pub fn from_glam(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.to_glam().distance(other.to_glam())
    }

    /// True if both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rotates the point about `origin` by `degrees`, counter-clockwise.
    ///
    /// A zero angle returns the point unchanged, bit for bit.
    ///
    /// ```rust
    /// use agx_math::Point2;
    ///
    /// let p = Point2::new(1.0, 0.0).rotate_about(Point2::new(0.0, 0.0), 90.0);
    /// assert!((p.x - 0.0).abs() < 1e-12);
    /// assert!((p.y - 1.0).abs() < 1e-12);
    /// ```
    pub fn rotate_about(self, origin: Self, degrees: f64) -> Self {
        if degrees == 0.0 {
            return self;
        }
        let offset = self.to_glam() - origin.to_glam();
        let rotated = DVec2::from_angle(degrees.to_radians()).rotate(offset);
        Self::from_glam(origin.to_glam() + rotated)
    }

    /// Scales the point about `origin` by `factor`.
    ///
    /// A factor of exactly 1 returns the point unchanged, bit for bit.
    /// Factors below 1 pull the point toward `origin`, factors above 1 push
    /// it away, negative factors mirror it through `origin`.
    pub fn scale_about(self, origin: Self, factor: f64) -> Self {
        if factor == 1.0 {
            return self;
        }
        let offset = self.to_glam() - origin.to_glam();
        Self::from_glam(origin.to_glam() + offset * factor)
    }
}

impl From<(f64, f64)> for Point2 {
    #[inline]
    fn from(p: (f64, f64)) -> Self {
        Self::new(p.0, p.1)
    }
}

impl From<[f64; 2]> for Point2 {
    #[inline]
    fn from(a: [f64; 2]) -> Self {
        Self::from_array(a)
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

/// A half line starting at `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2 {
    /// Start of the ray
    pub origin: Point2,
    /// Direction, not necessarily normalized
    pub direction: DVec2,
}

impl Ray2 {
    /// Creates a ray from an origin and a direction.
    pub fn new(origin: Point2, direction: impl Into<Point2>) -> Self {
        Self {
            origin,
            direction: direction.into().to_glam(),
        }
    }

    /// Creates a ray starting at `origin` and passing through `through`.
    pub fn through(origin: Point2, through: Point2) -> Self {
        Self {
            origin,
            direction: through.to_glam() - origin.to_glam(),
        }
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    pub fn at(&self, t: f64) -> Point2 {
        Point2::from_glam(self.origin.to_glam() + self.direction * t)
    }

    /// True if the direction has zero length or is not finite.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !self.direction.is_finite() || self.direction.length_squared() == 0.0
    }
}

/// A closed line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    /// First end point
    pub a: Point2,
    /// Second end point
    pub b: Point2,
}

impl Segment2 {
    /// Creates a segment.
    #[inline]
    pub const fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    /// Intersects a ray with this segment.
    ///
    /// Returns the ray parameter `t` (> 0) and the edge parameter `u` in
    /// [0, 1]. Parallel and collinear configurations return `None`.
    pub fn intersect_ray(&self, ray: &Ray2) -> Option<(f64, f64)> {
        let edge = self.b.to_glam() - self.a.to_glam();
        let denom = ray.direction.perp_dot(edge);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let to_edge = self.a.to_glam() - ray.origin.to_glam();
        let t = to_edge.perp_dot(edge) / denom;
        let u = to_edge.perp_dot(ray.direction) / denom;

        if t <= 0.0 || u < -VERTEX_SNAP || u > 1.0 + VERTEX_SNAP {
            return None;
        }
        Some((t, u.clamp(0.0, 1.0)))
    }

    /// Point at edge parameter `u`, snapped onto the end points.
    pub fn point_at(&self, u: f64) -> Point2 {
        if u <= VERTEX_SNAP {
            self.a
        } else if u >= 1.0 - VERTEX_SNAP {
            self.b
        } else {
            Point2::from_glam(self.a.to_glam().lerp(self.b.to_glam(), u))
        }
    }
}

/// Where a ray leaves a [`Triangle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Intersection point
    pub point: Point2,
    /// Index of the crossed edge (edge `i` runs from vertex `i` to `i + 1`)
    pub edge: usize,
    /// Vertex index if the hit snapped onto a vertex
    pub vertex: Option<usize>,
    /// Ray parameter of the hit
    pub t: f64,
}

/// A triangle, typically an RGB gamut on the chromaticity plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices in R, G, B order
    pub vertices: [Point2; 3],
}

impl Triangle {
    /// Creates a triangle.
    #[inline]
    pub const fn new(vertices: [Point2; 3]) -> Self {
        Self { vertices }
    }

    /// Edge `i`, from vertex `i` to vertex `(i + 1) % 3`.
    #[inline]
    pub fn edge(&self, i: usize) -> Segment2 {
        Segment2::new(self.vertices[i % 3], self.vertices[(i + 1) % 3])
    }

    /// Edges adjacent to vertex `i`.
    #[inline]
    pub fn edges_at_vertex(i: usize) -> [usize; 2] {
        [i % 3, (i + 2) % 3]
    }

    /// Signed area, positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        let [a, b, c] = self.vertices.map(Point2::to_glam);
        0.5 * (b - a).perp_dot(c - a)
    }

    /// True if `p` lies strictly inside the triangle.
    pub fn contains(&self, p: Point2) -> bool {
        let p = p.to_glam();
        let signs: Vec<f64> = (0..3)
            .map(|i| {
                let e = self.edge(i);
                (e.b.to_glam() - e.a.to_glam()).perp_dot(p - e.a.to_glam())
            })
            .collect();
        signs.iter().all(|s| *s > 0.0) || signs.iter().all(|s| *s < 0.0)
    }

    /// Intersects a ray with the triangle boundary.
    ///
    /// For a ray cast from an interior point there is exactly one exit
    /// point. Hits on a vertex are reported once, with `vertex` set. Returns
    /// the nearest hit, or `None` if the ray misses the boundary.
    pub fn intersect_ray(&self, ray: &Ray2) -> Option<RayHit> {
        if ray.is_degenerate() {
            return None;
        }

        (0..3)
            .filter_map(|i| {
                let edge = self.edge(i);
                edge.intersect_ray(ray).map(|(t, u)| {
                    let point = edge.point_at(u);
                    let vertex = if point == edge.a {
                        Some(i)
                    } else if point == edge.b {
                        Some((i + 1) % 3)
                    } else {
                        None
                    };
                    RayHit {
                        point,
                        edge: i,
                        vertex,
                        t,
                    }
                })
            })
            .min_by(|a, b| a.t.total_cmp(&b.t))
    }
}
