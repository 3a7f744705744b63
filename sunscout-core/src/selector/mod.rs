//! Triangular weight-selector geometry.
//!
//! The selector maps a 2D pointer position onto a fixed equilateral
//! triangle whose vertices represent the pure-sun, pure-temperature, and
//! pure-wind preference extremes. Positions convert to barycentric weights
//! via signed-area ratios, which stay exact for points anywhere in the
//! plane; outside the triangle one or more weights go negative and
//! [`Triangle::constrain`] projects the point back onto the closest edge.
//!
//! The module has no UI dependencies. Pointer handling lives in
//! [`DragController`], a direction-agnostic press/move/release state
//! machine that any event loop can feed.

use geo::Coord;
use thiserror::Error;

use crate::weights::WeightTriple;

mod drag;

pub use drag::DragController;

/// Errors returned by the [`Triangle`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriangleError {
    /// The three vertices are collinear (or coincident), so barycentric
    /// coordinates are undefined.
    #[error("triangle vertices must not be collinear")]
    Degenerate,
    /// A non-positive or non-finite circumradius was requested.
    #[error("triangle radius must be a positive finite number")]
    InvalidRadius,
}

/// The fixed selector triangle.
///
/// Vertex `a` is the pure-sun extreme, `b` pure-temperature, `c` pure-wind.
/// Vertex positions are a pure function of the constructor arguments; the
/// triangle carries no other state.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use sunscout_core::Triangle;
///
/// let triangle = Triangle::equilateral(Coord { x: 150.0, y: 150.0 }, 120.0)?;
/// let weights = triangle
///     .weights_at(Coord { x: 150.0, y: 150.0 })
///     .expect("centroid is non-degenerate");
/// assert!((weights.sun - weights.temp).abs() < 1e-9);
/// # Ok::<(), sunscout_core::TriangleError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    a: Coord<f64>,
    b: Coord<f64>,
    c: Coord<f64>,
}

/// Twice the signed area of the triangle `(a, b, c)`.
///
/// Positive when the vertices wind counter-clockwise in a y-up frame; the
/// sign cancels in barycentric ratios, so either frame works.
fn cross(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Orthogonal projection of `p` onto the closed segment `a..=b`.
///
/// The projection parameter is clamped to the segment, so endpoints are
/// returned for points beyond either end rather than points on the
/// infinite line.
fn project_onto_segment(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> Coord<f64> {
    let ab = Coord {
        x: b.x - a.x,
        y: b.y - a.y,
    };
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq <= 0.0 {
        return a;
    }
    let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len_sq).clamp(0.0, 1.0);
    Coord {
        x: a.x + ab.x * t,
        y: a.y + ab.y * t,
    }
}

fn distance_sq(p: Coord<f64>, q: Coord<f64>) -> f64 {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    dx * dx + dy * dy
}

impl Triangle {
    /// Build a triangle from three explicit vertices.
    ///
    /// # Errors
    /// Returns [`TriangleError::Degenerate`] when the vertices are
    /// collinear or coincident.
    pub fn from_vertices(
        a: Coord<f64>,
        b: Coord<f64>,
        c: Coord<f64>,
    ) -> Result<Self, TriangleError> {
        let doubled_area = cross(a, b, c);
        if !doubled_area.is_finite() || doubled_area.abs() <= f64::EPSILON {
            return Err(TriangleError::Degenerate);
        }
        Ok(Self { a, b, c })
    }

    /// Build the standard equilateral selector triangle.
    ///
    /// The sun vertex sits directly above the center (screen coordinates,
    /// y growing downward), with the temperature and wind vertices at
    /// 120-degree offsets; `radius` is the circumradius in selector units.
    ///
    /// # Errors
    /// Returns [`TriangleError::InvalidRadius`] for non-positive or
    /// non-finite radii.
    pub fn equilateral(center: Coord<f64>, radius: f64) -> Result<Self, TriangleError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(TriangleError::InvalidRadius);
        }
        let vertex = |angle: f64| Coord {
            x: center.x + radius * angle.cos(),
            y: center.y + radius * angle.sin(),
        };
        let third = std::f64::consts::TAU / 3.0;
        let top = -std::f64::consts::FRAC_PI_2;
        Self::from_vertices(vertex(top), vertex(top + third), vertex(top + 2.0 * third))
    }

    /// The vertices in `[sun, temperature, wind]` order.
    #[must_use]
    pub const fn vertices(&self) -> [Coord<f64>; 3] {
        [self.a, self.b, self.c]
    }

    /// The centroid, where all three weights are equal.
    #[must_use]
    pub fn centroid(&self) -> Coord<f64> {
        Coord {
            x: (self.a.x + self.b.x + self.c.x) / 3.0,
            y: (self.a.y + self.b.y + self.c.y) / 3.0,
        }
    }

    /// Barycentric coordinates of `point` in `[sun, temperature, wind]`
    /// order, computed as signed-area ratios.
    ///
    /// Exact for any point in the plane: inside the triangle all three
    /// components are non-negative and sum to one, outside at least one
    /// component is negative.
    #[must_use]
    pub fn barycentric(&self, point: Coord<f64>) -> [f64; 3] {
        let total = cross(self.a, self.b, self.c);
        [
            cross(point, self.b, self.c) / total,
            cross(self.a, point, self.c) / total,
            cross(self.a, self.b, point) / total,
        ]
    }

    /// Whether `point` lies inside the triangle or on its boundary.
    #[must_use]
    pub fn contains(&self, point: Coord<f64>) -> bool {
        self.barycentric(point).iter().all(|&w| w >= 0.0)
    }

    /// Clamp `point` into the triangle.
    ///
    /// Points already inside (or on the boundary) are returned unchanged.
    /// Anything else is projected orthogonally onto each of the three
    /// edges as closed segments, and the projection nearest to the
    /// original point wins. The result therefore always satisfies
    /// [`Triangle::contains`], even under fast or erratic pointer input.
    #[must_use]
    pub fn constrain(&self, point: Coord<f64>) -> Coord<f64> {
        if self.contains(point) {
            return point;
        }
        let candidates = [
            project_onto_segment(point, self.a, self.b),
            project_onto_segment(point, self.b, self.c),
            project_onto_segment(point, self.c, self.a),
        ];
        let mut best = self.a;
        let mut best_dist = f64::INFINITY;
        for candidate in candidates {
            let dist = distance_sq(point, candidate);
            if dist < best_dist {
                best = candidate;
                best_dist = dist;
            }
        }
        best
    }

    /// Convert a selector position to preference weights.
    ///
    /// Applies [`Triangle::barycentric`] and renormalizes by the raw sum to
    /// absorb floating-point drift, so the returned triple sums to exactly
    /// one. Components within rounding distance of zero (as produced by
    /// edge projections) are clamped to zero. Returns `None` when the
    /// point is genuinely outside the triangle or the raw sum is not
    /// positive; callers should constrain first and keep their prior
    /// weights on `None`.
    #[must_use]
    pub fn weights_at(&self, point: Coord<f64>) -> Option<WeightTriple> {
        const TOLERANCE: f64 = 1e-9;
        let raw = self.barycentric(point);
        if raw.iter().any(|&w| w < -TOLERANCE) {
            return None;
        }
        let [sun, temp, wind] = raw.map(|w| w.max(0.0));
        WeightTriple::new(sun, temp, wind)
            .normalized()
            .map(|w| w.as_triple())
    }

    /// The selector position representing `weights`: the weight-blend of
    /// the three vertices.
    ///
    /// Returns `None` for degenerate triples that cannot be normalized.
    #[must_use]
    pub fn point_for(&self, weights: &WeightTriple) -> Option<Coord<f64>> {
        let w = weights.normalized()?;
        Some(Coord {
            x: w.sun() * self.a.x + w.temp() * self.b.x + w.wind() * self.c.x,
            y: w.sun() * self.a.y + w.temp() * self.b.y + w.wind() * self.c.y,
        })
    }
}
