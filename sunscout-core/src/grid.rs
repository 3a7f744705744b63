//! Polar candidate grid around a search center.
//!
//! Candidates sit on concentric rings at evenly spaced angles. The ring
//! schedule gives the number of points per ring; ring radii grow linearly
//! out to the search radius, so every generated point is inside it by
//! construction and no distance filtering is needed.

use geo::Coord;

/// Canonical single-pass schedule: 81 points over five rings.
pub const DEFAULT_RING_SCHEDULE: &[usize] = &[1, 8, 16, 24, 32];

/// Coarse schedule retained from the iterative-refinement variant of the
/// search: 37 points over four rings. Selectable as an alternative mode,
/// not a replacement for [`DEFAULT_RING_SCHEDULE`].
pub const COARSE_RING_SCHEDULE: &[usize] = &[1, 6, 12, 18];

/// Kilometres per degree of latitude (and of longitude at the equator).
const KM_PER_DEGREE: f64 = 111.32;

/// A grid candidate with its ring/slot provenance.
///
/// `location` follows the crate convention `x = longitude, y = latitude`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplePoint {
    /// Candidate coordinate in decimal degrees.
    pub location: Coord<f64>,
    /// Concentric ring index, 0 for the center.
    pub ring: usize,
    /// Angular slot within the ring.
    pub slot: usize,
}

/// Total number of points a schedule produces.
///
/// Ring 0 always contributes exactly one point regardless of its schedule
/// entry.
#[must_use]
pub fn point_count(schedule: &[usize]) -> usize {
    schedule
        .iter()
        .enumerate()
        .map(|(ring, &n)| if ring == 0 { usize::from(n > 0) } else { n })
        .sum()
}

/// Generate the candidate grid around `center`.
///
/// Ring `i` of `r` rings sits at radius `i / (r - 1) * radius_km`; points
/// within a ring are placed at equal angular spacing. The polar offset is
/// projected to degrees with a local equirectangular approximation
/// (`1° ≈ 111.32 km` of latitude, scaled by `cos(lat)` for longitude),
/// which is accurate at this system's tens-of-kilometres scale but
/// degrades near the poles and at very large radii.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use sunscout_core::grid;
///
/// let center = Coord { x: 10.75, y: 59.91 };
/// let points = grid::generate(center, 10.0, grid::DEFAULT_RING_SCHEDULE);
/// assert_eq!(points.len(), 81);
/// assert_eq!(points[0].location, center);
/// ```
#[must_use]
pub fn generate(center: Coord<f64>, radius_km: f64, schedule: &[usize]) -> Vec<SamplePoint> {
    let mut points = Vec::with_capacity(point_count(schedule));
    if schedule.is_empty() {
        return points;
    }

    let rings = schedule.len();
    let lat_scale = KM_PER_DEGREE;
    let lon_scale = KM_PER_DEGREE * center.y.to_radians().cos();

    for (ring, &requested) in schedule.iter().enumerate() {
        if ring == 0 {
            // The innermost ring has zero radius; every requested slot
            // would collapse onto the center, so emit it once.
            if requested > 0 {
                points.push(SamplePoint {
                    location: center,
                    ring: 0,
                    slot: 0,
                });
            }
            continue;
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "ring indices and slot counts are far below 2^52"
        )]
        let ring_radius = (ring as f64 / (rings - 1) as f64) * radius_km;
        for slot in 0..requested {
            #[expect(
                clippy::cast_precision_loss,
                reason = "ring indices and slot counts are far below 2^52"
            )]
            let angle = std::f64::consts::TAU * slot as f64 / requested as f64;
            points.push(SamplePoint {
                location: Coord {
                    x: center.x + (ring_radius / lon_scale) * angle.cos(),
                    y: center.y + (ring_radius / lat_scale) * angle.sin(),
                },
                ring,
                slot,
            });
        }
    }

    points
}
