//! Pointer-drag state machine for the weight selector.
//!
//! Mouse, touch, and pen input all reduce to the same three transitions:
//! press, move, release. The controller applies every move synchronously
//! while a drag is active; there is no momentum, snapping, or debounce.

use geo::Coord;

use crate::weights::WeightTriple;

use super::Triangle;

/// Direction-agnostic drag handler feeding the selector triangle.
///
/// The controller owns the current selector position and the weights
/// derived from it. Positions are constrained into the triangle before
/// weights are recomputed, so the selector never visually leaves the
/// simplex; a degenerate weight conversion leaves the prior weights
/// untouched.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use sunscout_core::{DragController, Triangle};
///
/// let triangle = Triangle::equilateral(Coord { x: 0.0, y: 0.0 }, 100.0)?;
/// let mut drag = DragController::new(triangle);
///
/// drag.press(Coord { x: 0.0, y: -100.0 });
/// assert!(drag.is_active());
/// assert!(drag.weights().sun > 0.99);
///
/// drag.release();
/// drag.move_to(Coord { x: 0.0, y: 50.0 });
/// // Moves after release are ignored; the last weights persist.
/// assert!(drag.weights().sun > 0.99);
/// # Ok::<(), sunscout_core::TriangleError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DragController {
    triangle: Triangle,
    position: Coord<f64>,
    weights: WeightTriple,
    active: bool,
}

impl DragController {
    /// Start at the centroid with an even weight split.
    #[must_use]
    pub fn new(triangle: Triangle) -> Self {
        let position = triangle.centroid();
        let weights = triangle
            .weights_at(position)
            .unwrap_or_else(WeightTriple::default);
        Self {
            triangle,
            position,
            weights,
            active: false,
        }
    }

    /// Start at the position representing `weights`.
    ///
    /// Degenerate triples fall back to the centroid split.
    #[must_use]
    pub fn with_weights(triangle: Triangle, weights: &WeightTriple) -> Self {
        match triangle.point_for(weights) {
            Some(position) => Self {
                triangle,
                position,
                weights: *weights,
                active: false,
            },
            None => Self::new(triangle),
        }
    }

    /// Pointer contact: activate the drag and apply the contact point
    /// immediately.
    pub fn press(&mut self, point: Coord<f64>) {
        self.active = true;
        self.apply(point);
    }

    /// Pointer motion: applied only while a drag is active.
    pub fn move_to(&mut self, point: Coord<f64>) {
        if self.active {
            self.apply(point);
        }
    }

    /// Pointer up or pointer leaving the control: deactivate, keeping the
    /// last computed position and weights.
    pub fn release(&mut self) {
        self.active = false;
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Current selector position, always inside the triangle.
    #[must_use]
    pub const fn position(&self) -> Coord<f64> {
        self.position
    }

    /// Weights derived from the current position.
    #[must_use]
    pub const fn weights(&self) -> WeightTriple {
        self.weights
    }

    /// The triangle this controller operates on.
    #[must_use]
    pub const fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    fn apply(&mut self, point: Coord<f64>) {
        let constrained = self.triangle.constrain(point);
        self.position = constrained;
        if let Some(weights) = self.triangle.weights_at(constrained) {
            self.weights = weights;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn triangle() -> Triangle {
        Triangle::equilateral(Coord { x: 0.0, y: 0.0 }, 100.0).expect("valid radius")
    }

    #[rstest]
    fn press_applies_contact_point(triangle: Triangle) {
        let mut drag = DragController::new(triangle);
        let [sun_vertex, ..] = triangle.vertices();

        drag.press(sun_vertex);

        assert!(drag.is_active());
        assert!((drag.weights().sun - 1.0).abs() < 1e-9);
    }

    #[rstest]
    fn moves_are_ignored_until_pressed(triangle: Triangle) {
        let mut drag = DragController::new(triangle);
        let before = drag.weights();

        drag.move_to(Coord { x: 50.0, y: 20.0 });

        assert_eq!(drag.weights(), before);
    }

    #[rstest]
    fn moves_apply_while_active(triangle: Triangle) {
        let mut drag = DragController::new(triangle);
        let [_, temp_vertex, _] = triangle.vertices();

        drag.press(triangle.centroid());
        drag.move_to(temp_vertex);

        assert!((drag.weights().temp - 1.0).abs() < 1e-9);
    }

    #[rstest]
    fn release_freezes_weights(triangle: Triangle) {
        let mut drag = DragController::new(triangle);
        let [sun_vertex, temp_vertex, _] = triangle.vertices();

        drag.press(sun_vertex);
        drag.release();
        drag.move_to(temp_vertex);

        assert!(!drag.is_active());
        assert!((drag.weights().sun - 1.0).abs() < 1e-9);
    }

    #[rstest]
    fn wild_drag_stays_inside(triangle: Triangle) {
        let mut drag = DragController::new(triangle);
        drag.press(Coord { x: 0.0, y: 0.0 });

        for point in [
            Coord { x: 1e4, y: -1e4 },
            Coord { x: -1e4, y: 1e4 },
            Coord { x: 0.0, y: 1e6 },
            Coord { x: -3.0, y: -2.0 },
        ] {
            drag.move_to(point);
            assert!(triangle.contains(drag.position()));
            let weights = drag.weights();
            let sum = weights.sun + weights.temp + weights.wind;
            assert!((sum - 1.0).abs() < 1e-9);
            assert!(weights.sun >= 0.0 && weights.temp >= 0.0 && weights.wind >= 0.0);
        }
    }

    #[rstest]
    fn with_weights_restores_position(triangle: Triangle) {
        let stored = WeightTriple::new(0.7, 0.2, 0.1);
        let drag = DragController::with_weights(triangle, &stored);
        let recovered = triangle
            .weights_at(drag.position())
            .expect("restored point is inside");
        assert!((recovered.sun - 0.7).abs() < 1e-9);
    }

    #[rstest]
    fn with_degenerate_weights_falls_back_to_centroid(triangle: Triangle) {
        let drag = DragController::with_weights(triangle, &WeightTriple::new(0.0, 0.0, 0.0));
        assert!((drag.weights().sun - 1.0 / 3.0).abs() < 1e-9);
    }
}
