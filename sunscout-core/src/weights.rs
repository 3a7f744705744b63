//! Preference weights across the three scored factors.
//!
//! Raw triples come straight from a drag position or program input and may
//! have any non-negative magnitudes. Scoring always consumes the
//! [`NormalizedWeights`] form, recomputed on demand so the raw values are
//! never mutated in place.

/// Raw, unnormalized preference weights for sunshine, temperature, and wind.
///
/// Each component must be finite and non-negative; the triple as a whole is
/// only usable for scoring once [`WeightTriple::normalized`] succeeds.
///
/// # Examples
/// ```
/// use sunscout_core::WeightTriple;
///
/// let raw = WeightTriple::new(2.0, 1.0, 1.0);
/// let weights = raw.normalized().expect("positive sum");
/// assert!((weights.sun() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightTriple {
    /// Preference for clear skies.
    pub sun: f64,
    /// Preference for comfortable temperature.
    pub temp: f64,
    /// Preference along the active wind profile.
    pub wind: f64,
}

impl WeightTriple {
    /// Construct a raw triple.
    #[must_use]
    pub const fn new(sun: f64, temp: f64, wind: f64) -> Self {
        Self { sun, temp, wind }
    }

    /// Sum of the three raw components.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.sun + self.temp + self.wind
    }

    /// Normalize the triple so the components sum to exactly one.
    ///
    /// Returns `None` when any component is negative or the sum is not a
    /// positive finite number; callers holding a previous valid triple
    /// should keep it in that case rather than propagating the degenerate
    /// input.
    #[must_use]
    pub fn normalized(&self) -> Option<NormalizedWeights> {
        let total = self.sum();
        if !total.is_finite() || total <= 0.0 {
            return None;
        }
        if self.sun < 0.0 || self.temp < 0.0 || self.wind < 0.0 {
            return None;
        }
        Some(NormalizedWeights {
            sun: self.sun / total,
            temp: self.temp / total,
            wind: self.wind / total,
        })
    }
}

impl Default for WeightTriple {
    /// An even preference across all three factors.
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// A weight triple whose components sum to one.
///
/// Only obtainable through [`WeightTriple::normalized`], which guards
/// against zero and non-finite sums, so scoring code can rely on the
/// sum-to-one invariant without revalidating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedWeights {
    sun: f64,
    temp: f64,
    wind: f64,
}

impl NormalizedWeights {
    /// Normalized sunshine weight.
    #[must_use]
    pub const fn sun(&self) -> f64 {
        self.sun
    }

    /// Normalized temperature weight.
    #[must_use]
    pub const fn temp(&self) -> f64 {
        self.temp
    }

    /// Normalized wind weight.
    #[must_use]
    pub const fn wind(&self) -> f64 {
        self.wind
    }

    /// The raw triple carrying the same proportions.
    #[must_use]
    pub const fn as_triple(&self) -> WeightTriple {
        WeightTriple::new(self.sun, self.temp, self.wind)
    }
}
