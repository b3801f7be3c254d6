//! Bulk material properties consumed by vertex generation.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Material composition of a geometry node or beamline segment.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material name, e.g. `"LH2"` or `"Iron"`.
    pub name: String,
    /// Effective atomic number.
    pub z: f64,
    /// Effective mass number in g/mol.
    pub a: f64,
    /// Density in g/cm3.
    pub density: f64,
    /// Nuclear interaction length in cm. `f64::INFINITY` for non-interacting media.
    pub nuclear_interaction_length: f64,
}

impl Material {
    pub fn new(
        name: impl Into<String>,
        z: f64,
        a: f64,
        density: f64,
        nuclear_interaction_length: f64,
    ) -> Self {
        Self {
            name: name.into(),
            z,
            a,
            density,
            nuclear_interaction_length,
        }
    }

    /// A medium the beam passes through without interacting.
    pub fn vacuum() -> Self {
        Self::new("Vacuum", 0.0, 1.0, 0.0, f64::INFINITY)
    }

    /// Proton-to-nucleon ratio `Z / A`, clamped to [0, 1].
    pub fn proton_fraction(&self) -> f64 {
        if self.a <= 0.0 || !self.a.is_finite() {
            return 0.0;
        }
        (self.z / self.a).clamp(0.0, 1.0)
    }

    /// Whether the beam can interact in this material at all.
    pub fn is_interacting(&self) -> bool {
        self.nuclear_interaction_length.is_finite() && self.nuclear_interaction_length > 0.0
    }
}
