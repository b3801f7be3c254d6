//! Beamline segments a primary interaction can originate in.
//!
//! A [`Beamline`] is an ordered list of [`BeamlineObject`]s. Each object carries a
//! relative interaction probability and the proton fraction of its material. The
//! probabilities are either supplied directly or derived from nuclear interaction
//! lengths with [`Beamline::attenuate`], which accounts for the beam being depleted by
//! every upstream segment.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::geometry::Material;

pub mod scan;

pub use scan::BeamScan;

/// One material segment along the beam axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BeamlineObject {
    /// Name of the geometry node this segment was taken from.
    pub name: String,
    /// Upstream face in cm.
    pub z_up: f64,
    /// Downstream face in cm.
    pub z_down: f64,
    pub material: Material,
    /// Relative interaction weight. Non-negative.
    pub interaction_probability: f64,
    /// Proton-to-nucleon ratio in [0, 1].
    pub proton_fraction: f64,
}

impl BeamlineObject {
    /// Create a segment whose weight is its unattenuated interaction probability.
    pub fn new(name: impl Into<String>, z_up: f64, z_down: f64, material: Material) -> Self {
        let (z_up, z_down) = if z_up <= z_down {
            (z_up, z_down)
        } else {
            (z_down, z_up)
        };
        let proton_fraction = material.proton_fraction();
        let mut obj = Self {
            name: name.into(),
            z_up,
            z_down,
            material,
            interaction_probability: 0.0,
            proton_fraction,
        };
        obj.interaction_probability = 1.0 - obj.self_attenuation();
        obj
    }

    /// Override the relative interaction weight.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.interaction_probability = probability;
        self
    }

    /// Override the proton fraction taken from the material, clamped to `[0, 1]`.
    pub fn with_proton_fraction(mut self, proton_fraction: f64) -> Self {
        self.proton_fraction = proton_fraction.clamp(0.0, 1.0);
        self
    }

    pub fn length(&self) -> f64 {
        self.z_down - self.z_up
    }

    pub fn center_z(&self) -> f64 {
        0.5 * (self.z_up + self.z_down)
    }

    /// Fraction of the incoming beam that leaves the segment without interacting.
    pub fn self_attenuation(&self) -> f64 {
        if !self.material.is_interacting() {
            return 1.0;
        }
        (-self.length() / self.material.nuclear_interaction_length).exp()
    }

    /// Longitudinal interaction point for a uniform draw `u` in [0, 1).
    ///
    /// The beam is depleted while it traverses the segment, so interaction depth follows
    /// an exponential truncated to the segment length. Non-interacting materials fall
    /// back to a uniform depth. The result always lies in `[z_up, z_down)` for a
    /// segment of non-zero length.
    pub fn sample_z(&self, u: f64) -> f64 {
        let length = self.length();
        if length <= 0.0 {
            return self.z_up;
        }

        let u = u.clamp(0.0, 1.0);
        let lambda = self.material.nuclear_interaction_length;
        let z = if self.material.is_interacting() {
            let span = -(-length / lambda).exp_m1();
            self.z_up - lambda * (-u * span).ln_1p()
        } else {
            self.z_up + u * length
        };

        z.clamp(self.z_up, self.z_down.next_down())
    }
}

/// Ordered collection of beamline segments. Insertion order is the tie-break order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Beamline {
    objects: Vec<BeamlineObject>,
}

impl Beamline {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    pub fn with_object(mut self, object: BeamlineObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn push(&mut self, object: BeamlineObject) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BeamlineObject> {
        self.objects.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BeamlineObject> {
        self.objects.iter()
    }

    pub fn as_slice(&self) -> &[BeamlineObject] {
        &self.objects
    }

    /// Relative interaction weights in insertion order.
    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.objects.iter().map(|o| o.interaction_probability)
    }

    /// Sort segments by upstream face and derive interaction probabilities from material.
    ///
    /// Segment `i` receives `S_i * (1 - e^{-L_i / λ_i})`, where `S_i` is the beam fraction
    /// that survived all segments upstream of it. Returns the surviving fraction
    /// downstream of the last segment.
    pub fn attenuate(&mut self) -> f64 {
        self.objects.sort_by(|a, b| a.z_up.total_cmp(&b.z_up));

        let mut survival = 1.0;
        for obj in &mut self.objects {
            let transmitted = obj.self_attenuation();
            obj.interaction_probability = survival * (1.0 - transmitted);
            if obj.interaction_probability <= 0.0 {
                warn!(
                    "Beamline segment '{}' has zero interaction probability.",
                    obj.name
                );
            }
            survival *= transmitted;
        }

        info!(
            segments = self.objects.len(),
            transmitted = survival,
            "Attenuated beamline"
        );
        survival
    }
}

impl FromIterator<BeamlineObject> for Beamline {
    fn from_iter<I: IntoIterator<Item = BeamlineObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Beamline {
    type Item = &'a BeamlineObject;
    type IntoIter = std::slice::Iter<'a, BeamlineObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
