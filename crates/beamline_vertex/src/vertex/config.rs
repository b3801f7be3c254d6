//! Configuration for a [`crate::vertex::VertexSampler`].
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampling::BeamProfile;

pub const DEFAULT_MAX_RESAMPLE: usize = 10;

/// How the interacting segment is chosen.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Inverse-CDF draw proportional to interaction probability.
    #[default]
    Weighted,
    /// Uniform draw over segments; each vertex carries its segment's probability as
    /// luminosity weight instead.
    Biased,
}

/// Configuration for vertex generation.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VertexGenConfig {
    /// Transverse beam profile.
    pub profile: BeamProfile,
    /// Segment selection strategy.
    pub selection_mode: SelectionMode,
    /// Resolve the struck geometry node when a geometry tree is attached.
    pub resolve_geometry: bool,
    /// Extra position draws inside the selected segment after a geometry miss before the
    /// miss is returned.
    pub max_resample: usize,
}

impl Default for VertexGenConfig {
    fn default() -> Self {
        Self {
            profile: BeamProfile::default(),
            selection_mode: SelectionMode::Weighted,
            resolve_geometry: true,
            max_resample: DEFAULT_MAX_RESAMPLE,
        }
    }
}

impl VertexGenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the beam profile.
    pub fn with_profile(mut self, profile: BeamProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the selection mode.
    pub fn with_selection_mode(mut self, selection_mode: SelectionMode) -> Self {
        self.selection_mode = selection_mode;
        self
    }

    /// Enables or disables geometry resolution.
    pub fn with_resolve_geometry(mut self, resolve_geometry: bool) -> Self {
        self.resolve_geometry = resolve_geometry;
        self
    }

    /// Sets the number of re-sampling attempts after a geometry miss.
    pub fn with_max_resample(mut self, max_resample: usize) -> Self {
        self.max_resample = max_resample;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.profile.validate()?;
        if self.max_resample > 1_000_000 {
            return Err(Error::Configuration(
                "max_resample must be <= 1000000".into(),
            ));
        }
        Ok(())
    }
}
