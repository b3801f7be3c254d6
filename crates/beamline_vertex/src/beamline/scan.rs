//! Derive beamline segments by walking the beam axis through a geometry tree.
use glam::DVec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::beamline::{Beamline, BeamlineObject};
use crate::error::{Error, Result};
use crate::geometry::{resolve_at_point, GeometryNode};

const MAX_BISECTIONS: usize = 64;

/// Parameters for [`Beamline::scan`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamScan {
    /// Transverse position of the beam axis.
    pub x: f64,
    pub y: f64,
    /// Scan range along z, `z_start < z_end`.
    pub z_start: f64,
    pub z_end: f64,
    /// Coarse marching step. Volumes thinner than this may be skipped.
    pub step: f64,
    /// Precision of located material boundaries.
    pub tolerance: f64,
}

impl BeamScan {
    pub fn new(z_start: f64, z_end: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z_start,
            z_end,
            step: 0.1,
            tolerance: 1e-6,
        }
    }

    pub fn with_axis(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let all_finite = [
            self.x,
            self.y,
            self.z_start,
            self.z_end,
            self.step,
            self.tolerance,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(Error::Configuration(
                "beam scan parameters must be finite".into(),
            ));
        }
        if self.z_end <= self.z_start {
            return Err(Error::Configuration("beam scan z range is empty".into()));
        }
        if self.step <= 0.0 {
            return Err(Error::Configuration("beam scan step must be > 0".into()));
        }
        // The step must advance z everywhere in the range; the coarsest spacing is at an end.
        if [self.z_start, self.z_end]
            .iter()
            .any(|&z| z + self.step <= z)
        {
            return Err(Error::Configuration(format!(
                "beam scan step {} is below the float resolution of z range [{}, {}]",
                self.step, self.z_start, self.z_end
            )));
        }
        if self.tolerance <= 0.0 {
            return Err(Error::Configuration(
                "beam scan tolerance must be > 0".into(),
            ));
        }
        Ok(())
    }
}

impl Beamline {
    /// Build a beamline from the interacting material nodes crossed by the beam axis.
    ///
    /// Consecutive points resolving to the same node are merged into one segment.
    /// Points outside every material node and non-interacting materials are gaps.
    /// The result is attenuated with [`Beamline::attenuate`].
    pub fn scan<N: GeometryNode>(root: &N, params: BeamScan) -> Result<Self> {
        params.validate()?;

        let probe = |z: f64| resolve_at_point(root, DVec3::new(params.x, params.y, z)).ok();

        let mut beamline = Beamline::new();
        let mut close_run = |node: Option<&N>, z_up: f64, z_down: f64| {
            let Some(node) = node else {
                return;
            };
            let Some(material) = node.material() else {
                return;
            };
            if !material.is_interacting() || z_down <= z_up {
                debug!(node = node.name(), z_up, z_down, "Skipping scan gap");
                return;
            }
            beamline.push(BeamlineObject::new(
                node.name(),
                z_up,
                z_down,
                material.clone(),
            ));
        };

        let mut z = params.z_start;
        let mut current = probe(z);
        let mut run_start = z;

        while z < params.z_end {
            let next = (z + params.step).min(params.z_end);
            if next <= z {
                return Err(Error::Configuration(format!(
                    "beam scan stalled at z = {z} with step {}",
                    params.step
                )));
            }
            if same_node(current, probe(next)) {
                z = next;
                continue;
            }

            // Invariant: probe(lo) is `current`, probe(hi) is not.
            let (mut lo, mut hi) = (z, next);
            for _ in 0..MAX_BISECTIONS {
                if hi - lo <= params.tolerance {
                    break;
                }
                let mid = lo + 0.5 * (hi - lo);
                if same_node(current, probe(mid)) {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }

            close_run(current, run_start, hi);
            current = probe(hi);
            run_start = hi;
            z = hi;
        }
        close_run(current, run_start, params.z_end);

        if beamline.is_empty() {
            return Err(Error::Configuration(format!(
                "beam axis at ({}, {}) crosses no interacting material in z [{}, {}]",
                params.x, params.y, params.z_start, params.z_end
            )));
        }

        info!(segments = beamline.len(), "Scanned beamline from geometry");
        beamline.attenuate();
        Ok(beamline)
    }
}

fn same_node<N>(a: Option<&N>, b: Option<&N>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => std::ptr::eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
