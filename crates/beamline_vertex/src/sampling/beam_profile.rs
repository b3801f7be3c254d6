//! Transverse beam profile.
use glam::DVec2;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampling::box_muller_pair;

/// Support window half-width, in units of the axis width.
pub const DEFAULT_SUPPORT_SIGMAS: f64 = 5.0;

const MAX_REJECTIONS: usize = 64;

/// Independent Gaussian profile per axis, truncated to a rectangular support window.
///
/// An axis whose width is zero or negative is degenerate and always samples its center.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamProfile {
    x_center: f64,
    x_width: f64,
    y_center: f64,
    y_width: f64,
    support_sigmas: f64,
}

impl Default for BeamProfile {
    fn default() -> Self {
        Self {
            x_center: 0.0,
            x_width: 0.3,
            y_center: 0.0,
            y_width: 0.3,
            support_sigmas: DEFAULT_SUPPORT_SIGMAS,
        }
    }
}

impl BeamProfile {
    pub fn new(x_center: f64, x_width: f64, y_center: f64, y_width: f64) -> Result<Self> {
        let mut profile = Self::default();
        profile.configure(x_center, x_width, y_center, y_width)?;
        Ok(profile)
    }

    pub fn with_support_sigmas(mut self, support_sigmas: f64) -> Result<Self> {
        if !support_sigmas.is_finite() || support_sigmas <= 0.0 {
            return Err(Error::Configuration(format!(
                "beam profile support must be finite and > 0, got {support_sigmas}"
            )));
        }
        self.support_sigmas = support_sigmas;
        Ok(self)
    }

    /// Set all four parameters at once. Values must be finite.
    pub fn configure(
        &mut self,
        x_center: f64,
        x_width: f64,
        y_center: f64,
        y_width: f64,
    ) -> Result<()> {
        let params = [x_center, x_width, y_center, y_width];
        if let Some(bad) = params.iter().find(|v| !v.is_finite()) {
            return Err(Error::Configuration(format!(
                "beam profile parameters must be finite, got {bad}"
            )));
        }
        self.x_center = x_center;
        self.x_width = x_width;
        self.y_center = y_center;
        self.y_width = y_width;
        Ok(())
    }

    /// Check invariants of a profile built outside the setters, e.g. deserialized.
    pub fn validate(&self) -> Result<()> {
        let mut copy = *self;
        copy.configure(self.x_center, self.x_width, self.y_center, self.y_width)?;
        copy.with_support_sigmas(self.support_sigmas).map(|_| ())
    }

    pub fn x_center(&self) -> f64 {
        self.x_center
    }

    pub fn x_width(&self) -> f64 {
        self.x_width
    }

    pub fn y_center(&self) -> f64 {
        self.y_center
    }

    pub fn y_width(&self) -> f64 {
        self.y_width
    }

    pub fn support_sigmas(&self) -> f64 {
        self.support_sigmas
    }

    pub fn set_x_center(&mut self, value: f64) -> Result<()> {
        self.x_center = finite("x_center", value)?;
        Ok(())
    }

    pub fn set_x_width(&mut self, value: f64) -> Result<()> {
        self.x_width = finite("x_width", value)?;
        Ok(())
    }

    pub fn set_y_center(&mut self, value: f64) -> Result<()> {
        self.y_center = finite("y_center", value)?;
        Ok(())
    }

    pub fn set_y_width(&mut self, value: f64) -> Result<()> {
        self.y_width = finite("y_width", value)?;
        Ok(())
    }

    /// Unnormalized density, zero outside the support window.
    pub fn density(&self, x: f64, y: f64) -> f64 {
        axis_density(x, self.x_center, self.x_width, self.support_sigmas)
            * axis_density(y, self.y_center, self.y_width, self.support_sigmas)
    }

    /// Draw a transverse position.
    ///
    /// Standard normal pairs are rejected until both coordinates fall inside the window.
    /// After a bounded number of rejections the last pair is clamped to the window.
    pub fn sample(&self, rng: &mut dyn RngCore) -> DVec2 {
        let s = self.support_sigmas;
        let x_live = self.x_width > 0.0;
        let y_live = self.y_width > 0.0;

        if !x_live && !y_live {
            return DVec2::new(self.x_center, self.y_center);
        }

        let mut n = (0.0, 0.0);
        for _ in 0..MAX_REJECTIONS {
            n = box_muller_pair(rng);
            let x_ok = !x_live || n.0.abs() <= s;
            let y_ok = !y_live || n.1.abs() <= s;
            if x_ok && y_ok {
                break;
            }
        }

        let x = if x_live {
            self.x_center + self.x_width * n.0.clamp(-s, s)
        } else {
            self.x_center
        };
        let y = if y_live {
            self.y_center + self.y_width * n.1.clamp(-s, s)
        } else {
            self.y_center
        };
        DVec2::new(x, y)
    }
}

fn finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::Configuration(format!(
            "beam profile {name} must be finite, got {value}"
        )))
    }
}

fn axis_density(v: f64, center: f64, width: f64, support_sigmas: f64) -> f64 {
    if width <= 0.0 {
        return if v == center { 1.0 } else { 0.0 };
    }
    let t = (v - center) / width;
    if t.abs() > support_sigmas {
        return 0.0;
    }
    (-0.5 * t * t).exp()
}
