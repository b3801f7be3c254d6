//! Containment tests for the solids a beamline geometry is built from.
use glam::DVec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Solid extent of a [`crate::geometry::Volume`]. All solids are axis-aligned; tubes run along z.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Unbounded mother volume.
    World,
    /// Axis-aligned box.
    Box {
        center: DVec3,
        /// Half lengths along x, y and z.
        half_extent: DVec3,
    },
    /// Hollow or solid cylinder along the beam axis.
    Tube {
        center: DVec3,
        r_min: f64,
        r_max: f64,
        half_length: f64,
    },
}

impl Shape {
    pub fn cuboid(center: DVec3, size: DVec3) -> Self {
        Shape::Box {
            center,
            half_extent: size * 0.5,
        }
    }

    pub fn cylinder(center: DVec3, radius: f64, length: f64) -> Self {
        Shape::Tube {
            center,
            r_min: 0.0,
            r_max: radius,
            half_length: length * 0.5,
        }
    }

    pub fn tube(center: DVec3, r_min: f64, r_max: f64, length: f64) -> Self {
        Shape::Tube {
            center,
            r_min,
            r_max,
            half_length: length * 0.5,
        }
    }

    /// Inclusive on the lower faces, exclusive on the upper faces, so adjacent solids
    /// sharing a face never both claim a point.
    pub fn contains(&self, p: DVec3) -> bool {
        match *self {
            Shape::World => p.is_finite(),
            Shape::Box {
                center,
                half_extent,
            } => {
                let lo = center - half_extent;
                let hi = center + half_extent;
                p.x >= lo.x && p.x < hi.x && p.y >= lo.y && p.y < hi.y && p.z >= lo.z && p.z < hi.z
            }
            Shape::Tube {
                center,
                r_min,
                r_max,
                half_length,
            } => {
                let d = p - center;
                if d.z < -half_length || d.z >= half_length {
                    return false;
                }
                let r2 = d.x * d.x + d.y * d.y;
                r2 >= r_min * r_min && r2 < r_max * r_max
            }
        }
    }

    /// Longitudinal extent `(z_min, z_max)`, or `None` for the world.
    pub fn z_extent(&self) -> Option<(f64, f64)> {
        match *self {
            Shape::World => None,
            Shape::Box {
                center,
                half_extent,
            } => Some((center.z - half_extent.z, center.z + half_extent.z)),
            Shape::Tube {
                center,
                half_length,
                ..
            } => Some((center.z - half_length, center.z + half_length)),
        }
    }
}
