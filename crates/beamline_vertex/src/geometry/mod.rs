//! Geometry tree queries used to resolve which material a vertex landed in.
//!
//! The sampler only reads geometry through the [`GeometryNode`] trait, so any host
//! toolkit's volume hierarchy can be adapted to it. [`Volume`] is the built-in
//! implementation used by the demos and tests.
use glam::DVec3;

use crate::error::{Error, Result};

pub mod material;
pub mod shape;
pub mod volume;

pub use material::Material;
pub use shape::Shape;
pub use volume::Volume;

/// Read-only view of one node in a volume hierarchy.
pub trait GeometryNode: Sized {
    /// Name used to identify the node, e.g. when matching beamline segments.
    fn name(&self) -> &str;

    /// Spatial containment test for a point in global coordinates.
    fn contains(&self, point: DVec3) -> bool;

    /// Child nodes in declaration order.
    fn children(&self) -> &[Self];

    /// Material descriptor, present on nodes that represent physical matter.
    fn material(&self) -> Option<&Material>;
}

/// Resolve the deepest material-bearing node containing `point`.
///
/// Descent is depth-first and takes the first child, in declaration order, that
/// contains the point. Overlapping siblings are therefore resolved by order, not by
/// proximity. Returns [`Error::GeometryMiss`] when the root does not contain the point
/// or no node on the descent path carries material.
pub fn resolve_at_point<N: GeometryNode>(root: &N, point: DVec3) -> Result<&N> {
    let miss = || Error::GeometryMiss {
        x: point.x,
        y: point.y,
        z: point.z,
    };

    if !root.contains(point) {
        return Err(miss());
    }

    let mut node = root;
    let mut matched = root.material().map(|_| root);
    while let Some(child) = node.children().iter().find(|c| c.contains(point)) {
        node = child;
        if child.material().is_some() {
            matched = Some(child);
        }
    }

    matched.ok_or_else(miss)
}
