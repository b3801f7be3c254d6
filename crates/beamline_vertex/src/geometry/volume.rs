//! Built-in volume hierarchy.
use glam::DVec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{GeometryNode, Material, Shape};

/// A named solid with optional material and ordered daughter volumes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub name: String,
    pub shape: Shape,
    pub material: Option<Material>,
    pub children: Vec<Volume>,
}

impl Volume {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            material: None,
            children: Vec::new(),
        }
    }

    /// Unbounded mother volume without material.
    pub fn world(name: impl Into<String>) -> Self {
        Self::new(name, Shape::World)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_child(mut self, child: Volume) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Volume>) -> Self {
        self.children.extend(children);
        self
    }

    /// Depth-first search by name.
    pub fn find(&self, name: &str) -> Option<&Volume> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Total node count including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Volume::node_count).sum::<usize>()
    }
}

impl GeometryNode for Volume {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains(&self, point: DVec3) -> bool {
        self.shape.contains(point)
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }
}
