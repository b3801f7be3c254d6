#![forbid(unsafe_code)]
//! beamline_vertex: primary-vertex generation for fixed-target beamlines.
//!
//! Modules:
//! - beamline: material segments along the beam, attenuation, and geometry scanning
//! - geometry: volume tree, materials, and first-match point resolution
//! - sampling: cumulative probability table and transverse beam profile
//! - vertex: the sampler, its configuration, and events
pub mod beamline;
pub mod error;
pub mod geometry;
pub mod sampling;
pub mod vertex;

/// Convenient re-exports for common types. Import with `use beamline_vertex::prelude::*;`.
pub mod prelude {
    pub use crate::beamline::{BeamScan, Beamline, BeamlineObject};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{resolve_at_point, GeometryNode, Material, Shape, Volume};
    pub use crate::sampling::{BeamProfile, CumulativeTable};
    pub use crate::vertex::{
        EventSink, FnSink, GenerationResult, MultiSink, SampledVertex, SelectionMode, StruckNode,
        VecSink, VertexEvent, VertexGenConfig, VertexSampler,
    };
}
