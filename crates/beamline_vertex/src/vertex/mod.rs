//! Vertex generation: configuration, the sampler itself, and observation hooks.
pub mod config;
pub mod events;
pub mod sampler;

pub use config::{SelectionMode, VertexGenConfig};
pub use events::{EventSink, FnSink, MultiSink, VecSink, VertexEvent};
pub use sampler::{GenerationResult, SampledVertex, StruckNode, VertexSampler};
