//! Event types and sinks for observing vertex generation.
//!
//! Pass a sink to [`crate::vertex::VertexSampler::generate_vertex_with_events`] or
//! [`crate::vertex::VertexSampler::generate_many_with_events`] to collect or forward
//! what happened during sampling.
use glam::DVec3;

use crate::vertex::config::SelectionMode;
use crate::vertex::sampler::SampledVertex;

/// Describes events emitted while generating vertices.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum VertexEvent {
    /// Emitted once when a sampler is built.
    SamplerConfigured {
        /// Number of beamline segments.
        segments: usize,
        /// Total interaction probability.
        total_probability: f64,
        /// Selection strategy in use.
        selection_mode: SelectionMode,
    },

    /// Emitted for every accepted vertex.
    VertexGenerated {
        vertex: SampledVertex,
    },

    /// Emitted when a sampled point lies outside every material node.
    GeometryMiss {
        /// The rejected point.
        position: DVec3,
        /// Zero-based attempt counter within one event.
        attempt: usize,
    },

    /// Non-fatal warning.
    Warning {
        /// Context string (e.g. segment name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// A generic event sink that accepts [`VertexEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: VertexEvent);

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = VertexEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: VertexEvent) {}
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(VertexEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(VertexEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(VertexEvent),
{
    #[inline]
    fn send(&mut self, event: VertexEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<VertexEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<VertexEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[VertexEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected geometry misses.
    pub fn miss_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, VertexEvent::GeometryMiss { .. }))
            .count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: VertexEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: VertexEvent) {
        let Some((last, rest)) = self.sinks.split_last_mut() else {
            return;
        };
        for sink in rest {
            sink.send(event.clone());
        }
        last.send(event);
    }
}
