//! Primary-vertex sampler.
use glam::{DVec2, DVec3};
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::beamline::{Beamline, BeamlineObject};
use crate::error::{Error, Result};
use crate::geometry::{resolve_at_point, GeometryNode, Material, Volume};
use crate::sampling::{rand01, BeamProfile, CumulativeTable};
use crate::vertex::config::{SelectionMode, VertexGenConfig};
use crate::vertex::events::{EventSink, VertexEvent};

/// Geometry node a vertex landed in.
#[derive(Debug, Clone, PartialEq)]
pub struct StruckNode {
    pub name: String,
    pub material: Material,
}

/// Everything known about one generated vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledVertex {
    /// Interaction point in cm.
    pub position: DVec3,
    /// Index of the selected beamline segment.
    pub segment_index: usize,
    pub segment_name: String,
    /// Proton fraction of the selected segment.
    pub proton_fraction: f64,
    /// Relative luminosity weight for this vertex. See [`VertexSampler::relative_luminosity`].
    pub luminosity: f64,
    /// Deepest material node at `position`, when geometry resolution ran.
    pub struck: Option<StruckNode>,
}

/// Outcome of [`VertexSampler::generate_many`].
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    /// Accepted vertices.
    pub vertices: Vec<SampledVertex>,
    /// Events requested.
    pub events_requested: usize,
    /// Events dropped after exhausting geometry re-sampling.
    pub events_skipped: usize,
}

/// Samples interaction vertices along a beamline.
///
/// The beamline and probability table are fixed at construction. Each call to
/// [`VertexSampler::generate_vertex`] only updates the remembered segment index,
/// which backs [`VertexSampler::proton_fraction`]. Use one sampler per thread.
#[derive(Debug, Clone)]
pub struct VertexSampler<G = Volume> {
    beamline: Beamline,
    table: CumulativeTable,
    config: VertexGenConfig,
    geometry: Option<G>,
    chosen_index: Option<usize>,
}

impl<G: GeometryNode> VertexSampler<G> {
    /// Build a sampler. Fails with [`Error::Configuration`] for an empty beamline, a
    /// non-positive total interaction probability, a proton fraction outside `[0, 1]`,
    /// or an invalid config.
    pub fn new(beamline: Beamline, config: VertexGenConfig) -> Result<Self> {
        Self::new_with_events(beamline, config, &mut ())
    }

    pub fn new_with_events(
        beamline: Beamline,
        config: VertexGenConfig,
        sink: &mut dyn EventSink,
    ) -> Result<Self> {
        config.validate()?;
        let table = CumulativeTable::build(beamline.weights())?;

        if let Some(obj) = beamline
            .iter()
            .find(|o| !(0.0..=1.0).contains(&o.proton_fraction))
        {
            return Err(Error::Configuration(format!(
                "segment '{}' has proton fraction {} outside [0, 1]",
                obj.name, obj.proton_fraction
            )));
        }

        for obj in beamline.iter().filter(|o| o.interaction_probability == 0.0) {
            warn!("Segment '{}' can never be selected.", obj.name);
            sink.send(VertexEvent::Warning {
                context: format!("segment:{}", obj.name),
                message: "zero interaction probability".into(),
            });
        }

        info!(
            segments = beamline.len(),
            total_probability = table.total(),
            mode = ?config.selection_mode,
            "Configured vertex sampler"
        );
        sink.send(VertexEvent::SamplerConfigured {
            segments: beamline.len(),
            total_probability: table.total(),
            selection_mode: config.selection_mode,
        });

        Ok(Self {
            beamline,
            table,
            config,
            geometry: None,
            chosen_index: None,
        })
    }

    /// Attach a geometry tree used to resolve the struck node of each vertex.
    pub fn with_geometry(mut self, root: G) -> Self {
        self.geometry = Some(root);
        self
    }

    pub fn beamline(&self) -> &Beamline {
        &self.beamline
    }

    pub fn table(&self) -> &CumulativeTable {
        &self.table
    }

    pub fn config(&self) -> &VertexGenConfig {
        &self.config
    }

    pub fn geometry(&self) -> Option<&G> {
        self.geometry.as_ref()
    }

    /// Index chosen by the most recent selection, if any.
    pub fn chosen_index(&self) -> Option<usize> {
        self.chosen_index
    }

    /// Recompute the cumulative table from the beamline. Idempotent.
    pub fn rebuild_probability_table(&mut self) -> Result<()> {
        self.table.rebuild(self.beamline.weights())
    }

    pub fn beam_profile(&self) -> &BeamProfile {
        &self.config.profile
    }

    /// Set all four beam-profile parameters.
    pub fn configure_beam_profile(
        &mut self,
        x_center: f64,
        x_width: f64,
        y_center: f64,
        y_width: f64,
    ) -> Result<()> {
        self.config
            .profile
            .configure(x_center, x_width, y_center, y_width)
    }

    pub fn x_center(&self) -> f64 {
        self.config.profile.x_center()
    }

    pub fn x_width(&self) -> f64 {
        self.config.profile.x_width()
    }

    pub fn y_center(&self) -> f64 {
        self.config.profile.y_center()
    }

    pub fn y_width(&self) -> f64 {
        self.config.profile.y_width()
    }

    pub fn set_x_center(&mut self, value: f64) -> Result<()> {
        self.config.profile.set_x_center(value)
    }

    pub fn set_x_width(&mut self, value: f64) -> Result<()> {
        self.config.profile.set_x_width(value)
    }

    pub fn set_y_center(&mut self, value: f64) -> Result<()> {
        self.config.profile.set_y_center(value)
    }

    pub fn set_y_width(&mut self, value: f64) -> Result<()> {
        self.config.profile.set_y_width(value)
    }

    /// Draw a transverse `(x, y)` from the beam profile.
    pub fn sample_transverse_position(&self, rng: &mut impl RngCore) -> DVec2 {
        self.config.profile.sample(rng)
    }

    /// Pick the interacting segment according to the selection mode and remember it.
    pub fn select_interacting_segment(&mut self, rng: &mut impl RngCore) -> Result<usize> {
        let index = self.pick_segment(rng)?;
        self.chosen_index = Some(index);
        Ok(index)
    }

    /// Weighted selection for an injected draw `u` in `[0, total]`, remembered like
    /// [`VertexSampler::select_interacting_segment`].
    pub fn select_with_draw(&mut self, u: f64) -> Result<usize> {
        let index = self.table.select(u)?;
        self.chosen_index = Some(index);
        Ok(index)
    }

    /// Deepest material node of the attached geometry containing `point`.
    pub fn resolve_geometry_at_point(&self, point: DVec3) -> Result<&G> {
        let root = self
            .geometry
            .as_ref()
            .ok_or_else(|| Error::Precondition("no geometry attached to sampler".into()))?;
        resolve_at_point(root, point)
    }

    /// Generate one vertex.
    pub fn generate_vertex(&mut self, rng: &mut impl RngCore) -> Result<SampledVertex> {
        self.generate_internal(rng, &mut ())
    }

    pub fn generate_vertex_with_events(
        &mut self,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<SampledVertex> {
        self.generate_internal(rng, sink)
    }

    /// Generate `count` events, skipping those that exhaust geometry re-sampling
    /// (see [`Error::is_per_event`]). Any other error aborts the batch.
    pub fn generate_many(
        &mut self,
        count: usize,
        rng: &mut impl RngCore,
    ) -> Result<GenerationResult> {
        self.generate_many_with_events(count, rng, &mut ())
    }

    pub fn generate_many_with_events(
        &mut self,
        count: usize,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<GenerationResult> {
        let mut result = GenerationResult {
            vertices: Vec::with_capacity(count),
            events_requested: count,
            events_skipped: 0,
        };
        for _ in 0..count {
            match self.generate_internal(rng, sink) {
                Ok(v) => result.vertices.push(v),
                Err(e) if e.is_per_event() => result.events_skipped += 1,
                Err(e) => return Err(e),
            }
        }
        info!(
            requested = count,
            accepted = result.vertices.len(),
            skipped = result.events_skipped,
            "Generated vertices"
        );
        Ok(result)
    }

    /// Proton fraction of the most recently chosen segment.
    pub fn proton_fraction(&self) -> Result<f64> {
        let obj = self.chosen()?;
        Ok(obj.proton_fraction)
    }

    /// Relative luminosity of the configuration.
    ///
    /// In [`SelectionMode::Weighted`] this is the total interaction probability, a global
    /// constant independent of the chosen segment. In [`SelectionMode::Biased`] it is the
    /// interaction probability of the chosen segment and needs a prior selection.
    pub fn relative_luminosity(&self) -> Result<f64> {
        match self.config.selection_mode {
            SelectionMode::Weighted => Ok(self.table.total()),
            SelectionMode::Biased => Ok(self.chosen()?.interaction_probability),
        }
    }

    fn chosen(&self) -> Result<&BeamlineObject> {
        let index = self.chosen_index.ok_or_else(|| {
            Error::Precondition("no segment has been selected yet".into())
        })?;
        self.segment(index)
    }

    fn segment(&self, index: usize) -> Result<&BeamlineObject> {
        self.beamline.get(index).ok_or_else(|| {
            Error::Sampling(format!(
                "segment index {index} out of range for {} segments",
                self.beamline.len()
            ))
        })
    }

    fn pick_segment(&self, rng: &mut dyn RngCore) -> Result<usize> {
        match self.config.selection_mode {
            SelectionMode::Weighted => self.table.draw(rng),
            SelectionMode::Biased => {
                let n = self.beamline.len();
                let index = (rand01(rng) * n as f64) as usize;
                Ok(index.min(n - 1))
            }
        }
    }

    fn luminosity_for(&self, segment: &BeamlineObject) -> f64 {
        match self.config.selection_mode {
            SelectionMode::Weighted => self.table.total(),
            SelectionMode::Biased => segment.interaction_probability,
        }
    }

    fn generate_internal(
        &mut self,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<SampledVertex> {
        // One selection per event; misses re-sample the position inside that segment only.
        let index = self.pick_segment(rng)?;
        self.chosen_index = Some(index);
        let segment = self.segment(index)?;
        let mut last_miss = None;

        for attempt in 0..=self.config.max_resample {
            let transverse = self.config.profile.sample(rng);
            let z = segment.sample_z(rand01(rng));
            let position = DVec3::new(transverse.x, transverse.y, z);

            let struck = match (&self.geometry, self.config.resolve_geometry) {
                (Some(root), true) => match resolve_at_point(root, position) {
                    Ok(node) => node.material().map(|m| StruckNode {
                        name: node.name().to_owned(),
                        material: m.clone(),
                    }),
                    Err(miss @ Error::GeometryMiss { .. }) => {
                        warn!(
                            attempt,
                            segment = %segment.name,
                            "Vertex ({:.4}, {:.4}, {:.4}) outside all material; re-sampling.",
                            position.x,
                            position.y,
                            position.z
                        );
                        sink.send(VertexEvent::GeometryMiss { position, attempt });
                        last_miss = Some(miss);
                        continue;
                    }
                    Err(e) => return Err(e),
                },
                _ => None,
            };

            let vertex = SampledVertex {
                position,
                segment_index: index,
                segment_name: segment.name.clone(),
                proton_fraction: segment.proton_fraction,
                luminosity: self.luminosity_for(segment),
                struck,
            };

            debug!(
                segment = %vertex.segment_name,
                x = position.x,
                y = position.y,
                z = position.z,
                "Generated vertex"
            );
            sink.send(VertexEvent::VertexGenerated {
                vertex: vertex.clone(),
            });
            return Ok(vertex);
        }

        Err(last_miss.unwrap_or_else(|| Error::Sampling("no sampling attempt was made".into())))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::geometry::Shape;
    use crate::sampling::test_rng::FixedRng;
    use crate::vertex::events::VecSink;

    fn material(name: &str, z: f64, a: f64) -> Material {
        Material::new(name, z, a, 1.0, 50.0)
    }

    fn three_segments() -> Beamline {
        Beamline::new()
            .with_object(
                BeamlineObject::new("up", 0.0, 10.0, material("H", 1.0, 1.0)).with_probability(1.0),
            )
            .with_object(
                BeamlineObject::new("mid", 10.0, 20.0, material("C", 6.0, 12.0))
                    .with_probability(2.0),
            )
            .with_object(
                BeamlineObject::new("down", 20.0, 30.0, material("Fe", 26.0, 56.0))
                    .with_probability(1.0),
            )
    }

    fn sampler() -> VertexSampler {
        VertexSampler::new(three_segments(), VertexGenConfig::default()).expect("valid")
    }

    #[test]
    fn empty_beamline_is_rejected() {
        let err = VertexSampler::<Volume>::new(Beamline::new(), VertexGenConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn zero_mass_beamline_is_rejected() {
        let beamline = Beamline::new().with_object(
            BeamlineObject::new("gap", 0.0, 1.0, Material::vacuum()).with_probability(0.0),
        );
        let err = VertexSampler::<Volume>::new(beamline, VertexGenConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn injected_draws_follow_boundary_law() {
        let mut s = sampler();
        assert_eq!(s.table().cumulative(), &[1.0, 3.0, 4.0]);
        assert_eq!(s.select_with_draw(0.5).unwrap(), 0);
        assert_eq!(s.select_with_draw(1.0).unwrap(), 1);
        assert_eq!(s.select_with_draw(3.0).unwrap(), 2);
        assert_eq!(s.select_with_draw(3.999).unwrap(), 2);
        assert_eq!(s.select_with_draw(4.0).unwrap(), 2);
        assert_eq!(s.chosen_index(), Some(2));
    }

    #[test]
    fn queries_before_generation_fail() {
        let s = sampler();
        assert!(matches!(s.proton_fraction(), Err(Error::Precondition(_))));
        // Weighted luminosity is a configuration constant.
        assert_eq!(s.relative_luminosity().unwrap(), 4.0);

        let biased = VertexSampler::<Volume>::new(
            three_segments(),
            VertexGenConfig::new().with_selection_mode(SelectionMode::Biased),
        )
        .unwrap();
        assert!(matches!(
            biased.relative_luminosity(),
            Err(Error::Precondition(_))
        ));
    }

    #[test]
    fn proton_fraction_tracks_chosen_segment() {
        let mut s = sampler();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let v = s.generate_vertex(&mut rng).unwrap();
            let expected = s.beamline().get(v.segment_index).unwrap().proton_fraction;
            assert_eq!(s.proton_fraction().unwrap(), expected);
            assert_eq!(v.proton_fraction, expected);
            assert_eq!(s.chosen_index(), Some(v.segment_index));
            assert_eq!(v.luminosity, 4.0);
        }
    }

    #[test]
    fn vertex_z_lies_in_chosen_segment() {
        let mut s = sampler();
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..500 {
            let v = s.generate_vertex(&mut rng).unwrap();
            let seg = s.beamline().get(v.segment_index).unwrap();
            assert!(v.position.z >= seg.z_up && v.position.z < seg.z_down);
            assert!(v.struck.is_none());
        }
    }

    #[test]
    fn biased_mode_reports_segment_luminosity() {
        let mut s = VertexSampler::<Volume>::new(
            three_segments(),
            VertexGenConfig::new().with_selection_mode(SelectionMode::Biased),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let mut counts = [0usize; 3];
        let n = 30_000;
        for _ in 0..n {
            let v = s.generate_vertex(&mut rng).unwrap();
            counts[v.segment_index] += 1;
            let p = s.beamline().get(v.segment_index).unwrap().interaction_probability;
            assert_eq!(v.luminosity, p);
            assert_eq!(s.relative_luminosity().unwrap(), p);
        }
        for c in counts {
            assert!((c as f64 / n as f64 - 1.0 / 3.0).abs() < 0.015);
        }
    }

    #[test]
    fn rebuild_is_idempotent() {
        let mut s = sampler();
        let before = s.table().clone();
        s.rebuild_probability_table().unwrap();
        s.rebuild_probability_table().unwrap();
        assert_eq!(s.table(), &before);
    }

    #[test]
    fn beam_profile_accessors_delegate() {
        let mut s = sampler();
        s.configure_beam_profile(0.1, 0.2, 0.3, 0.4).unwrap();
        assert_eq!(
            (s.x_center(), s.x_width(), s.y_center(), s.y_width()),
            (0.1, 0.2, 0.3, 0.4)
        );
        s.set_x_center(-1.0).unwrap();
        s.set_x_width(0.0).unwrap();
        s.set_y_center(2.0).unwrap();
        s.set_y_width(0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(s.sample_transverse_position(&mut rng), DVec2::new(-1.0, 2.0));
        assert!(s.set_y_width(f64::NAN).is_err());
    }

    #[test]
    fn resolve_requires_geometry() {
        let s = sampler();
        assert!(matches!(
            s.resolve_geometry_at_point(DVec3::ZERO),
            Err(Error::Precondition(_))
        ));
    }

    #[test]
    fn geometry_resolution_names_struck_node() {
        let root = Volume::world("World").with_child(
            Volume::new(
                "Slab",
                Shape::cuboid(DVec3::new(0.0, 0.0, 15.0), DVec3::new(100.0, 100.0, 30.0)),
            )
            .with_material(material("C", 6.0, 12.0)),
        );
        let mut s = sampler().with_geometry(root);
        let mut rng = StdRng::seed_from_u64(14);
        let v = s.generate_vertex(&mut rng).unwrap();
        let struck = v.struck.expect("geometry resolved");
        assert_eq!(struck.name, "Slab");
        assert_eq!(struck.material.name, "C");
    }

    #[test]
    fn persistent_geometry_miss_is_reported_after_resampling() {
        let root = Volume::new(
            "Elsewhere",
            Shape::cuboid(DVec3::new(0.0, 0.0, 1000.0), DVec3::splat(1.0)),
        )
        .with_material(material("C", 6.0, 12.0));
        let config = VertexGenConfig::new().with_max_resample(3);
        let mut s = VertexSampler::new(three_segments(), config)
            .unwrap()
            .with_geometry(root);
        let mut rng = StdRng::seed_from_u64(15);
        let mut sink = VecSink::new();

        let err = s.generate_vertex_with_events(&mut rng, &mut sink).unwrap_err();
        assert!(matches!(err, Error::GeometryMiss { .. }));
        assert_eq!(sink.miss_count(), 4);
        // The event's segment stays chosen even though no vertex was produced.
        assert!(s.chosen_index().is_some());

        let batch = s.generate_many(5, &mut rng).unwrap();
        assert_eq!(batch.events_requested, 5);
        assert_eq!(batch.events_skipped, 5);
        assert!(batch.vertices.is_empty());
    }

    #[test]
    fn disabled_resolution_skips_geometry() {
        let root = Volume::new("Elsewhere", Shape::cuboid(DVec3::splat(1000.0), DVec3::ONE));
        let config = VertexGenConfig::new().with_resolve_geometry(false);
        let mut s = VertexSampler::new(three_segments(), config)
            .unwrap()
            .with_geometry(root);
        let mut rng = StdRng::seed_from_u64(16);
        assert!(s.generate_vertex(&mut rng).is_ok());
    }

    #[test]
    fn same_seed_reproduces_vertices() {
        let mut a = sampler();
        let mut b = sampler();
        let mut rng_a = StdRng::seed_from_u64(77);
        let mut rng_b = StdRng::seed_from_u64(77);
        let va = a.generate_many(64, &mut rng_a).unwrap().vertices;
        let vb = b.generate_many(64, &mut rng_b).unwrap().vertices;
        assert_eq!(va, vb);
    }

    #[test]
    fn sampler_emits_configuration_event() {
        let mut sink = VecSink::new();
        let beamline = three_segments().with_object(
            BeamlineObject::new("dead", 30.0, 31.0, Material::vacuum()).with_probability(0.0),
        );
        VertexSampler::<Volume>::new_with_events(beamline, VertexGenConfig::default(), &mut sink)
            .unwrap();
        let events = sink.into_inner();
        assert!(matches!(events[0], VertexEvent::Warning { .. }));
        assert!(matches!(
            events[1],
            VertexEvent::SamplerConfigured { segments: 4, .. }
        ));
    }

    #[test]
    fn select_interacting_segment_follows_weights() {
        let mut s = sampler();
        assert_eq!(s.chosen_index(), None);
        let mut rng = StdRng::seed_from_u64(31);
        let n = 40_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            let index = s.select_interacting_segment(&mut rng).unwrap();
            assert_eq!(s.chosen_index(), Some(index));
            counts[index] += 1;
        }
        for (count, weight) in counts.iter().zip([1.0, 2.0, 1.0]) {
            let observed = *count as f64 / n as f64;
            assert!((observed - weight / 4.0).abs() < 0.01, "observed {observed}");
        }
    }

    #[test]
    fn select_interacting_segment_maps_fixed_draws() {
        let mut s = sampler();
        // rand01 gives 0.0, 0.5 and just below 1.0, so u = 0, 2 and ~4 of a total of 4.
        let index = s.select_interacting_segment(&mut FixedRng { value: 0 }).unwrap();
        assert_eq!(index, 0);
        assert_eq!(s.proton_fraction().unwrap(), 1.0);

        let index = s
            .select_interacting_segment(&mut FixedRng { value: 1 << 63 })
            .unwrap();
        assert_eq!(index, 1);
        assert_eq!(s.proton_fraction().unwrap(), 0.5);

        let index = s
            .select_interacting_segment(&mut FixedRng { value: u64::MAX })
            .unwrap();
        assert_eq!(index, 2);
        assert_eq!(s.chosen_index(), Some(2));
        assert_eq!(s.proton_fraction().unwrap(), 26.0 / 56.0);
    }

    #[test]
    fn biased_selection_is_uniform_over_segments() {
        let mut s = VertexSampler::<Volume>::new(
            three_segments(),
            VertexGenConfig::new().with_selection_mode(SelectionMode::Biased),
        )
        .unwrap();

        assert_eq!(s.select_interacting_segment(&mut FixedRng { value: 0 }).unwrap(), 0);
        assert_eq!(
            s.select_interacting_segment(&mut FixedRng { value: 1 << 63 })
                .unwrap(),
            1
        );
        assert_eq!(
            s.select_interacting_segment(&mut FixedRng { value: u64::MAX })
                .unwrap(),
            2
        );
        assert_eq!(s.relative_luminosity().unwrap(), 1.0);

        let mut rng = StdRng::seed_from_u64(32);
        let n = 30_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            let index = s.select_interacting_segment(&mut rng).unwrap();
            counts[index] += 1;
            let p = s.beamline().get(index).unwrap().interaction_probability;
            assert_eq!(s.relative_luminosity().unwrap(), p);
        }
        for c in counts {
            assert!((c as f64 / n as f64 - 1.0 / 3.0).abs() < 0.015);
        }
    }

    #[test]
    fn geometry_misses_keep_the_selected_segment() {
        let beamline = Beamline::new()
            .with_object(
                BeamlineObject::new("thin", 0.0, 10.0, material("C", 6.0, 12.0))
                    .with_probability(1.0),
            )
            .with_object(
                BeamlineObject::new("wide", 10.0, 20.0, material("Fe", 26.0, 56.0))
                    .with_probability(1.0),
            );
        // The thin rod is narrower than the beam, so most of its draws miss.
        let root = Volume::world("World").with_children([
            Volume::new("thin", Shape::cylinder(DVec3::new(0.0, 0.0, 5.0), 0.1, 10.0))
                .with_material(material("C", 6.0, 12.0)),
            Volume::new(
                "wide",
                Shape::cuboid(DVec3::new(0.0, 0.0, 15.0), DVec3::new(100.0, 100.0, 10.0)),
            )
            .with_material(material("Fe", 26.0, 56.0)),
        ]);
        let mut s = VertexSampler::new(beamline, VertexGenConfig::default())
            .unwrap()
            .with_geometry(root);
        let mut rng = StdRng::seed_from_u64(21);
        let mut sink = VecSink::new();

        let n = 20_000;
        let mut selected = [0usize; 2];
        let mut skipped = 0;
        for _ in 0..n {
            let outcome = s.generate_vertex_with_events(&mut rng, &mut sink);
            let index = s.chosen_index().expect("every event selects a segment");
            selected[index] += 1;
            match outcome {
                Ok(v) => {
                    assert_eq!(v.segment_index, index);
                    assert_eq!(v.struck.expect("resolved").name, v.segment_name);
                }
                Err(e) => {
                    assert!(e.is_per_event());
                    assert_eq!(index, 0);
                    skipped += 1;
                }
            }
        }

        assert!(skipped > 0);
        assert!(sink.miss_count() > skipped);
        let fraction = selected[0] as f64 / n as f64;
        assert!((fraction - 0.5).abs() < 0.015, "thin fraction {fraction}");
        assert_eq!(s.relative_luminosity().unwrap(), 2.0);
    }

    #[test]
    fn out_of_range_proton_fraction_is_rejected() {
        for value in [1.5, -0.1, f64::NAN] {
            let mut bad = BeamlineObject::new("bad", 30.0, 31.0, material("X", 1.0, 2.0))
                .with_probability(1.0);
            bad.proton_fraction = value;
            let err = VertexSampler::<Volume>::new(
                three_segments().with_object(bad),
                VertexGenConfig::default(),
            )
            .unwrap_err();
            assert!(matches!(err, Error::Configuration(_)), "value {value}");
        }
    }
}
