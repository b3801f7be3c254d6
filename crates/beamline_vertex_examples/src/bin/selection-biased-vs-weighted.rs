use beamline_vertex::prelude::*;
use beamline_vertex_examples::{init_tracing, materials, segment_frequencies};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Thin target upstream of a thick dump; the dump dominates weighted sampling.
    let mut beamline = Beamline::new()
        .with_object(BeamlineObject::new(
            "Target",
            -325.4,
            -274.6,
            materials::liquid_deuterium(),
        ))
        .with_object(BeamlineObject::new("BeamDump", 0.0, 503.0, materials::iron()));
    beamline.attenuate();

    let count = 50_000;
    for mode in [SelectionMode::Weighted, SelectionMode::Biased] {
        let config = VertexGenConfig::new().with_selection_mode(mode);
        let mut sampler = VertexSampler::<Volume>::new(beamline.clone(), config)?;
        let mut rng = StdRng::seed_from_u64(7);
        let result = sampler.generate_many(count, &mut rng)?;

        let weighted_sum: f64 = result.vertices.iter().map(|v| v.luminosity).sum();
        println!("{mode:?}: mean luminosity weight {:.6}", weighted_sum / count as f64);
        for (name, expected, observed) in segment_frequencies(sampler.beamline(), &result.vertices)
        {
            println!("  {name:<10} expected {expected:.5} observed {observed:.5}");
        }
    }

    Ok(())
}
