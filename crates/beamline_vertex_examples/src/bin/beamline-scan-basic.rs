use beamline_vertex::prelude::*;
use beamline_vertex_examples::{fixed_target_geometry, init_tracing, print_segment_table};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Walk the beam axis from upstream of the collimator to the end of the dump.
    let geometry = fixed_target_geometry();
    let beamline = Beamline::scan(&geometry, BeamScan::new(-800.0, 600.0).with_step(0.5))?;

    let config =
        VertexGenConfig::new().with_profile(BeamProfile::new(0.0, 0.3, 0.0, 0.3)?);
    let mut sampler = VertexSampler::new(beamline, config)?.with_geometry(geometry);

    let mut rng = StdRng::seed_from_u64(2025);
    let result = sampler.generate_many(100_000, &mut rng)?;

    println!(
        "generated {} vertices ({} skipped), relative luminosity {:.6}",
        result.vertices.len(),
        result.events_skipped,
        sampler.relative_luminosity()?
    );
    print_segment_table(sampler.beamline(), &result.vertices);

    Ok(())
}
