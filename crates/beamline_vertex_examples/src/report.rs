use beamline_vertex::prelude::*;

/// Per-segment `(name, expected fraction, observed fraction)`.
pub fn segment_frequencies(
    beamline: &Beamline,
    vertices: &[SampledVertex],
) -> Vec<(String, f64, f64)> {
    let total: f64 = beamline.weights().sum();
    let mut counts = vec![0usize; beamline.len()];
    for v in vertices {
        if let Some(c) = counts.get_mut(v.segment_index) {
            *c += 1;
        }
    }
    let n = vertices.len().max(1) as f64;

    beamline
        .iter()
        .zip(counts)
        .map(|(obj, count)| {
            let expected = if total > 0.0 {
                obj.interaction_probability / total
            } else {
                0.0
            };
            (obj.name.clone(), expected, count as f64 / n)
        })
        .collect()
}

pub fn print_segment_table(beamline: &Beamline, vertices: &[SampledVertex]) {
    println!(
        "{:<16} {:>10} {:>10} {:>9} {:>9} {:>8}",
        "segment", "z_up", "z_down", "expected", "observed", "Z/A"
    );
    for ((name, expected, observed), obj) in segment_frequencies(beamline, vertices)
        .into_iter()
        .zip(beamline.iter())
    {
        println!(
            "{:<16} {:>10.3} {:>10.3} {:>9.5} {:>9.5} {:>8.4}",
            name, obj.z_up, obj.z_down, expected, observed, obj.proton_fraction
        );
    }
}
