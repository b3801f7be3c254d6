use beamline_vertex::prelude::*;
use beamline_vertex_examples::{fixed_target_geometry, init_tracing};
use glam::DVec3;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let geometry = fixed_target_geometry();
    let probes = [
        DVec3::new(0.0, 0.0, -300.0),
        DVec3::new(0.0, 0.0, -274.6),
        DVec3::new(0.0, 0.0, -602.36),
        DVec3::new(0.0, 5.0, -602.36),
        DVec3::new(0.0, 0.0, 100.0),
        DVec3::new(0.0, 0.0, 5000.0),
    ];

    for p in probes {
        let at = format!("({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
        match resolve_at_point(&geometry, p) {
            Ok(node) => {
                let material = node.material().map(|m| m.name.as_str()).unwrap_or("-");
                println!("{at:>26} -> {:<16} {material}", node.name());
            }
            Err(e) => println!("{at:>26} -> {e}"),
        }
    }

    Ok(())
}
