use beamline_vertex::prelude::*;
use glam::DVec3;

/// Materials used by the demo geometry.
pub mod materials {
    use beamline_vertex::prelude::Material;

    pub fn liquid_hydrogen() -> Material {
        Material::new("LH2", 1.0, 1.00794, 0.0708, 734.0)
    }

    pub fn liquid_deuterium() -> Material {
        Material::new("LD2", 1.0, 2.014, 0.163, 342.7)
    }

    pub fn iron() -> Material {
        Material::new("Iron", 26.0, 55.845, 7.874, 16.77)
    }

    pub fn copper() -> Material {
        Material::new("Copper", 29.0, 63.546, 8.96, 15.32)
    }

    pub fn stainless() -> Material {
        Material::new("Stainless", 25.8, 55.4, 8.0, 16.6)
    }

    pub fn air() -> Material {
        Material::new("Air", 7.3, 14.6, 0.0012, 71_000.0)
    }
}

/// A fixed-target hall: flask windows around a liquid target, a collimator with a
/// beam hole, and a solid iron beam dump, all in air.
pub fn fixed_target_geometry() -> Volume {
    let target_z = -300.0;
    let target_length = 50.8;
    let window = 0.0127;

    let flask = Volume::new(
        "TargetFlask",
        Shape::cylinder(DVec3::new(0.0, 0.0, target_z), 3.81, target_length + 2.0 * window),
    )
    .with_material(materials::stainless())
    .with_child(
        Volume::new(
            "Target",
            Shape::cylinder(DVec3::new(0.0, 0.0, target_z), 3.81, target_length),
        )
        .with_material(materials::liquid_hydrogen()),
    );

    let collimator = Volume::new(
        "Collimator",
        Shape::cuboid(DVec3::new(0.0, 0.0, -602.36), DVec3::new(20.0, 20.0, 20.0)),
    )
    .with_material(materials::copper())
    .with_child(
        Volume::new(
            "CollimatorHole",
            Shape::cuboid(DVec3::new(0.0, 0.0, -602.36), DVec3::new(2.2, 1.0, 20.0)),
        )
        .with_material(Material::vacuum()),
    );

    let dump = Volume::new(
        "BeamDump",
        Shape::cuboid(DVec3::new(0.0, 0.0, 251.5), DVec3::new(160.0, 160.0, 503.0)),
    )
    .with_material(materials::iron());

    Volume::world("World").with_child(
        Volume::new("Hall", Shape::cuboid(DVec3::ZERO, DVec3::new(1000.0, 1000.0, 3000.0)))
            .with_material(materials::air())
            .with_children([collimator, flask, dump]),
    )
}
