use super::config::SceneConfig;
use super::constants::*;
use super::entities::{AnimatedEntities, Floater, Pulse};
use super::error::SceneError;
use super::mesh;
use super::path::{Path, PathName};
use super::scene::{GeometryId, Lighting, Material, MaterialId, MeshNode, NodeId, SceneGraph, Transform};
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Result of the one-time world construction.
pub struct FactoryScene {
    pub graph: SceneGraph,
    /// Root transform of everything that moves with the pointer.
    pub group: NodeId,
    pub paths: Vec<Path>,
    pub entities: AnimatedEntities,
}

/// Places static geometry under one group and registers animated entities.
pub struct SceneBuilder<'r, R: Rng> {
    pub graph: SceneGraph,
    pub group: NodeId,
    pub entities: AnimatedEntities,
    rng: &'r mut R,
    line_material: MaterialId,
    floater_outer: Option<(GeometryId, MaterialId)>,
    floater_inner: Option<GeometryId>,
}

impl<'r, R: Rng> SceneBuilder<'r, R> {
    pub fn new(rng: &'r mut R) -> Self {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let group = graph.add_group(root, "factory", Transform::from_translation(GROUP_BASE_OFFSET));
        let line_material = graph.add_material(
            Material::basic(GLOW_COLOR)
                .translucent(GLOW_BASE)
                .with_emissive(1.0),
        );
        let entities = AnimatedEntities {
            line_material: Some(line_material),
            line_opacity: GLOW_BASE,
            ..AnimatedEntities::default()
        };
        Self {
            graph,
            group,
            entities,
            rng,
            line_material,
            floater_outer: None,
            floater_inner: None,
        }
    }

    pub fn line_material(&self) -> MaterialId {
        self.line_material
    }

    pub fn set_lighting(&mut self, lighting: Lighting) {
        self.graph.lighting = lighting;
    }

    /// Ground plane through y = 0, receiving shadows.
    pub fn create_ground(&mut self, size: f32) -> NodeId {
        let geometry = self.graph.add_geometry(mesh::plane_mesh(size, size));
        let material = self.graph.add_material(Material::standard(GROUND_COLOR));
        let transform = Transform {
            rotation: Quat::from_rotation_x(-FRAC_PI_2),
            ..Transform::default()
        };
        self.graph.add_mesh(
            self.group,
            "ground",
            transform,
            MeshNode {
                geometry,
                material,
                cast_shadow: false,
                receive_shadow: true,
            },
        )
    }

    /// Box whose base sits on the ground plane.
    pub fn create_building(&mut self, width: f32, height: f32, depth: f32, x: f32, z: f32) -> NodeId {
        let geometry = self.graph.add_geometry(mesh::box_mesh(width, height, depth));
        let material = self.graph.add_material(Material::standard(BUILDING_COLOR));
        self.graph.add_mesh(
            self.group,
            "building",
            Transform::from_translation(Vec3::new(x, height * 0.5, z)),
            MeshNode {
                geometry,
                material,
                cast_shadow: true,
                receive_shadow: true,
            },
        )
    }

    /// Cylinder whose base sits on the ground plane.
    pub fn create_silo(&mut self, radius: f32, height: f32, x: f32, z: f32) -> NodeId {
        let geometry = self.graph.add_geometry(mesh::cylinder_mesh(radius, radius, height, 32));
        let material = self.graph.add_material(Material::standard(SILO_COLOR));
        self.graph.add_mesh(
            self.group,
            "silo",
            Transform::from_translation(Vec3::new(x, height * 0.5, z)),
            MeshNode {
                geometry,
                material,
                cast_shadow: true,
                receive_shadow: true,
            },
        )
    }

    /// Thin glowing tube along `path`, drawn with the shared line material.
    /// The path's own points carry the small height above ground.
    pub fn create_circuit_path(&mut self, path: &Path) -> NodeId {
        let geometry = self.graph.add_geometry(mesh::tube_mesh(
            path,
            TUBE_TUBULAR_SEGMENTS,
            TUBE_RADIUS,
            TUBE_RADIAL_SEGMENTS,
        ));
        self.graph.add_mesh(
            self.group,
            "circuit",
            Transform::default(),
            MeshNode {
                geometry,
                material: self.line_material,
                cast_shadow: false,
                receive_shadow: false,
            },
        )
    }

    /// Two-disc marker tilted toward the isometric camera, registered with a
    /// random phase.
    pub fn create_floater(&mut self, x: f32, y: f32, z: f32) -> NodeId {
        let (outer_geometry, outer_material) = match self.floater_outer {
            Some(shared) => shared,
            None => {
                let g = self.graph.add_geometry(mesh::circle_mesh(FLOATER_OUTER_RADIUS, 32));
                let m = self.graph.add_material(Material::basic(FLOATER_OUTER_COLOR).translucent(0.9));
                self.floater_outer = Some((g, m));
                (g, m)
            }
        };
        let inner_geometry = match self.floater_inner {
            Some(g) => g,
            None => {
                let g = self.graph.add_geometry(mesh::circle_mesh(FLOATER_INNER_RADIUS, 32));
                self.floater_inner = Some(g);
                g
            }
        };
        // Each floater fades on its own phase, so the inner material is not shared.
        let inner_material = self.graph.add_material(
            Material::basic(FLOATER_INNER_COLOR)
                .translucent(1.0)
                .with_emissive(1.0),
        );

        let base = Vec3::new(x, y, z);
        let node = self.graph.add_group(
            self.group,
            "floater",
            Transform {
                translation: base,
                rotation: Quat::from_rotation_x(-FLOATER_TILT) * Quat::from_rotation_y(FLOATER_TILT),
                scale: Vec3::ONE,
            },
        );
        self.graph.add_mesh(
            node,
            "floater_outer",
            Transform::default(),
            MeshNode {
                geometry: outer_geometry,
                material: outer_material,
                cast_shadow: false,
                receive_shadow: false,
            },
        );
        self.graph.add_mesh(
            node,
            "floater_inner",
            Transform::from_translation(Vec3::new(0.0, 0.0, 0.01)),
            MeshNode {
                geometry: inner_geometry,
                material: inner_material,
                cast_shadow: false,
                receive_shadow: false,
            },
        );

        let phase = self.rng.gen_range(0.0..TAU);
        self.entities
            .floaters
            .push(Floater::new(node, inner_material, base, phase));
        node
    }

    /// `count` pulses on path `path_index`, evenly staggered along it.
    pub fn create_pulses(
        &mut self,
        path_index: usize,
        path: &Path,
        count: usize,
        speed_range: (f32, f32),
    ) -> Vec<NodeId> {
        if count == 0 {
            return Vec::new();
        }
        let geometry = self.graph.add_geometry(mesh::sphere_mesh(PULSE_RADIUS, 12, 8));
        let material = self
            .graph
            .add_material(Material::basic(PULSE_COLOR).with_emissive(1.0));
        let (lo, hi) = speed_range;
        (0..count)
            .map(|i| {
                let progress = i as f32 / count as f32;
                let speed = if hi > lo {
                    self.rng.gen_range(lo..hi)
                } else {
                    lo
                };
                let at = path.point_at(progress);
                let position = Vec3::new(at.x, PULSE_HEIGHT, at.z);
                let node = self.graph.add_mesh(
                    self.group,
                    "pulse",
                    Transform::from_translation(position),
                    MeshNode {
                        geometry,
                        material,
                        cast_shadow: false,
                        receive_shadow: false,
                    },
                );
                let mut pulse = Pulse::new(node, path_index, progress, speed);
                pulse.position = position;
                self.entities.pulses.push(pulse);
                node
            })
            .collect()
    }

    pub fn finish(self, paths: Vec<Path>) -> FactoryScene {
        FactoryScene {
            graph: self.graph,
            group: self.group,
            paths,
            entities: self.entities,
        }
    }
}

pub fn default_lighting() -> Lighting {
    Lighting {
        ambient_color: AMBIENT_COLOR,
        ambient_intensity: AMBIENT_INTENSITY,
        sun_color: SUN_COLOR,
        sun_intensity: SUN_INTENSITY,
        sun_position: SUN_POSITION,
        sun_target: Vec3::ZERO,
    }
}

/// Build the factory / silo / warehouse world. Deterministic for a given RNG state.
pub fn build_factory<R: Rng>(config: &SceneConfig, rng: &mut R) -> Result<FactoryScene, SceneError> {
    let paths = PathName::ALL
        .iter()
        .map(|name| Path::named(*name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut b = SceneBuilder::new(rng);
    b.set_lighting(default_lighting());
    b.create_ground(GROUND_SIZE);

    // Factory block
    b.create_building(3.0, 2.5, 2.5, -4.0, -4.6);
    b.create_building(1.5, 1.2, 1.5, -1.2, -5.2);
    // Silos
    b.create_silo(0.8, 3.0, 4.6, -2.4);
    b.create_silo(0.6, 2.2, 5.8, -0.6);
    // Warehouse
    b.create_building(4.0, 1.5, 2.5, 1.0, 5.8);

    for path in &paths {
        b.create_circuit_path(path);
    }
    for (i, path) in paths.iter().enumerate() {
        b.create_pulses(
            i,
            path,
            config.pulses_per_path,
            (config.pulse_speed_min, config.pulse_speed_max),
        );
    }

    b.create_floater(-4.0, 4.5, -4.6);
    b.create_floater(5.2, 4.8, -1.5);
    b.create_floater(1.0, 3.5, 5.8);

    Ok(b.finish(paths))
}
