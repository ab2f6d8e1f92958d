mod common;

use common::core::mesh::box_mesh;
use common::core::scene::{Material, MeshNode, SceneGraph, Transform};
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

fn mesh_node(graph: &mut SceneGraph) -> MeshNode {
    MeshNode {
        geometry: graph.add_geometry(box_mesh(1.0, 1.0, 1.0)),
        material: graph.add_material(Material::standard([0.5; 3])),
        cast_shadow: true,
        receive_shadow: false,
    }
}

#[test]
fn world_matrix_composes_parent_chain() {
    let mut g = SceneGraph::new();
    let root = g.root();
    let parent = g.add_group(
        root,
        "parent",
        Transform {
            translation: Vec3::new(2.0, 0.0, 0.0),
            rotation: Quat::from_rotation_y(FRAC_PI_2),
            scale: Vec3::ONE,
        },
    );
    let m = mesh_node(&mut g);
    let child = g.add_mesh(parent, "child", Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)), m);

    // Child +x rotated a quarter turn about y becomes -z, then offset by the parent.
    let p = g.world_matrix(child).transform_point3(Vec3::ZERO);
    assert!(p.abs_diff_eq(Vec3::new(2.0, 0.0, -1.0), 1e-5), "{p:?}");
    assert_eq!(g.node(child).unwrap().parent(), Some(parent));
    assert_eq!(g.node(parent).unwrap().children(), &[child]);
}

#[test]
fn draw_items_skip_groups_and_hidden_subtrees() {
    let mut g = SceneGraph::new();
    let root = g.root();
    let shown = g.add_group(root, "shown", Transform::default());
    let hidden = g.add_group(root, "hidden", Transform::default());
    let m = mesh_node(&mut g);
    let a = g.add_mesh(shown, "a", Transform::default(), m);
    let b = g.add_mesh(shown, "b", Transform::default(), m);
    g.add_mesh(hidden, "c", Transform::default(), m);
    g.node_mut(hidden).unwrap().visible = false;

    let items = g.draw_items();
    assert_eq!(items.iter().map(|d| d.node).collect::<Vec<_>>(), [a, b]);
    assert_eq!(g.mesh_count(), 3);
    assert_eq!(g.node_count(), 6);
}

#[test]
fn draw_item_world_matches_world_matrix() {
    let mut g = SceneGraph::new();
    let root = g.root();
    let group = g.add_group(root, "group", Transform::from_translation(Vec3::new(2.0, 0.3, 0.0)));
    let m = mesh_node(&mut g);
    let id = g.add_mesh(group, "box", Transform::from_translation(Vec3::new(-4.0, 1.25, -4.6)), m);
    g.set_translation(group, Vec3::new(2.1, -0.2, 0.05));

    let items = g.draw_items();
    assert_eq!(items.len(), 1);
    assert!(items[0].world.abs_diff_eq(g.world_matrix(id), 1e-6));
    let origin = items[0].world.transform_point3(Vec3::ZERO);
    assert!(origin.abs_diff_eq(Vec3::new(-1.9, 1.05, -4.55), 1e-5));
}

#[test]
fn shared_material_opacity_updates_once() {
    let mut g = SceneGraph::new();
    let mat = g.add_material(Material::basic([0.2, 0.85, 1.0]).translucent(0.6));
    let root = g.root();
    let geometry = g.add_geometry(box_mesh(1.0, 1.0, 1.0));
    for _ in 0..3 {
        g.add_mesh(
            root,
            "tube",
            Transform::default(),
            MeshNode {
                geometry,
                material: mat,
                cast_shadow: false,
                receive_shadow: false,
            },
        );
    }
    g.set_opacity(mat, 0.25);
    assert!(g.draw_items().iter().all(|d| d.mesh.material == mat));
    assert_eq!(g.material(mat).unwrap().opacity, 0.25);
}

#[test]
fn translucent_clamps_opacity() {
    let m = Material::standard([1.0; 3]).translucent(1.7);
    assert!(m.transparent);
    assert_eq!(m.opacity, 1.0);
    assert!(!Material::basic([1.0; 3]).lit);
}
