use super::path::Path;
use glam::{Quat, Vec3};
use std::f32::consts::{PI, TAU};

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    #[inline]
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Indexed triangle list in the mesh's local space.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as (min, max); `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from(v.position));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    #[inline]
    fn push(&mut self, position: Vec3, normal: Vec3) -> u32 {
        self.vertices.push(Vertex::new(position, normal));
        (self.vertices.len() - 1) as u32
    }
}

/// Box centred on the origin.
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let half = Vec3::new(width, height, depth) * 0.5;
    let faces = [
        (Vec3::X, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z),
        (Vec3::Y, Vec3::X),
        (Vec3::NEG_Y, Vec3::X),
        (Vec3::Z, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y),
    ];
    let mut mesh = MeshData::default();
    for (n, u) in faces {
        // u x v == n keeps every face counter-clockwise seen from outside.
        let v = n.cross(u);
        let hn = n.abs().dot(half);
        let hu = u.abs().dot(half);
        let hv = v.abs().dot(half);
        let centre = n * hn;
        let base = mesh.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.push(centre + u * (hu * su) + v * (hv * sv), n);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Capped cylinder (or truncated cone) centred on the origin, axis along +Y.
pub fn cylinder_mesh(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: usize,
) -> MeshData {
    let segments = radial_segments.max(3);
    let half_h = height * 0.5;
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };
    let mut mesh = MeshData::default();

    // Side: two rings, top then bottom.
    let mut rows = [Vec::with_capacity(segments + 1), Vec::with_capacity(segments + 1)];
    for (row, (y, r)) in [(half_h, radius_top), (-half_h, radius_bottom)]
        .into_iter()
        .enumerate()
    {
        for x in 0..=segments {
            let theta = x as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            let normal = Vec3::new(sin, slope, cos).normalize();
            rows[row].push(mesh.push(Vec3::new(r * sin, y, r * cos), normal));
        }
    }
    for x in 0..segments {
        let a = rows[0][x];
        let b = rows[1][x];
        let c = rows[1][x + 1];
        let d = rows[0][x + 1];
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    // Caps.
    for (y, r, normal) in [(half_h, radius_top, Vec3::Y), (-half_h, radius_bottom, Vec3::NEG_Y)] {
        if r <= 0.0 {
            continue;
        }
        let centre = mesh.push(Vec3::new(0.0, y, 0.0), normal);
        let first = mesh.vertices.len() as u32;
        for x in 0..=segments {
            let theta = x as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.push(Vec3::new(r * sin, y, r * cos), normal);
        }
        for x in 0..segments as u32 {
            if normal.y > 0.0 {
                mesh.indices
                    .extend_from_slice(&[first + x, first + x + 1, centre]);
            } else {
                mesh.indices
                    .extend_from_slice(&[first + x + 1, first + x, centre]);
            }
        }
    }
    mesh
}

/// Flat disc in the XY plane facing +Z.
pub fn circle_mesh(radius: f32, segments: usize) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::default();
    let centre = mesh.push(Vec3::ZERO, Vec3::Z);
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        mesh.push(Vec3::new(radius * cos, radius * sin, 0.0), Vec3::Z);
    }
    for i in 1..=segments as u32 {
        mesh.indices.extend_from_slice(&[i, i + 1, centre]);
    }
    mesh
}

/// Rectangle in the XY plane facing +Z.
pub fn plane_mesh(width: f32, height: f32) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let mut mesh = MeshData::default();
    for (x, y) in [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)] {
        mesh.push(Vec3::new(x, y, 0.0), Vec3::Z);
    }
    mesh.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);
    mesh
}

/// UV sphere centred on the origin.
pub fn sphere_mesh(radius: f32, width_segments: usize, height_segments: usize) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::default();
    let mut grid = Vec::with_capacity(hs + 1);
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let mut row = Vec::with_capacity(ws + 1);
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let dir = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            let normal = dir.try_normalize().unwrap_or(Vec3::Y);
            row.push(mesh.push(dir * radius, normal));
        }
        grid.push(row);
    }
    for iy in 0..hs {
        for ix in 0..ws {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Rotation-minimizing frames along a path: (tangent, normal, binormal) per sample.
pub fn path_frames(path: &Path, segments: usize) -> Vec<(Vec3, Vec3, Vec3)> {
    let segments = segments.max(1);
    let tangents = (0..=segments)
        .map(|i| path.tangent_at(i as f32 / segments as f32))
        .collect::<Vec<_>>();

    // Start from the world axis least aligned with the first tangent.
    let t0 = tangents[0];
    let a = t0.abs();
    let axis = if a.x <= a.y && a.x <= a.z {
        Vec3::X
    } else if a.y <= a.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let side = t0.cross(axis).normalize();
    let mut normal = t0.cross(side);
    let mut frames = Vec::with_capacity(segments + 1);
    frames.push((t0, normal, t0.cross(normal)));

    for i in 1..=segments {
        let prev = tangents[i - 1];
        let cur = tangents[i];
        let rot_axis = prev.cross(cur);
        if rot_axis.length() > f32::EPSILON {
            let theta = prev.dot(cur).clamp(-1.0, 1.0).acos();
            normal = Quat::from_axis_angle(rot_axis.normalize(), theta) * normal;
        }
        frames.push((cur, normal, cur.cross(normal)));
    }
    frames
}

/// Open tube of constant radius swept along `path`.
///
/// Produces `(tubular + 1) * (radial + 1)` vertices and
/// `tubular * radial * 2` triangles.
pub fn tube_mesh(path: &Path, tubular_segments: usize, radius: f32, radial_segments: usize) -> MeshData {
    let tubular = tubular_segments.max(1);
    let radial = radial_segments.max(3);
    let frames = path_frames(path, tubular);
    let mut mesh = MeshData::default();

    for (i, (_, n, b)) in frames.iter().enumerate() {
        let centre = path.point_at(i as f32 / tubular as f32);
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let sin = v.sin();
            let cos = -v.cos();
            let normal = (*n * cos + *b * sin).normalize();
            mesh.push(centre + normal * radius, normal);
        }
    }

    let stride = (radial + 1) as u32;
    for i in 1..=tubular as u32 {
        for j in 1..=radial as u32 {
            let a = stride * (i - 1) + (j - 1);
            let b = stride * i + (j - 1);
            let c = stride * i + j;
            let d = stride * (i - 1) + j;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}
