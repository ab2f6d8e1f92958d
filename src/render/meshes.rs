use crate::core::scene::{GeometryId, SceneGraph};
use fnv::FnvHashMap;
use wgpu::util::DeviceExt;

pub(crate) struct GpuMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

/// Upload every geometry of the graph once. Geometry never changes after the
/// scene is built; animation only moves nodes and fades materials.
pub(crate) fn upload_geometries(
    device: &wgpu::Device,
    graph: &SceneGraph,
) -> FnvHashMap<GeometryId, GpuMesh> {
    let mut meshes = FnvHashMap::default();
    for (id, data) in graph.geometries() {
        if data.indices.is_empty() {
            continue;
        }
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_indices"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        meshes.insert(
            id,
            GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: data.indices.len() as u32,
            },
        );
    }
    log::info!("[gpu] uploaded {} meshes", meshes.len());
    meshes
}
