use super::mesh::MeshData;
use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryId(pub usize);

/// Surface description shared by any number of meshes.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub transparent: bool,
    /// Shaded by the scene lights; unlit materials draw their flat colour.
    pub lit: bool,
    pub emissive: f32,
}

impl Material {
    pub fn standard(color: [f32; 3]) -> Self {
        Self {
            color,
            opacity: 1.0,
            transparent: false,
            lit: true,
            emissive: 0.0,
        }
    }

    pub fn basic(color: [f32; 3]) -> Self {
        Self {
            lit: false,
            ..Self::standard(color)
        }
    }

    pub fn translucent(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshNode {
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(MeshNode),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: &'static str,
    pub transform: Transform,
    pub visible: bool,
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Ambient fill plus one directional "sun".
#[derive(Clone, Debug, PartialEq)]
pub struct Lighting {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub sun_color: [f32; 3],
    pub sun_intensity: f32,
    /// Sun position; light travels from here toward `sun_target`.
    pub sun_position: Vec3,
    pub sun_target: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_color: [1.0; 3],
            ambient_intensity: 0.0,
            sun_color: [1.0; 3],
            sun_intensity: 0.0,
            sun_position: Vec3::Y,
            sun_target: Vec3::ZERO,
        }
    }
}

impl Lighting {
    /// Unit direction the sunlight travels in.
    pub fn sun_direction(&self) -> Vec3 {
        (self.sun_target - self.sun_position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Y)
    }
}

/// One resolved mesh ready to draw.
#[derive(Clone, Copy, Debug)]
pub struct DrawItem {
    pub node: NodeId,
    pub world: Mat4,
    pub mesh: MeshNode,
}

/// Arena-backed scene graph: nodes, shared materials and geometries.
///
/// Node 0 is the root group. Children inherit their parent's transform and
/// visibility.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    materials: Vec<Material>,
    geometries: Vec<MeshData>,
    pub lighting: Lighting,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: "root",
                transform: Transform::default(),
                visible: true,
                kind: NodeKind::Group,
                parent: None,
                children: SmallVec::new(),
            }],
            materials: Vec::new(),
            geometries: Vec::new(),
            lighting: Lighting::default(),
        }
    }

    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn add_geometry(&mut self, mesh: MeshData) -> GeometryId {
        self.geometries.push(mesh);
        GeometryId(self.geometries.len() - 1)
    }

    pub fn add_group(&mut self, parent: NodeId, name: &'static str, transform: Transform) -> NodeId {
        self.add_node(parent, name, transform, NodeKind::Group)
    }

    pub fn add_mesh(
        &mut self,
        parent: NodeId,
        name: &'static str,
        transform: Transform,
        mesh: MeshNode,
    ) -> NodeId {
        self.add_node(parent, name, transform, NodeKind::Mesh(mesh))
    }

    fn add_node(
        &mut self,
        parent: NodeId,
        name: &'static str,
        transform: Transform,
        kind: NodeKind,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            transform,
            visible: true,
            kind,
            parent: Some(parent),
            children: SmallVec::new(),
        });
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&MeshData> {
        self.geometries.get(id.0)
    }

    pub fn geometries(&self) -> impl Iterator<Item = (GeometryId, &MeshData)> {
        self.geometries
            .iter()
            .enumerate()
            .map(|(i, g)| (GeometryId(i), g))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Mesh(_)))
            .count()
    }

    pub fn set_translation(&mut self, id: NodeId, translation: Vec3) {
        if let Some(n) = self.nodes.get_mut(id.0) {
            n.transform.translation = translation;
        }
    }

    pub fn set_opacity(&mut self, id: MaterialId, opacity: f32) {
        if let Some(m) = self.materials.get_mut(id.0) {
            m.opacity = opacity;
        }
    }

    /// World matrix of a node: parent chain composed root-first.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        let mut cur = Some(id);
        while let Some(c) = cur {
            match self.nodes.get(c.0) {
                Some(n) => {
                    m = n.transform.matrix() * m;
                    cur = n.parent;
                }
                None => break,
            }
        }
        m
    }

    /// Every visible mesh with its world matrix, in depth-first order.
    pub fn draw_items(&self) -> Vec<DrawItem> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, Mat4)> = vec![(self.root(), Mat4::IDENTITY)];
        while let Some((id, parent_world)) = stack.pop() {
            let node = &self.nodes[id.0];
            if !node.visible {
                continue;
            }
            let world = parent_world * node.transform.matrix();
            if let NodeKind::Mesh(mesh) = node.kind {
                out.push(DrawItem {
                    node: id,
                    world,
                    mesh,
                });
            }
            // Reverse so children come out in insertion order.
            for child in node.children.iter().rev() {
                stack.push((*child, world));
            }
        }
        out
    }
}
