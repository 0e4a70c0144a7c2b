//! Model, mesh, blend shape and material views.

use super::{first, indices, names, relations, resolve_views, Skeleton};
use crate::util::{Result, Vec2, Vec3};

node_view! {
    /// Top-level model grouping meshes, a skeleton and materials.
    Model => Model
}

node_view! {
    /// Vertex and face buffers. Its material is one of its own children.
    Mesh => Mesh
}

node_view! {
    /// Blend shape; base and target meshes are its own children.
    BlendShape => BlendShape
}

node_view! {
    /// Material; texture slots reference its file children.
    Material => Material
}

node_view! {
    /// External file (usually a texture) referenced by path.
    MaterialFile => File
}

impl<'a> Model<'a> {
    pub fn meshes(&self) -> Vec<Mesh<'a>> {
        self.0.children().filter_map(Mesh::new).collect()
    }

    pub fn skeleton(&self) -> Option<Skeleton<'a>> {
        self.0.children().find_map(Skeleton::new)
    }

    pub fn materials(&self) -> Vec<Material<'a>> {
        self.0.children().filter_map(Material::new).collect()
    }

    pub fn blend_shapes(&self) -> Vec<BlendShape<'a>> {
        self.0.children().filter_map(BlendShape::new).collect()
    }
}

impl<'a> Mesh<'a> {
    pub fn positions(&self) -> Result<&'a [Vec3]> {
        self.0.node().values(names::VERTEX_POSITION_BUFFER)
    }

    pub fn normals(&self) -> Result<&'a [Vec3]> {
        self.0.node().values(names::VERTEX_NORMAL_BUFFER)
    }

    pub fn tangents(&self) -> Result<&'a [Vec3]> {
        self.0.node().values(names::VERTEX_TANGENT_BUFFER)
    }

    /// Packed RGBA colors.
    pub fn colors(&self) -> Result<&'a [u32]> {
        self.0.node().values(names::VERTEX_COLOR_BUFFER)
    }

    pub fn uv_layer_count(&self) -> usize {
        first::<u8>(&self.0, names::UV_LAYER_COUNT).map_or(0, usize::from)
    }

    pub fn uv_layer(&self, layer: usize) -> Result<&'a [Vec2]> {
        self.0.node().values(&names::vertex_uv_buffer(layer))
    }

    pub fn maximum_weight_influence(&self) -> Option<u8> {
        first(&self.0, names::MAXIMUM_WEIGHT_INFLUENCE)
    }

    pub fn skinning_method(&self) -> Option<&'a str> {
        self.0.node().string(names::SKINNING_METHOD).ok()
    }

    /// Face indices widened to u32.
    pub fn faces(&self) -> Result<Vec<u32>> {
        indices(&self.0, names::FACE_BUFFER)
    }

    /// Bone index per weight, `maximum_weight_influence` entries per vertex.
    pub fn weight_bones(&self) -> Result<Vec<u32>> {
        indices(&self.0, names::VERTEX_WEIGHT_BONE_BUFFER)
    }

    /// Weight values, laid out like [`weight_bones`](Self::weight_bones).
    pub fn weight_values(&self) -> Result<&'a [f32]> {
        self.0.node().values(names::VERTEX_WEIGHT_VALUE_BUFFER)
    }

    pub fn material(&self) -> Option<Material<'a>> {
        self.0.resolve(relations::MESH_MATERIAL).and_then(Material::new)
    }
}

impl<'a> BlendShape<'a> {
    pub fn base_shape(&self) -> Option<Mesh<'a>> {
        self.0.resolve(relations::BLEND_SHAPE_BASE).and_then(Mesh::new)
    }

    pub fn target_shapes(&self) -> Vec<Mesh<'a>> {
        resolve_views(&self.0, relations::BLEND_SHAPE_TARGETS, Mesh::new)
    }

    pub fn target_weight_scales(&self) -> Result<&'a [f32]> {
        self.0.node().values(names::TARGET_WEIGHT_SCALE)
    }
}

impl<'a> Material<'a> {
    /// Shading model name ("pbr", ...).
    pub fn material_type(&self) -> Option<&'a str> {
        self.0.node().string(names::TYPE).ok()
    }

    /// File referenced by a texture slot property such as "albedo".
    pub fn slot(&self, slot: &'static str) -> Option<MaterialFile<'a>> {
        self.0.resolve(relations::material_slot(slot)).and_then(MaterialFile::new)
    }

    /// Every slot whose value resolves to one of this material's files.
    pub fn slots(&self) -> Vec<(&'a str, MaterialFile<'a>)> {
        let node = self.0.node();
        node.properties()
            .filter_map(|p| {
                let slot = p.name_str().ok()?;
                if slot == names::NAME || slot == names::TYPE {
                    return None;
                }
                let &hash = p.first::<u64>().ok()?;
                let file = self.0.child_by_hash(hash).and_then(MaterialFile::new)?;
                Some((slot, file))
            })
            .collect()
    }

    pub fn files(&self) -> Vec<MaterialFile<'a>> {
        self.0.children().filter_map(MaterialFile::new).collect()
    }
}

impl<'a> MaterialFile<'a> {
    pub fn path(&self) -> Option<&'a str> {
        self.0.node().string(names::PATH).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HashAllocator, Node, NodeKind, NodeRef};
    use crate::util::Error;

    fn model() -> Node {
        let mut hashes = HashAllocator::new();
        let mut model = Node::new(NodeKind::Model, &mut hashes);

        let mesh = model.create_child(NodeKind::Mesh, &mut hashes);
        mesh.set_string(names::NAME, "Cube");
        mesh.set_values(names::VERTEX_POSITION_BUFFER, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
        mesh.set_values(names::FACE_BUFFER, vec![0u8, 1, 2]);
        mesh.set_values(names::UV_LAYER_COUNT, vec![1u8]);
        mesh.set_values(&names::vertex_uv_buffer(0), vec![Vec2::ZERO, Vec2::X, Vec2::Y]);

        let material = mesh.create_child(NodeKind::Material, &mut hashes);
        material.set_string(names::NAME, "steel");
        material.set_string(names::TYPE, "pbr");
        let texture = material.create_child(NodeKind::File, &mut hashes);
        texture.set_string(names::PATH, "steel_albedo.png");
        let texture = texture.hash();
        material.set_values("albedo", vec![texture]);
        let material = material.hash();
        mesh.set_values(names::MATERIAL, vec![material]);

        model
    }

    #[test]
    fn test_mesh_buffers() {
        let node = model();
        let model = Model::new(NodeRef::root(&node)).unwrap();
        let meshes = model.meshes();
        assert_eq!(meshes.len(), 1);

        let mesh = &meshes[0];
        assert_eq!(mesh.name(), Some("Cube"));
        assert_eq!(mesh.positions().unwrap().len(), 3);
        assert_eq!(mesh.faces().unwrap(), [0, 1, 2]);
        assert_eq!(mesh.uv_layer_count(), 1);
        assert_eq!(mesh.uv_layer(0).unwrap()[1], Vec2::X);
        assert!(matches!(mesh.normals(), Err(Error::PropertyNotFound(_))));
        assert!(model.skeleton().is_none());
    }

    #[test]
    fn test_mesh_material() {
        let node = model();
        let model = Model::new(NodeRef::root(&node)).unwrap();
        let meshes = model.meshes();
        let material = meshes[0].material().unwrap();
        assert_eq!(material.name(), Some("steel"));
        assert_eq!(material.material_type(), Some("pbr"));

        let albedo = material.slot("albedo").unwrap();
        assert_eq!(albedo.path(), Some("steel_albedo.png"));
        assert!(material.slot("normal").is_none());

        let slots = material.slots();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].0, "albedo");
        assert_eq!(material.files().len(), 1);
    }

    #[test]
    fn test_mesh_weights() {
        let mut node = Node::with_hash(NodeKind::Mesh, 1);
        node.set_values(names::MAXIMUM_WEIGHT_INFLUENCE, vec![2u8]);
        node.set_values(names::VERTEX_WEIGHT_BONE_BUFFER, vec![0u16, 3, 1, 0]);
        node.set_values(names::VERTEX_WEIGHT_VALUE_BUFFER, vec![0.75f32, 0.25, 1.0, 0.0]);

        let mesh = Mesh::new(NodeRef::root(&node)).unwrap();
        assert_eq!(mesh.maximum_weight_influence(), Some(2));
        assert_eq!(mesh.weight_bones().unwrap(), [0, 3, 1, 0]);
        assert_eq!(mesh.weight_values().unwrap(), &[0.75, 0.25, 1.0, 0.0]);
    }

    #[test]
    fn test_blend_shape() {
        let mut hashes = HashAllocator::new();
        let mut shape = Node::new(NodeKind::BlendShape, &mut hashes);
        let base = shape.create_child(NodeKind::Mesh, &mut hashes).hash();
        let smile = shape.create_child(NodeKind::Mesh, &mut hashes).hash();
        shape.set_values(names::BASE_SHAPE, vec![base]);
        shape.set_values(names::TARGET_SHAPE, vec![smile, 12345]);
        shape.set_values(names::TARGET_WEIGHT_SCALE, vec![1.0f32]);

        let view = BlendShape::new(NodeRef::root(&shape)).unwrap();
        assert_eq!(view.base_shape().unwrap().hash(), base);
        let targets = view.target_shapes();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].hash(), smile);
        assert_eq!(view.target_weight_scales().unwrap(), &[1.0]);
    }

    #[test]
    fn test_faces_wide_and_mistyped() {
        let mut node = Node::with_hash(NodeKind::Mesh, 1);
        node.set_values(names::FACE_BUFFER, vec![70000u32, 1, 2]);
        let mesh = Mesh::new(NodeRef::root(&node)).unwrap();
        assert_eq!(mesh.faces().unwrap(), [70000, 1, 2]);

        let mut node = Node::with_hash(NodeKind::Mesh, 1);
        node.set_values(names::FACE_BUFFER, vec![1.0f32]);
        let mesh = Mesh::new(NodeRef::root(&node)).unwrap();
        assert!(matches!(mesh.faces(), Err(Error::TypeMismatch { .. })));
    }
}
