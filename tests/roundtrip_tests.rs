//! Integration tests building Cast files and verifying round-trip through disk.

use cast::prelude::*;
use cast::schema::names;

use tempfile::NamedTempFile;

/// Root -> model -> (mesh -> material -> file, skeleton -> bones + IK handle).
fn build_character() -> CastFile {
    let mut file = CastFile::new();
    {
        let mut root = file.create_root();
        let mut model = root.create_child(NodeKind::Model);
        model.string(names::NAME, "hero");

        {
            let mut mesh = model.create_child(NodeKind::Mesh);
            mesh.string(names::NAME, "body")
                .values(names::VERTEX_POSITION_BUFFER, vec![Vec3::ZERO, Vec3::X, Vec3::Y])
                .values(names::VERTEX_NORMAL_BUFFER, vec![Vec3::Z; 3])
                .values(names::FACE_BUFFER, vec![0u16, 1, 2])
                .values(names::UV_LAYER_COUNT, vec![1u8])
                .values(&names::vertex_uv_buffer(0), vec![Vec2::ZERO, Vec2::X, Vec2::Y]);

            let material = {
                let mut material = mesh.create_child(NodeKind::Material);
                material.string(names::NAME, "skin").string(names::TYPE, "pbr");
                let texture = {
                    let mut texture = material.create_child(NodeKind::File);
                    texture.string(names::PATH, "skin_albedo.png");
                    texture.hash()
                };
                material.values("albedo", vec![texture]);
                material.hash()
            };
            mesh.values(names::MATERIAL, vec![material]);
        }

        let mut skeleton = model.create_child(NodeKind::Skeleton);
        let hip = {
            let mut bone = skeleton.create_child(NodeKind::Bone);
            bone.string(names::NAME, "hip")
                .values(names::LOCAL_ROTATION, vec![Vec4::new(0.0, 0.0, 0.0, 1.0)]);
            bone.hash()
        };
        let knee = {
            let mut bone = skeleton.create_child(NodeKind::Bone);
            bone.string(names::NAME, "knee").values(names::PARENT_INDEX, vec![0u32]);
            bone.hash()
        };
        skeleton
            .create_child(NodeKind::IkHandle)
            .values(names::START_BONE, vec![hip])
            .values(names::END_BONE, vec![knee]);
    }
    file
}

#[test]
fn test_save_and_open() {
    let file = build_character();
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    file.save(temp.path()).expect("Failed to save");

    let on_disk = std::fs::read(temp.path()).unwrap();
    assert_eq!(on_disk.len(), file.size());

    for use_mmap in [true, false] {
        let loaded = CastFile::open_opts(temp.path(), use_mmap).expect("Failed to open");
        assert_eq!(loaded.roots(), file.roots());
        assert_eq!(loaded.to_bytes().unwrap(), on_disk);
        assert!(loaded.size_mismatches().is_empty());
    }
}

#[test]
fn test_views_after_reload() {
    let temp = NamedTempFile::new().unwrap();
    build_character().save(temp.path()).unwrap();
    let file = CastFile::open(temp.path()).unwrap();

    let root = file.root(0).unwrap();
    let model = root.children().find_map(Model::new).expect("no model");
    assert_eq!(model.name(), Some("hero"));

    let meshes = model.meshes();
    let mesh = &meshes[0];
    assert_eq!(mesh.faces().unwrap(), [0, 1, 2]);
    assert_eq!(mesh.uv_layer(0).unwrap().len(), 3);
    let material = mesh.material().expect("material should resolve");
    assert_eq!(material.slot("albedo").unwrap().path(), Some("skin_albedo.png"));

    let skeleton = model.skeleton().unwrap();
    let bones = skeleton.bones();
    assert_eq!(bones[0].parent_index(), -1);
    assert_eq!(bones[1].parent_bone().unwrap().name(), Some("hip"));

    let handles = skeleton.ik_handles();
    assert_eq!(handles[0].start_bone().unwrap().name(), Some("hip"));
    assert_eq!(handles[0].end_bone().unwrap().name(), Some("knee"));
}

#[test]
fn test_new_nodes_after_reload_get_fresh_hashes() {
    let bytes = build_character().to_bytes().unwrap();
    let mut file = CastFile::from_bytes(&bytes).unwrap();

    let mut loaded = Vec::new();
    for root in file.roots() {
        root.visit(&mut |node, _| loaded.push(node.hash()));
    }

    let fresh = file.create_root().hash();
    assert!(!loaded.contains(&fresh));
    assert!(loaded.iter().all(|&h| h < fresh));
}

#[test]
fn test_edit_then_reencode() {
    let mut file = build_character();
    let mut root = file.root_builder(0).unwrap();
    root.node_mut().children_mut()[0]
        .property_mut(names::NAME)
        .unwrap()
        .set_string("villain")
        .unwrap();

    let bytes = file.to_bytes().unwrap();
    assert_eq!(bytes.len(), file.size());
    let reloaded = CastFile::from_bytes(&bytes).unwrap();
    assert_eq!(reloaded.roots()[0].children()[0].string(names::NAME).unwrap(), "villain");
}

#[test]
fn test_sibling_lookup_needs_parent() {
    let file = build_character();
    let root = file.root(0).unwrap();
    let model = root.child(0).unwrap();
    let skeleton = model.children().find(|n| n.kind() == NodeKind::Skeleton).unwrap();
    let handle = skeleton.children().find(|n| n.kind() == NodeKind::IkHandle).unwrap();

    let knee = handle.node().value::<u64>(names::END_BONE).copied().unwrap();
    assert!(handle.lookup(knee, ReferenceScope::Sibling).is_some());
    assert!(handle.lookup(knee, ReferenceScope::Subtree).is_none());

    // The same node reached without its ancestors has no siblings to search.
    let detached = NodeRef::root(handle.node());
    assert!(detached.lookup(knee, ReferenceScope::Sibling).is_none());
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = CastFile::open(dir.path().join("missing.cast")).unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
    assert!(err.is_not_found());
}
