// Host-side tests for glTF mesh extraction.

use folio_core::*;

// One triangle in the XY plane with u16 indices, placed by a node at z = 1.
fn triangle_gltf(with_indices: bool) -> (Vec<u8>, Vec<u8>) {
    let mut bin = Vec::new();
    for p in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in p {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in [0u16, 1, 2] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    bin.extend_from_slice(&[0, 0]);
    let indices = if with_indices { r#", "indices": 1"# } else { "" };
    let json = format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [ {{ "nodes": [0] }} ],
  "nodes": [ {{ "mesh": 0, "translation": [0.0, 0.0, 1.0] }} ],
  "meshes": [ {{ "primitives": [ {{ "attributes": {{ "POSITION": 0 }}{indices} }} ] }} ],
  "buffers": [ {{ "uri": "tri.bin", "byteLength": 44 }} ],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36, "target": 34962 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 6, "target": 34963 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ]
}}"#
    );
    (json.into_bytes(), bin)
}

#[test]
fn relative_uris_resolve_against_the_document() {
    assert_eq!(resolve_uri("luffy_hat/scene.gltf", "scene.bin"), "luffy_hat/scene.bin");
    assert_eq!(resolve_uri("scene.gltf", "scene.bin"), "scene.bin");
    assert_eq!(
        resolve_uri("models/a.gltf", "https://cdn.example.com/b.bin"),
        "https://cdn.example.com/b.bin"
    );
}

#[test]
fn extracts_world_space_triangle() {
    let (json, bin) = triangle_gltf(true);
    let gltf = gltf::Gltf::from_slice(&json).unwrap();
    assert_eq!(external_buffer_uris(&gltf).unwrap(), vec!["tri.bin".to_string()]);

    let buffers = load_buffers(&gltf, |uri| (uri == "tri.bin").then(|| bin.clone())).unwrap();
    let mesh = ModelMesh::from_gltf(&gltf, &buffers).unwrap();
    assert_eq!(mesh.vertices.len(), 3);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.triangle_count(), 1);
    for v in &mesh.vertices {
        assert_eq!(v.position[2], 1.0, "node translation baked in");
        assert!((v.normal[2] - 1.0).abs() < 1e-5, "generated normal faces +Z");
        assert_eq!(v.color, [1.0, 1.0, 1.0, 1.0]);
    }
    let (center, radius) = mesh.bounding_sphere();
    assert!((center.z - 1.0).abs() < 1e-6);
    assert!(radius > 0.7 && radius < 0.71);
}

#[test]
fn missing_indices_are_generated() {
    let (json, bin) = triangle_gltf(false);
    let gltf = gltf::Gltf::from_slice(&json).unwrap();
    let buffers = load_buffers(&gltf, |_| Some(bin.clone())).unwrap();
    let mesh = ModelMesh::from_gltf(&gltf, &buffers).unwrap();
    assert_eq!(mesh.indices, vec![0, 1, 2]);
}

#[test]
fn unfetched_or_short_buffers_are_errors() {
    let (json, bin) = triangle_gltf(true);
    let gltf = gltf::Gltf::from_slice(&json).unwrap();
    let missing = load_buffers(&gltf, |_| None);
    assert!(matches!(missing, Err(AssetError::MissingBuffer(uri)) if uri == "tri.bin"));
    let short = load_buffers(&gltf, |_| Some(bin[..10].to_vec()));
    assert!(matches!(
        short,
        Err(AssetError::ShortBuffer {
            index: 0,
            expected: 44,
            actual: 10
        })
    ));
}

#[test]
fn document_without_meshes_is_rejected() {
    let json = br#"{ "asset": { "version": "2.0" }, "scenes": [ { "nodes": [] } ], "scene": 0 }"#;
    let gltf = gltf::Gltf::from_slice(json).unwrap();
    let buffers = load_buffers(&gltf, |_| None).unwrap();
    assert!(buffers.is_empty());
    assert!(matches!(
        ModelMesh::from_gltf(&gltf, &buffers),
        Err(AssetError::NoMeshes)
    ));
}

#[test]
fn malformed_document_is_a_parse_error() {
    let err = gltf::Gltf::from_slice(b"{ not json").map_err(AssetError::from);
    assert!(matches!(err, Err(AssetError::Parse(_))));
}
