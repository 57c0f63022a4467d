//! glTF mesh extraction for the showcase model.
//!
//! The host fetches the glTF document and any external buffers; this module
//! turns them into a single world-space triangle list ready for upload.

use glam::{Mat3, Mat4, Vec3};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("glTF parse error: {0}")]
    Parse(#[from] gltf::Error),
    #[error("embedded data URIs are not supported (buffer {0})")]
    EmbeddedDataUri(usize),
    #[error("buffer `{0}` was not fetched")]
    MissingBuffer(String),
    #[error("GLB binary chunk missing")]
    MissingBlob,
    #[error("buffer {index} is {actual} bytes, expected at least {expected}")]
    ShortBuffer {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("model contains no triangle meshes")]
    NoMeshes,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

/// Flattened model: every primitive of the default scene baked into one
/// indexed triangle list in model space.
#[derive(Clone, Debug, Default)]
pub struct ModelMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
}

/// Resolve a buffer URI relative to the URL of the glTF document.
pub fn resolve_uri(document_url: &str, uri: &str) -> String {
    if uri.contains("://") || uri.starts_with('/') {
        return uri.to_string();
    }
    match document_url.rfind('/') {
        Some(i) => format!("{}{}", &document_url[..=i], uri),
        None => uri.to_string(),
    }
}

/// URIs of the external buffers the host must fetch, in buffer order.
pub fn external_buffer_uris(gltf: &gltf::Gltf) -> Result<Vec<String>, AssetError> {
    let mut uris = Vec::new();
    for buffer in gltf.buffers() {
        if let gltf::buffer::Source::Uri(uri) = buffer.source() {
            if uri.starts_with("data:") {
                return Err(AssetError::EmbeddedDataUri(buffer.index()));
            }
            uris.push(uri.to_string());
        }
    }
    Ok(uris)
}

/// Collect the bytes of every buffer, taking external ones from `fetched`.
pub fn load_buffers(
    gltf: &gltf::Gltf,
    mut fetched: impl FnMut(&str) -> Option<Vec<u8>>,
) -> Result<Vec<Vec<u8>>, AssetError> {
    let mut out = Vec::with_capacity(gltf.buffers().len());
    for buffer in gltf.buffers() {
        let data = match buffer.source() {
            gltf::buffer::Source::Bin => gltf.blob.clone().ok_or(AssetError::MissingBlob)?,
            gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => {
                return Err(AssetError::EmbeddedDataUri(buffer.index()));
            }
            gltf::buffer::Source::Uri(uri) => {
                fetched(uri).ok_or_else(|| AssetError::MissingBuffer(uri.to_string()))?
            }
        };
        if data.len() < buffer.length() {
            return Err(AssetError::ShortBuffer {
                index: buffer.index(),
                expected: buffer.length(),
                actual: data.len(),
            });
        }
        out.push(data);
    }
    Ok(out)
}

impl ModelMesh {
    pub fn from_gltf(gltf: &gltf::Gltf, buffers: &[Vec<u8>]) -> Result<Self, AssetError> {
        let mut mesh = ModelMesh {
            bounds_min: Vec3::splat(f32::MAX),
            bounds_max: Vec3::splat(f32::MIN),
            ..Default::default()
        };
        let scene = gltf.default_scene().or_else(|| gltf.scenes().next());
        match scene {
            Some(scene) => {
                for node in scene.nodes() {
                    mesh.append_node(&node, Mat4::IDENTITY, buffers);
                }
            }
            // No scene graph: take the meshes as they are.
            None => {
                for m in gltf.meshes() {
                    mesh.append_mesh(&m, Mat4::IDENTITY, buffers);
                }
            }
        }
        if mesh.indices.is_empty() {
            return Err(AssetError::NoMeshes);
        }
        log::info!(
            "[asset] mesh: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.indices.len() / 3
        );
        Ok(mesh)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Sphere enclosing the bounds, in model space.
    pub fn bounding_sphere(&self) -> (Vec3, f32) {
        let center = (self.bounds_min + self.bounds_max) * 0.5;
        let radius = (self.bounds_max - center).length();
        (center, radius)
    }

    fn append_node(&mut self, node: &gltf::Node, parent: Mat4, buffers: &[Vec<u8>]) {
        let local = Mat4::from_cols_array_2d(&node.transform().matrix());
        let world = parent * local;
        if let Some(m) = node.mesh() {
            self.append_mesh(&m, world, buffers);
        }
        for child in node.children() {
            self.append_node(&child, world, buffers);
        }
    }

    fn append_mesh(&mut self, mesh: &gltf::Mesh, world: Mat4, buffers: &[Vec<u8>]) {
        let normal_mat = Mat3::from_mat4(world).inverse().transpose();
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!("[asset] skipping non-triangle primitive {:?}", primitive.mode());
                continue;
            }
            let reader = primitive.reader(|b| buffers.get(b.index()).map(|d| d.as_slice()));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<Vec3> = positions
                .map(|p| world.transform_point3(Vec3::from(p)))
                .collect();
            let base = self.vertices.len() as u32;
            let indices: Vec<u32> = match reader.read_indices() {
                Some(ix) => ix.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            if indices.iter().any(|&i| i as usize >= positions.len()) {
                log::warn!("[asset] primitive has out-of-range indices; skipped");
                continue;
            }
            let normals: Vec<Vec3> = match reader.read_normals() {
                Some(ns) => ns
                    .map(|n| (normal_mat * Vec3::from(n)).normalize_or_zero())
                    .collect(),
                None => accumulate_normals(&positions, &indices),
            };
            let color = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();

            for (i, p) in positions.iter().enumerate() {
                self.bounds_min = self.bounds_min.min(*p);
                self.bounds_max = self.bounds_max.max(*p);
                let n = normals.get(i).copied().unwrap_or(Vec3::Y);
                self.vertices.push(Vertex {
                    position: p.to_array(),
                    normal: n.to_array(),
                    color,
                });
            }
            let tri_len = indices.len() - indices.len() % 3;
            self.indices
                .extend(indices[..tri_len].iter().map(|i| base + i));
        }
    }
}

// Area-weighted vertex normals for primitives that ship without NORMAL.
fn accumulate_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == Vec3::ZERO {
                Vec3::Y
            } else {
                n
            }
        })
        .collect()
}
