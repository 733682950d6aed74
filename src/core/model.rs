use crate::core::error::ModelError;
use std::io::BufReader;

/// Triangle mesh for the intro background model.
#[derive(Clone, Debug, Default)]
pub struct ModelMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl ModelMesh {
    /// Parse OBJ text. Materials are ignored; missing normals are rebuilt by
    /// accumulating face normals.
    pub fn from_obj_bytes(bytes: &[u8]) -> Result<Self, ModelError> {
        let mut reader = BufReader::new(bytes);
        let (models, _materials) = tobj::load_obj_buf(
            &mut reader,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
            |_| Err(tobj::LoadError::OpenFileFailed),
        )
        .map_err(|e| ModelError::Parse(e.to_string()))?;

        let mut mesh = ModelMesh::default();
        for model in &models {
            let m = &model.mesh;
            let base = mesh.positions.len() as u32;
            let count = m.positions.len() / 3;
            mesh.positions
                .extend(m.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]));
            if m.normals.len() == m.positions.len() {
                mesh.normals
                    .extend(m.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]));
            } else {
                mesh.normals.extend(std::iter::repeat([0.0; 3]).take(count));
                accumulate_normals(&mesh.positions, &mut mesh.normals, base, &m.indices);
            }
            mesh.indices.extend(m.indices.iter().map(|i| i + base));
        }
        if mesh.indices.len() < 3 {
            return Err(ModelError::NoGeometry);
        }
        Ok(mesh)
    }
}

fn accumulate_normals(positions: &[[f32; 3]], normals: &mut [[f32; 3]], base: u32, indices: &[u32]) {
    use glam::Vec3;
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| (i + base) as usize);
        let pa = Vec3::from(positions[a]);
        let n = (Vec3::from(positions[b]) - pa).cross(Vec3::from(positions[c]) - pa);
        for i in [a, b, c] {
            normals[i] = (Vec3::from(normals[i]) + n).to_array();
        }
    }
    for n in normals.iter_mut().skip(base as usize) {
        *n = Vec3::from(*n).normalize_or_zero().to_array();
    }
}
