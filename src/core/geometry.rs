/// Plane in local XY, centered on the origin.
///
/// `line_indices` are the edges of the triangulated grid drawn as wireframe:
/// every row edge, every column edge and one diagonal per quad.
/// `triangle_indices` are the same two triangles per quad, split along that
/// diagonal, for the filled variant.
#[derive(Clone, Debug)]
pub struct GridMesh {
    pub positions: Vec<[f32; 2]>,
    pub line_indices: Vec<u32>,
    pub triangle_indices: Vec<u32>,
}

pub fn plane_grid(size: f32, segments: u32) -> GridMesh {
    let segments = segments.max(1);
    let n = segments + 1;
    let step = size / segments as f32;
    let half = size / 2.0;

    let mut positions = Vec::with_capacity((n * n) as usize);
    for row in 0..n {
        for col in 0..n {
            positions.push([-half + col as f32 * step, half - row as f32 * step]);
        }
    }

    let idx = |row: u32, col: u32| row * n + col;
    let quads = (segments * segments) as usize;
    let mut line_indices = Vec::with_capacity(2 * (2 * (n * segments) as usize + quads));
    for row in 0..n {
        for col in 0..segments {
            line_indices.extend_from_slice(&[idx(row, col), idx(row, col + 1)]);
        }
    }
    for col in 0..n {
        for row in 0..segments {
            line_indices.extend_from_slice(&[idx(row, col), idx(row + 1, col)]);
        }
    }
    for row in 0..segments {
        for col in 0..segments {
            line_indices.extend_from_slice(&[idx(row + 1, col), idx(row, col + 1)]);
        }
    }

    let mut triangle_indices = Vec::with_capacity(6 * quads);
    for row in 0..segments {
        for col in 0..segments {
            let (tl, tr) = (idx(row, col), idx(row, col + 1));
            let (bl, br) = (idx(row + 1, col), idx(row + 1, col + 1));
            triangle_indices.extend_from_slice(&[tl, bl, tr, bl, br, tr]);
        }
    }

    GridMesh {
        positions,
        line_indices,
        triangle_indices,
    }
}
