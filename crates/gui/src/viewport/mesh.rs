use glam::Vec3;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    /// Axis-aligned extent (max - min) over all vertex positions
    pub fn extent(&self) -> Vec3 {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for v in self.vertices.chunks_exact(9) {
            let p = Vec3::new(v[0], v[1], v[2]);
            min = min.min(p);
            max = max.max(p);
        }
        if self.vertices.is_empty() {
            Vec3::ZERO
        } else {
            max - min
        }
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Debug, Clone, PartialEq)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

impl LineMeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 7
    }
}

/// Axis-aligned box centered at the origin, `w` along X, `h` along Y, `d` along Z.
///
/// Sizes are used as given: zero collapses a face pair, negative values turn
/// the box inside out.
pub fn cuboid(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * 9);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / 9) as u32;
        for v in quad {
            push_vert(&mut vertices, *v, *normal, color);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Independent line segments (GL_LINES), one color for all of them
pub fn segments(endpoints: &[([f32; 3], [f32; 3])], color: [f32; 4]) -> LineMeshData {
    let mut vertices = Vec::with_capacity(endpoints.len() * 2 * 7);
    for (a, b) in endpoints {
        push_line_vert(&mut vertices, *a, color);
        push_line_vert(&mut vertices, *b, color);
    }
    LineMeshData { vertices }
}

/// Convert a packed 0xRRGGBB color to normalized floats
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(v: &mut Vec<f32>, p: Vec3, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, c[0], c[1], c[2]]);
}

fn push_line_vert(v: &mut Vec<f32>, p: [f32; 3], c: [f32; 4]) {
    v.extend_from_slice(&[p[0], p[1], p[2], c[0], c[1], c[2], c[3]]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_extent_matches_sizes() {
        let m = cuboid(10.0, 2.0, 5.0, [1.0; 3]);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.indices.len(), 36);
        assert_eq!(m.extent(), Vec3::new(10.0, 2.0, 5.0));
    }

    #[test]
    fn test_cuboid_zero_size_is_flat() {
        let m = cuboid(4.0, 0.0, 3.0, [1.0; 3]);
        assert_eq!(m.extent().y, 0.0);
        assert_eq!(m.indices.len(), 36);
    }

    #[test]
    fn test_segments_layout() {
        let lines = segments(&[([0.0, 0.0, 0.0], [0.0, 0.0, 150.0])], [1.0, 1.0, 1.0, 0.55]);
        assert_eq!(lines.vertex_count(), 2);
        assert_eq!(lines.vertices[7 + 2], 150.0);
        assert_eq!(lines.vertices[6], 0.55);
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb(0x000000), [0.0, 0.0, 0.0]);
    }
}
