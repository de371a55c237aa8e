//! Unit-cube template emitted once per sponge cell.
//!
//! Every triangle owns its three vertices so each one can carry the flat
//! normal of its face. Nothing is welded.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::mesh::MeshBuffer;

/// Vertices emitted per cube (12 triangles, 3 vertices each).
pub const CUBE_VERTEX_COUNT: usize = 36;
/// Indices emitted per cube.
pub const CUBE_INDEX_COUNT: usize = 36;
/// Triangles emitted per cube.
pub const CUBE_TRIANGLE_COUNT: usize = 12;

/// Corner positions of the unit cube spanning `[0, 1]^3`, one entry per
/// emitted vertex. Winding is counter-clockwise seen from outside in a
/// right-handed frame.
pub const CUBE_POSITIONS: [Vec3; CUBE_VERTEX_COUNT] = [
    // +X
    Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0),
    // +Z
    Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 1.0), Vec3::new(1.0, 1.0, 1.0),
    // -Y
    Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0),
    // +Z
    Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 1.0, 1.0),
    // +X
    Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 0.0, 1.0),
    // -Y
    Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.0),
    // -Z
    Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0),
    // -X
    Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 1.0),
    // -X
    Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0), Vec3::new(0.0, 1.0, 0.0),
    // +Y
    Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 1.0),
    // +Y
    Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 0.0),
    // -Z
    Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0),
];

/// Outward face normal of each triangle, in emission order.
pub const CUBE_TRIANGLE_NORMALS: [Vec3; CUBE_TRIANGLE_COUNT] = [
    Vec3::X,
    Vec3::Z,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::X,
    Vec3::NEG_Y,
    Vec3::NEG_Z,
    Vec3::NEG_X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::Y,
    Vec3::NEG_Z,
];

/// An axis-aligned cube given by its minimum corner and edge length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubeInstance {
    /// Minimum corner.
    pub start: Vec3,
    /// Edge length.
    pub width: f32,
}

impl CubeInstance {
    pub fn new(start: Vec3, width: f32) -> Self {
        Self { start, width }
    }

    /// Returns the geometric center of the cube.
    pub fn center(&self) -> Vec3 {
        self.start + Vec3::splat(self.width * 0.5)
    }

    /// Returns the maximum corner.
    pub fn end(&self) -> Vec3 {
        self.start + Vec3::splat(self.width)
    }

    /// Returns the sub-cell at lattice coordinate `(x, y, z)` of a `3×3×3` split.
    pub fn subcell(&self, x: u32, y: u32, z: u32) -> CubeInstance {
        let width = self.width / 3.0;
        let offset = Vec3::new(x as f32, y as f32, z as f32) * width;
        CubeInstance::new(self.start + offset, width)
    }
}

/// Emits cube geometry into a growing mesh buffer.
pub struct CubeTemplate;

impl CubeTemplate {
    /// Appends the 36 vertices, 36 normals and 36 indices of `cube` to `mesh`.
    ///
    /// Indices continue from the vertex count already in the buffer.
    pub fn emit(cube: &CubeInstance, mesh: &mut MeshBuffer) {
        for (i, corner) in CUBE_POSITIONS.iter().enumerate() {
            let position = *corner * cube.width + cube.start;
            let normal = CUBE_TRIANGLE_NORMALS[i / 3];
            mesh.push_vertex(position, normal);
        }
        let base = (mesh.vertex_count() - CUBE_VERTEX_COUNT) as u32;
        for t in 0..CUBE_TRIANGLE_COUNT as u32 {
            let first = base + t * 3;
            mesh.push_triangle(first, first + 1, first + 2);
        }
    }

    /// Builds a standalone mesh containing just `cube`.
    pub fn mesh(cube: &CubeInstance) -> MeshBuffer {
        let mut mesh = MeshBuffer::with_capacity(CUBE_VERTEX_COUNT, CUBE_INDEX_COUNT);
        Self::emit(cube, &mut mesh);
        mesh
    }
}
