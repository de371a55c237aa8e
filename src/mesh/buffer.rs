//! Flat position/normal/index buffers.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported when a mesh breaks the buffer invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("Position/normal count mismatch: {positions} positions, {normals} normals")]
    LengthMismatch { positions: usize, normals: usize },
    #[error("Index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
    #[error("Index {index} at slot {slot} is out of range for {vertices} vertices")]
    IndexOutOfRange { slot: usize, index: u32, vertices: usize },
}

/// A triangle mesh stored as three flat, append-only buffers.
///
/// Positions are homogeneous points `(x, y, z, 1)`, normals are homogeneous
/// directions `(x, y, z, 0)`, aligned 1:1 with positions. Indices come in
/// triples, each naming one triangle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffer {
    positions: Vec<[f32; 4]>,
    normals: Vec<[f32; 4]>,
    indices: Vec<u32>,
}

impl MeshBuffer {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh pre-sized for the given vertex and index counts.
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.extend(1.0).to_array());
        self.normals.push(normal.extend(0.0).to_array());
        index
    }

    /// Appends one triangle by vertex index.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Discards all geometry while keeping the allocations.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.indices.clear();
    }

    /// Appends all of `other`, rebasing its indices onto this mesh.
    pub fn append(&mut self, other: &MeshBuffer) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|&i| i + base));
    }

    pub fn positions(&self) -> &[[f32; 4]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 4]] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Positions as a flat `[x, y, z, w, x, y, z, w, ...]` slice.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as a flat `[x, y, z, w, ...]` slice.
    pub fn normals_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Raw bytes of the position buffer, in native endianness.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the normal buffer, in native endianness.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Raw bytes of the index buffer, in native endianness.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Returns the number of emitted vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of complete triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.indices.is_empty()
    }

    /// Returns the xyz part of a position.
    pub fn position(&self, index: usize) -> Vec3 {
        let [x, y, z, _] = self.positions[index];
        Vec3::new(x, y, z)
    }

    /// Returns the xyz part of a normal.
    pub fn normal(&self, index: usize) -> Vec3 {
        let [x, y, z, _] = self.normals[index];
        Vec3::new(x, y, z)
    }

    /// Returns the axis-aligned bounds of all positions, or `None` if empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.positions.is_empty() {
            return None;
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for i in 0..self.positions.len() {
            let p = self.position(i);
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }

    /// Checks the buffer invariants.
    ///
    /// Positions and normals must have equal length, the index count must be a
    /// multiple of 3, and every index must name an existing vertex.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.positions.len() != self.normals.len() {
            return Err(MeshError::LengthMismatch {
                positions: self.positions.len(),
                normals: self.normals.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(self.indices.len()));
        }
        let vertices = self.positions.len();
        if let Some((slot, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertices)
        {
            return Err(MeshError::IndexOutOfRange { slot, index, vertices });
        }
        Ok(())
    }
}
