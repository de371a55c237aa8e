//! Heightfield terrain mesh generation.
//!
//! A `size × size` grid of vertices is centered on the origin, raised by
//! fBm noise, and split into two triangles per quad. The noise lattice has
//! `size` nodes per axis spread over `size` world units, so the terrain
//! tiles seamlessly.
//!
//! Output grows as `size^2` vertices and `2 (size - 1)^2` triangles. Mesh
//! indices are `u32`, so a mesh can be at most [`MAX_SIZE`] vertices wide.

use glam::Vec3;
use rayon::prelude::*;

use crate::mesh::MeshBuffer;
use crate::noise::{NoiseField, NoiseLattice};
use super::config::{TerrainConfig, TerrainNormals};

/// Sizes above this log a warning before building.
const LARGE_SIZE_WARNING: u32 = 4096;

/// Largest grid size whose `size^2` vertices are all addressable by `u32` indices.
pub const MAX_SIZE: u32 = u16::MAX as u32;

/// Normal emitted by [`TerrainNormals::Placeholder`].
pub const PLACEHOLDER_NORMAL: Vec3 = Vec3::X;

/// Number of vertices emitted for a grid of `size × size`.
pub fn vertex_count(size: u32) -> u64 {
    (size as u64) * (size as u64)
}

/// Number of triangles emitted for a grid of `size × size`.
pub fn triangle_count(size: u32) -> u64 {
    let quads = size.saturating_sub(1) as u64;
    2 * quads * quads
}

/// Number of indices emitted for a grid of `size × size`.
pub fn index_count(size: u32) -> u64 {
    3 * triangle_count(size)
}

/// A square grid of terrain heights.
///
/// Stored row-major with `heights[size * i + j]`, where `i` runs along
/// world X and `j` along world Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    size: usize,
    seed: u64,
    heights: Vec<f32>,
}

impl Heightfield {
    /// Returns the grid resolution along each axis.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the seed of the noise lattice the heights were sampled from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Returns the height at grid coordinate `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> f32 {
        debug_assert!(i < self.size && j < self.size);
        self.heights[self.size * i + j]
    }

    /// Returns the world X (or Z) coordinate of grid column `i`.
    pub fn world_coord(&self, i: usize) -> f32 {
        i as f32 - self.size as f32 / 2.0
    }

    /// Returns `(min, max)` over all heights, or `None` if empty.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        if self.heights.is_empty() {
            return None;
        }
        let min = self.heights.iter().cloned().fold(f32::MAX, f32::min);
        let max = self.heights.iter().cloned().fold(f32::MIN, f32::max);
        Some((min, max))
    }
}

/// Builds noise-driven heightfield meshes.
#[derive(Debug, Clone, Default)]
pub struct TerrainBuilder {
    pub config: TerrainConfig,
}

impl TerrainBuilder {
    pub fn new(config: TerrainConfig) -> Self {
        Self { config }
    }

    /// Creates the noise field for a terrain of `size`, seeding a new lattice.
    pub fn noise_field(&self, size: u32) -> NoiseField {
        let lattice = NoiseLattice::generate(size as usize, self.config.seed);
        NoiseField::new(lattice, size as f32)
    }

    /// Height at grid coordinate `(i, j)`; any integer coordinate is valid
    /// since the field wraps.
    fn height(&self, field: &NoiseField, i: i64, j: i64) -> f32 {
        self.config.base_height + field.fbm(i as f32, j as f32, &self.config.fbm)
    }

    fn sample_heights(&self, field: &NoiseField, size: usize) -> Vec<f32> {
        let at = |idx: usize| self.height(field, (idx / size) as i64, (idx % size) as i64);
        if self.config.parallel {
            (0..size * size).into_par_iter().map(at).collect()
        } else {
            (0..size * size).map(at).collect()
        }
    }

    fn sample(&self, size: u32) -> (NoiseField, Heightfield) {
        let field = self.noise_field(size);
        let heightfield = Heightfield {
            size: size as usize,
            seed: field.lattice().seed(),
            heights: self.sample_heights(&field, size as usize),
        };
        (field, heightfield)
    }

    /// Samples the height grid for `size` without building a mesh.
    pub fn build_heightfield(&self, size: u32) -> Heightfield {
        self.sample(size).1
    }

    /// Builds the terrain mesh for a `size × size` grid.
    ///
    /// # Panics
    /// Panics if `size` exceeds [`MAX_SIZE`].
    pub fn build(&self, size: u32) -> MeshBuffer {
        assert!(
            size <= MAX_SIZE,
            "Terrain size {} exceeds the u32 index limit of {}",
            size,
            MAX_SIZE
        );
        log::debug!(
            "Building terrain: size={}, vertices={}, triangles={}, seed={:?}",
            size,
            vertex_count(size),
            triangle_count(size),
            self.config.seed
        );
        if size > LARGE_SIZE_WARNING {
            log::warn!(
                "Terrain size {} emits {} vertices; memory grows as size^2",
                size,
                vertex_count(size)
            );
        }

        let (field, heightfield) = self.sample(size);
        let n = heightfield.size();

        let mut mesh = MeshBuffer::with_capacity(
            vertex_count(size) as usize,
            index_count(size) as usize,
        );

        for i in 0..n {
            for j in 0..n {
                let position = Vec3::new(
                    heightfield.world_coord(i),
                    heightfield.get(i, j),
                    heightfield.world_coord(j),
                );
                let normal = match self.config.normals {
                    TerrainNormals::Placeholder => PLACEHOLDER_NORMAL,
                    TerrainNormals::Slope => self.slope_normal(&field, &heightfield, i, j),
                };
                mesh.push_vertex(position, normal);
            }
        }

        //   (i,j) --- (i,j+1)
        //     |      /   |
        //  (i+1,j) - (i+1,j+1)
        let stride = size;
        for i in 0..size.saturating_sub(1) {
            for j in 0..size.saturating_sub(1) {
                let top_left = stride * i + j;
                let top_right = stride * i + j + 1;
                let bottom_left = stride * (i + 1) + j;
                let bottom_right = stride * (i + 1) + j + 1;
                mesh.push_triangle(top_left, top_right, bottom_left);
                mesh.push_triangle(bottom_left, top_right, bottom_right);
            }
        }

        log::info!(
            "Terrain size {} built: {} vertices, {} triangles (lattice seed {})",
            size,
            mesh.vertex_count(),
            mesh.triangle_count(),
            heightfield.seed()
        );
        mesh
    }

    /// Surface normal from central differences of the height function.
    fn slope_normal(&self, field: &NoiseField, grid: &Heightfield, i: usize, j: usize) -> Vec3 {
        let n = grid.size();
        let h = |di: i64, dj: i64| {
            let (gi, gj) = (i as i64 + di, j as i64 + dj);
            if gi >= 0 && gj >= 0 && (gi as usize) < n && (gj as usize) < n {
                grid.get(gi as usize, gj as usize)
            } else {
                self.height(field, gi, gj)
            }
        };
        let dh_dx = (h(1, 0) - h(-1, 0)) * 0.5;
        let dh_dz = (h(0, 1) - h(0, -1)) * 0.5;
        Vec3::new(-dh_dx, 1.0, -dh_dz).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{FbmConfig, NoiseSeed};

    fn seeded(seed: u64) -> TerrainBuilder {
        TerrainBuilder::new(TerrainConfig::seeded(seed))
    }

    #[test]
    fn test_counts() {
        assert_eq!(vertex_count(4), 16);
        assert_eq!(triangle_count(4), 18);
        assert_eq!(index_count(4), 54);
        assert_eq!(triangle_count(1), 0);
        assert_eq!(triangle_count(0), 0);
    }

    #[test]
    fn test_max_size_indices_fit_u32() {
        let last_index = vertex_count(MAX_SIZE) - 1;
        assert!(last_index <= u32::MAX as u64);
        assert!(vertex_count(MAX_SIZE + 1) - 1 > u32::MAX as u64);
    }

    #[test]
    #[should_panic(expected = "exceeds the u32 index limit")]
    fn test_oversized_terrain_rejected() {
        seeded(1).build(MAX_SIZE + 1);
    }

    #[test]
    fn test_mesh_sizes() {
        for size in [1u32, 2, 5, 16] {
            let mesh = seeded(1).build(size);
            let vertices = (size * size) as usize;
            let quads = (size - 1) as usize;
            assert_eq!(mesh.vertex_count(), vertices);
            assert_eq!(mesh.normals().len(), vertices);
            assert_eq!(mesh.triangle_count(), 2 * quads * quads);
            assert_eq!(mesh.indices().len(), 6 * quads * quads);
            assert!(mesh.indices().iter().all(|&i| (i as usize) < vertices));
            assert!(mesh.validate().is_ok());
        }
    }

    #[test]
    fn test_empty_terrain() {
        let mesh = seeded(1).build(0);
        assert!(mesh.is_empty());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_grid_layout() {
        let size = 8u32;
        let mesh = seeded(2).build(size);
        for i in 0..8usize {
            for j in 0..8usize {
                let p = mesh.position(8 * i + j);
                assert_eq!(p.x, i as f32 - 4.0);
                assert_eq!(p.z, j as f32 - 4.0);
            }
        }
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min.x, -4.0);
        assert_eq!(max.x, 3.0);
    }

    #[test]
    fn test_odd_size_offsets() {
        let mesh = seeded(2).build(5);
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min.x, -2.5);
        assert_eq!(max.x, 1.5);
        assert_eq!(min.z, -2.5);
        assert_eq!(max.z, 1.5);
    }

    #[test]
    fn test_heights_bounded() {
        let builder = seeded(3);
        let bound = builder.config.fbm.amplitude_bound();
        let mesh = builder.build(32);
        for i in 0..mesh.vertex_count() {
            let y = mesh.position(i).y;
            assert!((y - builder.config.base_height).abs() <= bound);
        }
    }

    #[test]
    fn test_triangles_face_up() {
        let mesh = seeded(4).build(12);
        for tri in mesh.indices().chunks(3) {
            let a = mesh.position(tri[0] as usize);
            let b = mesh.position(tri[1] as usize);
            let c = mesh.position(tri[2] as usize);
            let n = (b - a).cross(c - a);
            assert!(n.y > 0.0, "Triangle {:?} faces down", tri);
        }
    }

    #[test]
    fn test_first_quad_indices() {
        let mesh = seeded(5).build(3);
        assert_eq!(&mesh.indices()[..6], &[0, 1, 3, 3, 1, 4]);
    }

    #[test]
    fn test_seeded_build_is_deterministic() {
        let a = seeded(77).build(16);
        let b = seeded(77).build(16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_seed_rebuilds_differ() {
        let builder = TerrainBuilder::default();
        let a = builder.build_heightfield(16);
        let b = builder.build_heightfield(16);
        assert_ne!(a.seed(), b.seed());
        assert_ne!(a.heights(), b.heights());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = seeded(8).build(16);
        let sequential = TerrainBuilder::new(TerrainConfig {
            parallel: false,
            ..TerrainConfig::seeded(8)
        })
        .build(16);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_heightfield_matches_mesh() {
        let builder = seeded(6);
        let field = builder.build_heightfield(10);
        let mesh = builder.build(10);
        for i in 0..10 {
            for j in 0..10 {
                assert_eq!(field.get(i, j), mesh.position(10 * i + j).y);
            }
        }
        let (min, max) = field.height_range().unwrap();
        assert!(min <= max);
    }

    #[test]
    fn test_placeholder_normals() {
        let builder = TerrainBuilder::new(TerrainConfig {
            normals: TerrainNormals::Placeholder,
            ..TerrainConfig::seeded(1)
        });
        let mesh = builder.build(6);
        assert!(mesh.normals().iter().all(|n| *n == [1.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_slope_normals_unit_and_upward() {
        let mesh = seeded(9).build(16);
        for i in 0..mesh.vertex_count() {
            let n = mesh.normal(i);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.y > 0.0);
            assert_eq!(mesh.normals()[i][3], 0.0);
        }
    }

    #[test]
    fn test_flat_terrain_normals_point_up() {
        let builder = TerrainBuilder::new(TerrainConfig {
            fbm: FbmConfig::with_octaves(0),
            seed: NoiseSeed::Fixed(1),
            ..Default::default()
        });
        let mesh = builder.build(4);
        for i in 0..mesh.vertex_count() {
            assert_eq!(mesh.position(i).y, -3.0);
            assert_eq!(mesh.normal(i), Vec3::Y);
        }
    }

    #[test]
    fn test_slope_normal_tilts_against_gradient() {
        let builder = seeded(10);
        let field = builder.build_heightfield(32);
        let mesh = builder.build(32);
        let (i, j) = (10usize, 12usize);
        let dh_dx = (field.get(i + 1, j) - field.get(i - 1, j)) * 0.5;
        let n = mesh.normal(32 * i + j);
        assert!((n.x * dh_dx) <= 0.0, "Normal should lean away from the uphill direction");
    }
}
