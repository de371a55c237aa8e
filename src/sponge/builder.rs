//! Recursive Menger sponge subdivision.
//!
//! A cube is split into a `3×3×3` lattice of cells addressed by
//! `(x, y, z) ∈ {0, 1, 2}^3` with linear index `z + 3x + 9y`. The six
//! face-center cells and the body-center cell are dropped; the remaining 20
//! cells recurse until the base level is reached, where each surviving cell
//! is emitted as a plain cube.
//!
//! Output grows as `20^(level - 1)` cubes, 36 vertices each. Callers are
//! expected to bound `level` themselves; nothing is clamped here.

use glam::Vec3;
use rayon::prelude::*;

use crate::geometry::{CubeInstance, CubeTemplate, CUBE_VERTEX_COUNT};
use crate::mesh::MeshBuffer;
use super::config::SpongeConfig;

/// Level at or below which a cell is emitted without further subdivision.
pub const BASE_LEVEL: u32 = 1;

/// Linear cell indices excluded from recursion: the six face centers and the
/// body center of the `3×3×3` split.
pub const REMOVED_CELLS: [u32; 7] = [4, 10, 12, 13, 14, 16, 22];

/// Cells kept per subdivision step.
pub const KEPT_CELLS_PER_STEP: usize = 27 - REMOVED_CELLS.len();

/// Levels above this log a warning before building.
const LARGE_LEVEL_WARNING: u32 = 5;

/// Returns the linear index of lattice cell `(x, y, z)`.
pub const fn cell_index(x: u32, y: u32, z: u32) -> u32 {
    z + x * 3 + y * 9
}

/// Returns true if the cell with the given linear index is removed.
pub fn is_removed(index: u32) -> bool {
    REMOVED_CELLS.contains(&index)
}

/// Returns the lattice coordinates of the 20 kept cells in emission order
/// (`y` outermost, then `x`, then `z`).
pub fn kept_cells() -> impl Iterator<Item = (u32, u32, u32)> {
    (0..3u32)
        .flat_map(|y| (0..3u32).flat_map(move |x| (0..3u32).map(move |z| (x, y, z))))
        .filter(|&(x, y, z)| !is_removed(cell_index(x, y, z)))
}

/// Number of subdivision steps performed for `level`.
pub fn subdivision_depth(level: u32) -> u32 {
    level.saturating_sub(BASE_LEVEL)
}

/// Number of cubes emitted for `level`.
pub fn cube_count(level: u32) -> u64 {
    (KEPT_CELLS_PER_STEP as u64).saturating_pow(subdivision_depth(level))
}

/// Number of vertices (and indices) emitted for `level`.
pub fn vertex_count(level: u32) -> u64 {
    cube_count(level).saturating_mul(CUBE_VERTEX_COUNT as u64)
}

/// Edge length of every emitted cube when the root has edge `root_width`.
pub fn leaf_width(root_width: f32, level: u32) -> f32 {
    root_width / 3f32.powi(subdivision_depth(level) as i32)
}

/// Calls `visit` once for every leaf cube of the sponge rooted at `root`.
pub fn visit_cubes<F>(root: CubeInstance, level: u32, visit: &mut F)
where
    F: FnMut(CubeInstance),
{
    if level <= BASE_LEVEL {
        visit(root);
        return;
    }
    for (x, y, z) in kept_cells() {
        visit_cubes(root.subcell(x, y, z), level - 1, visit);
    }
}

/// Collects every leaf cube of the sponge rooted at `root`.
pub fn generate_cubes(root: CubeInstance, level: u32) -> Vec<CubeInstance> {
    let mut cubes = Vec::with_capacity(cube_count(level) as usize);
    visit_cubes(root, level, &mut |cube| cubes.push(cube));
    cubes
}

/// Builds Menger sponge meshes.
#[derive(Debug, Clone, Default)]
pub struct SpongeBuilder {
    pub config: SpongeConfig,
}

impl SpongeBuilder {
    pub fn new(config: SpongeConfig) -> Self {
        Self { config }
    }

    /// Returns the root cube this builder subdivides.
    pub fn root(&self) -> CubeInstance {
        CubeInstance::new(self.config.start, self.config.width)
    }

    /// Builds the sponge mesh for `level`.
    ///
    /// Levels 0 and 1 both produce the single root cube.
    pub fn build(&self, level: u32) -> MeshBuffer {
        let cubes = cube_count(level);
        log::debug!(
            "Building sponge: level={}, cubes={}, vertices={}",
            level,
            cubes,
            vertex_count(level)
        );
        if level > LARGE_LEVEL_WARNING {
            log::warn!(
                "Sponge level {} emits {} cubes; memory grows as 20^level",
                level,
                cubes
            );
        }

        let mesh = if self.config.parallel && level > BASE_LEVEL {
            self.build_parallel(level)
        } else {
            emit_subtree(self.root(), level)
        };

        log::info!(
            "Sponge level {} built: {} vertices, {} triangles",
            level,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        mesh
    }

    /// Builds each top-level subtree on the rayon pool and concatenates the
    /// results in cell order, so the output matches the sequential build.
    fn build_parallel(&self, level: u32) -> MeshBuffer {
        let root = self.root();
        let cells: Vec<(u32, u32, u32)> = kept_cells().collect();
        let parts: Vec<MeshBuffer> = cells
            .into_par_iter()
            .map(|(x, y, z)| emit_subtree(root.subcell(x, y, z), level - 1))
            .collect();

        let total = mesh_capacity(level);
        let mut mesh = MeshBuffer::with_capacity(total, total);
        for part in &parts {
            mesh.append(part);
        }
        mesh
    }
}

/// Vertex (and index) capacity to reserve for `level`, saturating at `usize::MAX`.
fn mesh_capacity(level: u32) -> usize {
    usize::try_from(vertex_count(level)).unwrap_or(usize::MAX)
}

fn emit_subtree(root: CubeInstance, level: u32) -> MeshBuffer {
    let capacity = mesh_capacity(level);
    let mut mesh = MeshBuffer::with_capacity(capacity, capacity);
    visit_cubes(root, level, &mut |cube| CubeTemplate::emit(&cube, &mut mesh));
    mesh
}

/// Returns true if `point` lies inside one of the removed cells of `parent`.
pub fn in_removed_cell(parent: &CubeInstance, point: Vec3) -> bool {
    let local = (point - parent.start) / (parent.width / 3.0);
    let cell = local.floor();
    if cell.min_element() < 0.0 || cell.max_element() > 2.0 {
        return false;
    }
    is_removed(cell_index(cell.x as u32, cell.y as u32, cell.z as u32))
}
