//! Menger sponge generation.
//!
//! Recursively subdivides a cube, keeps 20 of every 27 sub-cells and emits
//! the surviving leaf cubes through the cube template.

mod builder;
mod config;

pub use builder::{
    cell_index, cube_count, generate_cubes, in_removed_cell, is_removed, kept_cells, leaf_width,
    subdivision_depth, vertex_count, visit_cubes, SpongeBuilder, BASE_LEVEL, KEPT_CELLS_PER_STEP,
    REMOVED_CELLS,
};
pub use config::SpongeConfig;
