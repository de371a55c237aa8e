//! Cube geometry shared by the sponge generator.
//!
//! Provides the unit-cube vertex/normal tables and the axis-aligned cube
//! instance type consumed by the emitter.

mod cube;

pub use cube::{
    CubeInstance, CubeTemplate, CUBE_INDEX_COUNT, CUBE_POSITIONS, CUBE_TRIANGLE_COUNT,
    CUBE_TRIANGLE_NORMALS, CUBE_VERTEX_COUNT,
};
