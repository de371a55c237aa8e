//! Generator trait and versioned mesh sources.

use crate::mesh::{MeshBuffer, MeshSnapshot};
use crate::sponge::{self, SpongeBuilder};
use crate::terrain::{self, TerrainBuilder};

/// Unique identifier for mesh generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorId {
    /// Recursive Menger sponge.
    Sponge,
    /// Noise-driven heightfield.
    Terrain,
}

impl GeneratorId {
    /// Returns the name of the generator.
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorId::Sponge => "sponge",
            GeneratorId::Terrain => "terrain",
        }
    }

    /// Returns the name of the integer parameter the generator takes.
    pub fn parameter_name(&self) -> &'static str {
        match self {
            GeneratorId::Sponge => "level",
            GeneratorId::Terrain => "size",
        }
    }
}

/// Trait for procedural mesh generators.
///
/// A generator turns a single integer parameter (subdivision level, grid
/// size, ...) into a fresh mesh. Generators keep no state between calls.
pub trait MeshGenerator: Send + Sync {
    /// Returns the unique identifier for this generator.
    fn id(&self) -> GeneratorId;

    /// Returns a human-readable name for the generator.
    fn name(&self) -> &str;

    /// Builds a new mesh for `param`.
    fn generate(&self, param: u32) -> MeshBuffer;

    /// Returns the `(vertices, indices)` a call to `generate(param)` will emit.
    fn expected_counts(&self, param: u32) -> (u64, u64);
}

impl MeshGenerator for SpongeBuilder {
    fn id(&self) -> GeneratorId {
        GeneratorId::Sponge
    }

    fn name(&self) -> &str {
        "Menger Sponge"
    }

    fn generate(&self, level: u32) -> MeshBuffer {
        self.build(level)
    }

    fn expected_counts(&self, level: u32) -> (u64, u64) {
        let vertices = sponge::vertex_count(level);
        (vertices, vertices)
    }
}

impl MeshGenerator for TerrainBuilder {
    fn id(&self) -> GeneratorId {
        GeneratorId::Terrain
    }

    fn name(&self) -> &str {
        "Heightfield Terrain"
    }

    fn generate(&self, size: u32) -> MeshBuffer {
        self.build(size)
    }

    fn expected_counts(&self, size: u32) -> (u64, u64) {
        (terrain::vertex_count(size), terrain::index_count(size))
    }
}

/// Owns a generator and hands out versioned snapshots of its output.
///
/// Every [`rebuild`](Self::rebuild) discards the previous mesh and stamps
/// the new one with the next version number.
pub struct MeshSource<G: MeshGenerator> {
    generator: G,
    version: u64,
    param: Option<u32>,
    current: Option<MeshSnapshot>,
}

impl<G: MeshGenerator> MeshSource<G> {
    /// Creates a source that has not built anything yet.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            version: 0,
            param: None,
            current: None,
        }
    }

    /// Creates a source and builds `param` immediately.
    pub fn with_initial(generator: G, param: u32) -> Self {
        let mut source = Self::new(generator);
        source.rebuild(param);
        source
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Mutable access to the generator, e.g. to change its configuration.
    /// Takes effect on the next rebuild.
    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    /// Regenerates the mesh for `param` and returns the new snapshot.
    pub fn rebuild(&mut self, param: u32) -> MeshSnapshot {
        self.version += 1;
        log::debug!(
            "Rebuilding {} ({}={}) as version {}",
            self.generator.name(),
            self.generator.id().parameter_name(),
            param,
            self.version
        );
        let snapshot = MeshSnapshot::new(self.version, self.generator.generate(param));
        self.param = Some(param);
        self.current = Some(snapshot.clone());
        snapshot
    }

    /// Returns the latest snapshot, if anything has been built.
    pub fn current(&self) -> Option<&MeshSnapshot> {
        self.current.as_ref()
    }

    /// Returns the parameter of the latest build.
    pub fn param(&self) -> Option<u32> {
        self.param
    }

    /// Returns the number of builds performed so far.
    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::UploadTracker;
    use crate::sponge::SpongeConfig;
    use crate::terrain::TerrainConfig;

    #[test]
    fn test_generator_id_names() {
        assert_eq!(GeneratorId::Sponge.name(), "sponge");
        assert_eq!(GeneratorId::Terrain.name(), "terrain");
        assert_eq!(GeneratorId::Sponge.parameter_name(), "level");
        assert_eq!(GeneratorId::Terrain.parameter_name(), "size");
    }

    #[test]
    fn test_expected_counts_match_output() {
        let generators: Vec<(Box<dyn MeshGenerator>, u32)> = vec![
            (Box::new(SpongeBuilder::new(SpongeConfig::sequential())), 2),
            (Box::new(TerrainBuilder::new(TerrainConfig::seeded(1))), 9),
        ];
        for (generator, param) in generators {
            let mesh = generator.generate(param);
            let (vertices, indices) = generator.expected_counts(param);
            assert_eq!(mesh.vertex_count() as u64, vertices, "{}", generator.name());
            assert_eq!(mesh.indices().len() as u64, indices, "{}", generator.name());
        }
    }

    #[test]
    fn test_source_versions_increase() {
        let mut source = MeshSource::new(SpongeBuilder::default());
        assert!(source.current().is_none());
        assert_eq!(source.version(), 0);

        let first = source.rebuild(1);
        let second = source.rebuild(2);
        assert_eq!(first.version, 1);
        assert_eq!(second.version, 2);
        assert_eq!(source.param(), Some(2));
        assert_eq!(source.current().unwrap().version, 2);
        assert_eq!(source.current().unwrap().mesh.vertex_count(), 36 * 20);
    }

    #[test]
    fn test_upload_protocol() {
        let mut source = MeshSource::with_initial(SpongeBuilder::default(), 1);
        let mut tracker = UploadTracker::new();

        let snapshot = source.current().unwrap().clone();
        assert!(tracker.needs_upload(&snapshot), "New geometry must be uploaded");
        tracker.mark_uploaded(&snapshot);
        assert!(!tracker.needs_upload(source.current().unwrap()));

        // Rebuilding with the same parameter still produces a new version.
        source.rebuild(1);
        assert!(tracker.needs_upload(source.current().unwrap()));
    }

    #[test]
    fn test_old_snapshot_survives_rebuild() {
        let mut source = MeshSource::with_initial(SpongeBuilder::default(), 2);
        let old = source.current().unwrap().clone();
        source.rebuild(1);
        assert_eq!(old.mesh.vertex_count(), 36 * 20);
        assert_eq!(source.current().unwrap().mesh.vertex_count(), 36);
    }

    #[test]
    fn test_generator_mut_applies_on_rebuild() {
        let mut source = MeshSource::new(TerrainBuilder::new(TerrainConfig::seeded(3)));
        let a = source.rebuild(8);
        source.generator_mut().config.base_height = 10.0;
        let b = source.rebuild(8);
        let lift = b.mesh.position(0).y - a.mesh.position(0).y;
        assert!((lift - 13.0).abs() < 1e-4, "Base height change should lift the terrain");
    }
}
