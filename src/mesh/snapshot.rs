//! Versioned mesh snapshots and upload tracking.
//!
//! Generators hand out immutable snapshots stamped with a version number.
//! A consumer keeps an [`UploadTracker`] and compares versions instead of
//! polling a mutable "dirty" flag on the generator.

use std::sync::Arc;

use super::MeshBuffer;

/// An immutable mesh together with the version it was built as.
#[derive(Debug, Clone)]
pub struct MeshSnapshot {
    /// Monotonically increasing build counter of the producing source.
    pub version: u64,
    /// The generated geometry, shared without copying.
    pub mesh: Arc<MeshBuffer>,
}

impl MeshSnapshot {
    pub fn new(version: u64, mesh: MeshBuffer) -> Self {
        Self {
            version,
            mesh: Arc::new(mesh),
        }
    }
}

/// Consumer-side record of the last uploaded snapshot version.
///
/// A fresh tracker needs an upload for any snapshot. After
/// [`mark_uploaded`](Self::mark_uploaded) it stays clean until a snapshot
/// with a different version shows up.
#[derive(Debug, Clone, Default)]
pub struct UploadTracker {
    uploaded: Option<u64>,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `snapshot` differs from what was last uploaded.
    pub fn needs_upload(&self, snapshot: &MeshSnapshot) -> bool {
        self.uploaded != Some(snapshot.version)
    }

    /// Records that `snapshot` has been uploaded.
    pub fn mark_uploaded(&mut self, snapshot: &MeshSnapshot) {
        self.uploaded = Some(snapshot.version);
    }

    /// Returns the last uploaded version, if any.
    pub fn uploaded_version(&self) -> Option<u64> {
        self.uploaded
    }

    /// Forgets the last upload, e.g. after the GPU context was lost.
    pub fn reset(&mut self) {
        self.uploaded = None;
    }
}
