//! Chunk identity and LOD tags.
//!
//! A chunk is a fixed-size square world region addressed by integer grid
//! coordinates on the xz plane. The core never stores chunks; it only
//! names them in the current frame's visible set.

/// Grid coordinate of a chunk on the xz plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Squared planar distance to another chunk, in chunk units.
    pub fn distance_sq(&self, other: ChunkPos) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dz = (self.z - other.z) as i64;
        dx * dx + dz * dz
    }
}

/// Distance-based level of detail for a chunk's mesh variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ChunkLod {
    Near,
    Far,
}

/// One entry of the frame's visible-chunk list. Valid only for the frame
/// it was computed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibleChunk {
    pub pos: ChunkPos,
    pub lod: ChunkLod,
}
