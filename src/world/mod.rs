//! World streaming types: chunk identity and per-frame visible-chunk
//! enumeration.

mod chunk;
mod chunk_manager;

pub use chunk::{ChunkLod, ChunkPos, VisibleChunk};
pub use chunk_manager::{ChunkManager, ChunkManagerConfig};
