//! Sightline - per-frame visibility core for a streaming outdoor renderer.
//!
//! Three subsystems, evaluated once per frame:
//! - `camera`: view/projection state and lazy 6-plane frustum extraction
//! - `world`: frustum-culled, LOD-tagged visible-chunk enumeration
//! - `renderer::tile_culling`: screen-space tiled binning of point lights
//!   with a compact packed-index output for the shading pass
//!
//! Mesh loading, shader compilation, texture management and input devices
//! are external collaborators; this crate only consumes their positions,
//! matrices and depth output, and hands visibility results back. Nothing
//! here survives the frame it was computed in.

// Constants module
pub mod constants;

// Core engine modules
pub mod error;
pub mod frame;
pub mod plane;

// Essential systems
pub mod camera;
pub mod renderer;
pub mod world;

pub use camera::{CameraConfig, CameraData, CameraUniform};
pub use error::{CullError, CullResult};
pub use frame::{prepare_frame, FrameInputs, FrameOutcome, FrameVisibility};
pub use renderer::{DepthBuffer, GpuLight, LightSet, LightsUniform, PointLight, TileLightCuller};
pub use world::{ChunkLod, ChunkManager, ChunkManagerConfig, ChunkPos, VisibleChunk};
