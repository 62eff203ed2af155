//! Render-side data and the tiled light culler.
//!
//! The actual depth and shading passes live outside this crate; this
//! module owns what sits between them: the light array, its GPU mirror,
//! and the per-tile light-index binning.

pub mod light_data;
pub mod tile_culling;

pub use light_data::{GpuLight, LightSet, LightsUniform, PointLight};
pub use tile_culling::{DepthBuffer, TileLightCuller};
