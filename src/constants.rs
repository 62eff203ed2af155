//! Fixed capacities and dimensions shared across the visibility core.

/// Edge length of a screen-space light-culling tile, in pixels.
pub const TILE_SIZE: u32 = 16;

/// Upper bound on the number of point lights per frame. Lights pushed past
/// this are dropped silently.
pub const MAX_LIGHTS: usize = 64;

/// Upper bound on the number of lights binned into a single tile.
/// Overflowing lights are truncated, never an error.
pub const MAX_LIGHTS_PER_TILE: usize = 16;

/// Number of RGBA8 output layers per tile. Each texel packs two light
/// indices, so 8 layers cover [`MAX_LIGHTS_PER_TILE`] slots.
pub const TILE_OUTPUT_LAYERS: usize = MAX_LIGHTS_PER_TILE / 2;

/// Written after the last valid index when a tile's list is not full.
/// Always >= the frame's light count, so readers stop at the first
/// occurrence.
pub const LIGHT_INDEX_SENTINEL: u16 = MAX_LIGHTS as u16;
