//! Screen-space tiled light culling.
//!
//! The viewport is split into [`TILE_SIZE`]-pixel tiles. Each tile gets a
//! sub-frustum built from the camera's inverse view-projection and the
//! tile's sampled depth range, every light is sphere-tested against it,
//! and the surviving indices are packed into RGBA8 layers for the shading
//! pass. The per-tile work was a fullscreen-pass emulation in renderers
//! without compute dispatch; here it is a rayon parallel loop over the
//! tile grid with the same per-tile math, joined before this call
//! returns.
//!
//! Must run strictly after the depth pass and strictly before the shading
//! pass reads the output layers.

mod depth_buffer;
mod packing;

pub use depth_buffer::DepthBuffer;
pub use packing::{pack_index_pair, unpack_index_pair};

use cgmath::{EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector4};
use rayon::prelude::*;

use crate::constants::{
    LIGHT_INDEX_SENTINEL, MAX_LIGHTS, MAX_LIGHTS_PER_TILE, TILE_OUTPUT_LAYERS, TILE_SIZE,
};
use crate::error::{CullError, CullResult};
use crate::plane::{plane_from_points, signed_distance, Plane};
use crate::renderer::light_data::LightSet;

/// Fixed-capacity light list of one tile, sentinel-filled past the last
/// valid index.
type TileSlots = [u16; MAX_LIGHTS_PER_TILE];

/// Bins lights into screen tiles and owns the packed output layers.
pub struct TileLightCuller {
    width: u32,
    height: u32,
    tiles_x: u32,
    tiles_y: u32,
    layers: Vec<Vec<[u8; 4]>>,
}

impl TileLightCuller {
    pub fn new(width: u32, height: u32) -> Self {
        let mut culler = Self {
            width: 0,
            height: 0,
            tiles_x: 0,
            tiles_y: 0,
            layers: vec![Vec::new(); TILE_OUTPUT_LAYERS],
        };
        culler.resize(width, height);
        culler
    }

    /// Recompute the tile grid for a new viewport and rebuild the output
    /// layers to exactly grid size. Previous contents are discarded; the
    /// results were frame-local anyway.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.tiles_x = width.div_ceil(TILE_SIZE);
        self.tiles_y = height.div_ceil(TILE_SIZE);
        let tile_count = self.tiles_x as usize * self.tiles_y as usize;
        for layer in &mut self.layers {
            layer.clear();
            layer.resize(tile_count, [0; 4]);
        }
        log::debug!(
            "[TileCull] Viewport {}x{} -> {}x{} tiles",
            width,
            height,
            self.tiles_x,
            self.tiles_y
        );
    }

    pub fn tiles_x(&self) -> u32 {
        self.tiles_x
    }

    pub fn tiles_y(&self) -> u32 {
        self.tiles_y
    }

    /// Packed output layer `index`, one texel per tile, for upload by the
    /// external renderer.
    pub fn layer(&self, index: usize) -> &[[u8; 4]] {
        &self.layers[index]
    }

    /// Assign every light to the tiles it overlaps.
    ///
    /// `view_projection` is the camera's combined matrix, the same one the
    /// depth pass rendered with. Fails soft: a depth buffer of the wrong
    /// size or a singular matrix skips the frame without touching the
    /// previous output.
    pub fn cull_lights(
        &mut self,
        view_projection: Matrix4<f32>,
        depth: &DepthBuffer<'_>,
        lights: &LightSet,
    ) -> CullResult<()> {
        if depth.width() != self.width || depth.height() != self.height {
            return Err(CullError::DepthSizeMismatch {
                expected: self.width as usize * self.height as usize,
                actual: depth.width() as usize * depth.height() as usize,
            });
        }
        let inverse = view_projection
            .invert()
            .ok_or(CullError::SingularViewProjection)?;

        let tile_count = self.tiles_x as usize * self.tiles_y as usize;
        let tiles_x = self.tiles_x;
        let slots: Vec<TileSlots> = (0..tile_count)
            .into_par_iter()
            .map(|index| {
                let tx = index as u32 % tiles_x;
                let ty = index as u32 / tiles_x;
                self.cull_tile(tx, ty, &inverse, depth, lights)
            })
            .collect();

        for (index, tile_slots) in slots.iter().enumerate() {
            for (layer_index, pair) in tile_slots.chunks_exact(2).enumerate() {
                self.layers[layer_index][index] = pack_index_pair(pair[0], pair[1]);
            }
        }
        Ok(())
    }

    /// Decode one tile's light list, stopping at the first sentinel. The
    /// read side of the packed-index contract.
    pub fn tile_lights(&self, tx: u32, ty: u32) -> Vec<u16> {
        let index = (ty * self.tiles_x + tx) as usize;
        let mut indices = Vec::new();
        for layer in &self.layers {
            let (a, b) = unpack_index_pair(layer[index]);
            for value in [a, b] {
                if value >= MAX_LIGHTS as u16 {
                    return indices;
                }
                indices.push(value);
            }
        }
        indices
    }

    /// Per-tile culling math, identical for every tile.
    fn cull_tile(
        &self,
        tx: u32,
        ty: u32,
        inverse: &Matrix4<f32>,
        depth: &DepthBuffer<'_>,
        lights: &LightSet,
    ) -> TileSlots {
        // Pixel rect, clamped at the viewport edge.
        let px0 = tx * TILE_SIZE;
        let px1 = (px0 + TILE_SIZE).min(self.width);
        let py0 = ty * TILE_SIZE;
        let py1 = (py0 + TILE_SIZE).min(self.height);

        let mut min_depth = 1.0f32;
        let mut max_depth = 0.0f32;
        for y in py0..py1 {
            for x in px0..px1 {
                let d = depth.sample(x, y);
                min_depth = min_depth.min(d);
                max_depth = max_depth.max(d);
            }
        }
        // Nothing written in this tile leaves min above max.
        if min_depth > max_depth {
            min_depth = max_depth;
        }

        let planes = tile_frustum(
            inverse,
            ndc_rect(px0, px1, py0, py1, self.width, self.height),
            2.0 * min_depth - 1.0,
            2.0 * max_depth - 1.0,
        );

        let mut slots: TileSlots = [LIGHT_INDEX_SENTINEL; MAX_LIGHTS_PER_TILE];
        let mut count = 0;
        for (index, light) in lights.iter().enumerate() {
            if count >= MAX_LIGHTS_PER_TILE {
                break;
            }
            let inside = planes
                .iter()
                .all(|p| signed_distance(*p, light.position) >= -light.radius);
            if inside {
                slots[count] = index as u16;
                count += 1;
            }
        }
        slots
    }
}

/// NDC bounds of a pixel rect: (x0, x1, y0, y1), y up.
fn ndc_rect(px0: u32, px1: u32, py0: u32, py1: u32, width: u32, height: u32) -> (f32, f32, f32, f32) {
    (
        2.0 * px0 as f32 / width as f32 - 1.0,
        2.0 * px1 as f32 / width as f32 - 1.0,
        2.0 * py0 as f32 / height as f32 - 1.0,
        2.0 * py1 as f32 / height as f32 - 1.0,
    )
}

fn unproject(inverse: &Matrix4<f32>, x: f32, y: f32, z: f32) -> Point3<f32> {
    let v = inverse * Vector4::new(x, y, z, 1.0);
    Point3::from_vec(v.truncate() / v.w)
}

/// Orient a plane so `reference` is on its inside half-space.
fn orient_toward(plane: Plane, reference: Point3<f32>) -> Plane {
    if signed_distance(plane, reference) < 0.0 {
        -plane
    } else {
        plane
    }
}

/// Build a tile's six planes with unit-length normals pointing inward.
///
/// The four side planes come from the tile's NDC rectangle extruded over
/// the full depth range; the near and far planes come from the sampled
/// min/max depth. Unit normals matter: the light test compares the plane
/// offset against an unnormalized world-space radius.
fn tile_frustum(
    inverse: &Matrix4<f32>,
    (x0, x1, y0, y1): (f32, f32, f32, f32),
    z_min: f32,
    z_max: f32,
) -> [Plane; 6] {
    // Full-depth corners of the tile's NDC rect: n = z -1, f = z +1.
    let n00 = unproject(inverse, x0, y0, -1.0);
    let n10 = unproject(inverse, x1, y0, -1.0);
    let n11 = unproject(inverse, x1, y1, -1.0);
    let n01 = unproject(inverse, x0, y1, -1.0);
    let f00 = unproject(inverse, x0, y0, 1.0);
    let f10 = unproject(inverse, x1, y0, 1.0);
    let f11 = unproject(inverse, x1, y1, 1.0);
    let f01 = unproject(inverse, x0, y1, 1.0);

    let corners = [n00, n10, n11, n01, f00, f10, f11, f01];
    let centroid = Point3::from_vec(
        corners
            .iter()
            .fold(cgmath::Vector3::new(0.0, 0.0, 0.0), |acc, p| acc + p.to_vec())
            / corners.len() as f32,
    );

    let left = orient_toward(plane_from_points(n00, n01, f00), centroid);
    let right = orient_toward(plane_from_points(n10, f10, n11), centroid);
    let bottom = orient_toward(plane_from_points(n00, f00, n10), centroid);
    let top = orient_toward(plane_from_points(n01, n11, f01), centroid);

    // Depth planes sit at the sampled range. The centroid of the
    // full-depth extrusion can land outside that range, so each plane is
    // oriented toward the opposite end of the depth axis instead.
    let mid_x = (x0 + x1) * 0.5;
    let mid_y = (y0 + y1) * 0.5;
    let near = orient_toward(
        plane_from_points(
            unproject(inverse, x0, y0, z_min),
            unproject(inverse, x1, y0, z_min),
            unproject(inverse, x0, y1, z_min),
        ),
        unproject(inverse, mid_x, mid_y, 1.0),
    );
    let far = orient_toward(
        plane_from_points(
            unproject(inverse, x0, y0, z_max),
            unproject(inverse, x0, y1, z_max),
            unproject(inverse, x1, y0, z_max),
        ),
        unproject(inverse, mid_x, mid_y, -1.0),
    );

    [left, right, bottom, top, near, far]
}
