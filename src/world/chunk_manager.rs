//! Per-frame visible-chunk enumeration.
//!
//! Every call recomputes the visible set from scratch: candidate chunks in
//! a square window around the camera are culled against the frustum and
//! tagged with a LOD. Streaming collaborators key their own caches by the
//! (x, z) pair and pick a mesh variant from the tag.

use cgmath::Point3;

use super::chunk::{ChunkLod, ChunkPos, VisibleChunk};
use crate::camera::{self, CameraData};

/// Chunk manager configuration
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct ChunkManagerConfig {
    /// World-space edge length of a chunk
    pub chunk_size: f32,

    /// Lowest world height used for visibility test points
    pub min_height: f32,

    /// Highest world height used for visibility test points
    pub max_height: f32,

    /// Candidate window radius around the camera's chunk, in chunks
    pub view_distance: i32,

    /// Planar chunk distance at and beyond which a chunk drops to
    /// [`ChunkLod::Far`]
    pub lod_distance: f32,
}

impl Default for ChunkManagerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 64.0,
            min_height: 0.0,
            max_height: 128.0,
            view_distance: 8,
            lod_distance: 4.0,
        }
    }
}

/// Enumerates and culls the chunks around a camera.
pub struct ChunkManager {
    config: ChunkManagerConfig,
}

impl ChunkManager {
    pub fn new(config: ChunkManagerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChunkManagerConfig {
        &self.config
    }

    /// Chunk coordinate containing the camera, by flooring position.xz.
    pub fn camera_chunk(&self, camera: &CameraData) -> ChunkPos {
        ChunkPos::new(
            (camera.position.x / self.config.chunk_size).floor() as i32,
            (camera.position.z / self.config.chunk_size).floor() as i32,
        )
    }

    /// All candidate coordinates in the inclusive square window around the
    /// camera's chunk, before any culling.
    pub fn all_chunks_in_range(&self, camera: &CameraData) -> Vec<ChunkPos> {
        let center = self.camera_chunk(camera);
        let radius = self.config.view_distance;

        let mut chunks =
            Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)).max(0) as usize);
        for x in (center.x - radius)..=(center.x + radius) {
            for z in (center.z - radius)..=(center.z + radius) {
                chunks.push(ChunkPos::new(x, z));
            }
        }
        chunks
    }

    /// The eight visibility test points of a chunk: its four footprint
    /// corners at both the minimum and maximum world height.
    pub fn chunk_test_points(&self, chunk: ChunkPos) -> [Point3<f32>; 8] {
        let size = self.config.chunk_size;
        let x0 = chunk.x as f32 * size;
        let z0 = chunk.z as f32 * size;
        let mut points = [Point3::new(0.0, 0.0, 0.0); 8];
        let mut i = 0;
        for x in [x0, x0 + size] {
            for z in [z0, z0 + size] {
                for y in [self.config.min_height, self.config.max_height] {
                    points[i] = Point3::new(x, y, z);
                    i += 1;
                }
            }
        }
        points
    }

    /// LOD by squared planar distance against the squared threshold. No
    /// square root, so the comparison is exact and monotonic.
    fn lod_for(&self, camera_chunk: ChunkPos, chunk: ChunkPos) -> ChunkLod {
        let threshold = self.config.lod_distance * self.config.lod_distance;
        if camera_chunk.distance_sq(chunk) as f32 >= threshold {
            ChunkLod::Far
        } else {
            ChunkLod::Near
        }
    }

    /// This frame's visible-chunk list.
    ///
    /// Candidates that pass the any-corner frustum test are kept with
    /// their LOD tag; the camera's own chunk is appended unconditionally
    /// at [`ChunkLod::Near`], whatever the facing direction. With a view
    /// distance of zero the result is just the camera's chunk.
    pub fn visible_chunks(&self, camera: &CameraData) -> Vec<VisibleChunk> {
        let camera_chunk = self.camera_chunk(camera);
        let candidates = self.all_chunks_in_range(camera);
        let candidate_count = candidates.len();

        let mut visible = Vec::new();
        for chunk in candidates {
            if chunk == camera_chunk {
                continue;
            }
            if camera::is_any_inside_frustum(camera, &self.chunk_test_points(chunk)) {
                visible.push(VisibleChunk {
                    pos: chunk,
                    lod: self.lod_for(camera_chunk, chunk),
                });
            }
        }

        visible.push(VisibleChunk {
            pos: camera_chunk,
            lod: ChunkLod::Near,
        });

        log::debug!(
            "[ChunkManager] Candidates: {} | Visible: {} | Camera chunk: ({}, {})",
            candidate_count,
            visible.len(),
            camera_chunk.x,
            camera_chunk.z
        );

        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{calc_frustum, init_camera, set_orientation, set_position, CameraConfig};
    use std::f32::consts::PI;

    fn scenario_manager() -> ChunkManager {
        ChunkManager::new(ChunkManagerConfig {
            chunk_size: 100.0,
            min_height: 0.0,
            max_height: 50.0,
            view_distance: 3,
            lod_distance: 2.5,
        })
    }

    fn camera_at(x: f32, y: f32, z: f32) -> CameraData {
        let camera = init_camera(&CameraConfig::default());
        calc_frustum(&set_position(&camera, Point3::new(x, y, z)))
    }

    #[test]
    fn test_camera_chunk_floors_negative_positions() {
        let manager = scenario_manager();
        assert_eq!(manager.camera_chunk(&camera_at(50.0, 10.0, 50.0)), ChunkPos::new(0, 0));
        assert_eq!(manager.camera_chunk(&camera_at(-0.5, 10.0, -250.0)), ChunkPos::new(-1, -3));
    }

    #[test]
    fn test_all_chunks_in_range_is_full_window() {
        let manager = scenario_manager();
        let chunks = manager.all_chunks_in_range(&camera_at(50.0, 10.0, 50.0));
        assert_eq!(chunks.len(), 49);
        for x in -3..=3 {
            for z in -3..=3 {
                assert!(chunks.contains(&ChunkPos::new(x, z)));
            }
        }
    }

    #[test]
    fn test_lod_threshold_is_exhaustive_over_window() {
        let manager = scenario_manager();
        let camera = camera_at(50.0, 10.0, 50.0);
        let center = manager.camera_chunk(&camera);
        for chunk in manager.all_chunks_in_range(&camera) {
            let expected = if (center.distance_sq(chunk) as f32) < 6.25 {
                ChunkLod::Near
            } else {
                ChunkLod::Far
            };
            assert_eq!(manager.lod_for(center, chunk), expected, "chunk {:?}", chunk);
        }
    }

    #[test]
    fn test_visible_chunks_tags_lod_and_forces_camera_chunk() {
        let manager = scenario_manager();
        // Facing -z from the middle of chunk (0, 0).
        let camera = camera_at(50.0, 10.0, 50.0);
        let visible = manager.visible_chunks(&camera);

        // Straight ahead within the window must be visible.
        assert!(visible.iter().any(|c| c.pos == ChunkPos::new(0, -3)));

        // Every reported chunk carries the LOD the distance rule demands.
        let center = manager.camera_chunk(&camera);
        for chunk in &visible {
            assert_eq!(chunk.lod, manager.lod_for(center, chunk.pos), "chunk {:?}", chunk.pos);
        }

        // The camera's own chunk is present at Near, exactly once.
        let own: Vec<_> = visible.iter().filter(|c| c.pos == center).collect();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].lod, ChunkLod::Near);
    }

    #[test]
    fn test_camera_chunk_included_regardless_of_facing() {
        let manager = scenario_manager();
        let base = camera_at(50.0, 10.0, 50.0);
        for yaw in [0.0, PI / 2.0, PI, -PI / 2.0] {
            let camera = calc_frustum(&set_orientation(&base, 0.0, 0.0, yaw));
            let visible = manager.visible_chunks(&camera);
            assert!(visible.contains(&VisibleChunk {
                pos: ChunkPos::new(0, 0),
                lod: ChunkLod::Near
            }));
        }
    }

    #[test]
    fn test_zero_view_distance_yields_only_camera_chunk() {
        let manager = ChunkManager::new(ChunkManagerConfig {
            view_distance: 0,
            ..ChunkManagerConfig::default()
        });
        let visible = manager.visible_chunks(&camera_at(10.0, 5.0, 10.0));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].pos, ChunkPos::new(0, 0));
        assert_eq!(visible[0].lod, ChunkLod::Near);
    }

    #[test]
    fn test_stale_frustum_still_reports_camera_chunk() {
        let manager = scenario_manager();
        let camera = init_camera(&CameraConfig::default());
        assert!(camera.frustum.is_none());
        let visible = manager.visible_chunks(&camera);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].pos, manager.camera_chunk(&camera));
    }
}
