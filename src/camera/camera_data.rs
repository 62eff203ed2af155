//! Camera data structures.
//!
//! Pure data; all transformations live in camera_operations.rs.

use cgmath::{Matrix4, Point3, Rad, SquareMatrix};
use static_assertions::const_assert_eq;

use crate::plane::FrustumPlanes;

/// Camera state plus its cached derived frustum.
///
/// The frustum is a derived value: every mutating operation clears it, and
/// it stays `None` until `calc_frustum` runs. Visibility tests against a
/// cleared frustum conservatively report "not visible".
#[derive(Debug, Clone, Copy)]
pub struct CameraData {
    /// Camera position in world space
    pub position: Point3<f32>,

    /// Roll rotation (radians, around the view axis)
    pub roll: f32,

    /// Pitch rotation (radians, around X axis)
    pub pitch: f32,

    /// Yaw rotation (radians, around Y axis)
    pub yaw: f32,

    /// Projection matrix, supplied externally on viewport resize
    pub projection: Matrix4<f32>,

    /// Cached frustum planes; `None` after any mutation
    pub frustum: Option<FrustumPlanes>,
}

impl Default for CameraData {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 0.0),
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            projection: Matrix4::identity(),
            frustum: None,
        }
    }
}

/// Camera configuration for initialization
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct CameraConfig {
    pub initial_position: Point3<f32>,
    pub initial_roll: f32,
    pub initial_pitch: f32,
    pub initial_yaw: f32,
    pub fov_degrees: f32,
    pub aspect_ratio: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_position: Point3::new(0.0, 0.0, 0.0),
            initial_roll: 0.0,
            initial_pitch: 0.0,
            initial_yaw: 0.0,
            fov_degrees: 90.0,
            aspect_ratio: 16.0 / 9.0,
            near_plane: 0.1,
            far_plane: 1000.0,
        }
    }
}

impl CameraConfig {
    /// Projection matrix described by this config.
    pub fn projection(&self) -> Matrix4<f32> {
        cgmath::perspective(
            Rad(self.fov_degrees.to_radians()),
            self.aspect_ratio,
            self.near_plane,
            self.far_plane,
        )
    }
}

/// Camera data for GPU passes
/// Must match shader layout exactly
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// View-projection matrix (4x4, column-major)
    pub view_projection: [[f32; 4]; 4],

    /// Camera position (vec3 + padding)
    pub position: [f32; 4],

    /// Frustum planes: left, right, bottom, top, near, far
    pub frustum_planes: [[f32; 4]; 6],
}

const_assert_eq!(std::mem::size_of::<CameraUniform>(), 176);
