//! Camera operations.
//!
//! Pure functions: they take camera data and return new data. Every
//! function that changes position, orientation or projection clears the
//! cached frustum; `calc_frustum` is the only way to repopulate it.

use cgmath::{EuclideanSpace, Matrix, Matrix4, Point3, Rad, Vector3};

use super::camera_data::{CameraConfig, CameraData, CameraUniform};
use crate::plane::{extract_frustum_planes, signed_distance};

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize camera from config. The frustum starts empty and must be
/// computed before the first visibility test.
pub fn init_camera(config: &CameraConfig) -> CameraData {
    CameraData {
        position: config.initial_position,
        roll: config.initial_roll,
        pitch: config.initial_pitch,
        yaw: config.initial_yaw,
        projection: config.projection(),
        frustum: None,
    }
}

// ============================================================================
// MUTATION
// ============================================================================

/// Set absolute orientation (radians).
pub fn set_orientation(camera: &CameraData, roll: f32, pitch: f32, yaw: f32) -> CameraData {
    CameraData {
        roll,
        pitch,
        yaw,
        frustum: None,
        ..*camera
    }
}

/// Apply relative rotation deltas (radians). Angles accumulate without
/// wraparound; over very long runtimes the floats drift.
pub fn rotate_by(camera: &CameraData, roll: f32, pitch: f32, yaw: f32) -> CameraData {
    CameraData {
        roll: camera.roll + roll,
        pitch: camera.pitch + pitch,
        yaw: camera.yaw + yaw,
        frustum: None,
        ..*camera
    }
}

/// Set absolute world position.
pub fn set_position(camera: &CameraData, position: Point3<f32>) -> CameraData {
    CameraData {
        position,
        frustum: None,
        ..*camera
    }
}

/// Translate by a world-space offset.
pub fn translate(camera: &CameraData, offset: Vector3<f32>) -> CameraData {
    CameraData {
        position: camera.position + offset,
        frustum: None,
        ..*camera
    }
}

/// Move along the camera's own basis: -z forward, +y up, +x right. The
/// orientation matrix rotates the offset into world space first, so
/// "forward" always means the current facing.
pub fn move_local(camera: &CameraData, offset: Vector3<f32>) -> CameraData {
    let world_offset = (rotation_matrix(camera) * offset.extend(0.0)).truncate();
    translate(camera, world_offset)
}

/// Replace the projection matrix (viewport resize).
pub fn set_projection(camera: &CameraData, projection: Matrix4<f32>) -> CameraData {
    CameraData {
        projection,
        frustum: None,
        ..*camera
    }
}

// ============================================================================
// DERIVED MATRICES
// ============================================================================

/// Orientation matrix, composed in the fixed order yaw * pitch * roll.
pub fn rotation_matrix(camera: &CameraData) -> Matrix4<f32> {
    Matrix4::from_angle_y(Rad(camera.yaw))
        * Matrix4::from_angle_x(Rad(camera.pitch))
        * Matrix4::from_angle_z(Rad(camera.roll))
}

/// Combined view-projection matrix.
///
/// With `include_translation` the view is `inverse(translation * rotation)`;
/// without it only the rotation is inverted, which sky and reflection
/// passes use to ignore the camera's position. The rotation inverse is its
/// transpose, so no general matrix inversion happens here.
pub fn view_projection(camera: &CameraData, include_translation: bool) -> Matrix4<f32> {
    let rot_inverse = rotation_matrix(camera).transpose();
    let view = if include_translation {
        rot_inverse * Matrix4::from_translation(-camera.position.to_vec())
    } else {
        rot_inverse
    };
    camera.projection * view
}

/// Recompute the cached frustum from the translated view-projection
/// matrix. Must run after any mutation and before any visibility test.
pub fn calc_frustum(camera: &CameraData) -> CameraData {
    let vp = view_projection(camera, true);
    CameraData {
        frustum: Some(extract_frustum_planes(&vp)),
        ..*camera
    }
}

/// Build the GPU-side camera uniform. Planes are extracted from the
/// matrices directly, independent of the cached frustum.
pub fn build_camera_uniform(camera: &CameraData) -> CameraUniform {
    let vp = view_projection(camera, true);
    let planes = extract_frustum_planes(&vp);
    CameraUniform {
        view_projection: vp.into(),
        position: camera.position.to_homogeneous().into(),
        frustum_planes: planes.map(|p| p.into()),
    }
}

// ============================================================================
// VISIBILITY TESTS
// ============================================================================

/// Point-in-frustum test with AND semantics over all six planes. Reports
/// `false` while the frustum cache is empty.
pub fn is_inside_frustum(camera: &CameraData, point: Point3<f32>) -> bool {
    match camera.frustum {
        Some(planes) => planes.iter().all(|p| signed_distance(*p, point) >= 0.0),
        None => false,
    }
}

/// OR over a point set: visible if any single point is fully inside.
///
/// This is a deliberate cheap approximation of volume/frustum overlap, not
/// an exact intersection test: a large volume can straddle the frustum
/// with no corner inside and be reported invisible.
pub fn is_any_inside_frustum(camera: &CameraData, points: &[Point3<f32>]) -> bool {
    points.iter().any(|p| is_inside_frustum(camera, *p))
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Log camera transform state for debugging.
pub fn log_camera_context(camera: &CameraData) {
    log::debug!(
        "[Camera] Position: ({:.1}, {:.1}, {:.1}) | Roll: {:.3}rad | Pitch: {:.3}rad | Yaw: {:.3}rad | Frustum: {}",
        camera.position.x,
        camera.position.y,
        camera.position.z,
        camera.roll,
        camera.pitch,
        camera.yaw,
        if camera.frustum.is_some() { "cached" } else { "stale" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn test_camera() -> CameraData {
        calc_frustum(&init_camera(&CameraConfig::default()))
    }

    #[test]
    fn test_optical_center_is_inside_frustum() {
        let camera = test_camera();
        // Default orientation looks down -z; pick a depth between near and
        // far.
        assert!(is_inside_frustum(&camera, Point3::new(0.0, 0.0, -10.0)));
        assert!(!is_inside_frustum(&camera, Point3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_mutation_invalidates_frustum() {
        let camera = test_camera();
        let inside = Point3::new(0.0, 0.0, -10.0);
        assert!(is_inside_frustum(&camera, inside));

        let moved = translate(&camera, Vector3::new(0.0, 1.0, 0.0));
        assert!(moved.frustum.is_none());
        assert!(!is_inside_frustum(&moved, inside));

        let recomputed = calc_frustum(&moved);
        assert!(is_inside_frustum(&recomputed, inside));
    }

    #[test]
    fn test_rotate_by_accumulates_without_wraparound() {
        let camera = init_camera(&CameraConfig::default());
        let mut rotated = camera;
        for _ in 0..8 {
            rotated = rotate_by(&rotated, 0.0, 0.0, PI);
        }
        assert_relative_eq!(rotated.yaw, 8.0 * PI);

        let reset = set_orientation(&rotated, 0.0, 0.25, 0.5);
        assert_relative_eq!(reset.pitch, 0.25);
        assert_relative_eq!(reset.yaw, 0.5);
    }

    #[test]
    fn test_move_local_follows_facing() {
        let camera = set_orientation(&init_camera(&CameraConfig::default()), 0.0, 0.0, FRAC_PI_2);
        // Yaw of pi/2 turns local -z onto world -x.
        let moved = move_local(&camera, Vector3::new(0.0, 0.0, -3.0));
        assert_relative_eq!(moved.position.x, -3.0, epsilon = 1e-5);
        assert_relative_eq!(moved.position.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(moved.position.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_view_projection_without_translation_ignores_position() {
        let origin = init_camera(&CameraConfig::default());
        let far_away = set_position(&origin, Point3::new(500.0, -20.0, 31.0));
        let a = view_projection(&origin, false);
        let b = view_projection(&far_away, false);
        assert_eq!(a, b);
        assert_ne!(view_projection(&origin, true), view_projection(&far_away, true));
    }

    #[test]
    fn test_any_inside_uses_or_semantics() {
        let camera = test_camera();
        let points = [
            Point3::new(0.0, 0.0, 900.0),
            Point3::new(0.0, 0.0, -5.0),
            Point3::new(0.0, 5000.0, 0.0),
        ];
        assert!(is_any_inside_frustum(&camera, &points));

        let all_outside = [Point3::new(0.0, 0.0, 900.0), Point3::new(0.0, 5000.0, 0.0)];
        assert!(!is_any_inside_frustum(&camera, &all_outside));
    }

    #[test]
    fn test_uniform_mirrors_view_projection() {
        let camera = set_position(&init_camera(&CameraConfig::default()), Point3::new(1.0, 2.0, 3.0));
        let uniform = build_camera_uniform(&camera);
        let vp: [[f32; 4]; 4] = view_projection(&camera, true).into();
        assert_eq!(uniform.view_projection, vp);
        assert_eq!(uniform.position, [1.0, 2.0, 3.0, 1.0]);
    }
}
