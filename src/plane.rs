//! Plane and frustum geometry helpers shared by camera and tile culling.
//!
//! A plane is stored as a `Vector4`: xyz is the normal, w the signed offset.
//! A point is on the inside when `dot(normal, point) + offset >= 0`.

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Vector4};

/// Plane equation (normal, offset), inside-positive.
pub type Plane = Vector4<f32>;

/// Six planes of a view or tile frustum, in extraction order:
/// left, right, bottom, top, near, far.
pub type FrustumPlanes = [Plane; 6];

/// Signed distance from `point` to `plane`, scaled by the normal's length.
/// For unit-length normals this is the true euclidean distance.
pub fn signed_distance(plane: Plane, point: Point3<f32>) -> f32 {
    plane.truncate().dot(point.to_vec()) + plane.w
}

/// Scale a plane so its normal has unit length. Required wherever the
/// offset is compared against a world-space radius. Degenerate planes are
/// returned unchanged.
pub fn normalize_plane(plane: Plane) -> Plane {
    let length = plane.truncate().magnitude();
    if length > 0.0 {
        plane / length
    } else {
        plane
    }
}

/// Extract the six frustum planes from a combined view-projection matrix
/// using the Gribb-Hartmann row-add/row-subtract method: left/right come
/// from row 3 ± row 0, bottom/top from row 3 ± row 1, near/far from
/// row 3 ± row 2. Planes are normalized to unit-length normals.
pub fn extract_frustum_planes(vp: &Matrix4<f32>) -> FrustumPlanes {
    // cgmath stores columns, so m.x.w is column 0 row 3.
    let m = vp;

    [
        // Left
        Vector4::new(m.x.w + m.x.x, m.y.w + m.y.x, m.z.w + m.z.x, m.w.w + m.w.x),
        // Right
        Vector4::new(m.x.w - m.x.x, m.y.w - m.y.x, m.z.w - m.z.x, m.w.w - m.w.x),
        // Bottom
        Vector4::new(m.x.w + m.x.y, m.y.w + m.y.y, m.z.w + m.z.y, m.w.w + m.w.y),
        // Top
        Vector4::new(m.x.w - m.x.y, m.y.w - m.y.y, m.z.w - m.z.y, m.w.w - m.w.y),
        // Near
        Vector4::new(m.x.w + m.x.z, m.y.w + m.y.z, m.z.w + m.z.z, m.w.w + m.w.z),
        // Far
        Vector4::new(m.x.w - m.x.z, m.y.w - m.y.z, m.z.w - m.z.z, m.w.w - m.w.z),
    ]
    .map(normalize_plane)
}

/// Plane through three points with normal `(b - a) × (c - a)`, unit length.
/// Collinear points yield the degenerate all-zero plane, which every point
/// sits exactly on.
pub fn plane_from_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Plane {
    let normal = (b - a).cross(c - a);
    let length = normal.magnitude();
    if length > 0.0 {
        let n = normal / length;
        Vector4::new(n.x, n.y, n.z, -n.dot(a.to_vec()))
    } else {
        Vector4::new(0.0, 0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{Deg, Vector3};

    #[test]
    fn test_signed_distance_matches_plane_equation() {
        // Plane x = 2 with inside on +x.
        let plane = Vector4::new(1.0, 0.0, 0.0, -2.0);
        assert_relative_eq!(signed_distance(plane, Point3::new(5.0, 0.0, 0.0)), 3.0);
        assert_relative_eq!(signed_distance(plane, Point3::new(0.0, 7.0, -1.0)), -2.0);
    }

    #[test]
    fn test_normalize_plane_keeps_zero_set() {
        let plane = Vector4::new(0.0, 3.0, 0.0, 6.0);
        let unit = normalize_plane(plane);
        assert_relative_eq!(unit.truncate().magnitude(), 1.0);
        // Same point still lies on the plane.
        assert_relative_eq!(signed_distance(unit, Point3::new(1.0, -2.0, 4.0)), 0.0);
    }

    #[test]
    fn test_extracted_planes_contain_interior_point() {
        let proj = cgmath::perspective(Deg(90.0), 1.0, 0.1, 100.0);
        let planes = extract_frustum_planes(&proj);
        let inside = Point3::new(0.0, 0.0, -10.0);
        for plane in planes {
            assert!(signed_distance(plane, inside) > 0.0);
        }
        // Behind the near plane.
        let behind = Point3::new(0.0, 0.0, 1.0);
        assert!(planes.iter().any(|p| signed_distance(*p, behind) < 0.0));
    }

    #[test]
    fn test_plane_from_points_orientation() {
        let plane = plane_from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(plane.truncate().dot(Vector3::new(0.0, 0.0, 1.0)), 1.0);
        assert_relative_eq!(signed_distance(plane, Point3::new(0.5, 0.5, 2.0)), 2.0);
    }

    #[test]
    fn test_plane_from_collinear_points_is_degenerate() {
        let plane = plane_from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(plane, Vector4::new(0.0, 0.0, 0.0, 0.0));
    }
}
