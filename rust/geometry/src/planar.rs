// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat meshes built from a single outline

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::triangulation::{signed_area, triangulate_polygon};
use crate::vector::to_points2;
use nalgebra::{Point2, Point3, Vector3};

/// Triangulate a simple outline into a flat mesh
///
/// Triangulation runs on the XY projection, vertices keep their full 3D
/// position. Faces are wound counter-clockwise when seen from +Z whatever
/// the outline winding, so the mesh always faces up. UV set 0 holds the
/// (x, y) of each face corner.
pub fn planar_geometry_from_points(points: &[Point3<f64>]) -> Result<Mesh> {
    if points.is_empty() {
        return Err(Error::invalid_argument("planar geometry needs outline points"));
    }

    let flat = to_points2(points);
    let mut indices = triangulate_polygon(&flat)?;
    if signed_area(&flat) < 0.0 {
        for tri in indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
    }

    let mut mesh = Mesh::with_capacity(points.len(), indices.len());
    for p in points {
        mesh.add_vertex(*p, Vector3::z());
    }

    for tri in indices.chunks_exact(3) {
        let corner = |i: usize| Point2::new(flat[tri[i]].x, flat[tri[i]].y);
        mesh.add_triangle_with_uvs(
            tri[0] as u32,
            tri[1] as u32,
            tri[2] as u32,
            [corner(0), corner(1), corner(2)],
        );
    }
    mesh.recompute_normals();

    tracing::debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Built planar geometry"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clockwise_square_faces_up() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
        ];
        let mesh = planar_geometry_from_points(&points).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        for n in mesh.face_normals.chunks_exact(3) {
            assert_relative_eq!(n[2], 1.0);
        }
    }

    #[test]
    fn test_uvs_follow_face_corners() {
        let points = vec![
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(4.0, 0.0, 2.0),
            Point3::new(0.0, 3.0, 2.0),
        ];
        let mesh = planar_geometry_from_points(&points).unwrap();

        assert!(mesh.has_uv_set(0));
        let uvs = mesh.face_uvs(0, 0).unwrap();
        for (corner, &vi) in mesh.face(0).iter().enumerate() {
            let v = mesh.vertex(vi as usize);
            assert_relative_eq!(uvs[corner][0], v.x as f32);
            assert_relative_eq!(uvs[corner][1], v.y as f32);
        }
        // z is carried through untouched
        assert_relative_eq!(mesh.vertex(1).z, 2.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            planar_geometry_from_points(&[]),
            Err(Error::InvalidArgument(_))
        ));
        let two = [Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        assert!(matches!(
            planar_geometry_from_points(&two),
            Err(Error::PreconditionViolation(_))
        ));
    }
}
