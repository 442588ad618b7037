// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D outlines to 3D prisms

use crate::config::{ExtrudeOptions, CONTOUR_DEDUP_EPSILON};
use crate::contour::{offset_contour, to_clockwise};
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::triangulation::triangulate_polygon;
use crate::vector::{equals_within, to_points2};
use nalgebra::{Point2, Point3, Vector3};
use std::f64::consts::FRAC_PI_2;

/// One ring of the extrusion: the outline at height `z`, pushed out by `padding`
#[derive(Debug, Clone, Copy)]
struct Layer {
    z: f64,
    padding: f64,
}

/// Heights and paddings of every ring from the bottom cap to the top cap
///
/// Bevel rings follow a quarter circle: they start at the plain outline
/// `bevel_thickness` beyond the body and widen to `bevel_size` where they
/// meet it.
fn layers(options: &ExtrudeOptions) -> Vec<Layer> {
    let body_padding = if options.bevel_enabled {
        options.bevel_size
    } else {
        0.0
    };
    let bevel = |b: u32| {
        let t = b as f64 / options.bevel_segments as f64;
        let angle = t * FRAC_PI_2;
        (
            options.bevel_thickness * angle.cos(),
            options.bevel_size * angle.sin(),
        )
    };

    let mut layers = Vec::new();
    if options.bevel_enabled {
        for b in 0..options.bevel_segments {
            let (dz, padding) = bevel(b);
            layers.push(Layer { z: -dz, padding });
        }
    }
    for s in 0..=options.steps {
        layers.push(Layer {
            z: options.depth * s as f64 / options.steps as f64,
            padding: body_padding,
        });
    }
    if options.bevel_enabled {
        for b in (0..options.bevel_segments).rev() {
            let (dz, padding) = bevel(b);
            layers.push(Layer {
                z: options.depth + dz,
                padding,
            });
        }
    }
    layers
}

/// Extrude an outline along +Z
///
/// The outline is read in the XY plane (z is ignored) and may be given in
/// either winding; a repeated closing point is dropped. Each wall quad and
/// each cap owns its vertices so normals stay flat. UV set 0 holds (x, y)
/// on the caps and (distance along the outline, z) on the walls.
pub fn extrude(points: &[Point3<f64>], options: &ExtrudeOptions) -> Result<Mesh> {
    if points.is_empty() {
        return Err(Error::invalid_argument("extrusion needs outline points"));
    }
    options.validate()?;

    let mut outline = to_clockwise(points);
    if outline.len() > 1 && equals_within(&outline[0], &outline[outline.len() - 1], CONTOUR_DEDUP_EPSILON) {
        outline.pop();
    }
    if outline.len() < 3 {
        return Err(Error::precondition(format!(
            "extrusion needs at least 3 distinct outline points, got {}",
            outline.len()
        )));
    }
    for p in &mut outline {
        p.z = 0.0;
    }

    let cap_indices = triangulate_polygon(&to_points2(&outline))?;

    let rings = layers(options)
        .into_iter()
        .map(|layer| ring_at(&outline, layer))
        .collect::<Result<Vec<_>>>()?;

    let n = outline.len();
    let mut mesh = Mesh::with_capacity(
        n * 2 + (rings.len() - 1) * n * 4,
        cap_indices.len() * 2 + (rings.len() - 1) * n * 6,
    );
    mesh.ensure_uv_sets(1);

    // clockwise triangles already face -Z
    if let Some(bottom) = rings.first() {
        create_cap(bottom, &cap_indices, false, &mut mesh);
    }
    if let Some(top) = rings.last() {
        create_cap(top, &cap_indices, true, &mut mesh);
    }
    for band in rings.windows(2) {
        create_side_walls(&band[0], &band[1], &mut mesh);
    }

    mesh.recompute_normals();
    tracing::debug!(
        rings = rings.len(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        bevel = options.bevel_enabled,
        "Extruded outline"
    );
    Ok(mesh)
}

fn ring_at(outline: &[Point3<f64>], layer: Layer) -> Result<Vec<Point3<f64>>> {
    let mut ring = if layer.padding == 0.0 {
        outline.to_vec()
    } else {
        let mut offset = offset_contour(layer.padding, outline)?;
        offset.pop();
        offset
    };
    for p in &mut ring {
        p.z = layer.z;
    }
    Ok(ring)
}

/// Create a cap from the shared outline triangulation
#[inline]
fn create_cap(ring: &[Point3<f64>], indices: &[usize], flip: bool, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;

    for point in ring {
        mesh.add_vertex(*point, Vector3::zeros());
    }

    for tri in indices.chunks_exact(3) {
        let corner = |i: usize| Point2::new(ring[tri[i]].x, ring[tri[i]].y);
        let i0 = base_index + tri[0] as u32;
        let i1 = base_index + tri[1] as u32;
        let i2 = base_index + tri[2] as u32;

        if flip {
            mesh.add_triangle_with_uvs(i0, i2, i1, [corner(0), corner(2), corner(1)]);
        } else {
            mesh.add_triangle_with_uvs(i0, i1, i2, [corner(0), corner(1), corner(2)]);
        }
    }
}

/// Create the wall quads between two consecutive rings
fn create_side_walls(lower: &[Point3<f64>], upper: &[Point3<f64>], mesh: &mut Mesh) {
    let n = lower.len();
    let mut run = 0.0;

    for i in 0..n {
        let j = (i + 1) % n;
        let (b0, b1) = (lower[i], lower[j]);
        let (t0, t1) = (upper[i], upper[j]);

        let edge = b1 - b0;
        let length = edge.xy().norm();
        if length < 1e-10 {
            // Skip degenerate edge (duplicate points in outline)
            continue;
        }

        let u0 = run;
        let u1 = run + length;
        run = u1;

        let idx = mesh.vertex_count() as u32;
        mesh.add_vertex(b0, Vector3::zeros());
        mesh.add_vertex(b1, Vector3::zeros());
        mesh.add_vertex(t1, Vector3::zeros());
        mesh.add_vertex(t0, Vector3::zeros());

        let uv_b0 = Point2::new(u0, b0.z);
        let uv_b1 = Point2::new(u1, b1.z);
        let uv_t1 = Point2::new(u1, t1.z);
        let uv_t0 = Point2::new(u0, t0.z);

        // Clockwise outline: this winding faces away from the interior
        mesh.add_triangle_with_uvs(idx, idx + 2, idx + 1, [uv_b0, uv_t1, uv_b1]);
        mesh.add_triangle_with_uvs(idx, idx + 3, idx + 2, [uv_b0, uv_t0, uv_t1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(size: f64) -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(size, 0.0, 0.0),
            Point3::new(size, size, 0.0),
            Point3::new(0.0, size, 0.0),
        ]
    }

    fn face_centre(mesh: &Mesh, face: usize) -> Point3<f64> {
        let [a, b, c] = mesh.face(face);
        let sum = mesh.vertex(a as usize).coords
            + mesh.vertex(b as usize).coords
            + mesh.vertex(c as usize).coords;
        Point3::from(sum / 3.0)
    }

    #[test]
    fn test_extrude_flat_box() {
        let mesh = extrude(&square(10.0), &ExtrudeOptions::flat(2.0)).unwrap();

        assert_eq!(mesh.triangle_count(), 2 + 2 + 8);
        assert_eq!(mesh.vertex_count(), 4 + 4 + 16);

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(max, Point3::new(10.0, 10.0, 2.0));
    }

    #[test]
    fn test_every_face_points_outward() {
        let mesh = extrude(&square(10.0), &ExtrudeOptions::flat(2.0)).unwrap();
        let centre = Point3::new(5.0, 5.0, 1.0);

        for face in 0..mesh.triangle_count() {
            let n = &mesh.face_normals[face * 3..face * 3 + 3];
            let normal = Vector3::new(n[0] as f64, n[1] as f64, n[2] as f64);
            let outward = face_centre(&mesh, face) - centre;
            assert!(normal.dot(&outward) > 0.0, "face {face} points inward");
        }
    }

    #[test]
    fn test_bevel_extends_bounds() {
        let options = ExtrudeOptions::default();
        let mesh = extrude(&square(1.0), &options).unwrap();

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.x, -0.1, epsilon = 1e-6);
        assert_relative_eq!(max.y, 1.1, epsilon = 1e-6);
        assert_relative_eq!(min.z, -0.2, epsilon = 1e-6);
        assert_relative_eq!(max.z, 1.2, epsilon = 1e-6);

        // 3 + 2 + 3 rings give 7 wall bands of 4 quads each
        assert_eq!(mesh.triangle_count(), 2 + 2 + 7 * 4 * 2);
    }

    #[test]
    fn test_steps_subdivide_walls() {
        let options = ExtrudeOptions {
            steps: 4,
            ..ExtrudeOptions::flat(1.0)
        };
        let mesh = extrude(&square(1.0), &options).unwrap();
        assert_eq!(mesh.triangle_count(), 2 + 2 + 4 * 4 * 2);
    }

    #[test]
    fn test_uvs_cover_every_corner() {
        let mesh = extrude(&square(10.0), &ExtrudeOptions::flat(2.0)).unwrap();
        assert!(mesh.has_uv_set(0));

        // Walls run along the outline: the last wall ends at the perimeter
        let max_u = mesh.uv_sets[0].iter().map(|uv| uv[0]).fold(f32::MIN, f32::max);
        assert_relative_eq!(max_u, 40.0);
    }

    #[test]
    fn test_closing_point_and_winding_are_normalised() {
        let mut closed = square(1.0);
        closed.push(closed[0]);
        closed.reverse();
        let mesh = extrude(&closed, &ExtrudeOptions::flat(1.0)).unwrap();
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            extrude(&[], &ExtrudeOptions::default()),
            Err(Error::InvalidArgument(_))
        ));
        assert!(extrude(&square(1.0), &ExtrudeOptions::flat(-1.0)).is_err());

        let two = [Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        assert!(matches!(
            extrude(&two, &ExtrudeOptions::flat(1.0)),
            Err(Error::PreconditionViolation(_))
        ));
    }
}
