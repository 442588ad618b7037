// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation utilities
//!
//! Wrapper around earcutr for simple 2D polygons, plus the plane-basis
//! helpers used to triangulate planar polygons that live in 3D.

use crate::error::{Error, Result};
use nalgebra::{Point2, Point3, Vector3};

/// True when every non-degenerate corner turns the same way
fn is_convex(points: &[Point2<f64>]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }

    let mut turns = (0..n).filter_map(|i| {
        let (a, b, c) = (&points[i], &points[(i + 1) % n], &points[(i + 2) % n]);
        let cross = (b - a).perp(&(c - b));
        (cross.abs() > 1e-10).then_some(cross > 0.0)
    });
    match turns.next() {
        Some(first) => turns.all(|t| t == first),
        None => true,
    }
}

/// Fan from the first corner
fn fan_triangulate(n: usize) -> Vec<usize> {
    (1..n - 1).flat_map(|i| [0, i, i + 1]).collect()
}

/// Triangulate a simple polygon (no holes)
///
/// Returns triangle indices into the input points. Triangles keep the
/// winding of the input outline.
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    let n = points.len();

    if n < 3 {
        return Err(Error::precondition(format!(
            "need at least 3 points to triangulate, got {n}"
        )));
    }

    if n == 3 {
        return Ok(vec![0, 1, 2]);
    }

    if n <= 8 && is_convex(points) {
        return Ok(fan_triangulate(n));
    }

    let vertices: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();

    let mut indices = earcutr::earcut(&vertices, &[], 2)
        .map_err(|e| Error::Triangulation(format!("{:?}", e)))?;

    if indices.is_empty() {
        return Err(Error::Triangulation(
            "outline produced no triangles".to_string(),
        ));
    }

    // earcut emits one fixed orientation; match the outline instead
    let outline_ccw = signed_area(points) > 0.0;
    let first_ccw = triangle_area(points, &indices[..3]) > 0.0;
    if outline_ccw != first_ccw {
        for tri in indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
    }

    Ok(indices)
}

fn triangle_area(points: &[Point2<f64>], tri: &[usize]) -> f64 {
    let (a, b, c) = (&points[tri[0]], &points[tri[1]], &points[tri[2]]);
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Signed area of a 2D outline (positive for counter-clockwise)
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    0.5 * (0..n)
        .map(|i| {
            let p = &points[i];
            let q = &points[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum::<f64>()
}

/// Orthonormal frame of a plane: `origin` plus in-plane `u`/`v` axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneBasis {
    pub origin: Point3<f64>,
    pub u_axis: Vector3<f64>,
    pub v_axis: Vector3<f64>,
    pub normal: Vector3<f64>,
}

impl PlaneBasis {
    /// Build a right-handed basis (`u × v = normal`) on the plane
    pub fn new(origin: Point3<f64>, normal: &Vector3<f64>) -> Self {
        let normal = normal.try_normalize(1e-12).unwrap_or_else(Vector3::z);

        // Pick the axis least parallel to the normal for a stable cross product
        let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
        let reference = if ax <= ay && ax <= az {
            Vector3::x()
        } else if ay <= az {
            Vector3::y()
        } else {
            Vector3::z()
        };

        let v_axis = normal.cross(&reference).normalize();
        let u_axis = v_axis.cross(&normal).normalize();

        Self {
            origin,
            u_axis,
            v_axis,
            normal,
        }
    }

    /// Local 2D coordinates of `p` in this plane
    #[inline]
    pub fn project(&self, p: &Point3<f64>) -> Point2<f64> {
        let d = p - self.origin;
        Point2::new(d.dot(&self.u_axis), d.dot(&self.v_axis))
    }

    /// World position of local coordinates `p`
    #[inline]
    pub fn lift(&self, p: &Point2<f64>) -> Point3<f64> {
        self.origin + self.u_axis * p.x + self.v_axis * p.y
    }
}

/// Project planar 3D points into 2D using a basis derived from `normal`
///
/// The first point becomes the origin of the local frame.
pub fn project_to_2d(points: &[Point3<f64>], normal: &Vector3<f64>) -> (Vec<Point2<f64>>, PlaneBasis) {
    let origin = points.first().copied().unwrap_or_else(Point3::origin);
    let basis = PlaneBasis::new(origin, normal);
    let projected = points.iter().map(|p| basis.project(p)).collect();
    (projected, basis)
}

/// Calculate the normal of a polygon from its vertices
///
/// Uses Newell's method so slightly non-planar or partly colinear outlines
/// still give a stable result. Falls back to +Z for degenerate input.
pub fn calculate_polygon_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let n = points.len();
    if n < 3 {
        return Vector3::z();
    }

    let mut normal = Vector3::<f64>::zeros();
    for i in 0..n {
        let current = &points[i];
        let next = &points[(i + 1) % n];

        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    normal.try_normalize(1e-10).unwrap_or_else(Vector3::z)
}
