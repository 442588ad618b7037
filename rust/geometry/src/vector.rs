// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point and vector algebra
//!
//! Stateless helpers over nalgebra points. Polygon predicates work on the XY
//! components and ignore Z. Construction helpers return [`Result`] and fail
//! on empty or non-finite input; query predicates return `false` instead.

use crate::config::{POINT_EPSILON, SEGMENT_EPSILON};
use crate::error::{Error, Result};
use nalgebra::{Point2, Point3, Rotation3, Unit, Vector3};

/// Drop the Z component
#[inline]
pub fn to_point2(p: &Point3<f64>) -> Point2<f64> {
    Point2::new(p.x, p.y)
}

/// Lift to 3D with Z = 0
#[inline]
pub fn to_point3(p: &Point2<f64>) -> Point3<f64> {
    Point3::new(p.x, p.y, 0.0)
}

pub fn to_points2(points: &[Point3<f64>]) -> Vec<Point2<f64>> {
    points.iter().map(to_point2).collect()
}

pub fn to_points3(points: &[Point2<f64>]) -> Vec<Point3<f64>> {
    points.iter().map(to_point3).collect()
}

/// Arithmetic mean of two points
#[inline]
pub fn center_point(a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    nalgebra::center(a, b)
}

#[inline]
pub fn add_vector(base: &Point3<f64>, delta: &Vector3<f64>) -> Point3<f64> {
    base + delta
}

/// Vector pointing from `tail` toward `head`
#[inline]
pub fn vector_between(tail: &Point3<f64>, head: &Point3<f64>) -> Vector3<f64> {
    head - tail
}

#[inline]
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    nalgebra::distance(a, b)
}

fn is_finite_point(p: &Point3<f64>) -> bool {
    p.coords.iter().all(|c| c.is_finite())
}

/// Even-odd ray casting test over the XY components
///
/// Returns `false` for fewer than three points or a non-finite query point.
/// Points exactly on the boundary may land on either side.
pub fn point_in_polygon(points: &[Point3<f64>], point: &Point3<f64>) -> bool {
    let n = points.len();
    if n < 3 || !is_finite_point(point) {
        return false;
    }

    let (x, y) = (point.x, point.y);
    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = (points[i].x, points[i].y);
        let (xj, yj) = (points[j].x, points[j].y);

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// True when `c` lies on the segment `a`-`b` (colinear and between)
///
/// The endpoints themselves satisfy the test.
#[inline]
pub fn is_on_segment(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> bool {
    is_on_segment_within(a, b, c, SEGMENT_EPSILON)
}

pub fn is_on_segment_within(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    tolerance: f64,
) -> bool {
    (distance(a, b) - (distance(a, c) + distance(c, b))).abs() < tolerance
}

/// Boundary-inclusive containment: on any edge, or inside by ray casting
pub fn contains(points: &[Point3<f64>], point: &Point3<f64>) -> bool {
    let n = points.len();
    if n < 2 {
        return false;
    }

    let on_edge = (0..n).any(|i| is_on_segment(&points[i], &points[(i + 1) % n], point));
    on_edge || point_in_polygon(points, point)
}

/// Twice the signed area of the XY projection (positive for counter-clockwise)
pub fn signed_area_doubled(points: &[Point3<f64>]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let p = &points[i];
            let q = &points[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum()
}

/// Area of the XY projection, independent of winding
pub fn polygon_area(points: &[Point3<f64>]) -> f64 {
    signed_area_doubled(points).abs() * 0.5
}

/// Polygon centroid using the shoelace formula
///
/// Z is averaged with the same per-edge weights as X and Y. A polygon with
/// zero area yields non-finite coordinates, which are returned unchanged.
pub fn centroid(points: &[Point3<f64>]) -> Result<Point3<f64>> {
    if points.is_empty() {
        return Err(Error::invalid_argument("centroid of an empty point list"));
    }

    let n = points.len();
    let mut area2 = 0.0;
    let mut sum = Vector3::zeros();

    for i in 0..n {
        let p = &points[i];
        let q = &points[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;

        area2 += cross;
        sum.x += (p.x + q.x) * cross;
        sum.y += (p.y + q.y) * cross;
        sum.z += (p.z + q.z) * cross;
    }

    // 6A with A = area2 / 2
    Ok(Point3::from(sum / (3.0 * area2)))
}

/// Stable sort by Euclidean distance to `origin`, nearest first
pub fn sort_by_distance_from(origin: &Point3<f64>, points: &mut [Point3<f64>]) {
    points.sort_by(|a, b| distance(origin, a).total_cmp(&distance(origin, b)));
}

/// Difference of the XY headings of `b` and `a`, in radians
///
/// This is `atan2(b) - atan2(a)` and is not normalised, so the result lies
/// in `(-2π, 2π)`.
#[inline]
pub fn angle_between_rad(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    b.y.atan2(b.x) - a.y.atan2(a.x)
}

#[inline]
pub fn angle_between_deg(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    angle_between_rad(a, b).to_degrees()
}

fn unit_normal(normal: &Vector3<f64>) -> Result<Vector3<f64>> {
    normal
        .try_normalize(f64::EPSILON)
        .ok_or_else(|| Error::invalid_argument("plane normal has zero length"))
}

/// Signed distance from `point` to the plane through `plane_origin`
pub fn distance_to_plane(
    point: &Point3<f64>,
    plane_origin: &Point3<f64>,
    plane_normal: &Vector3<f64>,
) -> Result<f64> {
    let n = unit_normal(plane_normal)?;
    Ok((point - plane_origin).dot(&n))
}

/// Project `point` onto the plane through `plane_origin`
///
/// The offset is subtracted first; if that does not bring the point closer
/// to the plane, it is added instead.
pub fn project_onto_plane(
    point: &Point3<f64>,
    plane_origin: &Point3<f64>,
    plane_normal: &Vector3<f64>,
) -> Result<Point3<f64>> {
    let n = unit_normal(plane_normal)?;
    let dist = (point - plane_origin).dot(&n).abs();
    let offset = n * dist;

    let subtracted = point - offset;
    let residual = (subtracted - plane_origin).dot(&n).abs();
    if residual < dist {
        Ok(subtracted)
    } else {
        Ok(point + offset)
    }
}

/// Z component of the cross product of the edges meeting at `current`
#[inline]
fn corner_cross(current: &Point3<f64>, next: &Point3<f64>, previous: &Point3<f64>) -> f64 {
    let incoming = current - previous;
    let outgoing = next - current;
    incoming.x * outgoing.y - incoming.y * outgoing.x
}

/// Concave corner of a clockwise polygon (left turn)
pub fn is_inside_corner(current: &Point3<f64>, next: &Point3<f64>, previous: &Point3<f64>) -> bool {
    corner_cross(current, next, previous) > 0.0
}

/// Convex corner of a clockwise polygon (right turn)
pub fn is_outside_corner(
    current: &Point3<f64>,
    next: &Point3<f64>,
    previous: &Point3<f64>,
) -> bool {
    corner_cross(current, next, previous) < 0.0
}

fn check_batch(points: &[Point3<f64>], pivot: &Point3<f64>) -> Result<()> {
    if points.is_empty() {
        return Err(Error::invalid_argument("point list is empty"));
    }
    if pivot.coords.iter().any(|c| c.is_nan()) {
        return Err(Error::invalid_argument(format!("pivot has a NaN component: {pivot}")));
    }
    Ok(())
}

/// Rotate every point by `degree` around the line through `pivot` along `axis`
pub fn rotate_around_point(
    degree: f64,
    points: &mut [Point3<f64>],
    pivot: &Point3<f64>,
    axis: &Vector3<f64>,
) -> Result<()> {
    check_batch(points, pivot)?;
    let axis = Unit::try_new(*axis, f64::EPSILON)
        .ok_or_else(|| Error::invalid_argument("rotation axis has zero length"))?;
    let rotation = Rotation3::from_axis_angle(&axis, degree.to_radians());

    for p in points.iter_mut() {
        *p = pivot + rotation * (*p - pivot);
    }
    Ok(())
}

/// Component-wise scale of every point relative to `pivot`
pub fn scale_around_point(
    scale: &Vector3<f64>,
    points: &mut [Point3<f64>],
    pivot: &Point3<f64>,
) -> Result<()> {
    check_batch(points, pivot)?;

    for p in points.iter_mut() {
        *p = pivot + (*p - pivot).component_mul(scale);
    }
    Ok(())
}

/// Mirror every point across the vertical line (X = pivot.x)
pub fn flip_horizontally_around_point(
    points: &mut [Point3<f64>],
    pivot: &Point3<f64>,
) -> Result<()> {
    scale_around_point(&Vector3::new(-1.0, 1.0, 1.0), points, pivot)
}

/// Approximate equality with the default epsilon
#[inline]
pub fn equals(a: &Point3<f64>, b: &Point3<f64>) -> bool {
    equals_within(a, b, POINT_EPSILON)
}

/// Squared distance compared against `epsilon²`
#[inline]
pub fn equals_within(a: &Point3<f64>, b: &Point3<f64>, epsilon: f64) -> bool {
    (a - b).norm_squared() <= epsilon * epsilon
}

pub fn array_equals(a: &[Point3<f64>], b: &[Point3<f64>]) -> bool {
    array_equals_within(a, b, POINT_EPSILON)
}

pub fn array_equals_within(a: &[Point3<f64>], b: &[Point3<f64>], epsilon: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(p, q)| equals_within(p, q, epsilon))
}
