// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contour operations on ordered point sequences
//!
//! Closed outlines are expected in clockwise order in the XY plane. Side
//! normals are the side direction rotated 90° counter-clockwise, which points
//! away from the interior for that winding. Z values ride along unchanged.

use crate::config::Tolerances;
use crate::error::{Error, Result};
use crate::vector::{angle_between_deg, angle_between_rad, equals_within, signed_area_doubled};
use nalgebra::{Point3, Vector3};
use std::f64::consts::SQRT_2;

/// Half-turn range (degrees) treated as a right-angle corner when thickening
const RIGHT_TURN_HALF_ANGLE_MIN: f64 = 40.0;
const RIGHT_TURN_HALF_ANGLE_MAX: f64 = 50.0;

/// Directed segment between two consecutive outline points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Side {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Side {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// Unit vector from start to end (zero for a degenerate side)
    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        (self.end - self.start)
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Direction rotated 90° counter-clockwise in the XY plane
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        ccw_normal(&self.direction())
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    #[inline]
    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.start, &self.end)
    }
}

#[inline]
fn ccw_normal(direction: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(-direction.y, direction.x, 0.0)
}

#[inline]
fn unit_between(from: &Point3<f64>, to: &Point3<f64>) -> Vector3<f64> {
    (to - from)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

/// Sides of a closed outline, wrapping the last point back to the first
pub fn sides_of(polygon: &[Point3<f64>]) -> Result<Vec<Side>> {
    let n = polygon.len();
    if n < 3 {
        return Err(Error::invalid_argument(format!(
            "closed outline needs at least 3 points, got {n}"
        )));
    }

    Ok((0..n)
        .map(|i| Side::new(polygon[i], polygon[(i + 1) % n]))
        .collect())
}

/// True for clockwise winding in the XY plane
pub fn is_clockwise(points: &[Point3<f64>]) -> bool {
    signed_area_doubled(points) < 0.0
}

/// Copy of `points` in clockwise order
pub fn to_clockwise(points: &[Point3<f64>]) -> Vec<Point3<f64>> {
    let mut out = points.to_vec();
    if !is_clockwise(&out) {
        out.reverse();
    }
    out
}

/// Mitered outward offset of a clockwise outline
///
/// Each vertex is pushed out along the normal of its outgoing side, then
/// slid along that side by `padding * tan(turn / 2)` so the two adjacent
/// offset edges meet. The result is closed: it holds one point per input
/// vertex followed by a copy of the first.
///
/// Near-reversals drive the tangent toward its pole and produce very large
/// but finite coordinates.
pub fn offset_contour(padding: f64, points: &[Point3<f64>]) -> Result<Vec<Point3<f64>>> {
    if !padding.is_finite() {
        return Err(Error::invalid_argument(format!(
            "offset padding must be finite, got {padding}"
        )));
    }
    let sides = sides_of(points)?;
    let n = sides.len();

    let mut offset = Vec::with_capacity(n + 1);
    for (i, outgoing) in sides.iter().enumerate() {
        let incoming = &sides[(i + n - 1) % n];
        let direction = outgoing.direction();

        // tan has period π, so the 2π ambiguity of the heading difference cancels
        let turn = angle_between_rad(&incoming.direction(), &direction);
        let shift = padding * (turn / 2.0).tan();

        offset.push(points[i] + outgoing.normal() * padding + direction * shift);
    }
    offset.push(offset[0]);

    Ok(offset)
}

/// Heading change from `a` to `b`, in degrees within (-180, 180]
fn turn_degrees(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let mut turn = angle_between_deg(a, b);
    if turn > 180.0 {
        turn -= 360.0;
    } else if turn <= -180.0 {
        turn += 360.0;
    }
    turn
}

/// One side of a thickened path, `offset` to the left of the walking direction
fn offset_path_side(path: &[Point3<f64>], offset: f64) -> Vec<Point3<f64>> {
    let n = path.len();
    let mut side = Vec::with_capacity(n);

    for i in 0..n {
        let point = path[i];
        let shifted = if i == 0 {
            point + ccw_normal(&unit_between(&path[0], &path[1])) * offset
        } else if i == n - 1 {
            point + ccw_normal(&unit_between(&path[i - 1], &point)) * offset
        } else {
            let incoming = unit_between(&path[i - 1], &point);
            let outgoing = unit_between(&point, &path[i + 1]);
            let n_in = ccw_normal(&incoming);
            let n_out = ccw_normal(&outgoing);
            let bisector = (n_in + n_out)
                .try_normalize(f64::EPSILON)
                .unwrap_or(n_out);

            let half_turn = turn_degrees(&incoming, &outgoing).abs() / 2.0;
            if (RIGHT_TURN_HALF_ANGLE_MIN..=RIGHT_TURN_HALF_ANGLE_MAX).contains(&half_turn) {
                point + bisector * (offset * SQRT_2)
            } else {
                point + bisector * offset
            }
        };
        side.push(shifted);
    }

    side
}

/// Drop points that repeat their predecessor within `epsilon`
pub fn dedup_adjacent(points: &mut Vec<Point3<f64>>, epsilon: f64) {
    points.dedup_by(|current, previous| equals_within(current, previous, epsilon));
}

/// Thicken an open path into a closed ribbon outline
///
/// Walks the path forward and then backward, offsetting each walk by
/// `offset` to its left, so the ribbon is `2 * offset` wide. Corners whose
/// half-turn lies between 40° and 50° get a √2-scaled miter point; every
/// other corner is pushed out along the bisector by `offset` only. Adjacent
/// duplicates closer than 0.001 are removed.
pub fn complete_contour(offset: f64, contour_points: &[Point3<f64>]) -> Result<Vec<Point3<f64>>> {
    complete_contour_with(offset, contour_points, &Tolerances::default())
}

/// [`complete_contour`] deduplicating with `tolerances.contour_dedup_epsilon`
pub fn complete_contour_with(
    offset: f64,
    contour_points: &[Point3<f64>],
    tolerances: &Tolerances,
) -> Result<Vec<Point3<f64>>> {
    if contour_points.len() < 2 {
        return Err(Error::invalid_argument(format!(
            "path needs at least 2 points, got {}",
            contour_points.len()
        )));
    }
    if !offset.is_finite() {
        return Err(Error::invalid_argument(format!(
            "ribbon offset must be finite, got {offset}"
        )));
    }

    let reversed: Vec<Point3<f64>> = contour_points.iter().rev().copied().collect();

    let mut outline = offset_path_side(contour_points, offset);
    outline.extend(offset_path_side(&reversed, offset));
    dedup_adjacent(&mut outline, tolerances.contour_dedup_epsilon);

    Ok(outline)
}
