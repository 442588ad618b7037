// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line meshes for visual debugging

use crate::curve::points_on_circle;
use crate::error::{Error, Result};
use crate::material::Color;
use nalgebra::Point3;
use std::f64::consts::TAU;

/// Line segments drawn in one colour
#[derive(Debug, Clone, PartialEq)]
pub struct LineMesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Segment endpoints, two indices per segment
    pub indices: Vec<u32>,
    pub color: Color,
}

impl LineMesh {
    fn from_points(points: &[Point3<f64>], closed: bool, color: Color) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::invalid_argument(format!(
                "a line needs at least 2 points, got {}",
                points.len()
            )));
        }

        let positions = points
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect();

        let n = points.len() as u32;
        let mut indices: Vec<u32> = (0..n - 1).flat_map(|i| [i, i + 1]).collect();
        if closed && n > 2 {
            indices.extend([n - 1, 0]);
        }

        Ok(Self {
            positions,
            indices,
            color,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }
}

/// Closed circle outline in the XY plane, first point repeated at the end
pub fn circle_line_points(radius: f64, segments: usize) -> Result<Vec<Point3<f64>>> {
    points_on_circle(radius, radius, segments, 0.0, TAU, false)
}

/// Open polyline through `points`
pub fn debug_line(points: &[Point3<f64>], color: Color) -> Result<LineMesh> {
    LineMesh::from_points(points, false, color)
}

/// Polyline through `points` with a closing segment back to the first
pub fn closed_debug_line(points: &[Point3<f64>], color: Color) -> Result<LineMesh> {
    LineMesh::from_points(points, true, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circle_points_close() {
        let points = circle_line_points(2.0, 8).unwrap();
        assert_eq!(points.len(), 9);
        assert_relative_eq!(points[0], points[8], epsilon = 1e-12);
        assert!(circle_line_points(2.0, 0).is_err());
    }

    #[test]
    fn test_open_and_closed_lines() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];

        let open = debug_line(&points, Color::Red).unwrap();
        assert_eq!(open.vertex_count(), 3);
        assert_eq!(open.indices, vec![0, 1, 1, 2]);
        assert_eq!(open.color, Color::Red);

        let closed = closed_debug_line(&points, Color::Blue).unwrap();
        assert_eq!(closed.segment_count(), 3);
        assert_eq!(&closed.indices[4..], &[2, 0]);
    }

    #[test]
    fn test_single_point_rejected() {
        assert!(debug_line(&[Point3::origin()], Color::White).is_err());
    }
}
