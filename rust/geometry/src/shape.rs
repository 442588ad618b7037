// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named 2D shapes with cached sides and a planar mesh

use std::cell::OnceCell;

use crate::contour::{offset_contour, Side};
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::planar::planar_geometry_from_points;
use crate::vector::{centroid, contains, polygon_area};
use nalgebra::{Point3, Vector3};

/// A closed outline in the XY plane together with its flat mesh
#[derive(Debug, Clone)]
pub struct Shape2D {
    name: String,
    points: Vec<Point3<f64>>,
    sides: OnceCell<Vec<Side>>,
    mesh: Mesh,
}

impl Shape2D {
    /// Build a shape from at least three outline points
    pub fn new(name: impl Into<String>, points: Vec<Point3<f64>>) -> Result<Self> {
        let name = name.into();
        if points.len() < 3 {
            return Err(Error::invalid_argument(format!(
                "shape '{name}' needs at least 3 points, got {}",
                points.len()
            )));
        }
        let mesh = planar_geometry_from_points(&points)?;

        Ok(Self {
            name,
            points,
            sides: OnceCell::new(),
            mesh,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    /// Sides of the outline, derived on first request after each change
    pub fn sides(&self) -> &[Side] {
        self.sides.get_or_init(|| {
            let n = self.points.len();
            (0..n)
                .map(|i| Side::new(self.points[i], self.points[(i + 1) % n]))
                .collect()
        })
    }

    /// Replace the outline and rebuild the mesh
    pub fn set_points(&mut self, points: Vec<Point3<f64>>) -> Result<()> {
        let rebuilt = Self::new(self.name.clone(), points)?;
        *self = rebuilt;
        Ok(())
    }

    /// Move the outline and its mesh by `delta`
    pub fn translate(&mut self, delta: &Vector3<f64>) {
        for p in &mut self.points {
            *p += delta;
        }
        for i in 0..self.mesh.vertex_count() {
            let moved = self.mesh.vertex(i) + delta;
            self.mesh.set_vertex(i, moved);
        }
        self.sides = OnceCell::new();
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    pub fn centroid(&self) -> Result<Point3<f64>> {
        centroid(&self.points)
    }

    /// True when `point` lies inside the outline or on one of its sides
    ///
    /// Never fails: a non-finite query point is logged and answered `false`.
    pub fn contains_point(&self, point: &Point3<f64>) -> bool {
        if !(point.x.is_finite() && point.y.is_finite()) {
            tracing::warn!(shape = %self.name, ?point, "Rejected non-finite point in containment test");
            return false;
        }
        contains(&self.points, point)
    }

    /// New shape whose outline is this one pushed out by `padding`
    pub fn offset(&self, padding: f64) -> Result<Shape2D> {
        let mut points = offset_contour(padding, &self.points)?;
        // drop the closing duplicate
        points.pop();
        Shape2D::new(format!("{}-offset", self.name), points)
    }
}
