// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! uvlab geometry
//!
//! Procedural geometry and UV utilities for the uvlab WebGL playground:
//! vector algebra on point lists, contour offsetting and thickening, arc
//! sampling, planar/extruded/board mesh construction and in-place UV
//! re-mapping. Built on nalgebra for math and earcutr for triangulation.

pub mod board;
pub mod config;
pub mod contour;
pub mod curve;
pub mod error;
pub mod extrusion;
pub mod lines;
pub mod material;
pub mod mesh;
pub mod planar;
pub mod shape;
pub mod triangulation;
pub mod uv;
pub mod vector;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use board::{board_mesh, board_mesh_with, box_corners, Board};
pub use config::{ExtrudeOptions, Tolerances};
pub use contour::{complete_contour, complete_contour_with, offset_contour, sides_of, Side};
pub use curve::{points_on_arc, points_on_circle, Curve, CurveKind, EllipseArc};
pub use error::{Error, Result};
pub use extrusion::extrude;
pub use lines::{circle_line_points, closed_debug_line, debug_line, LineMesh};
pub use material::{BlendMaterial, Color, UniformValue};
pub use mesh::{Mesh, Uv};
pub use planar::planar_geometry_from_points;
pub use shape::Shape2D;
pub use triangulation::triangulate_polygon;
pub use uv::{
    flip_face_normals, get_uvs, get_uvs_mut, match_uvs_to_vertices, planar_project_uv,
    rotate_uv_absolute, rotate_uv_incremental, uv_line,
};
