// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Board meshes: boxes assembled from six planar faces
//!
//! Corner convention: points 0-3 outline the top face, points 4-7 the bottom
//! face, and point `i + 4` sits below point `i`. Side `i` joins corners
//! `i`, `i + 4`, `j + 4`, `j` with `j = (i + 1) % 4`.

use crate::config::Tolerances;
use crate::error::{Error, Result};
use crate::material::BlendMaterial;
use crate::mesh::Mesh;
use crate::triangulation::{calculate_polygon_normal, project_to_2d, triangulate_polygon};
use nalgebra::{Point2, Point3, Vector3};

const FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 4, 5, 1],
    [1, 5, 6, 2],
    [2, 6, 7, 3],
    [3, 7, 4, 0],
];

/// Eight corners of an axis-aligned box in board order
pub fn box_corners(min: Point3<f64>, max: Point3<f64>) -> [Point3<f64>; 8] {
    [
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
    ]
}

/// One planar face, UVs normalised to the face's own extent
fn face_mesh(corners: &[Point3<f64>; 4]) -> Result<Mesh> {
    let normal = calculate_polygon_normal(corners);
    let (local, basis) = project_to_2d(corners, &normal);
    let indices = triangulate_polygon(&local)?;

    let (mut min, mut max) = (local[0], local[0]);
    for p in &local {
        min = min.inf(p);
        max = max.sup(p);
    }
    let extent = max - min;
    if extent.x <= f64::EPSILON || extent.y <= f64::EPSILON {
        return Err(Error::precondition("board face has no area"));
    }
    let uv = |p: &Point2<f64>| Point2::new((p.x - min.x) / extent.x, (p.y - min.y) / extent.y);

    let mut mesh = Mesh::with_capacity(4, indices.len());
    for p in &local {
        mesh.add_vertex(basis.lift(p), basis.normal);
    }
    for tri in indices.chunks_exact(3) {
        mesh.add_triangle_with_uvs(
            tri[0] as u32,
            tri[1] as u32,
            tri[2] as u32,
            [uv(&local[tri[0]]), uv(&local[tri[1]]), uv(&local[tri[2]])],
        );
    }
    Ok(mesh)
}

/// Reverse every triangle of a single face mesh, UV corners included
fn flip_faces(mesh: &mut Mesh) {
    for tri in mesh.indices.chunks_exact_mut(3) {
        tri.swap(0, 2);
    }
    for set in &mut mesh.uv_sets {
        for corners in set.chunks_exact_mut(3) {
            corners.swap(0, 2);
        }
    }
    for n in &mut mesh.normals {
        *n = -*n;
    }
}

/// Planar faces of a board, each turned outward
///
/// Returns the faces and how many of them had to be flipped. With
/// [`box_corners`] order only the bottom face runs against the outward
/// direction.
fn outward_faces(points: &[Point3<f64>]) -> Result<(Vec<Mesh>, usize)> {
    if points.len() != 8 {
        return Err(Error::precondition(format!(
            "board needs exactly 8 corner points, got {}",
            points.len()
        )));
    }
    if points.iter().any(|p| !p.coords.iter().all(|c| c.is_finite())) {
        return Err(Error::precondition("board corners must be finite"));
    }

    let centre = Point3::from(points.iter().map(|p| p.coords).sum::<Vector3<f64>>() / 8.0);

    let mut faces = Vec::with_capacity(FACES.len());
    let mut flipped = 0;
    for face in FACES {
        let corners = face.map(|i| points[i]);
        let mut mesh = face_mesh(&corners)?;

        let face_centre = Point3::from(corners.iter().map(|p| p.coords).sum::<Vector3<f64>>() / 4.0);
        let normal = calculate_polygon_normal(&corners);
        if normal.dot(&(face_centre - centre)) < 0.0 {
            flip_faces(&mut mesh);
            flipped += 1;
        }
        faces.push(mesh);
    }
    Ok((faces, flipped))
}

/// Build a welded box mesh from eight corner points
///
/// Each face is triangulated in its own plane and gets UVs spanning
/// `[0, 1]`. Faces whose normal points toward the box centre are flipped so
/// the whole board faces outward, then the faces are merged and coincident
/// corners welded.
pub fn board_mesh(points: &[Point3<f64>]) -> Result<Mesh> {
    board_mesh_with(points, &Tolerances::default())
}

/// [`board_mesh`] welding with `tolerances.weld_epsilon`
pub fn board_mesh_with(points: &[Point3<f64>], tolerances: &Tolerances) -> Result<Mesh> {
    let (faces, flipped) = outward_faces(points)?;

    let mut board = Mesh::new();
    board.merge_all(&faces);
    board.weld_vertices(tolerances.weld_epsilon);
    board.recompute_normals();

    tracing::debug!(
        flipped,
        vertices = board.vertex_count(),
        triangles = board.triangle_count(),
        "Built board mesh"
    );
    Ok(board)
}

/// A board mesh paired with the material it is drawn with
#[derive(Debug, Clone)]
pub struct Board {
    pub mesh: Mesh,
    pub material: BlendMaterial,
}

impl Board {
    pub fn new(points: &[Point3<f64>], material: BlendMaterial) -> Result<Self> {
        material.validate()?;
        Ok(Self {
            mesh: board_mesh(points)?,
            material,
        })
    }

    /// Axis-aligned board between two opposite corners
    pub fn from_extent(min: Point3<f64>, max: Point3<f64>, material: BlendMaterial) -> Result<Self> {
        Self::new(&box_corners(min, max), material)
    }
}
