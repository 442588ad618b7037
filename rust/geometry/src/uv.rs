// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! UV re-mapping on face-corner texture coordinates
//!
//! Every operation works on UV set 0 unless a set is named explicitly and
//! rewrites values in place. Face and UV counts never change.

use crate::error::{Error, Result};
use crate::mesh::{Mesh, Uv};
use nalgebra::{Point2, Point3, Rotation2};

/// Fail unless the mesh has well-formed faces and a complete UV set `set`
fn check_uv_set(mesh: &Mesh, set: usize) -> Result<()> {
    if mesh.indices.is_empty() || mesh.is_empty() {
        return Err(Error::invalid_argument("mesh has no faces"));
    }
    if mesh.indices.len() % 3 != 0 {
        return Err(Error::invalid_argument(format!(
            "face index count {} is not a multiple of 3",
            mesh.indices.len()
        )));
    }
    let vertex_count = mesh.vertex_count();
    if let Some(&bad) = mesh.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(Error::invalid_argument(format!(
            "face index {bad} out of range ({vertex_count} vertices)"
        )));
    }
    if !mesh.has_uv_set(set) {
        return Err(Error::precondition(format!(
            "mesh lacks a complete UV set {set} ({} face corners)",
            mesh.indices.len()
        )));
    }
    Ok(())
}

#[inline]
fn to_uv(p: Point2<f64>) -> Uv {
    [p.x as f32, p.y as f32]
}

/// Write `f(vertex)` into the UV of every face corner of set 0
fn write_from_vertices(mesh: &mut Mesh, f: impl Fn(Point3<f64>) -> Uv) {
    let uvs: Vec<Uv> = mesh
        .indices
        .iter()
        .map(|&i| f(mesh.vertex(i as usize)))
        .collect();
    mesh.uv_sets[0] = uvs;
}

/// Planar unwrap onto the XY bounding box
///
/// Each corner gets `((x - min.x) / width, (y - min.y) / height)`, so the UVs
/// fill `[0, 1]` on both axes.
pub fn planar_project_uv(mesh: &mut Mesh) -> Result<()> {
    check_uv_set(mesh, 0)?;

    let (min, max) = mesh.bounds();
    let width = (max.x - min.x) as f64;
    let height = (max.y - min.y) as f64;
    if width <= 0.0 || height <= 0.0 {
        return Err(Error::precondition(format!(
            "planar projection needs a non-zero XY extent, got {width} x {height}"
        )));
    }

    let (min_x, min_y) = (min.x as f64, min.y as f64);
    write_from_vertices(mesh, |p| {
        to_uv(Point2::new((p.x - min_x) / width, (p.y - min_y) / height))
    });
    Ok(())
}

/// Set every corner UV to the vertex (x, y) rotated by `degree` about Z
///
/// Absolute: the previous UVs are discarded, so repeated calls with the
/// same angle give the same result.
pub fn rotate_uv_absolute(degree: f64, mesh: &mut Mesh) -> Result<()> {
    check_uv_set(mesh, 0)?;

    let rotation = Rotation2::new(degree.to_radians());
    write_from_vertices(mesh, |p| to_uv(rotation * Point2::new(p.x, p.y)));
    Ok(())
}

/// Rotate the current UVs by `degree` about the UV origin
///
/// Incremental: calls accumulate.
pub fn rotate_uv_incremental(degree: f64, mesh: &mut Mesh) -> Result<()> {
    check_uv_set(mesh, 0)?;

    let rotation = Rotation2::new(degree.to_radians());
    for uv in &mut mesh.uv_sets[0] {
        let p = rotation * Point2::new(uv[0] as f64, uv[1] as f64);
        *uv = to_uv(p);
    }
    Ok(())
}

/// Copy each face corner's vertex (x, y) into its UV
///
/// Used after moving vertices directly.
pub fn match_uvs_to_vertices(mesh: &mut Mesh) -> Result<()> {
    check_uv_set(mesh, 0)?;
    write_from_vertices(mesh, |p| [p.x as f32, p.y as f32]);
    Ok(())
}

/// Reverse the winding of every face, swapping first and third corners
///
/// The paired UV corners of every set move with their vertices. Normals are
/// recomputed afterwards. Flipping twice restores the original indices and
/// UVs.
pub fn flip_face_normals(mesh: &mut Mesh) -> Result<()> {
    check_uv_set(mesh, 0)?;

    for tri in mesh.indices.chunks_exact_mut(3) {
        tri.swap(0, 2);
    }
    for set in &mut mesh.uv_sets {
        for corners in set.chunks_exact_mut(3) {
            corners.swap(0, 2);
        }
    }
    mesh.recompute_normals();
    Ok(())
}

/// Owned copy of UV set `set`, one `[corner0, corner1, corner2]` per face
pub fn get_uvs(mesh: &Mesh, set: usize) -> Result<Vec<[Uv; 3]>> {
    check_uv_set(mesh, set)?;
    Ok(mesh.uv_sets[set]
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect())
}

/// Mutable view into UV set `set`, laid out face by face
///
/// Writes through the returned slice change the mesh itself.
pub fn get_uvs_mut(mesh: &mut Mesh, set: usize) -> Result<&mut [Uv]> {
    check_uv_set(mesh, set)?;
    Ok(&mut mesh.uv_sets[set])
}

/// UV corners of every face as (u, v, 0) points
///
/// Each face contributes its three corners followed by the first corner
/// again, so the result draws as closed triangles in UV space.
pub fn uv_line(mesh: &Mesh, set: usize) -> Result<Vec<Point3<f64>>> {
    let faces = get_uvs(mesh, set)?;
    let mut points = Vec::with_capacity(faces.len() * 4);
    for corners in faces {
        for uv in corners.iter().chain(std::iter::once(&corners[0])) {
            points.push(Point3::new(uv[0] as f64, uv[1] as f64, 0.0));
        }
    }
    Ok(points)
}
