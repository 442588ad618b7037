// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures
//!
//! A single triangle mesh representation shared by every construction and
//! UV operation. Texture coordinates are stored per face corner: each UV set
//! holds exactly one `[u, v]` pair per entry of `indices`, so two faces that
//! share a vertex position can still carry different UVs.

use nalgebra::{Matrix4, Point2, Point3, Vector3};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// UV pair for one face corner
pub type Uv = [f32; 2];

/// Triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
    /// Face normals, one (nx, ny, nz) per triangle
    pub face_normals: Vec<f32>,
    /// UV sets, one entry per face corner
    pub uv_sets: Vec<Vec<Uv>>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
            face_normals: Vec::with_capacity(index_count),
            uv_sets: Vec::new(),
        }
    }

    /// Add a vertex with normal
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);

        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
    }

    /// Add a triangle
    ///
    /// Existing UV sets get three zeroed corners so they keep one entry per
    /// face corner.
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);

        for set in &mut self.uv_sets {
            set.extend_from_slice(&[[0.0; 2]; 3]);
        }
    }

    /// Add a triangle and write its corners into UV set 0
    pub fn add_triangle_with_uvs(&mut self, i0: u32, i1: u32, i2: u32, uvs: [Point2<f64>; 3]) {
        self.ensure_uv_sets(1);
        self.add_triangle(i0, i1, i2);

        let start = self.indices.len() - 3;
        for (corner, uv) in uvs.iter().enumerate() {
            self.uv_sets[0][start + corner] = [uv.x as f32, uv.y as f32];
        }
    }

    /// Make sure at least `count` UV sets exist, zero-filling new ones
    pub fn ensure_uv_sets(&mut self, count: usize) {
        while self.uv_sets.len() < count {
            self.uv_sets.push(vec![[0.0; 2]; self.indices.len()]);
        }
    }

    /// Position of vertex `index`
    #[inline]
    pub fn vertex(&self, index: usize) -> Point3<f64> {
        let i = index * 3;
        Point3::new(
            self.positions[i] as f64,
            self.positions[i + 1] as f64,
            self.positions[i + 2] as f64,
        )
    }

    #[inline]
    pub fn set_vertex(&mut self, index: usize, position: Point3<f64>) {
        let i = index * 3;
        self.positions[i] = position.x as f32;
        self.positions[i + 1] = position.y as f32;
        self.positions[i + 2] = position.z as f32;
    }

    /// Vertex indices of triangle `face`
    #[inline]
    pub fn face(&self, face: usize) -> [u32; 3] {
        let i = face * 3;
        [self.indices[i], self.indices[i + 1], self.indices[i + 2]]
    }

    /// The three UV corners of `face` in set `set`
    pub fn face_uvs(&self, set: usize, face: usize) -> Option<[Uv; 3]> {
        let uvs = self.uv_sets.get(set)?;
        let i = face * 3;
        Some([*uvs.get(i)?, *uvs.get(i + 1)?, *uvs.get(i + 2)?])
    }

    /// True when UV set `set` exists and has one entry per face corner
    #[inline]
    pub fn has_uv_set(&self, set: usize) -> bool {
        self.uv_sets
            .get(set)
            .is_some_and(|uvs| uvs.len() == self.indices.len())
    }

    /// UV set `set` flattened to (u, v) pairs, ready for a GPU buffer
    pub fn flat_uvs(&self, set: usize) -> Vec<f32> {
        self.uv_sets
            .get(set)
            .map(|uvs| uvs.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Merge another mesh into this one
    ///
    /// UV sets are concatenated; a side lacking a set contributes zeros.
    pub fn merge(&mut self, other: &Mesh) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = self.vertex_count() as u32;
        let set_count = self.uv_sets.len().max(other.uv_sets.len());
        self.ensure_uv_sets(set_count);

        // Face normals stay valid only when both sides carry them
        let keep_face_normals = self.face_normals.len() == self.indices.len()
            && other.face_normals.len() == other.indices.len();

        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));

        if keep_face_normals {
            self.face_normals.extend_from_slice(&other.face_normals);
        } else {
            self.face_normals.clear();
        }

        for (set, uvs) in self.uv_sets.iter_mut().enumerate() {
            match other.uv_sets.get(set) {
                Some(theirs) if theirs.len() == other.indices.len() => {
                    uvs.extend_from_slice(theirs)
                }
                _ => uvs.extend(std::iter::repeat([0.0; 2]).take(other.indices.len())),
            }
        }
    }

    /// Batch merge multiple meshes at once
    pub fn merge_all(&mut self, meshes: &[Mesh]) {
        let total_positions: usize = meshes.iter().map(|m| m.positions.len()).sum();
        let total_indices: usize = meshes.iter().map(|m| m.indices.len()).sum();

        self.positions.reserve(total_positions);
        self.normals.reserve(total_positions);
        self.indices.reserve(total_indices);

        for mesh in meshes {
            self.merge(mesh);
        }
    }

    /// Merge `other` and collapse vertices closer than `epsilon`
    pub fn merge_welded(&mut self, other: &Mesh, epsilon: f64) -> usize {
        self.merge(other);
        self.weld_vertices(epsilon)
    }

    /// Collapse vertices closer than `epsilon` into one
    ///
    /// Indices are rewritten and vertex normals recomputed. UVs belong to
    /// face corners and are left as they are. Returns the number of
    /// vertices removed.
    pub fn weld_vertices(&mut self, epsilon: f64) -> usize {
        let original_count = self.vertex_count();
        if original_count == 0 {
            return 0;
        }

        let cell_size = epsilon.max(f64::EPSILON);
        let cell_of = |p: &Point3<f64>| {
            (
                (p.x / cell_size).floor() as i64,
                (p.y / cell_size).floor() as i64,
                (p.z / cell_size).floor() as i64,
            )
        };

        let mut grid: FxHashMap<(i64, i64, i64), SmallVec<[u32; 4]>> = FxHashMap::default();
        let mut remap = Vec::with_capacity(original_count);
        let mut kept: Vec<Point3<f64>> = Vec::new();

        for i in 0..original_count {
            let p = self.vertex(i);
            let (cx, cy, cz) = cell_of(&p);

            let mut found = None;
            'search: for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        if let Some(bucket) = grid.get(&(cx + dx, cy + dy, cz + dz)) {
                            for &k in bucket {
                                if (kept[k as usize] - p).norm() <= epsilon {
                                    found = Some(k);
                                    break 'search;
                                }
                            }
                        }
                    }
                }
            }

            let target = found.unwrap_or_else(|| {
                let k = kept.len() as u32;
                kept.push(p);
                grid.entry((cx, cy, cz)).or_default().push(k);
                k
            });
            remap.push(target);
        }

        for index in &mut self.indices {
            *index = remap[*index as usize];
        }

        self.positions.clear();
        for p in &kept {
            self.positions.push(p.x as f32);
            self.positions.push(p.y as f32);
            self.positions.push(p.z as f32);
        }
        self.compute_vertex_normals();

        let removed = original_count - kept.len();
        tracing::debug!(removed, remaining = kept.len(), "Welded mesh vertices");
        removed
    }

    fn face_normal_raw(&self, face: usize) -> Vector3<f64> {
        let [i0, i1, i2] = self.face(face);
        let v0 = self.vertex(i0 as usize);
        let v1 = self.vertex(i1 as usize);
        let v2 = self.vertex(i2 as usize);
        (v1 - v0).cross(&(v2 - v0))
    }

    /// Recompute one unit normal per triangle
    pub fn compute_face_normals(&mut self) {
        let mut face_normals = Vec::with_capacity(self.indices.len());
        for face in 0..self.triangle_count() {
            let n = self
                .face_normal_raw(face)
                .try_normalize(1e-12)
                .unwrap_or_else(Vector3::z);
            face_normals.push(n.x as f32);
            face_normals.push(n.y as f32);
            face_normals.push(n.z as f32);
        }
        self.face_normals = face_normals;
    }

    /// Recompute smooth vertex normals from area-weighted face normals
    pub fn compute_vertex_normals(&mut self) {
        let vertex_count = self.vertex_count();
        let mut normals = vec![Vector3::<f64>::zeros(); vertex_count];

        for face in 0..self.triangle_count() {
            let normal = self.face_normal_raw(face);
            for &i in &self.face(face) {
                normals[i as usize] += normal;
            }
        }

        self.normals.clear();
        self.normals.reserve(vertex_count * 3);
        for normal in normals {
            let n = normal.try_normalize(1e-12).unwrap_or_else(Vector3::z);
            self.normals.push(n.x as f32);
            self.normals.push(n.y as f32);
            self.normals.push(n.z as f32);
        }
    }

    /// Recompute both face and vertex normals
    pub fn recompute_normals(&mut self) {
        self.compute_face_normals();
        self.compute_vertex_normals();
    }

    /// Apply a transformation matrix to positions and normals
    pub fn apply_transform(&mut self, transform: &Matrix4<f64>) {
        self.positions.chunks_exact_mut(3).for_each(|chunk| {
            let point = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
            let transformed = transform.transform_point(&point);
            chunk[0] = transformed.x as f32;
            chunk[1] = transformed.y as f32;
            chunk[2] = transformed.z as f32;
        });

        // Inverse transpose keeps normals perpendicular under non-uniform scale
        let normal_matrix = transform.try_inverse().unwrap_or(*transform).transpose();
        let transform_normals = |normals: &mut Vec<f32>| {
            normals.chunks_exact_mut(3).for_each(|chunk| {
                let normal = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
                let transformed = (normal_matrix * normal.to_homogeneous())
                    .xyz()
                    .try_normalize(1e-12)
                    .unwrap_or(normal);
                chunk[0] = transformed.x as f32;
                chunk[1] = transformed.y as f32;
                chunk[2] = transformed.z as f32;
            });
        };
        transform_normals(&mut self.normals);
        transform_normals(&mut self.face_normals);
    }

    /// Axis-aligned bounds `(min, max)`, both at the origin for an empty mesh
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        let mut corners = self
            .positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]));

        match corners.next() {
            Some(first) => corners.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p))),
            None => (Point3::origin(), Point3::origin()),
        }
    }

    /// Clear the mesh
    #[inline]
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.indices.clear();
        self.face_normals.clear();
        self.uv_sets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::z());
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z());
        mesh.add_vertex(Point3::new(1.0, 1.0, 0.0), Vector3::z());
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::z());
        mesh.add_triangle_with_uvs(
            0,
            1,
            2,
            [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)],
        );
        mesh.add_triangle_with_uvs(
            0,
            2,
            3,
            [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(0.0, 1.0)],
        );
        mesh
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_add_vertex() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0]);
        assert_eq!(mesh.normals, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_uvs_are_per_face_corner() {
        let mesh = quad();
        assert!(mesh.has_uv_set(0));
        assert!(!mesh.has_uv_set(1));
        assert_eq!(mesh.uv_sets[0].len(), mesh.indices.len());
        assert_eq!(
            mesh.face_uvs(0, 1),
            Some([[0.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
        );
        assert_eq!(mesh.flat_uvs(0).len(), mesh.indices.len() * 2);
    }

    #[test]
    fn test_plain_triangle_pads_existing_uv_sets() {
        let mut mesh = quad();
        mesh.add_triangle(1, 2, 3);
        assert!(mesh.has_uv_set(0));
        assert_eq!(mesh.face_uvs(0, 2), Some([[0.0, 0.0]; 3]));
    }

    #[test]
    fn test_merge_offsets_indices_and_concatenates_uvs() {
        let mut a = quad();
        let b = quad();
        a.merge(&b);

        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.triangle_count(), 4);
        assert_eq!(a.face(2), [4, 5, 6]);
        assert!(a.has_uv_set(0));
        assert_eq!(a.face_uvs(0, 3), b.face_uvs(0, 1));
    }

    #[test]
    fn test_merge_pads_missing_uv_sets() {
        let mut plain = Mesh::new();
        plain.add_vertex(Point3::origin(), Vector3::z());
        plain.add_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z());
        plain.add_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::z());
        plain.add_triangle(0, 1, 2);

        plain.merge(&quad());
        assert!(plain.has_uv_set(0));
        assert_eq!(plain.face_uvs(0, 0), Some([[0.0, 0.0]; 3]));
        assert_eq!(plain.face_uvs(0, 2), Some([[0.0, 0.0], [1.0, 1.0], [0.0, 1.0]]));
    }

    #[test]
    fn test_weld_collapses_duplicates() {
        let mut a = quad();
        let removed = a.merge_welded(&quad(), 1e-4);
        assert_eq!(removed, 4);
        assert_eq!(a.vertex_count(), 4);
        assert_eq!(a.triangle_count(), 4);
        assert_eq!(a.face(2), [0, 1, 2]);
        // Face-corner UVs survive welding
        assert_eq!(a.uv_sets[0].len(), 12);
    }

    #[test]
    fn test_weld_respects_epsilon() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::z());
        mesh.add_vertex(Point3::new(0.00005, 0.0, 0.0), Vector3::z());
        mesh.add_vertex(Point3::new(0.5, 0.0, 0.0), Vector3::z());
        mesh.add_triangle(0, 1, 2);

        assert_eq!(mesh.weld_vertices(1e-4), 1);
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.face(0), [0, 0, 1]);
    }

    #[test]
    fn test_recompute_normals() {
        let mut mesh = quad();
        mesh.normals.iter_mut().for_each(|n| *n = 0.0);
        mesh.recompute_normals();

        assert_eq!(mesh.face_normals.len(), 6);
        for chunk in mesh.face_normals.chunks_exact(3) {
            assert_relative_eq!(chunk[2], 1.0);
        }
        for chunk in mesh.normals.chunks_exact(3) {
            assert_relative_eq!(chunk[2], 1.0);
        }
    }

    #[test]
    fn test_apply_transform() {
        let mut mesh = quad();
        mesh.recompute_normals();
        mesh.apply_transform(&Matrix4::new_translation(&Vector3::new(10.0, 0.0, 5.0)));

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.x, 10.0);
        assert_relative_eq!(max.x, 11.0);
        assert_relative_eq!(min.z, 5.0);
        assert_relative_eq!(mesh.normals[2], 1.0);
    }

    #[test]
    fn test_bounds() {
        let (min, max) = quad().bounds();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 0.0));
    }
}
