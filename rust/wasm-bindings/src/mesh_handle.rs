// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh handle exposed to JavaScript
//!
//! Owns a geometry mesh on the WASM side. Getters copy buffers into typed
//! arrays; UV operations rewrite the owned mesh in place.

use crate::error::BindingError;
use serde::Serialize;
use uvlab_geometry::{uv, Mesh, Point3};
use wasm_bindgen::prelude::*;

/// Summary handed to JavaScript as a plain object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshStats {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub uv_sets: usize,
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl MeshStats {
    pub fn of(mesh: &Mesh) -> Self {
        let (min, max) = mesh.bounds();
        Self {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            uv_sets: mesh.uv_sets.len(),
            min: [min.x, min.y, min.z],
            max: [max.x, max.y, max.z],
        }
    }
}

#[wasm_bindgen]
pub struct MeshHandle {
    mesh: Mesh,
}

impl From<Mesh> for MeshHandle {
    fn from(mesh: Mesh) -> Self {
        Self { mesh }
    }
}

impl MeshHandle {
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

#[wasm_bindgen]
impl MeshHandle {
    /// Get positions as Float32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.mesh.positions[..])
    }

    /// Get normals as Float32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.mesh.normals[..])
    }

    /// Get indices as Uint32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(&self.mesh.indices[..])
    }

    /// UV set 0, one (u, v) pair per face corner
    #[wasm_bindgen(getter)]
    pub fn uvs(&self) -> js_sys::Float32Array {
        self.uv_set(0)
    }

    /// UV set `set`, empty when the set does not exist
    #[wasm_bindgen(js_name = uvSet)]
    pub fn uv_set(&self, set: usize) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.mesh.flat_uvs(set)[..])
    }

    #[wasm_bindgen(getter, js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    #[wasm_bindgen(getter, js_name = triangleCount)]
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Bounding box as [minX, minY, minZ, maxX, maxY, maxZ]
    #[wasm_bindgen]
    pub fn bounds(&self) -> Vec<f32> {
        let (min, max) = self.mesh.bounds();
        vec![min.x, min.y, min.z, max.x, max.y, max.z]
    }

    /// Counts and bounds as `{ vertexCount, triangleCount, uvSets, min, max }`
    #[wasm_bindgen]
    pub fn stats(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&MeshStats::of(&self.mesh)).map_err(BindingError::from)?)
    }

    /// Move one vertex; UVs keep their old values until re-synced
    #[wasm_bindgen(js_name = setVertex)]
    pub fn set_vertex(&mut self, index: usize, x: f64, y: f64, z: f64) -> Result<(), JsError> {
        if index >= self.mesh.vertex_count() {
            return Err(JsError::new(&format!(
                "vertex {} out of range ({} vertices)",
                index,
                self.mesh.vertex_count()
            )));
        }
        self.mesh.set_vertex(index, Point3::new(x, y, z));
        Ok(())
    }

    /// Overwrite UV set `set` from a flat (u, v) array, in place
    #[wasm_bindgen(js_name = writeUvs)]
    pub fn write_uvs(&mut self, set: usize, data: &[f32]) -> Result<(), JsError> {
        let target = uv::get_uvs_mut(&mut self.mesh, set).map_err(BindingError::from)?;
        if data.len() != target.len() * 2 {
            return Err(JsError::new(&format!(
                "expected {} UV values, got {}",
                target.len() * 2,
                data.len()
            )));
        }
        for (slot, pair) in target.iter_mut().zip(data.chunks_exact(2)) {
            *slot = [pair[0], pair[1]];
        }
        Ok(())
    }

    /// Face outlines in UV space as flat xyz points (z = 0)
    #[wasm_bindgen(js_name = uvLine)]
    pub fn uv_line(&self, set: usize) -> Result<Vec<f64>, JsError> {
        let points = uv::uv_line(&self.mesh, set).map_err(BindingError::from)?;
        Ok(crate::utils::flatten_points(&points))
    }

    #[wasm_bindgen(js_name = planarProjectUv)]
    pub fn planar_project_uv(&mut self) -> Result<(), JsError> {
        uv::planar_project_uv(&mut self.mesh).map_err(BindingError::from)?;
        Ok(())
    }

    /// Replace UVs with the vertex (x, y) rotated by `degree`
    #[wasm_bindgen(js_name = rotateUv)]
    pub fn rotate_uv(&mut self, degree: f64) -> Result<(), JsError> {
        uv::rotate_uv_absolute(degree, &mut self.mesh).map_err(BindingError::from)?;
        Ok(())
    }

    /// Rotate the current UVs by `degree`
    #[wasm_bindgen(js_name = rotateUvIncremental)]
    pub fn rotate_uv_incremental(&mut self, degree: f64) -> Result<(), JsError> {
        uv::rotate_uv_incremental(degree, &mut self.mesh).map_err(BindingError::from)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = matchUvsToVertices)]
    pub fn match_uvs_to_vertices(&mut self) -> Result<(), JsError> {
        uv::match_uvs_to_vertices(&mut self.mesh).map_err(BindingError::from)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = flipFaceNormals)]
    pub fn flip_face_normals(&mut self) -> Result<(), JsError> {
        uv::flip_face_normals(&mut self.mesh).map_err(BindingError::from)?;
        Ok(())
    }
}
