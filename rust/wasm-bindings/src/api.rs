// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Free functions of the JavaScript API
//!
//! Points cross the boundary as flat `[x, y, z, ...]` Float64Arrays.
//! Option and material objects are plain JS objects decoded with
//! serde-wasm-bindgen; missing fields take their defaults.

use crate::error::BindingError;
use crate::mesh_handle::MeshHandle;
use crate::utils::{flatten_points, points_from_flat, warn};
use uvlab_geometry::{
    board_mesh, complete_contour, extrude, offset_contour, planar_geometry_from_points,
    points_on_circle, vector, BlendMaterial, Color, ExtrudeOptions, Point3,
};
use wasm_bindgen::prelude::*;

/// Mitered outward offset of a clockwise outline (closed: last = first)
#[wasm_bindgen(js_name = offsetContour)]
pub fn offset_contour_js(padding: f64, points: &[f64]) -> Result<Vec<f64>, JsError> {
    let points = points_from_flat(points)?;
    let offset = offset_contour(padding, &points).map_err(BindingError::from)?;
    Ok(flatten_points(&offset))
}

/// Thicken an open path into a ribbon outline `2 * offset` wide
#[wasm_bindgen(js_name = completeContour)]
pub fn complete_contour_js(offset: f64, points: &[f64]) -> Result<Vec<f64>, JsError> {
    let points = points_from_flat(points)?;
    let outline = complete_contour(offset, &points).map_err(BindingError::from)?;
    Ok(flatten_points(&outline))
}

/// Sample `segments + 1` points on an ellipse around the origin
#[wasm_bindgen(js_name = pointsOnCircle)]
pub fn points_on_circle_js(
    radius_x: f64,
    radius_y: f64,
    segments: usize,
    start_angle: f64,
    end_angle: f64,
    clockwise: bool,
) -> Result<Vec<f64>, JsError> {
    let points = points_on_circle(radius_x, radius_y, segments, start_angle, end_angle, clockwise)
        .map_err(BindingError::from)?;
    Ok(flatten_points(&points))
}

/// Even-odd containment test; malformed input answers `false`
#[wasm_bindgen(js_name = pointInPolygon)]
pub fn point_in_polygon_js(polygon: &[f64], x: f64, y: f64) -> bool {
    match points_from_flat(polygon) {
        Ok(points) => vector::point_in_polygon(&points, &Point3::new(x, y, 0.0)),
        Err(err) => {
            warn(&format!("[uvlab] pointInPolygon: {}", err));
            false
        }
    }
}

#[wasm_bindgen(js_name = planarGeometry)]
pub fn planar_geometry_js(points: &[f64]) -> Result<MeshHandle, JsError> {
    let points = points_from_flat(points)?;
    let mesh = planar_geometry_from_points(&points).map_err(BindingError::from)?;
    Ok(mesh.into())
}

/// Extrude an outline; `options` may be `undefined` or a partial object
#[wasm_bindgen(js_name = extrude)]
pub fn extrude_js(points: &[f64], options: JsValue) -> Result<MeshHandle, JsError> {
    let points = points_from_flat(points)?;
    let options: ExtrudeOptions = if options.is_undefined() || options.is_null() {
        ExtrudeOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(BindingError::from)?
    };
    let mesh = extrude(&points, &options).map_err(BindingError::from)?;
    Ok(mesh.into())
}

/// Box mesh from eight corners (top 0-3, bottom 4-7)
#[wasm_bindgen(js_name = boardMesh)]
pub fn board_mesh_js(points: &[f64]) -> Result<MeshHandle, JsError> {
    let points = points_from_flat(points)?;
    let mesh = board_mesh(&points).map_err(BindingError::from)?;
    Ok(mesh.into())
}

/// Uniform values for a blend material, keyed by shader uniform name
#[wasm_bindgen(js_name = blendUniforms)]
pub fn blend_uniforms(material: JsValue) -> Result<JsValue, JsError> {
    let material: BlendMaterial =
        serde_wasm_bindgen::from_value(material).map_err(BindingError::from)?;
    material.validate().map_err(BindingError::from)?;

    let uniforms = js_sys::Object::new();
    for (name, value) in material.uniforms() {
        let value = serde_wasm_bindgen::to_value(&value).map_err(BindingError::from)?;
        js_sys::Reflect::set(&uniforms, &JsValue::from_str(name), &value)
            .map_err(|_| JsError::new(&format!("Failed to set uniform: {}", name)))?;
    }
    Ok(uniforms.into())
}

/// Blend material parsed from JSON, echoed back with defaults filled in
#[wasm_bindgen(js_name = normalizeMaterialJson)]
pub fn normalize_material_json(json: &str) -> Result<String, JsError> {
    let material: BlendMaterial = serde_json::from_str(json).map_err(BindingError::from)?;
    material.validate().map_err(BindingError::from)?;
    Ok(serde_json::to_string(&material).map_err(BindingError::from)?)
}

/// Palette colour as 0xRRGGBB, `undefined` for unknown names
#[wasm_bindgen(js_name = colorHex)]
pub fn color_hex(name: &str) -> Option<u32> {
    Color::from_name(name).map(Color::hex)
}

/// Closed circle outline for line rendering
#[wasm_bindgen(js_name = circleLinePoints)]
pub fn circle_line_points_js(radius: f64, segments: usize) -> Result<Vec<f64>, JsError> {
    let points =
        uvlab_geometry::circle_line_points(radius, segments).map_err(BindingError::from)?;
    Ok(flatten_points(&points))
}
