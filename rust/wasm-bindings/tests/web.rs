// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Browser tests for the JavaScript surface.
//!
//! Run with: wasm-pack test --headless --firefox rust/wasm-bindings

#![cfg(target_arch = "wasm32")]

use uvlab_wasm::{board_mesh_js, offset_contour_js, point_in_polygon_js, points_on_circle_js};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const CUBE: [f64; 24] = [
    0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, //
    0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
];

#[wasm_bindgen_test]
fn offset_contour_closes_outline() {
    let square = [0.0, 0.0, 0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0, 0.0, 0.0];
    let offset = offset_contour_js(1.0, &square).unwrap();
    assert_eq!(offset.len(), 5 * 3);
    assert_eq!(offset[..3], offset[12..]);
}

#[wasm_bindgen_test]
fn point_in_polygon_tolerates_ragged_input() {
    assert!(!point_in_polygon_js(&[0.0, 1.0], 0.5, 0.5));

    let triangle = [0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 4.0, 0.0];
    assert!(point_in_polygon_js(&triangle, 1.0, 1.0));
}

#[wasm_bindgen_test]
fn board_handle_exposes_uv_operations() {
    let mut board = board_mesh_js(&CUBE).unwrap();
    assert_eq!(board.triangle_count(), 12);
    assert_eq!(board.uvs().length() as usize, 12 * 3 * 2);

    let before = board.uvs().to_vec();
    board.flip_face_normals().unwrap();
    board.flip_face_normals().unwrap();
    assert_eq!(board.uvs().to_vec(), before);

    board.rotate_uv_incremental(90.0).unwrap();
    assert!(board.set_vertex(99, 0.0, 0.0, 0.0).is_err());
}

#[wasm_bindgen_test]
fn circle_sampling_includes_both_ends() {
    let points = points_on_circle_js(1.0, 1.0, 4, 0.0, std::f64::consts::TAU, false).unwrap();
    assert_eq!(points.len(), 5 * 3);
    assert!((points[0] - 1.0).abs() < 1e-12);
}

#[wasm_bindgen_test]
fn geometry_errors_become_js_errors() {
    // Two coordinates do not form an xyz triple
    assert!(offset_contour_js(1.0, &[0.0, 1.0]).is_err());
    // Two points are not a closed outline
    assert!(offset_contour_js(1.0, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0]).is_err());
    assert!(board_mesh_js(&CUBE[..21]).is_err());
}
