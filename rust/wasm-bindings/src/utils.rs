// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::BindingError;
use uvlab_geometry::Point3;

/// Set panic hook for better error messages in the browser
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Report a recoverable condition on the browser console
pub fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Read `[x0, y0, z0, x1, ...]` into points
pub fn points_from_flat(coords: &[f64]) -> Result<Vec<Point3<f64>>, BindingError> {
    if coords.len() % 3 != 0 {
        return Err(BindingError::InvalidPoints(format!(
            "expected xyz triples, got {} values",
            coords.len()
        )));
    }
    Ok(coords
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect())
}

/// Flatten points to `[x0, y0, z0, x1, ...]`
pub fn flatten_points(points: &[Point3<f64>]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
}
