// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Failures raised while decoding JavaScript input or running geometry
#[derive(Error, Debug)]
pub enum BindingError {
    #[error("Invalid points: {0}")]
    InvalidPoints(String),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error(transparent)]
    Geometry(#[from] uvlab_geometry::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<serde_wasm_bindgen::Error> for BindingError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        BindingError::InvalidOptions(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_reach_javascript_unchanged() {
        let err = BindingError::from(uvlab_geometry::Error::invalid_argument("empty outline"));
        assert!(err.to_string().contains("empty outline"));

        let err = BindingError::InvalidPoints("7 values".to_string());
        assert_eq!(err.to_string(), "Invalid points: 7 values");
    }
}
