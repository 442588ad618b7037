// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! uvlab WebAssembly Bindings
//!
//! JavaScript/TypeScript API for the uvlab geometry utilities built with
//! wasm-bindgen.

use wasm_bindgen::prelude::*;

mod api;
mod error;
mod mesh_handle;
mod shaders;
mod utils;

pub use api::*;
pub use error::BindingError;
pub use mesh_handle::{MeshHandle, MeshStats};
pub use shaders::{blend_shader, tint_shader, ShaderSource};
pub use utils::set_panic_hook;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    utils::set_panic_hook();
}

/// Get the version of uvlab
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
