// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GLSL programs consumed by the renderer as opaque text

use wasm_bindgen::prelude::*;

pub const BLEND_VERTEX: &str = include_str!("../shaders/blend.vert");
pub const BLEND_FRAGMENT: &str = include_str!("../shaders/blend.frag");
pub const TINT_VERTEX: &str = include_str!("../shaders/tint.vert");
pub const TINT_FRAGMENT: &str = include_str!("../shaders/tint.frag");

/// Vertex/fragment source pair
#[wasm_bindgen]
pub struct ShaderSource {
    vertex: &'static str,
    fragment: &'static str,
}

#[wasm_bindgen]
impl ShaderSource {
    #[wasm_bindgen(getter)]
    pub fn vertex(&self) -> String {
        self.vertex.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn fragment(&self) -> String {
        self.fragment.to_string()
    }
}

/// Program that mixes a base and a blend texture under a tint
#[wasm_bindgen(js_name = blendShader)]
pub fn blend_shader() -> ShaderSource {
    ShaderSource {
        vertex: BLEND_VERTEX,
        fragment: BLEND_FRAGMENT,
    }
}

/// Program drawing a single tinted, repeated texture
#[wasm_bindgen(js_name = tintShader)]
pub fn tint_shader() -> ShaderSource {
    ShaderSource {
        vertex: TINT_VERTEX,
        fragment: TINT_FRAGMENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uvlab_geometry::material::uniform;

    #[test]
    fn test_shaders_declare_material_uniforms() {
        let blend = format!("{BLEND_VERTEX}{BLEND_FRAGMENT}");
        for name in [
            uniform::BASE_TEXTURE,
            uniform::BLEND_TEXTURE,
            uniform::TINT_COLOR,
            uniform::REPEAT_X,
            uniform::REPEAT_Y,
            uniform::USE_SIZE_SCALING,
        ] {
            assert!(blend.contains(name), "blend shader lacks {name}");
        }
        assert!(TINT_FRAGMENT.contains(uniform::TINT_COLOR));
    }
}
