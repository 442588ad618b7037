// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Colour palette and blend-shader material parameters

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Uniform names read by the blend shader programs
pub mod uniform {
    pub const BASE_TEXTURE: &str = "baseTexture";
    pub const BLEND_TEXTURE: &str = "blendTexture";
    pub const TINT_COLOR: &str = "tintColor";
    pub const REPEAT_X: &str = "repeatX";
    pub const REPEAT_Y: &str = "repeatY";
    pub const USE_SIZE_SCALING: &str = "useSizeScaling";
}

/// Fixed colour palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Color {
    #[default]
    White,
    Black,
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    Orange,
    Grey,
    LightGrey,
    Wood,
}

impl Color {
    pub const ALL: [Color; 12] = [
        Color::White,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Cyan,
        Color::Magenta,
        Color::Orange,
        Color::Grey,
        Color::LightGrey,
        Color::Wood,
    ];

    /// 0xRRGGBB value
    pub const fn hex(self) -> u32 {
        match self {
            Color::White => 0xffffff,
            Color::Black => 0x000000,
            Color::Red => 0xff0000,
            Color::Green => 0x00ff00,
            Color::Blue => 0x0000ff,
            Color::Yellow => 0xffff00,
            Color::Cyan => 0x00ffff,
            Color::Magenta => 0xff00ff,
            Color::Orange => 0xffa500,
            Color::Grey => 0x808080,
            Color::LightGrey => 0xd3d3d3,
            Color::Wood => 0xdeb887,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Cyan => "cyan",
            Color::Magenta => "magenta",
            Color::Orange => "orange",
            Color::Grey => "grey",
            Color::LightGrey => "lightgrey",
            Color::Wood => "wood",
        }
    }

    pub fn from_hex(hex: u32) -> Option<Color> {
        Self::ALL.into_iter().find(|c| c.hex() == hex)
    }

    /// Case-insensitive lookup; `gray` spellings are accepted
    pub fn from_name(name: &str) -> Option<Color> {
        let name = name.trim().to_ascii_lowercase().replace("gray", "grey");
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Linear channel values in `[0, 1]`
    pub fn rgb(self) -> [f32; 3] {
        let hex = self.hex();
        [
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        ]
    }
}

/// Value bound to a shader uniform
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "camelCase"))]
pub enum UniformValue {
    /// Texture key, `None` when the slot is unbound
    Texture(Option<String>),
    Color([f32; 3]),
    Float(f32),
    Bool(bool),
}

/// Parameters of the two-texture blend material
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct BlendMaterial {
    pub base_texture: String,
    pub blend_texture: Option<String>,
    pub tint: Color,
    pub repeat_x: f32,
    pub repeat_y: f32,
    /// Scale texture repeats by the object's size instead of using them as-is
    pub scale_uv_by_size: bool,
}

impl Default for BlendMaterial {
    fn default() -> Self {
        Self {
            base_texture: String::new(),
            blend_texture: None,
            tint: Color::White,
            repeat_x: 1.0,
            repeat_y: 1.0,
            scale_uv_by_size: false,
        }
    }
}

impl BlendMaterial {
    pub fn new(base_texture: impl Into<String>) -> Self {
        Self {
            base_texture: base_texture.into(),
            ..Default::default()
        }
    }

    pub fn with_blend(mut self, blend_texture: impl Into<String>) -> Self {
        self.blend_texture = Some(blend_texture.into());
        self
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_repeat(mut self, repeat_x: f32, repeat_y: f32) -> Self {
        self.repeat_x = repeat_x;
        self.repeat_y = repeat_y;
        self
    }

    pub fn with_size_scaling(mut self, enabled: bool) -> Self {
        self.scale_uv_by_size = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_texture.is_empty() {
            return Err(Error::invalid_argument("blend material needs a base texture"));
        }
        for (axis, repeat) in [("x", self.repeat_x), ("y", self.repeat_y)] {
            if repeat <= 0.0 || !repeat.is_finite() {
                return Err(Error::invalid_argument(format!(
                    "texture repeat along {axis} must be positive, got {repeat}"
                )));
            }
        }
        Ok(())
    }

    /// Named uniform values in the order the shaders declare them
    pub fn uniforms(&self) -> Vec<(&'static str, UniformValue)> {
        vec![
            (
                uniform::BASE_TEXTURE,
                UniformValue::Texture(Some(self.base_texture.clone())),
            ),
            (
                uniform::BLEND_TEXTURE,
                UniformValue::Texture(self.blend_texture.clone()),
            ),
            (uniform::TINT_COLOR, UniformValue::Color(self.tint.rgb())),
            (uniform::REPEAT_X, UniformValue::Float(self.repeat_x)),
            (uniform::REPEAT_Y, UniformValue::Float(self.repeat_y)),
            (
                uniform::USE_SIZE_SCALING,
                UniformValue::Bool(self.scale_uv_by_size),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lookups() {
        assert_eq!(Color::from_hex(0xff0000), Some(Color::Red));
        assert_eq!(Color::from_hex(0x123456), None);
        assert_eq!(Color::from_name("LightGray"), Some(Color::LightGrey));
        assert_eq!(Color::from_name(" wood "), Some(Color::Wood));
        assert_eq!(Color::from_name("mauve"), None);

        for color in Color::ALL {
            assert_eq!(Color::from_hex(color.hex()), Some(color));
            assert_eq!(Color::from_name(color.name()), Some(color));
        }
    }

    #[test]
    fn test_rgb_channels() {
        assert_eq!(Color::Orange.rgb(), [1.0, 165.0 / 255.0, 0.0]);
        assert_eq!(Color::Black.rgb(), [0.0; 3]);
    }

    #[test]
    fn test_uniform_names() {
        let material = BlendMaterial::new("planks")
            .with_blend("dirt")
            .with_tint(Color::Wood)
            .with_repeat(2.0, 4.0)
            .with_size_scaling(true);
        assert!(material.validate().is_ok());

        let uniforms = material.uniforms();
        let names: Vec<_> = uniforms.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            ["baseTexture", "blendTexture", "tintColor", "repeatX", "repeatY", "useSizeScaling"]
        );
        assert_eq!(uniforms[1].1, UniformValue::Texture(Some("dirt".to_string())));
        assert_eq!(uniforms[4].1, UniformValue::Float(4.0));
        assert_eq!(uniforms[5].1, UniformValue::Bool(true));
    }

    #[test]
    fn test_validation() {
        assert!(BlendMaterial::default().validate().is_err());
        assert!(BlendMaterial::new("a").with_repeat(0.0, 1.0).validate().is_err());
        assert!(BlendMaterial::new("a").with_repeat(1.0, f32::NAN).validate().is_err());
    }
}
