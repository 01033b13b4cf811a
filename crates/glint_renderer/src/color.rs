//! 8-bit RGB color.

use glint_math::{Interval, Vec3};
use serde::{Deserialize, Serialize};

/// An RGB color with one byte per channel.
///
/// Every color produced by shading goes through [`Color::from_scaled`], so
/// channels are always floored and clamped into `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A gray with all three channels set to `value`.
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Build a color from unbounded channel values.
    ///
    /// Each channel is floored and clamped to `[0, 255]`. NaN becomes 0.
    pub fn from_scaled(r: f32, g: f32, b: f32) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// Build a color from a vector of unbounded channel values.
    pub fn from_vec3(v: Vec3) -> Self {
        Self::from_scaled(v.x, v.y, v.z)
    }

    /// Channels as floats in `[0, 255]`.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32)
    }

    /// Multiply every channel by `factor`, clamping the result.
    pub fn scale(self, factor: f32) -> Self {
        Self::from_vec3(self.to_vec3() * factor)
    }

    /// Rec. 601 luma, used for single-channel output.
    pub fn luminance(self) -> u8 {
        let luma = 0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32;
        CHANNEL_RANGE.clamp(luma.round()) as u8
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b]
    }
}

const CHANNEL_RANGE: Interval = Interval { min: 0.0, max: 255.0 };

#[inline]
fn clamp_channel(value: f32) -> u8 {
    // `as` maps NaN to 0
    CHANNEL_RANGE.clamp(value.floor()) as u8
}
