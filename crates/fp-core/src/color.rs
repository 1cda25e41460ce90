// ABOUTME: Color representation for the compositor's whitespace fill.
// ABOUTME: Converts normalized RGBA into 24-bit ANSI background sequences.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Pure black, also the fallback when a color is left unset
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Dark blue-grey fill that sets panes apart from a black terminal
    pub const SLATE: Self = Self::rgb(0.08, 0.09, 0.11);

    /// Pure white, for light terminal themes
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Quantize to 8-bit channels, clamping out-of-range components
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// SGR sequence selecting this color as the background
    pub fn ansi_background(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("\x1b[48;2;{};{};{}m", r, g, b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
