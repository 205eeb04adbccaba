//! Color types shared by the native and portable mesh models

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGBA color with floating point components (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    /// Create a color from RGB values (alpha = 1.0)
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA values
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Replace the alpha component, keeping the color channels
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Packed 32-bit ARGB color, the canonical interchange form.
///
/// Portable mesh records keep colors packed so a full round trip reproduces
/// every channel bit for bit. On the wire the packed value travels as a
/// signed 32-bit integer, so `0xFF000000` serializes as `-16777216`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedColor(pub u32);

impl PackedColor {
    /// Fully opaque black, `0xFF000000`.
    ///
    /// Doubles as the "no emission" sentinel on render materials.
    pub const OPAQUE_BLACK: PackedColor = PackedColor(0xFF00_0000);
    /// Fully opaque white, `0xFFFFFFFF`.
    pub const OPAQUE_WHITE: PackedColor = PackedColor(0xFFFF_FFFF);

    /// Pack four 8-bit channels in ARGB order
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

impl Default for PackedColor {
    fn default() -> Self {
        Self::OPAQUE_WHITE
    }
}

impl From<Color> for PackedColor {
    /// Quantize float channels to 8 bits, rounding to nearest
    fn from(color: Color) -> Self {
        fn channel(value: f32) -> u8 {
            (value.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Self::from_argb(
            channel(color.a),
            channel(color.r),
            channel(color.g),
            channel(color.b),
        )
    }
}

impl From<PackedColor> for Color {
    fn from(packed: PackedColor) -> Self {
        Self::rgba(
            packed.red() as f32 / 255.0,
            packed.green() as f32 / 255.0,
            packed.blue() as f32 / 255.0,
            packed.alpha() as f32 / 255.0,
        )
    }
}

impl Serialize for PackedColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.0 as i32)
    }
}

impl<'de> Deserialize<'de> for PackedColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i32::deserialize(deserializer)?;
        Ok(Self(value as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_channels() {
        let packed = PackedColor::from_argb(0xFF, 0x12, 0x34, 0x56);
        assert_eq!(packed.0, 0xFF12_3456);
        assert_eq!(packed.alpha(), 0xFF);
        assert_eq!(packed.red(), 0x12);
        assert_eq!(packed.green(), 0x34);
        assert_eq!(packed.blue(), 0x56);
    }

    #[test]
    fn test_pack_unpack_round_trip() {
        let packed = PackedColor::from_argb(0x80, 0xC0, 0x40, 0x00);
        assert_eq!(PackedColor::from(Color::from(packed)), packed);
    }

    #[test]
    fn test_pack_rounds_to_nearest() {
        let color = Color::rgba(0.5, 0.0, 1.0, 1.0);
        let packed = PackedColor::from(color);
        assert_eq!(packed.red(), 128);
        assert_eq!(packed.green(), 0);
        assert_eq!(packed.blue(), 255);
        assert_eq!(packed.alpha(), 255);
    }

    #[test]
    fn test_pack_clamps_out_of_range() {
        let packed = PackedColor::from(Color::rgba(2.0, -1.0, 0.0, 1.0));
        assert_eq!(packed.red(), 255);
        assert_eq!(packed.green(), 0);
    }

    #[test]
    fn test_serializes_as_signed_integer() {
        let json = serde_json::to_string(&PackedColor::OPAQUE_BLACK).unwrap();
        assert_eq!(json, "-16777216");
        let back: PackedColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PackedColor::OPAQUE_BLACK);
    }
}
