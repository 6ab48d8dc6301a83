use std::fmt;

use serde::{Serialize, Serializer};
use tokio::sync::watch;

use crate::theme::ColorMode;

pub const SATURATION: u8 = 100;
pub const LIGHTNESS_ON_LIGHT: u8 = 40;
pub const LIGHTNESS_ON_DARK: u8 = 80;

/// `hash = unit + ((hash << 5) - hash)` over the UTF-16 code units of `key`,
/// wrapping at 32 bits.
pub fn hash_code(key: &str) -> i32 {
    key.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    })
}

/// Hue in `[0, 360)`.
pub fn hue_for(key: &str) -> u16 {
    // rem_euclid keeps negative hashes in range; the result always fits.
    hash_code(key).rem_euclid(360) as u16
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HslColor {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

impl Serialize for HslColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn color_for(key: &str, mode: ColorMode) -> HslColor {
    let lightness = match mode {
        ColorMode::Light => LIGHTNESS_ON_LIGHT,
        ColorMode::Dark => LIGHTNESS_ON_DARK,
    };

    HslColor {
        hue: hue_for(key),
        saturation: SATURATION,
        lightness,
    }
}

/// Hands out colors for the theme that is currently published.
#[derive(Clone, Debug)]
pub struct ColorAssigner {
    mode: watch::Receiver<ColorMode>,
}

impl ColorAssigner {
    pub fn new(mode: watch::Receiver<ColorMode>) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ColorMode {
        *self.mode.borrow()
    }

    pub fn color_for(&self, key: &str) -> HslColor {
        color_for(key, self.mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_code_known_values() {
        assert_eq!(hash_code(""), 0);
        assert_eq!(hash_code("a"), 97);
        assert_eq!(hash_code("ab"), 3105);
        assert_eq!(hash_code("Mathematics"), 1_501_363_638);
    }

    #[test]
    fn test_hash_code_wraps_at_32_bits() {
        assert_eq!(hash_code("Schmidt"), -712_922_332);
        assert_eq!(hash_code("zzzzzzzzzz"), -1_580_979_136);
    }

    #[test]
    fn test_hash_code_uses_utf16_units() {
        // U+1F600 is a surrogate pair: 0xD83D, 0xDE00.
        assert_eq!(hash_code("😀"), 1_772_899);
    }

    #[test]
    fn test_negative_hash_hue_is_normalized() {
        assert_eq!(hue_for("Schmidt"), 68);
        assert_eq!(hue_for("zzzzzzzzzz"), 104);
        assert_eq!(hue_for("ab"), 225);
    }

    #[test]
    fn test_color_depends_on_mode_only_in_lightness() {
        for key in ["t1", "c1", "4.B", "Schmidt", ""] {
            let light = color_for(key, ColorMode::Light);
            let dark = color_for(key, ColorMode::Dark);

            assert_eq!(light.hue, dark.hue);
            assert_eq!(light.saturation, 100);
            assert_eq!(dark.saturation, 100);
            assert_eq!(light.lightness, 40);
            assert_eq!(dark.lightness, 80);
            assert_eq!(light, color_for(key, ColorMode::Light));
        }
    }

    #[test]
    fn test_css_rendering() {
        assert_eq!(color_for("t1", ColorMode::Light).to_string(), "hsl(45, 100%, 40%)");
        assert_eq!(color_for("t1", ColorMode::Dark).to_string(), "hsl(45, 100%, 80%)");
        assert_eq!(
            serde_json::to_value(color_for("ab", ColorMode::Dark)).unwrap(),
            "hsl(225, 100%, 80%)"
        );
    }

    #[test]
    fn test_assigner_follows_published_mode() {
        let (tx, rx) = watch::channel(ColorMode::Light);
        let assigner = ColorAssigner::new(rx);

        assert_eq!(assigner.color_for("c1").lightness, 40);
        tx.send(ColorMode::Dark).unwrap();
        assert_eq!(assigner.color_for("c1").lightness, 80);
        assert_eq!(assigner.color_for("c1").hue, 238);
    }
}
