//! RGB and HSV color value types.
//!
//! Both are plain value types with no ownership relation to any canvas.
//! Conversions follow the classic chroma-weighted sector formulas, with hue,
//! saturation and value all normalized to `[0, 1]`. Achromatic colors
//! (`r == g == b`) round-trip through HSV losslessly; everything else is
//! best-effort within 8-bit channel resolution.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string.
    ///
    /// Accepts 3 or 6 hex digits with an optional leading `#`. Three-digit
    /// strings expand each digit by doubling it (`#f80` → `#ff8800`). Any
    /// other length is an error.
    ///
    /// # Examples
    /// ```
    /// # use easel::color::Rgb;
    /// assert_eq!(Rgb::from_hex("#ff8800").unwrap(), Rgb::new(255, 136, 0));
    /// assert_eq!(Rgb::from_hex("f80").unwrap(), Rgb::new(255, 136, 0));
    /// assert!(Rgb::from_hex("#ff80").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return Err(Error::InvalidColorFormat(hex.to_string()));
        }

        let channel = |pair: &str| {
            u8::from_str_radix(pair, 16).map_err(|_| Error::InvalidColorFormat(hex.to_string()))
        };

        match digits.len() {
            6 => Ok(Self {
                r: channel(&digits[0..2])?,
                g: channel(&digits[2..4])?,
                b: channel(&digits[4..6])?,
            }),
            3 => {
                let doubled = |i: usize| {
                    let d = &digits[i..i + 1];
                    channel(&format!("{d}{d}"))
                };
                Ok(Self {
                    r: doubled(0)?,
                    g: doubled(1)?,
                    b: doubled(2)?,
                })
            }
            _ => Err(Error::InvalidColorFormat(hex.to_string())),
        }
    }

    /// Render as canonical uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to HSV.
    ///
    /// `value` is the channel maximum; a zero chroma yields the achromatic
    /// `h = 0, s = 0`. Otherwise the hue sector is selected by whichever
    /// channel is the maximum and wrapped back into `[0, 1]`.
    pub fn to_hsv(self) -> Hsv {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let chroma = max - min;

        if chroma == 0.0 {
            return Hsv {
                h: 0.0,
                s: 0.0,
                v: max,
            };
        }

        let s = chroma / max;

        let weight_r = ((max - r) / 6.0 + chroma / 2.0) / chroma;
        let weight_g = ((max - g) / 6.0 + chroma / 2.0) / chroma;
        let weight_b = ((max - b) / 6.0 + chroma / 2.0) / chroma;

        let mut h = if r == max {
            weight_b - weight_g
        } else if g == max {
            1.0 / 3.0 + weight_r - weight_b
        } else {
            2.0 / 3.0 + weight_g - weight_r
        };

        if h < 0.0 {
            h += 1.0;
        }
        if h > 1.0 {
            h -= 1.0;
        }

        Hsv { h, s, v: max }
    }
}

/// A hue/saturation/value color, all components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Convert back to 8-bit RGB.
    ///
    /// Zero saturation maps every channel to `value`. Otherwise the sector
    /// index `floor(h * 6)` selects one of six (r, g, b) arrangements of the
    /// value and the three interpolation variables.
    pub fn to_rgb(self) -> Rgb {
        let channel = |x: f64| (x * 255.0).round().clamp(0.0, 255.0) as u8;

        if self.s == 0.0 {
            let c = channel(self.v);
            return Rgb::new(c, c, c);
        }

        let h6 = self.h * 6.0;
        let sector = h6.floor();
        let frac = h6 - sector;

        let var1 = self.v * (1.0 - self.s);
        let var2 = self.v * (1.0 - self.s * frac);
        let var3 = self.v * (1.0 - self.s * (1.0 - frac));

        let (r, g, b) = match (sector as i64).rem_euclid(6) {
            0 => (self.v, var3, var1),
            1 => (var2, self.v, var1),
            2 => (var1, self.v, var3),
            3 => (var1, var2, self.v),
            4 => (var3, var1, self.v),
            _ => (self.v, var1, var2),
        };

        Rgb::new(channel(r), channel(g), channel(b))
    }
}
