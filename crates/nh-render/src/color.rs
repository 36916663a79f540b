use serde::Deserialize;
use std::fmt;

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn hex(s: &str) -> Self {
        let s = s.strip_prefix('#').unwrap_or(s);
        let b = s.as_bytes();
        if b.len() < 6 {
            return Self::rgb(0, 0, 0);
        }
        let pair = |i: usize| {
            let hi = (b[i] as char).to_digit(16)?;
            let lo = (b[i + 1] as char).to_digit(16)?;
            Some((hi * 16 + lo) as u8)
        };
        Self {
            r: pair(0).unwrap_or(0),
            g: pair(2).unwrap_or(0),
            b: pair(4).unwrap_or(0),
            a: 1.0,
        }
    }

    pub fn to_svg_fill(&self) -> String {
        if (self.a - 1.0).abs() < 1e-6 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_fill())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Color::hex(&s))
    }
}

/// Series palette for overlaid 1D histograms.
pub const SERIES_PALETTE: [Color; 6] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
];

/// The `hot` colormap: black through red and yellow to white.
pub fn hot(t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let r = (t / 0.365).min(1.0);
    let g = ((t - 0.365) / (0.746 - 0.365)).clamp(0.0, 1.0);
    let b = ((t - 0.746) / (1.0 - 0.746)).clamp(0.0, 1.0);
    Color::rgb(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}
