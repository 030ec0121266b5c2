//! Canvas fill color.
//!
//! Parsed from hex (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, leading `#`
//! optional) or one of a few names: `black`, `white`, `transparent`.

use std::fmt;
use std::str::FromStr;

use image::Rgba;

/// RGBA color used to fill the letterbox canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FillColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl FillColor {
    /// Opaque black. This is the default fill.
    pub const BLACK: FillColor = FillColor::rgba(0, 0, 0, 255);

    /// Fully transparent black. JPEG output drops alpha, so this renders as black.
    pub const TRANSPARENT: FillColor = FillColor::rgba(0, 0, 0, 0);

    /// Opaque white.
    pub const WHITE: FillColor = FillColor::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to an `image` pixel.
    pub fn to_pixel(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

impl Default for FillColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for FillColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for FillColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).ok_or_else(|| {
            format!(
                "invalid fill color '{}': expected #RGB, #RGBA, #RRGGBB, #RRGGBBAA, black, white or transparent",
                s
            )
        })
    }
}

fn parse_color(s: &str) -> Option<FillColor> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    match s.to_ascii_lowercase().as_str() {
        "black" => return Some(FillColor::BLACK),
        "white" => return Some(FillColor::WHITE),
        "transparent" => return Some(FillColor::TRANSPARENT),
        _ => {}
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let digits = hex.as_bytes();
    match digits.len() {
        3 | 4 => {
            let r = expand_nibble(digits[0])?;
            let g = expand_nibble(digits[1])?;
            let b = expand_nibble(digits[2])?;
            let a = match digits.get(3) {
                Some(&d) => expand_nibble(d)?,
                None => 255,
            };
            Some(FillColor::rgba(r, g, b, a))
        }
        6 | 8 => {
            let r = parse_byte(&digits[0..2])?;
            let g = parse_byte(&digits[2..4])?;
            let b = parse_byte(&digits[4..6])?;
            let a = if digits.len() == 8 {
                parse_byte(&digits[6..8])?
            } else {
                255
            };
            Some(FillColor::rgba(r, g, b, a))
        }
        _ => None,
    }
}

/// 'f' → 0xFF, 'a' → 0xAA.
fn expand_nibble(ch: u8) -> Option<u8> {
    let n = hex_val(ch)?;
    Some(n << 4 | n)
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn parse_byte(pair: &[u8]) -> Option<u8> {
    let hi = hex_val(pair[0])?;
    let lo = hex_val(pair[1])?;
    Some(hi << 4 | lo)
}
