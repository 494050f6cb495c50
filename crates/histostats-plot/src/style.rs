//! Colours, line types and per-layer aesthetics

use histostats_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB colour
///
/// Parses from `#rrggbb`, a handful of basic names and the R grey ramp
/// (`grey0` to `grey100`, also spelled `gray`). Serialises as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    /// `grey50`
    pub const GREY50: Color = Color::rgb(127, 127, 127);
    /// `grey92`, the default panel grid
    pub const GREY92: Color = Color::rgb(235, 235, 235);
    /// Low end of the continuous fill gradient
    pub const GRADIENT_LOW: Color = Color::rgb(0x13, 0x2B, 0x43);
    /// High end of the continuous fill gradient
    pub const GRADIENT_HIGH: Color = Color::rgb(0x56, 0xB1, 0xF7);

    /// Colour from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Level `n` (0 to 100) of the grey ramp
    pub fn grey(level: u8) -> Result<Self> {
        if level > 100 {
            return Err(Error::InvalidParameter(format!(
                "grey level {level} outside 0..=100"
            )));
        }
        let v = (f64::from(level) * 2.55).round() as u8;
        Ok(Self::rgb(v, v, v))
    }

    /// Linear interpolation towards `other`, `t` clamped to `[0, 1]`
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        if let Some(hex) = lowered.strip_prefix('#') {
            if hex.len() != 6 {
                return Err(Error::InvalidParameter(format!("invalid hex colour '{s}'")));
            }
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16)
                    .map_err(|_| Error::InvalidParameter(format!("invalid hex colour '{s}'")))
            };
            return Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        if let Some(level) = lowered
            .strip_prefix("grey")
            .or_else(|| lowered.strip_prefix("gray"))
            .filter(|rest| !rest.is_empty())
        {
            let level: u8 = level
                .parse()
                .map_err(|_| Error::InvalidParameter(format!("unknown colour '{s}'")))?;
            return Color::grey(level);
        }
        match lowered.as_str() {
            "black" => Ok(Color::BLACK),
            "white" => Ok(Color::WHITE),
            "blue" => Ok(Color::BLUE),
            "red" => Ok(Color::RED),
            "green" => Ok(Color::GREEN),
            "orange" => Ok(Color::ORANGE),
            "grey" | "gray" => Ok(Color::rgb(190, 190, 190)),
            _ => Err(Error::InvalidParameter(format!("unknown colour '{s}'"))),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Color> for plotters::style::RGBColor {
    fn from(color: Color) -> Self {
        plotters::style::RGBColor(color.r, color.g, color.b)
    }
}

/// Stroke pattern of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineType {
    /// Lengths (in path points) of a visible run and the gap after it
    pub(crate) fn pattern(&self) -> Option<(usize, usize)> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some((4, 3)),
            Self::Dotted => Some((1, 2)),
        }
    }
}

/// Fixed visual properties of a layer
///
/// Unset fields fall back to the layer's own defaults. A set `fill` on a bin
/// layer replaces the count-mapped gradient with a constant colour.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Aesthetics {
    /// Stroke colour
    pub colour: Option<Color>,
    /// Fill colour
    pub fill: Option<Color>,
    /// Opacity in `[0, 1]`
    pub alpha: Option<f64>,
    /// Stroke width in pixels
    pub linewidth: Option<f64>,
    /// Stroke pattern
    pub linetype: Option<LineType>,
}

impl Aesthetics {
    /// Empty aesthetics; every layer default applies
    pub fn new() -> Self {
        Self::default()
    }

    /// Histogram bars: black outline, grey50 fill, alpha 0.7
    pub fn bins() -> Self {
        Self::new()
            .with_colour(Color::BLACK)
            .with_fill(Color::GREY50)
            .with_alpha(0.7)
    }

    /// Centrality line: blue, width 1, dashed
    pub fn centrality_line() -> Self {
        Self::new()
            .with_colour(Color::BLUE)
            .with_linewidth(1.0)
            .with_linetype(LineType::Dashed)
    }

    /// Normal density curve: black, width 2
    pub fn normal_curve() -> Self {
        Self::new().with_colour(Color::BLACK).with_linewidth(2.0)
    }

    pub fn with_colour(mut self, colour: Color) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_linewidth(mut self, linewidth: f64) -> Self {
        self.linewidth = Some(linewidth);
        self
    }

    pub fn with_linetype(mut self, linetype: LineType) -> Self {
        self.linetype = Some(linetype);
        self
    }

    /// Check ranges of the numeric fields
    pub fn validate(&self) -> Result<()> {
        if let Some(alpha) = self.alpha {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(Error::InvalidParameter(format!("alpha {alpha} outside [0, 1]")));
            }
        }
        if let Some(width) = self.linewidth {
            if !(width.is_finite() && width >= 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "linewidth {width} must be non-negative"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn colour_or(&self, default: Color) -> Color {
        self.colour.unwrap_or(default)
    }

    pub(crate) fn alpha_or(&self, default: f64) -> f64 {
        self.alpha.unwrap_or(default)
    }

    pub(crate) fn linewidth_or(&self, default: f64) -> f64 {
        self.linewidth.unwrap_or(default)
    }

    pub(crate) fn linetype_or(&self, default: LineType) -> LineType {
        self.linetype.unwrap_or(default)
    }
}
