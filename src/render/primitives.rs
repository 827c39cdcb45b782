use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::error::{CircleError, CircleResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a CSS-style string (`#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// `hue` in degrees, `saturation` and `lightness` in 0..=1.
    #[must_use]
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let hue = hue.rem_euclid(360.0) / 360.0;
        let saturation = saturation.clamp(0.0, 1.0);
        let lightness = lightness.clamp(0.0, 1.0);
        if saturation == 0.0 {
            return Self::rgb(lightness, lightness, lightness);
        }

        let q = if lightness < 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let p = 2.0 * lightness - q;
        Self::rgb(
            hue_to_channel(p, q, hue + 1.0 / 3.0),
            hue_to_channel(p, q, hue),
            hue_to_channel(p, q, hue - 1.0 / 3.0),
        )
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> CircleResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(CircleError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    fn to_rgba8(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha].map(|channel| {
            // clamped to 0..=255 before the cast
            (channel.clamp(0.0, 1.0) * 255.0).round() as u8
        })
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl FromStr for Color {
    type Err = CircleError;

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`, `hsl()` and `hsla()`.
    fn from_str(input: &str) -> CircleResult<Self> {
        let value = input.trim().to_ascii_lowercase();
        let invalid = || CircleError::InvalidData(format!("invalid color `{input}`"));

        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let (name, args) = value
            .strip_suffix(')')
            .and_then(|rest| rest.split_once('('))
            .ok_or_else(invalid)?;
        let args: Vec<&str> = args.split(',').map(str::trim).collect();

        let color = match (name.trim(), args.as_slice()) {
            ("rgb", [r, g, b]) => Color::rgb(
                parse_rgb_channel(r).ok_or_else(invalid)?,
                parse_rgb_channel(g).ok_or_else(invalid)?,
                parse_rgb_channel(b).ok_or_else(invalid)?,
            ),
            ("rgba", [r, g, b, a]) => Color::rgba(
                parse_rgb_channel(r).ok_or_else(invalid)?,
                parse_rgb_channel(g).ok_or_else(invalid)?,
                parse_rgb_channel(b).ok_or_else(invalid)?,
                parse_unit(a).ok_or_else(invalid)?,
            ),
            ("hsl", [h, s, l]) => Color::from_hsl(
                h.parse().map_err(|_| invalid())?,
                parse_percent(s).ok_or_else(invalid)?,
                parse_percent(l).ok_or_else(invalid)?,
            ),
            ("hsla", [h, s, l, a]) => Color::from_hsl(
                h.parse().map_err(|_| invalid())?,
                parse_percent(s).ok_or_else(invalid)?,
                parse_percent(l).ok_or_else(invalid)?,
            )
            .with_alpha(parse_unit(a).ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };
        color.validate()?;
        Ok(color)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    let nibble = |i: usize| {
        u8::from_str_radix(hex.get(i..=i)?, 16)
            .ok()
            .map(|v| v * 17)
    };
    let channels = match hex.len() {
        3 => [nibble(0)?, nibble(1)?, nibble(2)?, 255],
        6 => [byte(0)?, byte(2)?, byte(4)?, 255],
        8 => [byte(0)?, byte(2)?, byte(4)?, byte(6)?],
        _ => return None,
    };
    let [r, g, b, a] = channels.map(|c| f64::from(c) / 255.0);
    Some(Color::rgba(r, g, b, a))
}

fn parse_rgb_channel(value: &str) -> Option<f64> {
    let channel: f64 = value.parse().ok()?;
    (0.0..=255.0).contains(&channel).then_some(channel / 255.0)
}

fn parse_unit(value: &str) -> Option<f64> {
    let unit: f64 = value.parse().ok()?;
    (0.0..=1.0).contains(&unit).then_some(unit)
}

fn parse_percent(value: &str) -> Option<f64> {
    let percent: f64 = value.strip_suffix('%')?.trim().parse().ok()?;
    (0.0..=100.0).contains(&percent).then_some(percent / 100.0)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl TryFrom<String> for Color {
    type Error = CircleError;

    fn try_from(value: String) -> CircleResult<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

/// Stroke pattern for connecting and radial lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStrokeStyle {
    /// On/off segment lengths in user-space pixels. Empty means solid.
    #[must_use]
    pub const fn dash_pattern(self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[5.0, 5.0],
            Self::Dotted => &[1.0, 3.0],
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }
}

impl FromStr for LineStrokeStyle {
    type Err = CircleError;

    fn from_str(input: &str) -> CircleResult<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Err(CircleError::InvalidData(format!(
                "invalid line style `{input}`"
            ))),
        }
    }
}

/// Outer blur halo drawn around one primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlowEffect {
    pub color: Color,
    pub blur_px: f64,
}

impl GlowEffect {
    pub fn validate(self) -> CircleResult<()> {
        if !self.blur_px.is_finite() || self.blur_px <= 0.0 {
            return Err(CircleError::InvalidData(
                "glow blur must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Complete per-primitive stroke state. Surfaces apply it for one primitive
/// and return to a neutral state afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub dash: LineStrokeStyle,
    pub glow: Option<GlowEffect>,
}

impl StrokeStyle {
    #[must_use]
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: LineStrokeStyle::Solid,
            glow: None,
        }
    }

    #[must_use]
    pub const fn with_dash(mut self, dash: LineStrokeStyle) -> Self {
        self.dash = dash;
        self
    }

    #[must_use]
    pub const fn with_glow(mut self, glow: Option<GlowEffect>) -> Self {
        self.glow = glow;
        self
    }

    pub fn validate(self) -> CircleResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(CircleError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        if let Some(glow) = self.glow {
            glow.validate()?;
        }
        self.color.validate()
    }
}

/// Draw command for one stroked circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub center: Point,
    pub radius: f64,
    pub stroke: StrokeStyle,
}

impl CirclePrimitive {
    pub fn validate(self) -> CircleResult<()> {
        if !self.center.is_finite() {
            return Err(CircleError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(CircleError::InvalidData(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        self.stroke.validate()
    }
}

/// Draw command for one stroked closed path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub points: Vec<Point>,
    pub stroke: StrokeStyle,
}

impl PathPrimitive {
    pub fn validate(&self) -> CircleResult<()> {
        if self.points.len() < 3 {
            return Err(CircleError::InvalidData(
                "closed path needs at least 3 points".to_owned(),
            ));
        }
        if !self.points.iter().all(|point| point.is_finite()) {
            return Err(CircleError::InvalidData(
                "path points must be finite".to_owned(),
            ));
        }
        self.stroke.validate()
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: StrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke: StrokeStyle) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke,
        }
    }

    pub fn validate(self) -> CircleResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(CircleError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        self.stroke.validate()
    }
}

/// Draw command for one glyph, centered on `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub glow: Option<GlowEffect>,
}

impl TextPrimitive {
    pub fn validate(&self) -> CircleResult<()> {
        if self.text.is_empty() {
            return Err(CircleError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(CircleError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(CircleError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if let Some(glow) = self.glow {
            glow.validate()?;
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, LineStrokeStyle};
    use approx::assert_abs_diff_eq;

    #[test]
    fn parses_hex_forms() {
        let short: Color = "#fff".parse().expect("short hex");
        assert_eq!(short, Color::rgb(1.0, 1.0, 1.0));
        let long: Color = "#FF000080".parse().expect("long hex");
        assert_abs_diff_eq!(long.red, 1.0);
        assert_abs_diff_eq!(long.alpha, 128.0 / 255.0);
    }

    #[test]
    fn parses_functional_forms() {
        let rgba: Color = "rgba(200, 200, 200, 0.7)".parse().expect("rgba");
        assert_abs_diff_eq!(rgba.green, 200.0 / 255.0);
        assert_abs_diff_eq!(rgba.alpha, 0.7);

        let hsl: Color = "hsl(120, 100%, 50%)".parse().expect("hsl");
        assert_abs_diff_eq!(hsl.red, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hsl.green, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hsl.blue, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn rejects_malformed_colors() {
        for input in ["", "#12", "#ggg", "rgb(1,2)", "rgb(300,0,0)", "hsl(0, 50, 50%)"] {
            assert!(input.parse::<Color>().is_err(), "{input} parsed");
        }
    }

    #[test]
    fn display_round_trips_through_hex() {
        let color = Color::from_rgb8(180, 140, 255).with_alpha(0.5);
        let parsed: Color = color.to_string().parse().expect("round trip");
        assert_abs_diff_eq!(parsed.red, color.red, epsilon = 1.0 / 255.0);
        assert_abs_diff_eq!(parsed.alpha, color.alpha, epsilon = 1.0 / 255.0);
    }

    #[test]
    fn dash_patterns_are_fixed_per_style() {
        assert!(LineStrokeStyle::Solid.dash_pattern().is_empty());
        assert_eq!(LineStrokeStyle::Dashed.dash_pattern(), &[5.0, 5.0]);
        assert_eq!(LineStrokeStyle::Dotted.dash_pattern(), &[1.0, 3.0]);
        assert_eq!(
            "DOTTED".parse::<LineStrokeStyle>().ok(),
            Some(LineStrokeStyle::Dotted)
        );
    }
}
