//! # Card Configuration
//!
//! [`RenderConfig`] is what callers supply: every field optional.
//! [`CardConfig`] is what the composer draws with: every field populated.
//! [`RenderConfig::merge_with_defaults`] turns one into the other.
//!
//! ## Defaults
//!
//! | Property | Value |
//! |----------|-------|
//! | Canvas | 550 × 1000 |
//! | Column x (first, second, third, author) | 390, 270, 160, 60 |
//! | Font size / author font size | 90 / 50 |
//! | Margin | 70 |
//! | Thick / thin border | 40 / 10 |
//! | Caption | none, 30px when set |
//!
//! ## Loading from JSON
//!
//! ```
//! use senryu::config::RenderConfig;
//!
//! let config = RenderConfig::from_json_str(r#"{ "service_name": "example.com" }"#)?;
//! let card = config.merge_with_defaults();
//! assert_eq!(card.service_name, "example.com");
//! assert_eq!(card.senryu_width, 550);
//! # Ok::<(), senryu::SenryuError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;

use crate::color::Color;
use crate::error::SenryuError;

/// Fully populated card layout. Sizes and thicknesses are always > 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardConfig {
    pub senryu_width: u32,
    pub senryu_height: u32,

    pub first_sentence_left_x: i32,
    pub second_sentence_left_x: i32,
    pub third_sentence_left_x: i32,
    pub author_name_left_x: i32,

    pub font_path: Cow<'static, str>,
    pub font_size: f32,
    pub author_name_font_size: f32,

    /// Caption drawn along the bottom border; empty means no caption.
    pub service_name: Cow<'static, str>,
    pub service_name_font_size: f32,

    pub margin_px: u32,

    pub font_color: Color,
    pub background_color: Color,
    pub thick_border_color: Color,
    pub thin_border_color: Color,
    pub thick_border_px: u32,
    pub thin_border_px: u32,
}

impl CardConfig {
    pub const DEFAULT: CardConfig = CardConfig {
        senryu_width: 550,
        senryu_height: 1000,

        first_sentence_left_x: 390,
        second_sentence_left_x: 270,
        third_sentence_left_x: 160,
        author_name_left_x: 60,

        font_path: Cow::Borrowed("fonts/default.ttf"),
        font_size: 90.0,
        author_name_font_size: 50.0,

        service_name: Cow::Borrowed(""),
        service_name_font_size: 30.0,

        margin_px: 70,

        font_color: Color::rgba(0, 0, 0, 255),
        background_color: Color::rgba(236, 236, 208, 255),
        thick_border_color: Color::rgba(0, 128, 79, 255),
        thin_border_color: Color::rgba(151, 151, 53, 255),
        thick_border_px: 40,
        thin_border_px: 10,
    };

    /// Caption text color; not configurable.
    pub const CAPTION_COLOR: Color = Color::WHITE;
}

impl Default for CardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Caller-supplied overrides. Unset fields fall back to [`CardConfig::DEFAULT`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub senryu_width: Option<u32>,
    pub senryu_height: Option<u32>,

    pub first_sentence_left_x: Option<i32>,
    pub second_sentence_left_x: Option<i32>,
    pub third_sentence_left_x: Option<i32>,
    pub author_name_left_x: Option<i32>,

    pub font_path: Option<String>,
    pub font_size: Option<f32>,
    pub author_name_font_size: Option<f32>,

    pub service_name: Option<String>,
    pub service_name_font_size: Option<f32>,

    pub margin_px: Option<u32>,

    pub font_color: Option<Color>,
    pub background_color: Option<Color>,
    pub thick_border_color: Option<Color>,
    pub thin_border_color: Option<Color>,
    pub thick_border_px: Option<u32>,
    pub thin_border_px: Option<u32>,
}

/// Zero is not a legal size; treat it as unset.
fn size_or(value: Option<u32>, default: u32) -> u32 {
    value.filter(|&v| v > 0).unwrap_or(default)
}

fn font_size_or(value: Option<f32>, default: f32) -> f32 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(default)
}

fn text_or(value: &Option<String>, default: &Cow<'static, str>) -> Cow<'static, str> {
    match value {
        Some(v) if !v.is_empty() => Cow::Owned(v.clone()),
        _ => default.clone(),
    }
}

impl RenderConfig {
    /// Fill every unset field from the defaults, returning a new value.
    ///
    /// Offsets and colors are replaced only when absent. Sizes, thicknesses,
    /// margin and canvas dimensions are also replaced when zero, and the
    /// font path when empty.
    pub fn merge_with_defaults(&self) -> CardConfig {
        let d = &CardConfig::DEFAULT;
        CardConfig {
            senryu_width: size_or(self.senryu_width, d.senryu_width),
            senryu_height: size_or(self.senryu_height, d.senryu_height),

            first_sentence_left_x: self.first_sentence_left_x.unwrap_or(d.first_sentence_left_x),
            second_sentence_left_x: self
                .second_sentence_left_x
                .unwrap_or(d.second_sentence_left_x),
            third_sentence_left_x: self.third_sentence_left_x.unwrap_or(d.third_sentence_left_x),
            author_name_left_x: self.author_name_left_x.unwrap_or(d.author_name_left_x),

            font_path: text_or(&self.font_path, &d.font_path),
            font_size: font_size_or(self.font_size, d.font_size),
            author_name_font_size: font_size_or(
                self.author_name_font_size,
                d.author_name_font_size,
            ),

            service_name: self
                .service_name
                .clone()
                .map(Cow::Owned)
                .unwrap_or_else(|| d.service_name.clone()),
            service_name_font_size: font_size_or(
                self.service_name_font_size,
                d.service_name_font_size,
            ),

            margin_px: size_or(self.margin_px, d.margin_px),

            font_color: self.font_color.unwrap_or(d.font_color),
            background_color: self.background_color.unwrap_or(d.background_color),
            thick_border_color: self.thick_border_color.unwrap_or(d.thick_border_color),
            thin_border_color: self.thin_border_color.unwrap_or(d.thin_border_color),
            thick_border_px: size_or(self.thick_border_px, d.thick_border_px),
            thin_border_px: size_or(self.thin_border_px, d.thin_border_px),
        }
    }

    /// Parse a JSON object of overrides.
    pub fn from_json_str(json: &str) -> Result<Self, SenryuError> {
        serde_json::from_str(json).map_err(|e| SenryuError::Config(e.to_string()))
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SenryuError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| SenryuError::Config(format!("{}: {}", path.display(), e)))
    }
}

impl From<CardConfig> for RenderConfig {
    fn from(c: CardConfig) -> Self {
        Self {
            senryu_width: Some(c.senryu_width),
            senryu_height: Some(c.senryu_height),
            first_sentence_left_x: Some(c.first_sentence_left_x),
            second_sentence_left_x: Some(c.second_sentence_left_x),
            third_sentence_left_x: Some(c.third_sentence_left_x),
            author_name_left_x: Some(c.author_name_left_x),
            font_path: Some(c.font_path.into_owned()),
            font_size: Some(c.font_size),
            author_name_font_size: Some(c.author_name_font_size),
            service_name: Some(c.service_name.into_owned()),
            service_name_font_size: Some(c.service_name_font_size),
            margin_px: Some(c.margin_px),
            font_color: Some(c.font_color),
            background_color: Some(c.background_color),
            thick_border_color: Some(c.thick_border_color),
            thin_border_color: Some(c.thin_border_color),
            thick_border_px: Some(c.thick_border_px),
            thin_border_px: Some(c.thin_border_px),
        }
    }
}
