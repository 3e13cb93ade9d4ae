//! # Card Composer
//!
//! Lays out a [`Senryu`] on a card in a single pass:
//!
//! ```text
//!  ┌────────────────────────┐  outer (thick) border
//!  │ ┌────────────────────┐ │  inner (thin) border, inset by thick - thin
//!  │ │ A  3  2  1         │ │
//!  │ │ u  r  n  s         │ │  1st sentence: top-aligned
//!  │ │ t  d  d  t         │ │  2nd sentence: center-aligned
//!  │ │ h                  │ │  3rd sentence: bottom-aligned
//!  │ │                    │ │  author: bottom-aligned, smaller font
//!  │ └caption─────────────┘ │
//!  └────────────────────────┘
//! ```
//!
//! Any failure aborts the render; a partially drawn canvas is never returned.

use crate::canvas::{Canvas, Surface};
use crate::color::Point;
use crate::config::{CardConfig, RenderConfig};
use crate::error::SenryuError;
use crate::font::{FontHandle, load_font};
use crate::layout::{VerticalAlign, draw_aligned_vertical_label, draw_horizontal_label};
use crate::senryu::Senryu;

/// Fonts needed for one card.
#[derive(Debug, Clone)]
pub struct CardFonts {
    pub body: FontHandle,
    pub author: FontHandle,
    /// Only loaded when the card has a caption.
    pub caption: Option<FontHandle>,
}

impl CardFonts {
    pub fn load(card: &CardConfig) -> Result<Self, SenryuError> {
        let path: &str = &card.font_path;
        let caption = if card.service_name.is_empty() {
            None
        } else {
            Some(load_card_font(path, card.service_name_font_size)?)
        };
        Ok(Self {
            body: load_card_font(path, card.font_size)?,
            author: load_card_font(path, card.author_name_font_size)?,
            caption,
        })
    }
}

/// Fonts open at whole pixel sizes, the same integer the column alignment
/// estimate uses.
fn load_card_font(path: &str, size: f32) -> Result<FontHandle, SenryuError> {
    load_font(path, size.trunc())
}

/// Render a card, filling unset configuration from the defaults.
pub fn render(senryu: &Senryu, config: &RenderConfig) -> Result<Canvas, SenryuError> {
    render_card(senryu, &config.merge_with_defaults())
}

/// Render a card from a fully populated configuration.
pub fn render_card(senryu: &Senryu, card: &CardConfig) -> Result<Canvas, SenryuError> {
    let fonts = CardFonts::load(card)?;
    let mut canvas = Canvas::new(card.senryu_width, card.senryu_height, card.background_color)?;

    compose_onto(&mut canvas, senryu, card, &fonts)?;

    tracing::debug!(
        width = card.senryu_width,
        height = card.senryu_height,
        caption = !card.service_name.is_empty(),
        "rendered senryu card"
    );
    Ok(canvas)
}

/// Draw the columns, borders and caption of a card onto `surface`.
///
/// The surface is expected to be `card.senryu_width` × `card.senryu_height`
/// and already filled with the background.
pub fn compose_onto<S: Surface + ?Sized>(
    surface: &mut S,
    senryu: &Senryu,
    card: &CardConfig,
    fonts: &CardFonts,
) -> Result<(), SenryuError> {
    let margin = card.margin_px as i32;
    let color = card.font_color;

    let columns = [
        (card.first_sentence_left_x, senryu.first_sentence(), &fonts.body, VerticalAlign::Top),
        (card.second_sentence_left_x, senryu.second_sentence(), &fonts.body, VerticalAlign::Center),
        (card.third_sentence_left_x, senryu.third_sentence(), &fonts.body, VerticalAlign::Bottom),
        (card.author_name_left_x, senryu.author_name(), &fonts.author, VerticalAlign::Bottom),
    ];
    for (left_x, text, font, align) in columns {
        draw_aligned_vertical_label(surface, left_x, text, font, color, margin, align)?;
    }

    let width = card.senryu_width as i32;
    let height = card.senryu_height as i32;
    let thick = card.thick_border_px as i32;
    let thin = card.thin_border_px as i32;

    surface.draw_rect(
        Point::new(0, 0),
        Point::new(width - 1, height - 1),
        card.thick_border_px,
        card.thick_border_color,
    )?;

    let inset = thick - thin;
    surface.draw_rect(
        Point::new(inset, inset),
        Point::new(width - inset - 1, height - inset - 1),
        card.thin_border_px,
        card.thin_border_color,
    )?;

    if !card.service_name.is_empty() {
        let font = match &fonts.caption {
            Some(font) => font.clone(),
            None => load_card_font(&card.font_path, card.service_name_font_size)?,
        };
        draw_horizontal_label(
            surface,
            thick,
            height - thin,
            &card.service_name,
            &font,
            CardConfig::CAPTION_COLOR,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use pretty_assertions::assert_eq;
    use std::borrow::Cow;

    const FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fonts/default.ttf");

    #[derive(Debug, Clone, PartialEq)]
    enum DrawCall {
        Text {
            at: Point,
            text: String,
            size: f32,
            color: Color,
        },
        Rect {
            from: Point,
            to: Point,
            thickness: u32,
            color: Color,
        },
    }

    struct Recorder {
        width: u32,
        height: u32,
        calls: Vec<DrawCall>,
    }

    impl Surface for Recorder {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn draw_text(
            &mut self,
            font: &FontHandle,
            at: Point,
            text: &str,
            color: Color,
        ) -> Result<(), SenryuError> {
            self.calls.push(DrawCall::Text {
                at,
                text: text.to_string(),
                size: font.size_px(),
                color,
            });
            Ok(())
        }

        fn draw_rect(
            &mut self,
            from: Point,
            to: Point,
            thickness: u32,
            color: Color,
        ) -> Result<(), SenryuError> {
            self.calls.push(DrawCall::Rect {
                from,
                to,
                thickness,
                color,
            });
            Ok(())
        }
    }

    fn card(service_name: &'static str) -> CardConfig {
        CardConfig {
            font_path: Cow::Borrowed(FONT),
            service_name: Cow::Borrowed(service_name),
            ..CardConfig::DEFAULT
        }
    }

    fn record(card: &CardConfig, senryu: &Senryu) -> Vec<DrawCall> {
        let mut rec = Recorder {
            width: card.senryu_width,
            height: card.senryu_height,
            calls: Vec::new(),
        };
        let fonts = CardFonts::load(card).unwrap();
        compose_onto(&mut rec, senryu, card, &fonts).unwrap();
        rec.calls
    }

    fn texts(calls: &[DrawCall]) -> Vec<(Point, &str, f32)> {
        calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { at, text, size, .. } => Some((*at, text.as_str(), *size)),
                DrawCall::Rect { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_column_start_positions() {
        let card = card("");
        let senryu = Senryu::new("AAA", "BBB", "CCC", "D").unwrap();
        let calls = record(&card, &senryu);
        let texts = texts(&calls);
        assert_eq!(texts.len(), 10);

        let first = texts.iter().find(|t| t.1 == "A").unwrap();
        assert_eq!(first.0, Point::new(390, 70));
        assert_eq!(first.2, 90.0);

        // 70 + floor((1000 - 140 - 270) / 2)
        let second = texts.iter().find(|t| t.1 == "B").unwrap();
        assert_eq!(second.0, Point::new(270, 365));

        // 1000 - 270 - 70
        let third = texts.iter().find(|t| t.1 == "C").unwrap();
        assert_eq!(third.0, Point::new(160, 660));

        // 1000 - 50 - 70
        let author = texts.iter().find(|t| t.1 == "D").unwrap();
        assert_eq!(author.0, Point::new(60, 880));
        assert_eq!(author.2, 50.0);
    }

    #[test]
    fn test_borders_are_nested() {
        let card = card("");
        let senryu = Senryu::new("AAA", "BBB", "CCC", "D").unwrap();
        let rects: Vec<DrawCall> = record(&card, &senryu)
            .into_iter()
            .filter(|c| matches!(c, DrawCall::Rect { .. }))
            .collect();
        assert_eq!(
            rects,
            vec![
                DrawCall::Rect {
                    from: Point::new(0, 0),
                    to: Point::new(549, 999),
                    thickness: 40,
                    color: Color::rgba(0, 128, 79, 255),
                },
                DrawCall::Rect {
                    from: Point::new(30, 30),
                    to: Point::new(519, 969),
                    thickness: 10,
                    color: Color::rgba(151, 151, 53, 255),
                },
            ]
        );
    }

    #[test]
    fn test_empty_caption_is_not_drawn() {
        let card = card("");
        let senryu = Senryu::new("AAA", "BBB", "CCC", "D").unwrap();
        let calls = record(&card, &senryu);
        // Borders come last when there is no caption.
        assert!(matches!(calls.last(), Some(DrawCall::Rect { .. })));
        assert!(CardFonts::load(&card).unwrap().caption.is_none());
    }

    #[test]
    fn test_caption_drawn_after_borders() {
        let card = card("senryu.example");
        let senryu = Senryu::new("AAA", "BBB", "CCC", "D").unwrap();
        let calls = record(&card, &senryu);
        let caption_font = load_font(FONT, 30.0).unwrap();
        let (_, h) = caption_font.measure("senryu.example");
        assert_eq!(
            calls.last(),
            Some(&DrawCall::Text {
                at: Point::new(40, 990 - h as i32),
                text: "senryu.example".to_string(),
                size: 30.0,
                color: Color::WHITE,
            })
        );
    }

    #[test]
    fn test_thin_thicker_than_thick_insets_outward() {
        let card = CardConfig {
            thick_border_px: 5,
            thin_border_px: 15,
            ..card("")
        };
        let senryu = Senryu::new("a", "b", "c", "d").unwrap();
        let calls = record(&card, &senryu);
        assert!(calls.contains(&DrawCall::Rect {
            from: Point::new(-10, -10),
            to: Point::new(559, 1009),
            thickness: 15,
            color: card.thin_border_color,
        }));
    }

    #[test]
    fn test_render_uses_configured_size() {
        let config = RenderConfig {
            font_path: Some(FONT.into()),
            senryu_width: Some(300),
            senryu_height: Some(400),
            ..Default::default()
        };
        let senryu = Senryu::new("AAA", "BBB", "CCC", "D").unwrap();
        let canvas = render(&senryu, &config).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (300, 400));
    }

    #[test]
    fn test_fractional_font_sizes_are_truncated() {
        let card = CardConfig {
            font_size: 90.9,
            author_name_font_size: 50.5,
            ..card("")
        };
        let senryu = Senryu::new("A", "B", "C", "D").unwrap();
        let calls = record(&card, &senryu);
        let texts = texts(&calls);
        assert_eq!(texts[0], (Point::new(390, 70), "A", 90.0));
        assert_eq!(texts[3], (Point::new(60, 880), "D", 50.0));
    }

    #[test]
    fn test_render_with_missing_font_fails() {
        let config = RenderConfig {
            font_path: Some("/no/such/dir/font.ttf".into()),
            ..Default::default()
        };
        let senryu = Senryu::new("AAA", "BBB", "CCC", "D").unwrap();
        assert!(matches!(
            render(&senryu, &config),
            Err(SenryuError::FontLoad { .. })
        ));
    }
}
