//! TTF font loading and metrics.
//!
//! Fonts are loaded from a file path with ab_glyph and scaled so that one em
//! equals the requested pixel size. Loaded fonts are kept in a process-wide
//! cache keyed by `(path, size)`; entries are inserted once and never evicted.

use ab_glyph::{Font, FontArc, OutlinedGlyph, PxScale, ScaleFont};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::error::SenryuError;

type FontKey = (PathBuf, u32);

static FONT_CACHE: OnceLock<RwLock<HashMap<FontKey, FontHandle>>> = OnceLock::new();

/// A font loaded at a fixed pixel size.
///
/// Cheap to clone: the parsed font data is shared.
#[derive(Clone)]
pub struct FontHandle {
    font: FontArc,
    size_px: f32,
    scale: PxScale,
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("size_px", &self.size_px)
            .finish_non_exhaustive()
    }
}

/// Load a font through the shared cache.
///
/// Fails with [`SenryuError::FontLoad`] if the file cannot be read or is not
/// a font ab_glyph can parse. Failures are not cached.
pub fn load_font(path: impl AsRef<Path>, size_px: f32) -> Result<FontHandle, SenryuError> {
    let path = path.as_ref();
    let key = (path.to_path_buf(), size_px.to_bits());
    let cache = FONT_CACHE.get_or_init(Default::default);

    if let Some(handle) = cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return Ok(handle.clone());
    }

    let handle = FontHandle::open(path, size_px)?;
    let mut cache = cache.write().unwrap_or_else(PoisonError::into_inner);
    Ok(cache.entry(key).or_insert(handle).clone())
}

impl FontHandle {
    /// Read and parse a font file, bypassing the cache.
    pub fn open(path: &Path, size_px: f32) -> Result<Self, SenryuError> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(font_error(path, format!("invalid font size {size_px}")));
        }
        let bytes = std::fs::read(path).map_err(|e| font_error(path, e.to_string()))?;
        let font = FontArc::try_from_vec(bytes).map_err(|e| font_error(path, e.to_string()))?;
        Ok(Self::from_font(font, size_px))
    }

    /// Wrap an already parsed font.
    pub fn from_font(font: FontArc, size_px: f32) -> Self {
        // ab_glyph scales by ascent-descent height; convert so that 1em == size_px.
        let scale = match font.units_per_em() {
            Some(upem) if upem > 0.0 => PxScale::from(size_px * font.height_unscaled() / upem),
            _ => PxScale::from(size_px),
        };
        Self {
            font,
            size_px,
            scale,
        }
    }

    /// Nominal size in pixels (the em size).
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Pixel `(width, height)` of `text` drawn on a single line.
    ///
    /// Width is the sum of horizontal advances. Height is the distance from
    /// the top of the line box to the lowest inked pixel, so `"g"` measures
    /// taller than `"."`. Text without ink measures as tall as the ascent.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let mut ink_bottom: Option<f32> = None;
        let width = self.outline_line(text, |outlined| {
            let bottom = outlined.px_bounds().max.y;
            ink_bottom = Some(ink_bottom.map_or(bottom, |b| b.max(bottom)));
        });
        let height = ink_bottom.unwrap_or_else(|| self.font.as_scaled(self.scale).ascent());
        (width.ceil().max(0.0) as u32, height.ceil().max(0.0) as u32)
    }

    /// Rasterize `text` on one line whose top-left corner is `(0, 0)`.
    ///
    /// Calls `plot(x, y, coverage)` for every covered pixel; coordinates may
    /// fall outside the measured box for glyphs with overhang.
    pub fn rasterize(&self, text: &str, mut plot: impl FnMut(i32, i32, f32)) {
        self.outline_line(text, |outlined| {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                plot(
                    px as i32 + bounds.min.x as i32,
                    py as i32 + bounds.min.y as i32,
                    coverage,
                );
            });
        });
    }

    /// Lay out `text` with the baseline at the ascent and hand each glyph
    /// that has an outline to `visit`. Returns the total advance.
    fn outline_line(&self, text: &str, mut visit: impl FnMut(OutlinedGlyph)) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let baseline_y = scaled.ascent();
        let mut caret_x = 0.0f32;

        for ch in text.chars() {
            let glyph_id = self.font.glyph_id(ch);
            let glyph = glyph_id.with_scale_and_position(
                self.scale,
                ab_glyph::point(caret_x, baseline_y),
            );
            caret_x += scaled.h_advance(glyph_id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                visit(outlined);
            }
        }
        caret_x
    }
}

fn font_error(path: &Path, reason: String) -> SenryuError {
    tracing::error!(path = %path.display(), %reason, "failed to load font");
    SenryuError::FontLoad {
        path: path.to_path_buf(),
        reason,
    }
}
