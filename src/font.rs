// Text measurement and rasterization for the banner overlay.
// TrueType outlines via ab_glyph when the script font loads; otherwise the
// 5x7 bitmap glyphs from draw.rs, scaled up to approximate the size.

use std::path::Path;

use ab_glyph::{Font, FontArc, Glyph, GlyphId, PxScale, Rect, ScaleFont, point};

use crate::draw::glyph5x7;
use crate::error::Error;
use crate::types::PixelBuffer;

/// Padding added around the measured text box on every side.
pub const MARGIN: usize = 5;

/// The face a text overlay is rasterized with.
pub enum FontSource {
    Truetype(FontArc),
    /// Scaled 5x7 bitmap glyphs; always available.
    Builtin,
}

/// Read a TrueType font from disk. Callers fall back to the built-in face
/// when this fails; it is never fatal.
pub fn load_font(path: &Path) -> Result<FontArc, Error> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::FontLoad(format!("{}: {e}", path.display())))?;
    FontArc::try_from_vec(bytes)
        .map_err(|e| Error::FontLoad(format!("{}: {e}", path.display())))
}

/// Rasterize `text` at `size` in `color`, flattened onto opaque black, with
/// a MARGIN border on every side. The result is always at least
/// 2*MARGIN x 2*MARGIN, even for empty text.
pub fn raster_text(font: &FontSource, size: f32, text: &str, color: [u8; 3]) -> PixelBuffer {
    match font {
        FontSource::Truetype(face) => raster_truetype(face, size, text, color),
        FontSource::Builtin => raster_builtin(size, text, color),
    }
}

fn raster_truetype(font: &FontArc, size: f32, text: &str, color: [u8; 3]) -> PixelBuffer {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);

    // Lay the glyphs along a baseline at the ascent.
    let mut caret = point(0.0, scaled.ascent());
    let mut prev: Option<GlyphId> = None;
    let mut glyphs: Vec<Glyph> = Vec::new();
    for ch in text.chars() {
        let mut glyph = scaled.scaled_glyph(ch);
        if let Some(prev_id) = prev {
            caret.x += scaled.kern(prev_id, glyph.id);
        }
        glyph.position = caret;
        caret.x += scaled.h_advance(glyph.id);
        prev = Some(glyph.id);
        glyphs.push(glyph);
    }

    // Rendered bounding box: the union of every outline's pixel bounds.
    // Whitespace and unmapped characters contribute no outline.
    let mut bounds: Option<Rect> = None;
    for glyph in &glyphs {
        if let Some(outline) = font.outline_glyph(glyph.clone()) {
            let b = outline.px_bounds();
            bounds = Some(match bounds {
                None => b,
                Some(u) => Rect {
                    min: point(u.min.x.min(b.min.x), u.min.y.min(b.min.y)),
                    max: point(u.max.x.max(b.max.x), u.max.y.max(b.max.y)),
                },
            });
        }
    }

    let m = MARGIN as i32;
    let (width, height) = match bounds {
        Some(bb) => (
            (bb.max.x - bb.min.x).ceil() as usize + 2 * MARGIN,
            (bb.max.y - bb.min.y).ceil() as usize + 2 * MARGIN,
        ),
        None => (2 * MARGIN, 2 * MARGIN),
    };
    let mut out = PixelBuffer::new(width, height);

    if let Some(bb) = bounds {
        for glyph in glyphs {
            if let Some(outline) = font.outline_glyph(glyph) {
                let b = outline.px_bounds();
                // Shift so the box origin lands at (MARGIN, MARGIN).
                let gx = m + (b.min.x - bb.min.x).round() as i32;
                let gy = m + (b.min.y - bb.min.y).round() as i32;
                outline.draw(|x, y, coverage| {
                    let px = gx + x as i32;
                    let py = gy + y as i32;
                    if px < 0 || py < 0 || px as usize >= width || py as usize >= height {
                        return;
                    }
                    let c = coverage.clamp(0.0, 1.0);
                    let cur = out.get(px as usize, py as usize);
                    // Flatten onto black: color scaled by coverage; where
                    // glyphs overlap, the stronger coverage wins.
                    out.put(
                        px,
                        py,
                        [
                            cur[0].max((color[0] as f32 * c).round() as u8),
                            cur[1].max((color[1] as f32 * c).round() as u8),
                            cur[2].max((color[2] as f32 * c).round() as u8),
                        ],
                    );
                });
            }
        }
    }

    out
}

fn raster_builtin(size: f32, text: &str, color: [u8; 3]) -> PixelBuffer {
    // Nearest-neighbor scale of the 5x7 cells to approximate the size.
    let s = ((size / 7.0).round() as i32).max(1);
    let n = text.chars().count() as i32;
    // Fixed-pitch: 5 scaled columns of glyph plus one of spacing, minus the
    // trailing spacing column.
    let box_w = if n > 0 { n * 6 * s - s } else { 0 };
    let box_h = if n > 0 { 7 * s } else { 0 };

    let m = MARGIN as i32;
    let mut out = PixelBuffer::new((box_w + 2 * m) as usize, (box_h + 2 * m) as usize);

    let mut cell_x = m;
    for ch in text.chars() {
        if let Some(rows) = glyph5x7(ch) {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5i32 {
                    if (rowbits & (1u8 << (4 - rx))) != 0 {
                        for sy in 0..s {
                            for sx in 0..s {
                                out.put(cell_x + rx * s + sx, m + ry as i32 * s + sy, color);
                            }
                        }
                    }
                }
            }
        }
        cell_x += 6 * s;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_font_file_is_an_error() {
        assert!(load_font(Path::new("/no/such/font.ttf")).is_err());
    }

    #[test]
    fn garbage_font_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a truetype font").unwrap();
        assert!(load_font(file.path()).is_err());
    }

    #[test]
    fn empty_text_yields_margin_only_raster() {
        let raster = raster_text(&FontSource::Builtin, 30.0, "", [255, 0, 0]);
        assert_eq!((raster.width, raster.height), (2 * MARGIN, 2 * MARGIN));
    }

    #[test]
    fn builtin_raster_is_fixed_pitch() {
        // size 7.0 keeps the glyphs at scale 1: 6 columns per char minus the
        // trailing spacing, plus the margin on each side.
        let raster = raster_text(&FontSource::Builtin, 7.0, "AB", [1, 2, 3]);
        assert_eq!((raster.width, raster.height), (21, 17));
    }

    #[test]
    fn builtin_raster_draws_inside_the_margin() {
        let raster = raster_text(&FontSource::Builtin, 7.0, "I", [200, 0, 0]);
        // Margin band stays black.
        for x in 0..raster.width {
            for y in 0..MARGIN {
                assert_eq!(raster.get(x, y), [0, 0, 0]);
            }
        }
        // 'I' has its top row fully set: the cell starts at (MARGIN, MARGIN).
        assert_eq!(raster.get(MARGIN + 1, MARGIN), [200, 0, 0]);
    }

    #[test]
    fn builtin_scale_follows_requested_size() {
        // size 14 doubles the cell; a single char is 11*2 wide plus margins.
        let raster = raster_text(&FontSource::Builtin, 14.0, "H", [9, 9, 9]);
        assert_eq!((raster.width, raster.height), (20, 24));
    }
}
