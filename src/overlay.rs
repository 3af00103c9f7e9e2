// Fixed-position overlays composited onto every frame: the logo image and
// the rasterized banner text. Both share one key-color-masked blit.

use std::path::Path;

use image::imageops::FilterType;
use log::warn;

use crate::error::Error;
use crate::font::{self, FontSource};
use crate::types::PixelBuffer;

/// The logo is always presented at this footprint, placeholder included.
pub const LOGO_SIZE: u32 = 100;

/// Placeholder sample value when the logo asset cannot be read.
const PLACEHOLDER_GRAY: u8 = 128;

/// A pre-rendered raster anchored at a fixed top-left position on the
/// canvas. Pixels never change after construction.
pub struct Overlay {
    pub origin_x: usize,
    pub origin_y: usize,
    pub pixels: PixelBuffer,
}

impl Overlay {
    pub fn new(origin_x: usize, origin_y: usize, pixels: PixelBuffer) -> Self {
        Self {
            origin_x,
            origin_y,
            pixels,
        }
    }

    /// Logo overlay. A missing or unreadable asset degrades to a uniform
    /// mid-gray placeholder of the same footprint, so the blit path never
    /// special-cases absence.
    pub fn from_image(origin_x: usize, origin_y: usize, path: &Path) -> Self {
        let pixels = match load_image(path) {
            Ok(pixels) => pixels,
            Err(e) => {
                warn!("using placeholder logo: {e}");
                PixelBuffer::filled(
                    LOGO_SIZE as usize,
                    LOGO_SIZE as usize,
                    [PLACEHOLDER_GRAY; 3],
                )
            }
        };
        Self::new(origin_x, origin_y, pixels)
    }

    /// Banner overlay: `text` rasterized once at construction. A font that
    /// fails to load degrades to the built-in bitmap face.
    pub fn text(
        origin_x: usize,
        origin_y: usize,
        text: &str,
        size: f32,
        color: [u8; 3],
        font_path: &Path,
    ) -> Self {
        let face = match font::load_font(font_path) {
            Ok(face) => FontSource::Truetype(face),
            Err(e) => {
                warn!("using built-in font for banner: {e}");
                FontSource::Builtin
            }
        };
        Self::new(origin_x, origin_y, font::raster_text(&face, size, text, color))
    }

    /// Composite this overlay onto `target` in place, keying on luminance:
    /// pure-black overlay pixels are background and leave the target alone,
    /// everything else is foreground. An overlay whose footprint would
    /// cross the target's edge is skipped outright, not clipped.
    ///
    /// Intentionally black overlay content therefore disappears; that is
    /// the accepted tradeoff of key-color masking.
    pub fn blit(&self, target: &mut PixelBuffer) {
        let (w, h) = (self.pixels.width, self.pixels.height);
        if self.origin_x + w > target.width || self.origin_y + h > target.height {
            return;
        }

        for y in 0..h {
            for x in 0..w {
                let src = self.pixels.get(x, y);
                let (tx, ty) = (self.origin_x + x, self.origin_y + y);
                let dst = target.get(tx, ty);

                // Binary mask, then region = background part + foreground
                // part, combined with saturating adds.
                let fg = luminance(src) > 0;
                let bg_part = if fg { [0, 0, 0] } else { dst };
                let fg_part = if fg { src } else { [0, 0, 0] };
                target.put(
                    tx as i32,
                    ty as i32,
                    [
                        bg_part[0].saturating_add(fg_part[0]),
                        bg_part[1].saturating_add(fg_part[1]),
                        bg_part[2].saturating_add(fg_part[2]),
                    ],
                );
            }
        }
    }
}

/// Standard grayscale reduction of an RGB sample.
fn luminance([r, g, b]: [u8; 3]) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Decode the logo asset, normalize it to LOGO_SIZE and invert the colors
/// so the usual white background turns into keyed-out black.
fn load_image(path: &Path) -> Result<PixelBuffer, Error> {
    let decoded = image::open(path)
        .map_err(|e| Error::ImageLoad(format!("{}: {e}", path.display())))?;
    let mut resized = decoded.resize_exact(LOGO_SIZE, LOGO_SIZE, FilterType::Triangle);
    resized.invert();
    let rgb = resized.into_rgb8();

    let mut pixels = PixelBuffer::new(LOGO_SIZE as usize, LOGO_SIZE as usize);
    for (x, y, px) in rgb.enumerate_pixels() {
        pixels.put(x as i32, y as i32, [px[0], px[1], px[2]]);
    }
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn blit_out_of_bounds_is_a_complete_no_op() {
        let mut target = PixelBuffer::filled(50, 50, [3, 3, 3]);
        let before = target.clone();

        // Crosses the right and bottom edges.
        let overlay = Overlay::new(40, 40, PixelBuffer::filled(20, 20, [255, 255, 255]));
        overlay.blit(&mut target);
        assert_eq!(target.bytes(), before.bytes());

        // One pixel past the right edge only.
        let overlay = Overlay::new(31, 0, PixelBuffer::filled(20, 20, [255, 255, 255]));
        overlay.blit(&mut target);
        assert_eq!(target.bytes(), before.bytes());
    }

    #[test]
    fn blit_exactly_at_the_edge_is_drawn() {
        let mut target = PixelBuffer::new(50, 50);
        let overlay = Overlay::new(30, 30, PixelBuffer::filled(20, 20, [10, 10, 10]));
        overlay.blit(&mut target);
        assert_eq!(target.get(49, 49), [10, 10, 10]);
    }

    #[test]
    fn black_pixels_key_out_and_the_rest_replace() {
        let mut src = PixelBuffer::new(2, 1);
        src.put(1, 0, [200, 10, 10]);
        let overlay = Overlay::new(0, 0, src);

        let mut target = PixelBuffer::filled(4, 4, [7, 7, 7]);
        overlay.blit(&mut target);
        assert_eq!(target.get(0, 0), [7, 7, 7]); // background preserved
        assert_eq!(target.get(1, 0), [200, 10, 10]); // foreground replaces
        assert_eq!(target.get(2, 0), [7, 7, 7]); // outside the footprint
    }

    #[test]
    fn near_black_with_zero_luminance_counts_as_background() {
        // (0,0,1) reduces to luminance 0 and must key out.
        let mut src = PixelBuffer::new(1, 1);
        src.put(0, 0, [0, 0, 1]);
        let overlay = Overlay::new(0, 0, src);

        let mut target = PixelBuffer::filled(2, 2, [50, 60, 70]);
        overlay.blit(&mut target);
        assert_eq!(target.get(0, 0), [50, 60, 70]);
    }

    #[test]
    fn missing_image_degrades_to_gray_placeholder() {
        let overlay = Overlay::from_image(0, 0, Path::new("/no/such/logo.png"));
        assert_eq!(
            (overlay.pixels.width, overlay.pixels.height),
            (LOGO_SIZE as usize, LOGO_SIZE as usize)
        );
        for y in 0..overlay.pixels.height {
            for x in 0..overlay.pixels.width {
                assert_eq!(overlay.pixels.get(x, y), [128, 128, 128]);
            }
        }
    }

    #[test]
    fn corrupt_image_degrades_to_gray_placeholder() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not an image at all").unwrap();
        let overlay = Overlay::from_image(5, 5, file.path());
        assert_eq!(overlay.pixels.get(0, 0), [128, 128, 128]);
    }

    #[test]
    fn text_overlay_keeps_its_anchor_and_margin_footprint() {
        // Unloadable font path exercises the built-in fallback; empty text
        // still produces the margin-only raster.
        let overlay = Overlay::text(120, 10, "", 30.0, [255, 0, 0], Path::new("/no/font.ttf"));
        assert_eq!((overlay.origin_x, overlay.origin_y), (120, 10));
        assert_eq!((overlay.pixels.width, overlay.pixels.height), (10, 10));
    }
}
