// Frame composition: overlay pass plus the status readout. Works on a
// caller-supplied scratch copy of the base canvas and touches nothing else,
// so identical inputs always compose identical frames.

use crate::draw;
use crate::overlay::Overlay;
use crate::types::{Channel, PixelBuffer};

const STATUS_COLOR: [u8; 3] = [255, 255, 255];
/// Bottom-left anchor of the readout, as (x, distance above bottom edge).
const STATUS_X: i32 = 10;
const STATUS_RISE: i32 = 30;

/// Channel readout stamped onto every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub channel: Channel,
    pub values: [u8; 3],
}

impl Status {
    pub fn line(&self) -> String {
        format!(
            "R:{} G:{} B:{} | SEL: {}",
            self.values[0],
            self.values[1],
            self.values[2],
            self.channel.label()
        )
    }
}

/// Compose the display frame in place: blit each overlay in list order
/// (later overlays draw over earlier ones), then stamp the status readout
/// with the fixed 5x7 face, unmasked.
pub fn compose(frame: &mut PixelBuffer, overlays: &[Overlay], status: &Status) {
    for overlay in overlays {
        overlay.blit(frame);
    }
    let y = frame.height as i32 - STATUS_RISE;
    draw::draw_text_5x7(frame, STATUS_X, y, &status.line(), STATUS_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> Status {
        Status {
            channel: Channel::Red,
            values: [0, 0, 0],
        }
    }

    #[test]
    fn compose_is_idempotent_over_identical_inputs() {
        let base = PixelBuffer::filled(120, 80, [5, 5, 5]);
        let overlays = vec![Overlay::new(3, 3, PixelBuffer::filled(8, 8, [90, 0, 0]))];

        let mut a = base.clone();
        let mut b = base.clone();
        compose(&mut a, &overlays, &status());
        compose(&mut b, &overlays, &status());
        assert_eq!(a, b);
    }

    #[test]
    fn later_overlays_draw_over_earlier_ones() {
        let mut frame = PixelBuffer::new(120, 80);
        let overlays = vec![
            Overlay::new(0, 0, PixelBuffer::filled(10, 10, [100, 0, 0])),
            Overlay::new(5, 5, PixelBuffer::filled(10, 10, [0, 100, 0])),
        ];
        compose(&mut frame, &overlays, &status());
        assert_eq!(frame.get(2, 2), [100, 0, 0]);
        // Overlap region belongs to the later overlay.
        assert_eq!(frame.get(7, 7), [0, 100, 0]);
        assert_eq!(frame.get(12, 12), [0, 100, 0]);
    }

    #[test]
    fn status_readout_lands_at_the_bottom_left() {
        let mut frame = PixelBuffer::new(200, 100);
        compose(&mut frame, &[], &status());
        // 'R' starts at (10, height-30); its top-left pixel is set.
        assert_eq!(frame.get(10, 70), [255, 255, 255]);
    }

    #[test]
    fn status_line_reports_values_and_selection() {
        let s = Status {
            channel: Channel::Green,
            values: [0, 50, 255],
        };
        assert_eq!(s.line(), "R:0 G:50 B:255 | SEL: G");
    }
}
