// Owns the persisted canvas plus the two small state machines: the pointer
// stroke machine (Idle/Active) and the channel accumulator. Previews live
// only in the per-event scene copy; the canvas mutates on stroke commit and
// flat fill, nowhere else.

use log::debug;

use crate::draw;
use crate::input::{KeyAction, Point, PointerEvent};
use crate::render::Status;
use crate::types::{Channel, PixelBuffer};

const STROKE_COLOR: [u8; 3] = [255, 255, 255];
const STROKE_THICKNESS: i32 = 2;
/// Hover marker while idle: a filled blue square around the cursor.
const HOVER_COLOR: [u8; 3] = [0, 0, 255];
const HOVER_HALF: i32 = 10;
/// Cursor marker while a stroke is active: a filled green disc.
const CURSOR_COLOR: [u8; 3] = [0, 255, 0];
const CURSOR_RADIUS: i32 = 10;
/// Per-keypress channel step, clamped to [0, 255].
const STEP: u8 = 5;

/// Pointer stroke machine. A press anchors, a release commits.
#[derive(Debug, Clone, Copy)]
enum Stroke {
    Idle,
    Active { anchor: Point },
}

/// Transient marks for the current event's scene; never committed.
#[derive(Debug, Clone, Copy)]
enum Preview {
    Hover(Point),
    Stroke { anchor: Point, cursor: Point },
}

pub struct Controller {
    canvas: PixelBuffer,
    stroke: Stroke,
    preview: Option<Preview>,
    channel: Channel,
    values: [u8; 3],
}

impl Controller {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            canvas: PixelBuffer::new(width, height),
            stroke: Stroke::Idle,
            preview: None,
            channel: Channel::Red,
            values: [0; 3],
        }
    }

    /// Advance the stroke machine. Only a release mutates the canvas.
    pub fn on_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Move(p) => {
                self.preview = Some(match self.stroke {
                    Stroke::Idle => Preview::Hover(p),
                    Stroke::Active { anchor } => Preview::Stroke { anchor, cursor: p },
                });
            }
            PointerEvent::Press(p) => {
                if let Stroke::Idle = self.stroke {
                    self.stroke = Stroke::Active { anchor: p };
                }
                self.preview = None;
            }
            PointerEvent::Release(p) => {
                if let Stroke::Active { anchor } = self.stroke {
                    draw::draw_line(
                        &mut self.canvas,
                        anchor.0,
                        anchor.1,
                        p.0,
                        p.1,
                        STROKE_COLOR,
                        STROKE_THICKNESS,
                    );
                    debug!("committed stroke {anchor:?} -> {p:?}");
                }
                self.stroke = Stroke::Idle;
                self.preview = None;
            }
        }
    }

    /// Channel selection and adjustment. Adjustments flat-fill the whole
    /// canvas with the accumulator, wiping prior strokes.
    pub fn on_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::Select(channel) => self.channel = channel,
            KeyAction::Increase => self.adjust(true),
            KeyAction::Decrease => self.adjust(false),
        }
    }

    fn adjust(&mut self, up: bool) {
        let v = &mut self.values[self.channel.index()];
        *v = if up {
            v.saturating_add(STEP)
        } else {
            v.saturating_sub(STEP)
        };
        self.canvas.fill(self.values);
        debug!("flat fill {:?}", self.values);
    }

    /// Disposable scene copy: the persisted canvas plus this event's
    /// transient preview marks.
    pub fn scene(&self) -> PixelBuffer {
        let mut frame = self.canvas.clone();
        match self.preview {
            Some(Preview::Hover((x, y))) => {
                draw::fill_rect(
                    &mut frame,
                    x - HOVER_HALF,
                    y - HOVER_HALF,
                    x + HOVER_HALF,
                    y + HOVER_HALF,
                    HOVER_COLOR,
                );
            }
            Some(Preview::Stroke { anchor, cursor }) => {
                draw::fill_circle(&mut frame, cursor.0, cursor.1, CURSOR_RADIUS, CURSOR_COLOR);
                draw::draw_line(
                    &mut frame,
                    anchor.0,
                    anchor.1,
                    cursor.0,
                    cursor.1,
                    STROKE_COLOR,
                    STROKE_THICKNESS,
                );
            }
            None => {}
        }
        frame
    }

    pub fn status(&self) -> Status {
        Status {
            channel: self.channel,
            values: self.values,
        }
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_pixels(buf: &PixelBuffer) -> impl Iterator<Item = [u8; 3]> + '_ {
        (0..buf.height).flat_map(move |y| (0..buf.width).map(move |x| buf.get(x, y)))
    }

    #[test]
    fn increase_clamps_at_255() {
        let mut c = Controller::new(20, 20);
        for _ in 0..60 {
            c.on_key(KeyAction::Increase);
        }
        assert_eq!(c.status().values, [255, 0, 0]);
    }

    #[test]
    fn decrease_clamps_at_0() {
        let mut c = Controller::new(20, 20);
        for _ in 0..60 {
            c.on_key(KeyAction::Increase);
        }
        for _ in 0..60 {
            c.on_key(KeyAction::Decrease);
        }
        assert_eq!(c.status().values, [0, 0, 0]);
    }

    #[test]
    fn raising_green_flat_fills_and_wipes_strokes() {
        let mut c = Controller::new(30, 30);
        // Commit a stroke first, then fill over it.
        c.on_pointer(PointerEvent::Press((2, 2)));
        c.on_pointer(PointerEvent::Release((20, 20)));
        c.on_key(KeyAction::Select(Channel::Green));
        for _ in 0..10 {
            c.on_key(KeyAction::Increase);
        }
        assert!(all_pixels(c.canvas()).all(|px| px == [0, 50, 0]));
    }

    #[test]
    fn stroke_commits_a_line_with_no_preview_residue() {
        let mut c = Controller::new(100, 100);
        c.on_pointer(PointerEvent::Press((10, 10)));
        c.on_pointer(PointerEvent::Move((50, 50)));
        c.on_pointer(PointerEvent::Release((50, 50)));

        let canvas = c.canvas();
        assert_eq!(canvas.get(10, 10), [255, 255, 255]);
        assert_eq!(canvas.get(30, 30), [255, 255, 255]);
        assert_eq!(canvas.get(50, 50), [255, 255, 255]);
        // Only black and the white stroke may exist: the green cursor disc
        // and blue hover square from previews must not be committed.
        assert!(all_pixels(canvas).all(|px| px == [0, 0, 0] || px == [255, 255, 255]));
    }

    #[test]
    fn previews_never_touch_the_canvas() {
        let mut c = Controller::new(60, 60);
        c.on_pointer(PointerEvent::Move((30, 30)));
        assert!(all_pixels(c.canvas()).all(|px| px == [0, 0, 0]));

        // The scene for an idle move carries the hover square instead.
        let scene = c.scene();
        assert_eq!(scene.get(30, 30), [0, 0, 255]);
        assert_eq!(scene.get(20, 20), [0, 0, 255]);
        assert_eq!(scene.get(19, 19), [0, 0, 0]);
    }

    #[test]
    fn active_move_previews_circle_and_line() {
        let mut c = Controller::new(80, 80);
        c.on_pointer(PointerEvent::Press((10, 10)));
        c.on_pointer(PointerEvent::Move((40, 10)));

        let scene = c.scene();
        // The line is drawn after the disc, so sample the disc off the spine.
        assert_eq!(scene.get(40, 15), [0, 255, 0]); // cursor disc
        assert_eq!(scene.get(20, 10), [255, 255, 255]); // anchor-to-cursor line
        assert!(all_pixels(c.canvas()).all(|px| px == [0, 0, 0]));
    }

    #[test]
    fn press_while_active_keeps_the_first_anchor() {
        let mut c = Controller::new(60, 60);
        c.on_pointer(PointerEvent::Press((1, 1)));
        c.on_pointer(PointerEvent::Press((40, 40)));
        c.on_pointer(PointerEvent::Release((1, 20)));
        // Line runs from the original anchor, so (1, 10) is on it.
        assert_eq!(c.canvas().get(1, 10), [255, 255, 255]);
    }

    #[test]
    fn release_while_idle_commits_nothing() {
        let mut c = Controller::new(40, 40);
        c.on_pointer(PointerEvent::Release((20, 20)));
        assert!(all_pixels(c.canvas()).all(|px| px == [0, 0, 0]));
    }

    #[test]
    fn press_and_release_clear_the_preview() {
        let mut c = Controller::new(60, 60);
        c.on_pointer(PointerEvent::Move((30, 30)));
        c.on_pointer(PointerEvent::Press((30, 30)));
        assert_eq!(c.scene(), *c.canvas());
    }
}
