// Window + software drawing utilities.
// What lives here:
// 1) The window that shows the composed frame and feeds us input.
// 2) Pixel primitives: lines (with thickness), filled rects and circles.
// 3) A tiny 5x7 bitmap font used for the status readout (and as the
//    fallback face for the banner overlay, see font.rs).

use std::collections::VecDeque;

use crate::error::Error;
use crate::input::{Event, KeyAction, Point, PointerEvent};
use crate::types::{Channel, PixelBuffer};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window,     // the on-screen window you see
    last_pos: Option<Point>,
    was_down: bool,
}

impl Drawer {
    /// Create a window sized to the canvas.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        // Bounded poll: update_with_buffer blocks just long enough to hold this rate.
        window.set_target_fps(60);
        Ok(Self {
            window,
            last_pos: None,
            was_down: false,
        })
    }

    /// Push the packed pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image. This is also
    /// the call that polls the platform for fresh input state.
    pub fn present(&mut self, packed: &[u32], width: usize, height: usize) -> Result<(), Error> {
        self.window
            .update_with_buffer(packed, width, height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Translate the window's polled mouse/key state into decoded events,
    /// in arrival order: motion, press/release, then keys. Raw platform key
    /// codes never leave this function.
    pub fn drain_events(&mut self, out: &mut VecDeque<Event>) {
        if let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let pos = (x as i32, y as i32);
            if self.last_pos != Some(pos) {
                out.push_back(Event::Pointer(PointerEvent::Move(pos)));
                self.last_pos = Some(pos);
            }
            let down = self.window.get_mouse_down(MouseButton::Left);
            if down && !self.was_down {
                out.push_back(Event::Pointer(PointerEvent::Press(pos)));
            }
            if !down && self.was_down {
                out.push_back(Event::Pointer(PointerEvent::Release(pos)));
            }
            self.was_down = down;
        }

        if self.window.is_key_pressed(Key::R, KeyRepeat::No) {
            out.push_back(Event::Key(KeyAction::Select(Channel::Red)));
        }
        if self.window.is_key_pressed(Key::G, KeyRepeat::No) {
            out.push_back(Event::Key(KeyAction::Select(Channel::Green)));
        }
        if self.window.is_key_pressed(Key::B, KeyRepeat::No) {
            out.push_back(Event::Key(KeyAction::Select(Channel::Blue)));
        }
        // Arrows repeat while held, like the original adjustment keys.
        if self.window.is_key_pressed(Key::Up, KeyRepeat::Yes) {
            out.push_back(Event::Key(KeyAction::Increase));
        }
        if self.window.is_key_pressed(Key::Down, KeyRepeat::Yes) {
            out.push_back(Event::Key(KeyAction::Decrease));
        }
        if self.window.is_key_down(Key::Escape) {
            out.push_back(Event::Quit);
        }
    }
}

/* ---------- Software drawing: lines, rects, circles, tiny bitmap font ---------- */

/// Draw a line between (x0,y0) and (x1,y1) using Bresenham, stamping a
/// small disc at each step when `thickness` > 1.
/// Visual: a straight line appears on top of the canvas.
pub fn draw_line(
    fb: &mut PixelBuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: [u8; 3],
    thickness: i32,
) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        if thickness <= 1 {
            fb.put(x0, y0, color);
        } else {
            fill_circle(fb, x0, y0, thickness / 2, color);
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Fill the axis-aligned rectangle with corners (x0,y0) and (x1,y1),
/// clipped to the buffer.
pub fn fill_rect(fb: &mut PixelBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: [u8; 3]) {
    let (x0, x1) = (x0.min(x1), x0.max(x1));
    let (y0, y1) = (y0.min(y1), y0.max(y1));
    for y in y0..=y1 {
        for x in x0..=x1 {
            fb.put(x, y, color);
        }
    }
}

/// Fill a disc of radius `r` centered at (cx,cy), clipped to the buffer.
pub fn fill_circle(fb: &mut PixelBuffer, cx: i32, cy: i32, r: i32, color: [u8; 3]) {
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                fb.put(cx + dx, cy + dy, color);
            }
        }
    }
}

/* ---------- 5x7 bitmap font (A-Z, digits, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Lowercase letters share the uppercase shapes.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
pub(crate) fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b11011,0b10001),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation: space, vertical bar, colon, dot, and a few extras
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b01100,0b00100,0b01000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),
        '-' => g!(0b00000,0b00000,0b00000,0b01110,0b00000,0b00000,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '\'' => g!(0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
/// Visual: a tiny glyph appears with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut PixelBuffer, x: i32, y: i32, ch: char, color: [u8; 3]) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass: offset by (1,1) in black to improve readability
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    fb.put(x + rx as i32 + 1, y + ry as i32 + 1, [0, 0, 0]);
                }
            }
        }

        // Foreground pass: actual glyph in chosen color
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    fb.put(x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact readout appears; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut PixelBuffer, mut x: i32, y: i32, text: &str, color: [u8; 3]) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
