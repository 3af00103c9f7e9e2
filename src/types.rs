// Core data model: the canvas buffer and the color channel identifiers.

/// A width x height grid of 8-bit RGB samples, three bytes per pixel in
/// channel order red, green, blue. Dimensions are fixed at creation; the
/// samples mutate in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: usize,
    pub height: usize,
    data: Vec<u8>, // length = width * height * 3
}

impl PixelBuffer {
    /// All-black buffer of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * 3],
        }
    }

    /// Buffer of the given size with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: [u8; 3]) -> Self {
        let mut buf = Self::new(width, height);
        buf.fill(color);
        buf
    }

    /// Read one pixel. Callers must stay in bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Write one pixel if (x, y) is inside the buffer; writes outside the
    /// bounds are dropped, never panic.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: [u8; 3]) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y * self.width + x) * 3;
        self.data[i] = color[0];
        self.data[i + 1] = color[1];
        self.data[i + 2] = color[2];
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: [u8; 3]) {
        for px in self.data.chunks_exact_mut(3) {
            px.copy_from_slice(&color);
        }
    }

    /// Raw samples, row-major, three bytes per pixel.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pack into 0x00RRGGBB words for minifb. `out` is cleared and refilled.
    pub fn pack_into(&self, out: &mut Vec<u32>) {
        out.clear();
        out.reserve(self.width * self.height);
        for px in self.data.chunks_exact(3) {
            let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
            out.push((r << 16) | (g << 8) | b);
        }
    }
}

/// One of the three adjustable color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Index of this channel inside a pixel / accumulator.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// One-letter label for the status readout.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
        }
    }
}
