use crate::entities::sprites::Sprite;

/// Milliseconds, as handed to `requestAnimationFrame` callbacks.
pub type TimeStamp = f64;

pub type Seconds = f64;

pub fn to_seconds(offset_ts: TimeStamp) -> Seconds {
    offset_ts / 1000.0
}

pub trait Draw {
    fn draw(&self, pixels: &mut PixelBuffer);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_rgba(0xFFFFFFFF);
    pub const BACKGROUND: Color = Color::from_rgba(0x181818FF);

    /// Unpacks `0xRRGGBBAA`.
    pub const fn from_rgba(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_be_bytes();
        Self { r, g, b, a }
    }
}

/// RGBA8 frame, row-major with the origin at the top left.
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    pub fn clear(&mut self, color: Color) {
        for pixel in self.data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Writes a single pixel. Anything outside the frame is dropped.
    pub fn put(&mut self, x: i64, y: i64, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.data[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        self.index(x, y).map(|i| Color {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        })
    }

    /// Paints `color` wherever the sprite mask is set, with the mask's top-left corner at
    /// (`left`, `top`). Unset mask bits leave the frame untouched.
    pub(crate) fn stencil(&mut self, sprite: &Sprite, left: i64, top: i64, color: Color) {
        for row in 0..sprite.height {
            for col in 0..sprite.width {
                if sprite.is_set(col, row) {
                    self.put(left + i64::from(col), top + i64::from(row), color);
                }
            }
        }
    }
}
