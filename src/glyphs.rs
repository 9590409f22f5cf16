//! 5x7 block font for the big overlay text.

use crate::frame::{Frame, Rgb};

pub const GLYPH_W: usize = 5;
pub const GLYPH_H: usize = 7;
const ADVANCE: usize = GLYPH_W + 1;

// Rows top to bottom, bit 4 is the leftmost column.
fn glyph(ch: char) -> [u8; GLYPH_H] {
    match ch {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        _ => [0; GLYPH_H],
    }
}

/// Unscaled width of `text` in font pixels.
pub fn text_width(text: &str) -> usize {
    (text.chars().count() * ADVANCE).saturating_sub(1)
}

/// Whether font pixel (`gx`, `gy`) of `text` is set.
fn is_set(text: &str, gx: usize, gy: usize) -> bool {
    if gy >= GLYPH_H || gx % ADVANCE >= GLYPH_W {
        return false;
    }
    match text.chars().nth(gx / ADVANCE) {
        Some(ch) => glyph(ch)[gy] & (1 << (GLYPH_W - 1 - gx % ADVANCE)) != 0,
        None => false,
    }
}

/// Largest scale at which `text` fits inside `max_w` x `max_h` pixels, if
/// it fits at all.
pub fn fit_scale(text: &str, max_w: f32, max_h: f32) -> Option<f32> {
    let width = text_width(text) as f32;
    if width == 0.0 {
        return None;
    }
    let scale = (max_w / width).min(max_h / GLYPH_H as f32);
    (scale >= 1.0).then_some(scale)
}

/// Text rasterised at some scale and position, in frame pixels.
pub struct Stamp {
    left: i32,
    top: i32,
    width: usize,
    height: usize,
    mask: Vec<bool>,
}

impl Stamp {
    /// Rasterises `text` scaled by `scale` (nearest neighbour), centred on
    /// (`cx`, `cy`).
    pub fn new(text: &str, scale: f32, cx: f32, cy: f32) -> Self {
        let scale = scale.max(1.0);
        let width = (text_width(text) as f32 * scale).round() as usize;
        let height = (GLYPH_H as f32 * scale).round() as usize;

        let mut mask = vec![false; width * height];
        for y in 0..height {
            let gy = ((y as f32 + 0.5) / scale) as usize;
            for x in 0..width {
                let gx = ((x as f32 + 0.5) / scale) as usize;
                mask[y * width + x] = is_set(text, gx, gy);
            }
        }

        Self {
            left: (cx - width as f32 / 2.0).round() as i32,
            top: (cy - height as f32 / 2.0).round() as i32,
            width,
            height,
            mask,
        }
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether frame pixel (`x`, `y`) is inside a letter.
    pub fn lit(&self, x: i32, y: i32) -> bool {
        let (lx, ly) = (x - self.left, y - self.top);
        if lx < 0 || ly < 0 || lx as usize >= self.width || ly as usize >= self.height {
            return false;
        }
        self.mask[ly as usize * self.width + lx as usize]
    }

    /// Paints the letters. `shade` gets the position within the stamp as
    /// fractions (`u` across, `v` down) and returns the colour there.
    pub fn paint(&self, frame: &mut Frame, alpha: f32, mut shade: impl FnMut(f32, f32) -> Rgb) {
        for ly in 0..self.height {
            for lx in 0..self.width {
                if !self.mask[ly * self.width + lx] {
                    continue;
                }
                let u = lx as f32 / self.width.max(1) as f32;
                let v = ly as f32 / self.height.max(1) as f32;
                let color = shade(u, v);
                frame.blend(self.left + lx as i32, self.top + ly as i32, color, alpha);
            }
        }
    }

    /// Soft glow around the letters, fading over `radius` pixels.
    pub fn paint_halo(&self, frame: &mut Frame, radius: i32, color: Rgb, strength: f32) {
        if radius <= 0 {
            return;
        }
        for y in self.top - radius..self.bottom() + radius {
            for x in self.left - radius..self.left + self.width as i32 + radius {
                if self.lit(x, y) {
                    continue;
                }
                let mut nearest = i32::MAX;
                for dy in -radius..=radius {
                    for dx in -radius..=radius {
                        if self.lit(x + dx, y + dy) {
                            nearest = nearest.min(dx.abs().max(dy.abs()));
                        }
                    }
                }
                if nearest <= radius {
                    let falloff = 1.0 - (nearest - 1) as f32 / radius as f32;
                    frame.blend(x, y, color, strength * falloff * 0.5);
                }
            }
        }
    }
}
