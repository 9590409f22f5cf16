use std::io::{self, Write};

use crate::canvas::{Canvas, Color};

pub type Rgb = (u8, u8, u8);

struct Label {
    row: usize,
    col: usize,
    text: String,
    color: Rgb,
}

/// One presented image: pixels two-per-cell plus text written over them.
///
/// Unlike the canvas, a frame is rebuilt from scratch for every render, so
/// anything painted here leaves no trail.
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    labels: Vec<Label>,
    output_buf: Vec<u8>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![(0, 0, 0); width * height],
            labels: Vec::new(),
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, (0, 0, 0));
        self.labels.clear();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of text rows the frame occupies.
    pub fn rows(&self) -> usize {
        self.height.div_ceil(2)
    }

    pub fn clear(&mut self) {
        self.pixels.fill((0, 0, 0));
        self.labels.clear();
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Copies the canvas, which must match the frame size.
    pub fn load_canvas(&mut self, canvas: &Canvas) {
        if canvas.width() != self.width || canvas.height() != self.height {
            return;
        }
        for (dst, src) in self.pixels.iter_mut().zip(canvas.pixels()) {
            *dst = to_rgb(*src);
        }
    }

    /// Paints `color` over the pixel at `alpha` opacity. Off-frame
    /// coordinates are ignored.
    pub fn blend(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let dst = &mut self.pixels[y as usize * self.width + x as usize];
        let mix = |d: u8, s: u8| (d as f32 * (1.0 - alpha) + s as f32 * alpha).round() as u8;
        *dst = (mix(dst.0, color.0), mix(dst.1, color.1), mix(dst.2, color.2));
    }

    /// Places text at a cell position. Text running off the right edge is cut.
    pub fn label(&mut self, row: usize, col: usize, text: &str, color: Rgb) {
        if row >= self.rows() || col >= self.width {
            return;
        }
        let text: String = text.chars().take(self.width - col).collect();
        self.labels.push(Label {
            row,
            col,
            text,
            color,
        });
    }

    pub fn centered_label(&mut self, row: usize, text: &str, color: Rgb) {
        let len = text.chars().count();
        let col = self.width.saturating_sub(len) / 2;
        self.label(row, col, text, color);
    }

    /// Writes the frame as half-block cells, then the labels.
    pub fn present<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let mut prev_top: Option<Rgb> = None;
        let mut prev_bot: Option<Rgb> = None;

        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top = self.pixels[y * self.width + x];
                let bot = if y + 1 < self.height {
                    self.pixels[(y + 1) * self.width + x]
                } else {
                    (0, 0, 0)
                };

                if prev_top != Some(top) {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = Some(top);
                }
                if prev_bot != Some(bot) {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = Some(bot);
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top = None;
            prev_bot = None;
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        for label in &self.labels {
            let (r, g, b) = label.color;
            write!(
                self.output_buf,
                "\x1b[{};{}H\x1b[38;2;{r};{g};{b}m\x1b[48;2;0;0;0m{}\x1b[0m",
                label.row + 1,
                label.col + 1,
                label.text
            )?;
        }

        out.write_all(&self.output_buf)?;
        out.flush()
    }
}

pub fn to_rgb(color: Color) -> Rgb {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    (c(color[0]), c(color[1]), c(color[2]))
}
