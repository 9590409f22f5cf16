use noise::{NoiseFn, Perlin};

use super::{Effect, ease_out};
use crate::canvas::hsl;
use crate::frame::{Frame, to_rgb};
use crate::glyphs::{self, GLYPH_H, Stamp};

pub const TITLE: &str = "HAPPY NEW YEAR!";
pub const SUBTITLE: &str = "Wishing you a wonderful year ahead.";

const TITLE_LINES: [&str; 2] = ["HAPPY", "NEW YEAR!"];
const ZOOM_SECS: f32 = 1.2;
/// Degrees per second the rainbow slides across the letters.
const HUE_SPEED: f32 = 90.0;
const SHIMMER: f64 = 40.0;

/// The closing "HAPPY NEW YEAR!" title over the fireworks.
pub struct Greeting {
    width: usize,
    height: usize,
    visible: bool,
    elapsed: f32,
    perlin: Perlin,
}

impl Greeting {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            visible: false,
            elapsed: 0.0,
            perlin: Perlin::new(fastrand::u32(0..1000)),
        }
    }

    pub fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            self.elapsed = 0.0;
            log::debug!("greeting shown");
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Splits the title over as few lines as fit, with the scale to draw at.
    fn layout(&self) -> Option<(Vec<&'static str>, f32)> {
        let (w, h) = (self.width as f32 * 0.9, self.height as f32 * 0.4);
        if let Some(scale) = glyphs::fit_scale(TITLE, w, h) {
            return Some((vec![TITLE], scale));
        }

        // Two lines share the height, with half a line of gap.
        let widest = TITLE_LINES
            .iter()
            .max_by_key(|line| glyphs::text_width(line))
            .copied()
            .unwrap_or(TITLE);
        glyphs::fit_scale(widest, w, h / 2.5).map(|scale| (TITLE_LINES.to_vec(), scale))
    }
}

impl Effect for Greeting {
    fn update(&mut self, dt: f32) {
        if self.visible {
            self.elapsed += dt;
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        if !self.visible {
            return;
        }
        let zoom = ease_out(self.elapsed / ZOOM_SECS);
        let centre_row = frame.rows() / 2;

        let Some((lines, full)) = self.layout() else {
            // Too small for block letters.
            frame.centered_label(centre_row.saturating_sub(1), TITLE, (255, 255, 255));
            if zoom >= 1.0 {
                frame.centered_label(centre_row + 1, SUBTITLE, (255, 255, 255));
            }
            return;
        };

        let scale = full * zoom;
        let line_h = GLYPH_H as f32 * scale.max(1.0);
        let pitch = line_h * 1.5;
        let block_h = line_h + pitch * (lines.len() - 1) as f32;
        let cx = self.width as f32 / 2.0;
        let top = self.height as f32 * 0.45 - block_h / 2.0;

        let hue_shift = self.elapsed * HUE_SPEED;
        let t = self.elapsed as f64;
        let mut bottom = 0;
        for (i, line) in lines.iter().enumerate() {
            let cy = top + pitch * i as f32 + line_h / 2.0;
            let stamp = Stamp::new(line, scale, cx, cy);
            stamp.paint_halo(frame, 1, (255, 255, 255), 0.5 * zoom);
            stamp.paint(frame, zoom, |u, v| {
                let shimmer = self.perlin.get([u as f64 * 4.0, v as f64 * 4.0 + i as f64, t * 0.8]) * SHIMMER;
                to_rgb(hsl(u * 360.0 + hue_shift + shimmer as f32, 1.0, 0.6))
            });
            bottom = stamp.bottom();
        }

        if zoom >= 1.0 {
            let row = (bottom.max(0) as usize).div_ceil(2) + 1;
            frame.centered_label(row.min(frame.rows().saturating_sub(1)), SUBTITLE, (255, 255, 255));
        }
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(frame: &mut Frame) -> String {
        let mut out = Vec::new();
        frame.present(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn lit(frame: &Frame) -> bool {
        (0..frame.height()).any(|y| (0..frame.width()).any(|x| frame.pixel(x, y) != (0, 0, 0)))
    }

    #[test]
    fn hidden_until_shown() {
        let mut greeting = Greeting::new(200, 100);
        greeting.update(5.0);
        let mut frame = Frame::new(200, 100);
        greeting.draw(&mut frame);
        assert!(!lit(&frame));
        assert!(!present(&mut frame).contains("Wishing"));
    }

    #[test]
    fn wide_terminal_uses_one_line() {
        let greeting = Greeting::new(200, 100);
        let (lines, scale) = greeting.layout().unwrap();
        assert_eq!(lines, vec![TITLE]);
        assert!(scale >= 2.0);
    }

    #[test]
    fn narrow_terminal_splits_title() {
        let greeting = Greeting::new(80, 48);
        let (lines, scale) = greeting.layout().unwrap();
        assert_eq!(lines, TITLE_LINES.to_vec());
        assert!(scale >= 1.0);
    }

    #[test]
    fn subtitle_follows_the_zoom() {
        let mut greeting = Greeting::new(200, 100);
        greeting.show();
        greeting.update(0.3);
        let mut frame = Frame::new(200, 100);
        greeting.draw(&mut frame);
        assert!(lit(&frame));
        assert!(!present(&mut frame).contains(SUBTITLE));

        greeting.update(1.0);
        frame.clear();
        greeting.draw(&mut frame);
        assert!(present(&mut frame).contains(SUBTITLE));
    }

    #[test]
    fn tiny_terminal_uses_plain_text() {
        let mut greeting = Greeting::new(40, 10);
        greeting.show();
        greeting.update(2.0);
        let mut frame = Frame::new(40, 10);
        greeting.draw(&mut frame);
        let text = present(&mut frame);
        assert!(text.contains(TITLE));
        assert!(!lit(&frame));
    }

    #[test]
    fn show_is_idempotent() {
        let mut greeting = Greeting::new(80, 48);
        greeting.show();
        greeting.update(0.5);
        greeting.show();
        assert!(greeting.is_visible());
        assert!((greeting.elapsed - 0.5).abs() < 1e-6);
    }
}
