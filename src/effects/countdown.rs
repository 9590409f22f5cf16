use super::{Effect, ease_out, lerp_rgb};
use crate::frame::{Frame, Rgb};
use crate::glyphs::{self, Stamp};

pub const COUNT_FROM: u32 = 10;

const GRADIENT_FROM: Rgb = (192, 132, 252); // purple
const GRADIENT_TO: Rgb = (219, 39, 119); // pink
const HALO: Rgb = (236, 72, 153);
/// Share of each second spent growing into place.
const ENTRANCE: f32 = 0.5;

/// Big numbers counting down to the show, one per second.
pub struct Countdown {
    width: usize,
    height: usize,
    elapsed: f32,
}

impl Countdown {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            elapsed: 0.0,
        }
    }

    /// Number on screen; 0 once the count has run out.
    pub fn remaining(&self) -> u32 {
        COUNT_FROM.saturating_sub(self.elapsed as u32)
    }

    pub fn is_done(&self) -> bool {
        self.remaining() == 0
    }
}

impl Effect for Countdown {
    fn update(&mut self, dt: f32) {
        let before = self.remaining();
        self.elapsed += dt;
        if self.remaining() != before {
            log::debug!("countdown at {}", self.remaining());
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        if self.is_done() {
            return;
        }
        let text = self.remaining().to_string();
        let entrance = ease_out(self.elapsed.fract() / ENTRANCE);

        let (w, h) = (self.width as f32, self.height as f32);
        let Some(full) = glyphs::fit_scale(&text, w * 0.8, h * 0.45) else {
            let color = lerp_rgb((0, 0, 0), GRADIENT_TO, entrance);
            frame.centered_label(frame.rows() / 2, &text, color);
            return;
        };

        let scale = full * (0.5 + 0.5 * entrance);
        let stamp = Stamp::new(&text, scale, w / 2.0, h / 2.0);
        stamp.paint_halo(frame, (scale * 0.6).round() as i32, HALO, 0.8 * entrance);
        stamp.paint(frame, entrance, |u, _| lerp_rgb(GRADIENT_FROM, GRADIENT_TO, u));
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_pixels(frame: &Frame) -> usize {
        let mut n = 0;
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                if frame.pixel(x, y) != (0, 0, 0) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn counts_down_once_per_second() {
        let mut countdown = Countdown::new(80, 48);
        assert_eq!(countdown.remaining(), 10);
        countdown.update(0.99);
        assert_eq!(countdown.remaining(), 10);
        countdown.update(0.02);
        assert_eq!(countdown.remaining(), 9);
        for _ in 0..8 {
            countdown.update(1.0);
        }
        assert_eq!(countdown.remaining(), 1);
        assert!(!countdown.is_done());
        countdown.update(1.0);
        assert!(countdown.is_done());
    }

    #[test]
    fn draws_large_digits_centred() {
        let mut countdown = Countdown::new(80, 48);
        countdown.update(0.75);
        let mut frame = Frame::new(80, 48);
        countdown.draw(&mut frame);

        assert!(lit_pixels(&frame) > 100);
        assert_eq!(frame.pixel(0, 0), (0, 0, 0));
        assert_eq!(frame.pixel(79, 47), (0, 0, 0));
    }

    #[test]
    fn grows_into_place() {
        let mut early = Countdown::new(80, 48);
        early.update(0.05);
        let mut settled = Countdown::new(80, 48);
        settled.update(0.6);

        let mut a = Frame::new(80, 48);
        early.draw(&mut a);
        let mut b = Frame::new(80, 48);
        settled.draw(&mut b);
        assert!(lit_pixels(&a) < lit_pixels(&b));
    }

    #[test]
    fn tiny_terminal_falls_back_to_text() {
        let mut countdown = Countdown::new(6, 4);
        countdown.update(0.9);
        let mut frame = Frame::new(6, 4);
        countdown.draw(&mut frame);

        assert_eq!(lit_pixels(&frame), 0);
        let mut out = Vec::new();
        frame.present(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("10"));
    }

    #[test]
    fn nothing_after_zero() {
        let mut countdown = Countdown::new(80, 48);
        countdown.update(10.5);
        let mut frame = Frame::new(80, 48);
        countdown.draw(&mut frame);
        assert_eq!(lit_pixels(&frame), 0);
    }
}
