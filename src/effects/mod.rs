use crate::frame::{Frame, Rgb};

pub mod countdown;
pub mod fireworks;
pub mod greeting;

/// A layer of the show. Layers advance on the fixed tick and paint into the
/// shared frame in order, back to front.
pub trait Effect {
    fn update(&mut self, dt: f32);
    fn draw(&mut self, frame: &mut Frame);
    fn resize(&mut self, width: usize, height: usize);
}

/// Ease-out over `0..=1`, clamped.
pub(crate) fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

pub(crate) fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_is_clamped() {
        assert_eq!(ease_out(-1.0), 0.0);
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert_eq!(ease_out(3.0), 1.0);
        assert!(ease_out(0.5) > 0.5);
    }

    #[test]
    fn colour_helpers() {
        assert_eq!(lerp_rgb((0, 0, 0), (200, 100, 50), 0.5), (100, 50, 25));
        assert_eq!(lerp_rgb((10, 10, 10), (20, 20, 20), 2.0), (20, 20, 20));
    }
}
