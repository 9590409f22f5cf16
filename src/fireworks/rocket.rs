use std::collections::VecDeque;

use super::Viewport;
use crate::canvas::{hsl, Color};
use crate::rng::RandomSource;

pub const TRAIL_LEN: usize = 8;
pub const GRAVITY: f32 = 0.08;
/// A rocket detonates once its climb has slowed to this vertical speed.
pub const DETONATE_VY: f32 = -1.5;

const CENTER_JITTER: f32 = 10.0;

/// A shell climbing from the bottom edge, dragging a short trail.
#[derive(Clone, Debug)]
pub struct Rocket {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub hue: f32,
    pub trail: VecDeque<(f32, f32)>,
    pub thickness: f32,
}

impl Rocket {
    /// Launches from the bottom edge at horizontal position `x`.
    pub fn launch<R: RandomSource>(rng: &mut R, x: f32, floor: f32) -> Self {
        // Slow drift and a modest launch speed; the weak gravity lets it rise high.
        let vx = rng.range(-1.5, 1.5);
        let vy = rng.range(-13.0, -9.0);
        let hue = rng.range(0.0, 360.0);
        let thickness = rng.range(3.0, 5.0);

        Self {
            x,
            y: floor,
            vx,
            vy,
            hue,
            trail: VecDeque::with_capacity(TRAIL_LEN + 1),
            thickness,
        }
    }

    /// Opening-beat launch from the middle of the viewport.
    pub fn centered<R: RandomSource>(rng: &mut R, viewport: &Viewport) -> Self {
        let x = viewport.width / 2.0 + rng.range(-CENTER_JITTER, CENTER_JITTER);
        Self::launch(rng, x, viewport.height)
    }

    /// Launch from anywhere in the inner 80% of the width.
    pub fn scattered<R: RandomSource>(rng: &mut R, viewport: &Viewport) -> Self {
        let x = rng.range(viewport.width * 0.1, viewport.width * 0.9);
        Self::launch(rng, x, viewport.height)
    }

    pub fn step(&mut self) {
        self.trail.push_back((self.x, self.y));
        if self.trail.len() > TRAIL_LEN {
            self.trail.pop_front();
        }

        self.x += self.vx;
        self.y += self.vy;
        self.vy += GRAVITY;
    }

    pub fn is_spent(&self) -> bool {
        self.vy >= DETONATE_VY
    }

    pub fn color(&self) -> Color {
        hsl(self.hue, 1.0, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Scripted;

    fn rocket(vy: f32) -> Rocket {
        Rocket {
            x: 100.0,
            y: 500.0,
            vx: 0.5,
            vy,
            hue: 30.0,
            trail: VecDeque::new(),
            thickness: 4.0,
        }
    }

    #[test]
    fn launch_draws_from_documented_ranges() {
        let mut rng = fastrand::Rng::with_seed(42);
        let viewport = Viewport::new(1600.0, 900.0);
        for _ in 0..500 {
            let r = Rocket::scattered(&mut rng, &viewport);
            assert!((160.0..1440.0).contains(&r.x));
            assert_eq!(r.y, 900.0);
            assert!((-1.5..1.5).contains(&r.vx));
            assert!((-13.0..-9.0).contains(&r.vy));
            assert!((0.0..360.0).contains(&r.hue));
            assert!((3.0..5.0).contains(&r.thickness));
            assert!(r.trail.is_empty());
        }
    }

    #[test]
    fn centered_launch_stays_near_middle() {
        let viewport = Viewport::new(1000.0, 900.0);
        let mut low = Scripted::constant(0.0);
        let mut high = Scripted::constant(0.999);
        assert_eq!(Rocket::centered(&mut low, &viewport).x, 490.0);
        assert!((Rocket::centered(&mut high, &viewport).x - 510.0).abs() < 0.05);
    }

    #[test]
    fn vertical_speed_grows_linearly() {
        let mut r = rocket(-12.0);
        for n in 1..=50 {
            r.step();
            let expected = -12.0 + GRAVITY * n as f32;
            assert!((r.vy - expected).abs() < 1e-4, "step {n}: {} vs {expected}", r.vy);
        }
    }

    #[test]
    fn integrates_before_gravity() {
        let mut r = rocket(-10.0);
        r.step();
        assert_eq!(r.x, 100.5);
        assert_eq!(r.y, 490.0);
        assert_eq!(r.trail.back(), Some(&(100.0, 500.0)));
    }

    #[test]
    fn trail_is_bounded_and_oldest_first() {
        let mut r = rocket(-13.0);
        for _ in 0..40 {
            r.step();
            assert!(r.trail.len() <= TRAIL_LEN);
        }
        assert_eq!(r.trail.len(), TRAIL_LEN);
        let ys: Vec<f32> = r.trail.iter().map(|p| p.1).collect();
        assert!(ys.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn detonation_threshold() {
        let mut r = rocket(-1.6);
        r.step();
        assert!(!r.is_spent());
        r.step();
        assert!(r.is_spent());
    }
}
