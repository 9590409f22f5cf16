use std::f32::consts::TAU;

use crate::canvas::Color;
use crate::rng::RandomSource;

pub const SPARKS_PER_BURST: usize = 200;
pub const DRAG: f32 = 0.95;
pub const GRAVITY: f32 = 0.06;

/// One glowing fragment of a burst.
#[derive(Clone, Debug)]
pub struct Spark {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub opacity: f32,
    pub decay: f32,
    pub color: Color,
    pub radius: f32,
}

impl Spark {
    pub fn burst<R: RandomSource>(rng: &mut R, x: f32, y: f32, color: Color) -> Self {
        let angle = rng.range(0.0, TAU);
        let speed = rng.range(5.0, 12.0);
        let decay = rng.range(0.008, 0.015);
        let radius = rng.range(2.0, 4.0);

        Self {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            opacity: 1.0,
            decay,
            color,
            radius,
        }
    }

    pub fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vx *= DRAG;
        self.vy *= DRAG;
        self.vy += GRAVITY;
        self.opacity -= self.decay;
    }

    pub fn is_spent(&self) -> bool {
        self.opacity <= 0.0
    }

    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Scripted;

    #[test]
    fn burst_ranges() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..1000 {
            let s = Spark::burst(&mut rng, 10.0, 20.0, [1.0, 0.0, 0.0]);
            assert!(s.speed() >= 5.0 - 1e-4 && s.speed() < 12.0 + 1e-4);
            assert!((0.008..0.015).contains(&s.decay));
            assert!((2.0..4.0).contains(&s.radius));
            assert_eq!(s.opacity, 1.0);
            assert_eq!((s.x, s.y), (10.0, 20.0));
        }
    }

    #[test]
    fn opacity_strictly_decreases_until_spent() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut s = Spark::burst(&mut rng, 0.0, 0.0, [1.0; 3]);
        let mut last = s.opacity;
        let mut steps = 0;
        while !s.is_spent() {
            s.step();
            assert!(s.opacity < last);
            last = s.opacity;
            steps += 1;
        }
        // Slowest decay is 0.008 per step.
        assert!(steps <= 126);
        assert!(steps >= 67);
    }

    #[test]
    fn speed_follows_drag_without_gravity() {
        // angle 0: purely horizontal, so gravity only touches vy.
        let mut rng = Scripted::new(&[0.0, 0.5, 0.5, 0.5]);
        let mut s = Spark::burst(&mut rng, 0.0, 0.0, [1.0; 3]);
        let initial = s.vx;
        assert!((initial - 8.5).abs() < 1e-4);
        for k in 1..=30 {
            s.step();
            let expected = initial * DRAG.powi(k);
            assert!((s.vx - expected).abs() < 1e-3, "step {k}");
        }
    }

    #[test]
    fn gravity_pulls_down_after_drag() {
        let mut s = Spark {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: -2.0,
            opacity: 1.0,
            decay: 0.01,
            color: [1.0; 3],
            radius: 3.0,
        };
        s.step();
        assert_eq!(s.y, -2.0);
        assert!((s.vy - (-2.0 * DRAG + GRAVITY)).abs() < 1e-6);
        assert!((s.opacity - 0.99).abs() < 1e-6);
    }
}
