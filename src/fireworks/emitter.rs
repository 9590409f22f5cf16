use super::Viewport;
use super::rocket::Rocket;
use crate::rng::RandomSource;

/// Length of the opening beat, when single shells go up from the centre.
pub const OPENING_MS: f64 = 3000.0;
pub const OPENING_CHANCE: f32 = 0.05;
pub const BASE_CHANCE: f32 = 0.02;
pub const MAX_SALVO: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Launch {
    Hold,
    Centered,
    Scattered(usize),
}

impl Launch {
    pub fn count(self) -> usize {
        match self {
            Launch::Hold => 0,
            Launch::Centered => 1,
            Launch::Scattered(n) => n,
        }
    }
}

/// Chance per frame of a salvo once the opening beat is over. Keeps growing
/// for as long as the show runs.
pub fn salvo_chance(elapsed_ms: f64) -> f32 {
    BASE_CHANCE + (elapsed_ms / 20_000.0) as f32 * 0.1
}

pub fn salvo_size(elapsed_ms: f64) -> usize {
    ((1.0 + elapsed_ms / 10_000.0).ceil() as usize).min(MAX_SALVO)
}

/// Decides this frame's launches.
pub fn plan<R: RandomSource>(
    elapsed_ms: f64,
    shooting: bool,
    live_rockets: usize,
    rng: &mut R,
) -> Launch {
    if !shooting {
        return Launch::Hold;
    }

    if elapsed_ms < OPENING_MS {
        // One shell at a time during the opening.
        if live_rockets == 0 && rng.chance(OPENING_CHANCE) {
            Launch::Centered
        } else {
            Launch::Hold
        }
    } else if rng.chance(salvo_chance(elapsed_ms)) {
        Launch::Scattered(salvo_size(elapsed_ms))
    } else {
        Launch::Hold
    }
}

/// Plans and appends this frame's rockets. Returns how many went up.
pub fn emit<R: RandomSource>(
    elapsed_ms: f64,
    shooting: bool,
    viewport: &Viewport,
    rockets: &mut Vec<Rocket>,
    rng: &mut R,
) -> usize {
    let launch = plan(elapsed_ms, shooting, rockets.len(), rng);
    match launch {
        Launch::Hold => {}
        Launch::Centered => rockets.push(Rocket::centered(rng, viewport)),
        Launch::Scattered(n) => {
            rockets.extend((0..n).map(|_| Rocket::scattered(rng, viewport)));
        }
    }
    launch.count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Scripted;

    #[test]
    fn never_launches_when_not_shooting() {
        let mut rng = Scripted::constant(0.0);
        for elapsed in [0.0, 1500.0, 3000.0, 9000.0, 60_000.0, 1e7] {
            for live in [0, 1, 5] {
                assert_eq!(plan(elapsed, false, live, &mut rng), Launch::Hold);
            }
        }
    }

    #[test]
    fn opening_waits_for_clear_sky() {
        let mut rng = Scripted::constant(0.0);
        assert_eq!(plan(100.0, true, 0, &mut rng), Launch::Centered);
        assert_eq!(plan(100.0, true, 1, &mut rng), Launch::Hold);
    }

    #[test]
    fn opening_chance_is_five_percent() {
        assert_eq!(plan(0.0, true, 0, &mut Scripted::constant(0.049)), Launch::Centered);
        assert_eq!(plan(0.0, true, 0, &mut Scripted::constant(0.05)), Launch::Hold);
    }

    #[test]
    fn opening_eventually_launches_exactly_one() {
        let viewport = Viewport::new(1600.0, 900.0);
        let mut rng = fastrand::Rng::with_seed(5);
        let mut rockets = Vec::new();
        let mut frames = 0;
        while rockets.is_empty() {
            emit(0.0, true, &viewport, &mut rockets, &mut rng);
            frames += 1;
            assert!(frames < 10_000);
        }
        assert_eq!(rockets.len(), 1);
        assert!((rockets[0].x - 800.0).abs() <= 10.0);

        for _ in 0..500 {
            emit(0.0, true, &viewport, &mut rockets, &mut rng);
        }
        assert_eq!(rockets.len(), 1);
    }

    #[test]
    fn salvo_grows_with_time() {
        assert_eq!(salvo_size(3000.0), 2);
        assert_eq!(salvo_size(9999.0), 2);
        assert_eq!(salvo_size(10_001.0), 3);
        assert_eq!(salvo_size(1e6), 3);

        assert!((salvo_chance(3000.0) - 0.035).abs() < 1e-6);
        assert!((salvo_chance(10_000.0) - 0.07).abs() < 1e-6);
        assert!(salvo_chance(200_000.0) > 1.0);
    }

    #[test]
    fn salvo_ignores_live_rockets() {
        let mut rng = Scripted::constant(0.0);
        assert_eq!(plan(5000.0, true, 12, &mut rng), Launch::Scattered(2));
        let mut rng = Scripted::constant(0.99);
        assert_eq!(plan(5000.0, true, 0, &mut rng), Launch::Hold);
    }

    #[test]
    fn scattered_launches_span_inner_width() {
        let viewport = Viewport::new(1000.0, 900.0);
        let mut rng = Scripted::new(&[0.0, 0.0, 0.5, 0.5, 0.5, 0.5, 0.999, 0.5, 0.5, 0.5, 0.5]);
        let mut rockets = Vec::new();
        let n = emit(4000.0, true, &viewport, &mut rockets, &mut rng);
        assert_eq!(n, 2);
        assert_eq!(rockets.len(), 2);
        assert_eq!(rockets[0].x, 100.0);
        assert!((rockets[1].x - 900.0).abs() < 1.0);
        assert!(rockets.iter().all(|r| r.y == 900.0));
    }
}
