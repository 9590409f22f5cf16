//! The fireworks simulation and its per-frame loop.
//!
//! Rockets climb from the bottom edge, detonate into sparks once their climb
//! slows, and everything is painted onto a canvas that is only ever partially
//! erased between frames.

pub mod emitter;
pub mod render;
pub mod rocket;
pub mod spark;

use std::cell::Cell;
use std::rc::Rc;

use crate::canvas::Canvas;
use crate::rng::RandomSource;
use rocket::Rocket;
use spark::{SPARKS_PER_BURST, Spark};

/// Height of the virtual display the physics constants are tuned for.
pub const WORLD_HEIGHT: f32 = 900.0;

/// World-space extent of the sky plus the mapping onto canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// World units per canvas pixel.
    pub scale: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scale: 1.0,
        }
    }

    /// Fits the virtual display onto a surface of `width` x `height` pixels,
    /// keeping square pixels.
    pub fn fit(width: usize, height: usize) -> Self {
        let scale = WORLD_HEIGHT / height.max(1) as f32;
        Self {
            width: width as f32 * scale,
            height: WORLD_HEIGHT,
            scale,
        }
    }

    pub fn to_pixels(&self, x: f32, y: f32) -> (f32, f32) {
        (x / self.scale, y / self.scale)
    }
}

/// Whether new rockets may go up. Shared with whoever runs the show and read
/// fresh on every frame.
#[derive(Clone, Debug, Default)]
pub struct ShootingFlag(Rc<Cell<bool>>);

impl ShootingFlag {
    pub fn new(shooting: bool) -> Self {
        Self(Rc::new(Cell::new(shooting)))
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }

    pub fn set(&self, shooting: bool) {
        self.0.set(shooting);
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct StepReport {
    /// Where each rocket detonated this step.
    pub bursts: Vec<(f32, f32)>,
    /// Sparks that burned out this step.
    pub extinguished: usize,
}

/// Live rockets and sparks. Only the stepper mutates them.
#[derive(Default)]
pub struct Simulation {
    rockets: Vec<Rocket>,
    sparks: Vec<Spark>,
}

impl Simulation {
    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn is_empty(&self) -> bool {
        self.rockets.is_empty() && self.sparks.is_empty()
    }

    pub fn emit<R: RandomSource>(
        &mut self,
        elapsed_ms: f64,
        shooting: bool,
        viewport: &Viewport,
        rng: &mut R,
    ) -> usize {
        emitter::emit(elapsed_ms, shooting, viewport, &mut self.rockets, rng)
    }

    /// Advances every body by one frame.
    pub fn step<R: RandomSource>(&mut self, rng: &mut R) -> StepReport {
        let mut report = StepReport::default();

        for rocket in &mut self.rockets {
            rocket.step();
        }

        let sparks = &mut self.sparks;
        self.rockets.retain(|rocket| {
            if !rocket.is_spent() {
                return true;
            }
            let color = rocket.color();
            for _ in 0..SPARKS_PER_BURST {
                sparks.push(Spark::burst(rng, rocket.x, rocket.y, color));
            }
            report.bursts.push((rocket.x, rocket.y));
            false
        });

        for spark in &mut self.sparks {
            spark.step();
        }

        let before = self.sparks.len();
        self.sparks.retain(|spark| !spark.is_spent());
        report.extinguished = before - self.sparks.len();

        report
    }
}

/// One running fireworks display: simulation, canvas, and the frame loop
/// state around them.
pub struct Fireworks<R: RandomSource = fastrand::Rng> {
    viewport: Viewport,
    canvas: Canvas,
    simulation: Simulation,
    shooting: ShootingFlag,
    elapsed_ms: f64,
    running: bool,
    rng: R,
}

impl Fireworks {
    /// Starts a display on a `width` x `height` pixel surface. Without a
    /// drawable surface nothing starts.
    pub fn start(width: usize, height: usize, shooting: ShootingFlag) -> Option<Self> {
        Self::with_rng(width, height, shooting, fastrand::Rng::new())
    }
}

impl<R: RandomSource> Fireworks<R> {
    pub fn with_rng(width: usize, height: usize, shooting: ShootingFlag, rng: R) -> Option<Self> {
        if width == 0 || height == 0 {
            log::debug!("fireworks not started: no drawable surface ({width}x{height})");
            return None;
        }
        log::debug!("fireworks started on {width}x{height} surface");

        Some(Self {
            viewport: Viewport::fit(width, height),
            canvas: Canvas::new(width, height),
            simulation: Simulation::default(),
            shooting,
            elapsed_ms: 0.0,
            running: true,
            rng,
        })
    }

    /// Runs one tick: launch, step, paint. Returns whether the next frame
    /// should be scheduled.
    pub fn frame(&mut self, dt_ms: f64) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ms += dt_ms.max(0.0);

        let launched = self.simulation.emit(
            self.elapsed_ms,
            self.shooting.get(),
            &self.viewport,
            &mut self.rng,
        );
        if launched > 0 {
            log::trace!("{launched} rocket(s) launched at {:.0}ms", self.elapsed_ms);
        }

        let report = self.simulation.step(&mut self.rng);
        for (x, y) in &report.bursts {
            log::trace!("burst at ({x:.0}, {y:.0})");
        }

        render::draw(&self.simulation, &self.viewport, &mut self.canvas, &mut self.rng);
        true
    }

    /// Follows a surface resize. Bodies keep their world coordinates.
    pub fn resize(&mut self, width: usize, height: usize) {
        if !self.running {
            return;
        }
        self.viewport = Viewport::fit(width, height);
        self.canvas.resize(width, height);
        log::debug!("fireworks surface resized to {width}x{height}");
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::debug!("fireworks stopped after {:.0}ms", self.elapsed_ms);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Nothing left in the sky and the last trails have faded out.
    pub fn is_settled(&self) -> bool {
        self.simulation.is_empty() && self.canvas.is_blank()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }
}
