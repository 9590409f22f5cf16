//! Sequencing of the whole show: countdown, fireworks, greeting, wind-down.

use std::io::{self, Write};

use crossterm::event::{Event, KeyEventKind};

use crate::effects::Effect;
use crate::effects::countdown::Countdown;
use crate::effects::fireworks::FireworksEffect;
use crate::effects::greeting::Greeting;
use crate::fireworks::ShootingFlag;
use crate::frame::Frame;

/// Length of the fireworks phase, in seconds.
pub const SHOW_SECS: f32 = 10.0;
/// When the greeting appears, in seconds into the fireworks.
pub const GREETING_AT: f32 = 8.0;

const PROMPT: &str = "press any key to start";
const EXIT_HINT: &str = "press q to exit";
const DIM: (u8, u8, u8) = (140, 140, 140);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the start key.
    Ready,
    Countdown,
    Fireworks,
    /// No more launches; what is in the sky burns out.
    Ended,
}

pub struct Show {
    phase: Phase,
    phase_time: f32,
    shooting: ShootingFlag,
    countdown: Countdown,
    fireworks: FireworksEffect,
    greeting: Greeting,
    frame: Frame,
}

impl Show {
    pub fn new(width: usize, height: usize, wait_for_key: bool) -> Self {
        let shooting = ShootingFlag::new(false);
        let phase = if wait_for_key {
            Phase::Ready
        } else {
            Phase::Countdown
        };
        log::info!("show starting in {phase:?} on {width}x{height}");

        Self {
            phase,
            phase_time: 0.0,
            fireworks: FireworksEffect::new(width, height, shooting.clone()),
            shooting,
            countdown: Countdown::new(width, height),
            greeting: Greeting::new(width, height),
            frame: Frame::new(width, height),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, phase: Phase) {
        log::info!("{:?} -> {phase:?}", self.phase);
        self.phase = phase;
        self.phase_time = 0.0;

        match phase {
            Phase::Ready | Phase::Countdown => {}
            Phase::Fireworks => {
                self.shooting.set(true);
                self.fireworks.launch();
            }
            Phase::Ended => self.shooting.set(false),
        }
    }

    /// The single start trigger: any key press while waiting.
    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            if self.phase == Phase::Ready && key.kind == KeyEventKind::Press {
                self.enter(Phase::Countdown);
            }
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.phase_time += dt;

        match self.phase {
            Phase::Ready => {}
            Phase::Countdown => {
                self.countdown.update(dt);
                if self.countdown.is_done() {
                    self.enter(Phase::Fireworks);
                }
            }
            Phase::Fireworks => {
                if self.phase_time >= GREETING_AT {
                    self.greeting.show();
                }
                self.fireworks.update(dt);
                self.greeting.update(dt);
                if self.phase_time >= SHOW_SECS {
                    self.enter(Phase::Ended);
                }
            }
            Phase::Ended => {
                self.fireworks.update(dt);
                self.greeting.update(dt);
            }
        }
    }

    pub fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.frame.clear();

        match self.phase {
            Phase::Ready => {
                let row = self.frame.rows() / 2;
                self.frame.centered_label(row, PROMPT, DIM);
            }
            Phase::Countdown => self.countdown.draw(&mut self.frame),
            Phase::Fireworks | Phase::Ended => {
                self.fireworks.draw(&mut self.frame);
                self.greeting.draw(&mut self.frame);
                if self.is_finished() {
                    let row = self.frame.rows().saturating_sub(1);
                    self.frame.centered_label(row, EXIT_HINT, DIM);
                }
            }
        }

        self.frame.present(out)
    }

    /// Shooting has stopped and the sky has gone dark.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Ended && self.fireworks.is_settled()
    }

    /// Follows a terminal resize without restarting anything.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.frame.resize(width, height);
        self.countdown.resize(width, height);
        self.fireworks.resize(width, height);
        self.greeting.resize(width, height);
    }

    pub fn shutdown(&mut self) {
        self.shooting.set(false);
        self.fireworks.stop();
    }
}
