use super::Effect;
use crate::fireworks::{Fireworks, ShootingFlag};
use crate::frame::Frame;

/// Show layer hosting the fireworks display. Nothing runs until `launch`.
pub struct FireworksEffect {
    width: usize,
    height: usize,
    shooting: ShootingFlag,
    display: Option<Fireworks>,
}

impl FireworksEffect {
    pub fn new(width: usize, height: usize, shooting: ShootingFlag) -> Self {
        Self {
            width,
            height,
            shooting,
            display: None,
        }
    }

    /// Starts the display on the current surface. Stays dark if there is
    /// nothing to draw on.
    pub fn launch(&mut self) {
        if self.display.is_none() {
            self.display = Fireworks::start(self.width, self.height, self.shooting.clone());
        }
    }

    pub fn is_running(&self) -> bool {
        self.display.as_ref().is_some_and(Fireworks::is_running)
    }

    /// True once everything launched has burned out and faded.
    pub fn is_settled(&self) -> bool {
        self.display.as_ref().is_none_or(Fireworks::is_settled)
    }

    pub fn stop(&mut self) {
        if let Some(display) = &mut self.display {
            display.stop();
        }
    }
}

impl Effect for FireworksEffect {
    fn update(&mut self, dt: f32) {
        if let Some(display) = &mut self.display {
            display.frame(dt as f64 * 1000.0);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        if let Some(display) = &self.display {
            frame.load_canvas(display.canvas());
        }
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        if let Some(display) = &mut self.display {
            display.resize(width, height);
        }
    }
}
