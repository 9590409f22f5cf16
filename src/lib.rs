//! A New Year's countdown and fireworks show for true-colour terminals.

pub mod canvas;
pub mod effects;
pub mod fireworks;
pub mod frame;
pub mod glyphs;
pub mod rng;
pub mod session;
pub mod show;
