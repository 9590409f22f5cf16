use super::{Simulation, Viewport};
use crate::canvas::{BLACK, Blend, Canvas, WHITE};
use crate::rng::RandomSource;

/// Share of the previous frame erased every tick.
pub const FADE_ALPHA: f32 = 0.1;
pub const HEAD_SIZE: f32 = 4.0;
pub const GLITTER_RADIUS: f32 = 1.0;
const DIM_CHANCE: f32 = 0.2;
const GLITTER_CHANCE: f32 = 0.3;

/// Paints one tick of the simulation onto the persistent canvas.
pub fn draw<R: RandomSource>(
    simulation: &Simulation,
    viewport: &Viewport,
    canvas: &mut Canvas,
    rng: &mut R,
) {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    canvas.set_blend(Blend::DestinationOut);
    canvas.fill_rect(0.0, 0.0, w, h, BLACK, FADE_ALPHA);
    canvas.set_blend(Blend::Lighter);

    let scale = viewport.scale;
    let mut path = Vec::with_capacity(super::rocket::TRAIL_LEN);

    for rocket in simulation.rockets() {
        let color = rocket.color();

        path.clear();
        path.extend(rocket.trail.iter().map(|&(x, y)| viewport.to_pixels(x, y)));
        canvas.stroke_polyline(&path, rocket.thickness / scale, color, 1.0);

        let (hx, hy) = viewport.to_pixels(rocket.x - HEAD_SIZE / 2.0, rocket.y - HEAD_SIZE / 2.0);
        canvas.fill_rect(hx, hy, HEAD_SIZE / scale, HEAD_SIZE / scale, color, 1.0);
    }

    for spark in simulation.sparks() {
        // Flicker and glitter are re-rolled every frame.
        let flicker = if rng.chance(DIM_CHANCE) { 0.5 } else { 1.0 };
        let alpha = spark.opacity * flicker;
        let (x, y) = viewport.to_pixels(spark.x, spark.y);

        canvas.fill_circle(x, y, spark.radius / scale, spark.color, alpha);
        if rng.chance(GLITTER_CHANCE) {
            canvas.fill_circle(x, y, GLITTER_RADIUS / scale, WHITE, alpha);
        }
    }
}
