//! Persistent drawing surface for the fireworks.
//!
//! Pixels are premultiplied RGB in `0.0..=1.0` over a black backdrop. The
//! surface is never cleared between frames; the renderer erases a little of
//! it each tick instead, which is what leaves glowing streaks behind moving
//! bodies.

pub type Color = [f32; 3];

pub const BLACK: Color = [0.0, 0.0, 0.0];
pub const WHITE: Color = [1.0, 1.0, 1.0];

/// Anything dimmer than one 8-bit step is treated as fully erased.
const FLOOR: f32 = 1.0 / 255.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    /// Erases the destination in proportion to source alpha.
    DestinationOut,
    /// Adds source light onto the destination, saturating at white.
    Lighter,
}

pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
    blend: Blend,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![BLACK; width * height],
            blend: Blend::Lighter,
        }
    }

    /// Reallocates the surface. Like any freshly sized canvas it comes back blank.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, BLACK);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn blend(&self) -> Blend {
        self.blend
    }

    pub fn set_blend(&mut self, blend: Blend) {
        self.blend = blend;
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| *p == BLACK)
    }

    /// Fills an axis-aligned rectangle given in pixel units.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color, alpha: f32) {
        let (x0, y0, x1, y1) = (x, y, x + w, y + h);
        let Some((px0, py0, px1, py1)) = self.clip(x0, y0, x1, y1) else {
            return;
        };

        for py in py0..py1 {
            let oy = (y1.min(py as f32 + 1.0) - y0.max(py as f32)).max(0.0);
            if oy <= 0.0 {
                continue;
            }
            for px in px0..px1 {
                let ox = (x1.min(px as f32 + 1.0) - x0.max(px as f32)).max(0.0);
                let coverage = (ox * oy).min(1.0);
                if coverage > 0.0 {
                    self.composite(py * self.width + px, color, alpha * coverage);
                }
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color, alpha: f32) {
        let Some((px0, py0, px1, py1)) =
            self.clip(cx - radius - 1.0, cy - radius - 1.0, cx + radius + 1.0, cy + radius + 1.0)
        else {
            return;
        };

        for py in py0..py1 {
            for px in px0..px1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let coverage = edge_coverage(radius, (dx * dx + dy * dy).sqrt());
                if coverage > 0.0 {
                    self.composite(py * self.width + px, color, alpha * coverage);
                }
            }
        }
    }

    /// Strokes a connected path with round caps and joins.
    ///
    /// Each pixel is composited once, using its distance to the nearest
    /// segment, so overlapping segments of one path do not double up.
    pub fn stroke_polyline(&mut self, points: &[(f32, f32)], width: f32, color: Color, alpha: f32) {
        if points.is_empty() {
            return;
        }
        let half = width * 0.5;

        let (mut min_x, mut min_y) = points[0];
        let (mut max_x, mut max_y) = points[0];
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let Some((px0, py0, px1, py1)) =
            self.clip(min_x - half - 1.0, min_y - half - 1.0, max_x + half + 1.0, max_y + half + 1.0)
        else {
            return;
        };

        for py in py0..py1 {
            for px in px0..px1 {
                let p = (px as f32 + 0.5, py as f32 + 0.5);
                let dist = if points.len() == 1 {
                    distance(p, points[0])
                } else {
                    points
                        .windows(2)
                        .map(|seg| segment_distance(p, seg[0], seg[1]))
                        .fold(f32::INFINITY, f32::min)
                };
                let coverage = edge_coverage(half, dist);
                if coverage > 0.0 {
                    self.composite(py * self.width + px, color, alpha * coverage);
                }
            }
        }
    }

    fn clip(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> Option<(usize, usize, usize, usize)> {
        let px0 = x0.floor().max(0.0);
        let py0 = y0.floor().max(0.0);
        let px1 = x1.ceil().min(self.width as f32);
        let py1 = y1.ceil().min(self.height as f32);
        if px0 >= px1 || py0 >= py1 {
            return None;
        }
        Some((px0 as usize, py0 as usize, px1 as usize, py1 as usize))
    }

    fn composite(&mut self, idx: usize, color: Color, alpha: f32) {
        let dst = &mut self.pixels[idx];
        match self.blend {
            Blend::DestinationOut => {
                let keep = 1.0 - alpha.clamp(0.0, 1.0);
                for c in dst.iter_mut() {
                    *c *= keep;
                    if *c < FLOOR {
                        *c = 0.0;
                    }
                }
            }
            Blend::Lighter => {
                let alpha = alpha.max(0.0);
                for (c, src) in dst.iter_mut().zip(color) {
                    *c = (*c + src * alpha).min(1.0);
                }
            }
        }
    }
}

/// Converts a CSS-style `hsl()` colour (hue in degrees, saturation and
/// lightness in `0..=1`) to RGB.
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma * 0.5;
    [r + m, g + m, b + m]
}

// Anti-aliased coverage of a pixel whose centre lies `dist` from the centre
// line of a shape `radius` wide. Sub-pixel shapes fade out with their size.
fn edge_coverage(radius: f32, dist: f32) -> f32 {
    let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
    if radius < 0.5 {
        coverage * radius * 2.0
    } else {
        coverage
    }
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn segment_distance(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let len_sq = abx * abx + aby * aby;
    if len_sq <= f32::EPSILON {
        return distance(p, a);
    }
    let t = (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0);
    distance(p, (a.0 + abx * t, a.1 + aby * t))
}
