//! Timer-driven presentation state: rotating carousels and the falling-numbers burst.

use rand::Rng;

use crate::config::CelebrationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Index into a fixed-length rotation. The index is always in bounds for a non-empty rotation.
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.index
    }

    /// Moves to the next slide, wrapping at the end.
    pub fn advance(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    /// Jumps to `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One falling glyph of a celebration burst.
pub struct Particle {
    pub glyph: String,
    /// Horizontal start position, percent of viewport width.
    pub left_pct: f64,
    pub delay_s: f64,
    pub duration_s: f64,
    pub size_rem: f64,
    /// Starting tilt in degrees.
    pub rotation_deg: f64,
    /// Extra spin applied over the fall, either +180 or -180 degrees.
    pub spin_deg: f64,
}

impl Particle {
    /// Inline style consumed by the `wishbook-fall` keyframes.
    pub fn style(&self) -> String {
        format!(
            "left:{:.2}vw;font-size:{:.2}rem;animation-delay:{:.2}s;animation-duration:{:.2}s;\
--fall-rotate-from:{:.1}deg;--fall-rotate-to:{:.1}deg",
            self.left_pct,
            self.size_rem,
            self.delay_s,
            self.duration_s,
            self.rotation_deg,
            self.rotation_deg + self.spin_deg,
        )
    }
}

/// Generates one burst: `count` particles cycling through `glyphs`, with random position,
/// delay (0-1.5 s), duration (2-3.5 s), size (1.5-3.5 rem), and tilt (-30 to 30 degrees).
pub fn generate_particles<R: Rng + ?Sized>(
    rng: &mut R,
    glyphs: &[String],
    count: usize,
) -> Vec<Particle> {
    if glyphs.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|i| Particle {
            glyph: glyphs[i % glyphs.len()].clone(),
            left_pct: rng.gen_range(0.0..100.0),
            delay_s: rng.gen_range(0.0..1.5),
            duration_s: rng.gen_range(2.0..3.5),
            size_rem: rng.gen_range(1.5..3.5),
            rotation_deg: rng.gen_range(-30.0..30.0),
            spin_deg: if rng.gen_bool(0.5) { 180.0 } else { -180.0 },
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Show/hide timing of the celebration overlay.
pub struct CelebrationSchedule {
    pub first_delay_ms: u32,
    pub visible_ms: u32,
    pub repeat_ms: u32,
}

impl From<&CelebrationConfig> for CelebrationSchedule {
    fn from(config: &CelebrationConfig) -> Self {
        Self {
            first_delay_ms: config.first_delay_ms,
            visible_ms: config.visible_ms,
            repeat_ms: config.repeat_ms,
        }
    }
}

impl CelebrationSchedule {
    /// Whether the overlay is visible `elapsed_ms` after mount.
    pub fn is_visible_at(&self, elapsed_ms: u64) -> bool {
        self.burst_at(elapsed_ms).is_some()
    }

    /// Zero-based burst number visible at `elapsed_ms`, if any.
    pub fn burst_at(&self, elapsed_ms: u64) -> Option<u64> {
        let first = u64::from(self.first_delay_ms);
        let repeat = u64::from(self.repeat_ms).max(1);
        if elapsed_ms < first {
            return None;
        }
        let since_first = elapsed_ms - first;
        let burst = since_first / repeat;
        (since_first % repeat < u64::from(self.visible_ms)).then_some(burst)
    }
}
