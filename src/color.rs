//! Random colour assignment for pie slices and map regions.
//!
//! Colours are a pure function of a seed in `[0, 1)`; the seed comes from a
//! caller-supplied [`HueSource`]. Production wiring uses an entropy-seeded
//! RNG, so colours change on every render.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: u8,
    pub lightness: u8,
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

impl Serialize for Hsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Pie slices: fractional hue, 70% saturation, 70% lightness.
pub const PIE_SWATCH: (u8, u8) = (70, 70);
/// Map regions: whole-degree hue, 70% saturation, 60% lightness.
pub const MAP_SWATCH: (u8, u8) = (70, 60);

/// Colour for `seed` in `[0, 1)`.
pub fn color_for(seed: f64, (saturation, lightness): (u8, u8)) -> Hsl {
    Hsl {
        hue: seed * 360.0,
        saturation,
        lightness,
    }
}

/// Same as [`color_for`] with the hue floored to whole degrees.
pub fn whole_degree_color_for(seed: f64, swatch: (u8, u8)) -> Hsl {
    let mut c = color_for(seed, swatch);
    c.hue = c.hue.floor();
    c
}

pub trait HueSource {
    /// Next seed in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

pub struct RandomHue {
    rng: StdRng,
}

impl RandomHue {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl HueSource for RandomHue {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of seeds, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedHues {
    seeds: Vec<f64>,
    pos: usize,
}

impl FixedHues {
    pub fn new(seeds: Vec<f64>) -> Self {
        Self { seeds, pos: 0 }
    }
}

impl HueSource for FixedHues {
    fn next_unit(&mut self) -> f64 {
        if self.seeds.is_empty() {
            return 0.0;
        }
        let v = self.seeds[self.pos % self.seeds.len()];
        self.pos += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_formats_like_css() {
        let c = color_for(0.5, PIE_SWATCH);
        assert_eq!(c.to_string(), "hsl(180, 70%, 70%)");
        let m = whole_degree_color_for(0.1234, MAP_SWATCH);
        assert_eq!(m.to_string(), "hsl(44, 70%, 60%)");
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let mut a = RandomHue::seeded(7);
        let mut b = RandomHue::seeded(7);
        for _ in 0..5 {
            let x = a.next_unit();
            assert_eq!(x, b.next_unit());
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn fixed_hues_cycle() {
        let mut h = FixedHues::new(vec![0.1, 0.2]);
        assert_eq!(h.next_unit(), 0.1);
        assert_eq!(h.next_unit(), 0.2);
        assert_eq!(h.next_unit(), 0.1);
        assert_eq!(FixedHues::new(vec![]).next_unit(), 0.0);
    }

    #[test]
    fn serializes_as_string() {
        let v = serde_json::to_value(color_for(0.0, MAP_SWATCH)).unwrap();
        assert_eq!(v, serde_json::json!("hsl(0, 70%, 60%)"));
    }
}
