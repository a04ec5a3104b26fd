//! Common test utilities for feature extraction tests
//!
//! Provides deterministic minutiae and quality-map generators so that
//! integration tests do not depend on a real detector.

#![allow(dead_code)]

use nfiq_core::{Direction, Minutia, MinutiaType, Minutiae, QualityMap};

/// Small linear congruential generator, deterministic across platforms
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform in `[0, 1]`
    pub fn next_unit(&mut self) -> f64 {
        self.next_u32() as f64 / u32::MAX as f64
    }
}

/// Build a minutia with the given reliability at a generated position
pub fn minutia(rng: &mut Lcg, reliability: f64) -> Minutia {
    let direction = Direction::new((rng.next_u32() % 16) as u8).unwrap();
    let kind = if rng.next_u32() % 2 == 0 {
        MinutiaType::RidgeEnding
    } else {
        MinutiaType::Bifurcation
    };
    Minutia::new(rng.next_u32() % 512, rng.next_u32() % 512, direction, reliability, kind, true)
        .unwrap()
}

/// `count` minutiae with uniformly distributed reliability
pub fn random_minutiae(seed: u32, count: usize) -> Minutiae {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|_| {
            let reliability = rng.next_unit();
            minutia(&mut rng, reliability)
        })
        .collect()
}

/// Quality map with a background border and graded interior
pub fn bordered_map(width: usize, height: usize, interior: u8) -> QualityMap {
    let mut cells = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            cells.push(if border { 0 } else { interior });
        }
    }
    QualityMap::new(width, height, cells).unwrap()
}
