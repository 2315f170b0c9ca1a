//! MEE6's level curve.
//!
//! Reaching level `n` takes `5/6 * n * (2n² + 27n + 91)` XP in total. There's no clean inverse
//! for that, so the level is found by walking up the curve.

use std::convert::TryFrom;

// u128 because the cubic outgrows u64 long before an i64 XP value runs out
fn total_xp(level: u64) -> u128 {
    let level = u128::from(level);
    // always divisible by 6, it's the sum of 5k² + 50k + 100 over all k < level
    5 * level * (2 * level * level + 27 * level + 91) / 6
}

/// Total XP needed to reach `level`, saturating at `u64::MAX`
pub fn xp_needed_for_level(level: u64) -> u64 {
    u64::try_from(total_xp(level)).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelInfo {
    xp: u64,
    level: u64,
    progress: f64,
}

impl LevelInfo {
    #[allow(clippy::cast_precision_loss)]
    pub fn new(xp: u64) -> Self {
        let mut level = 0;
        while total_xp(level + 1) <= u128::from(xp) {
            level += 1;
        }

        let current = total_xp(level);
        let next = total_xp(level + 1);
        Self {
            xp,
            level,
            progress: (u128::from(xp) - current) as f64 / (next - current) as f64,
        }
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn level(&self) -> u64 {
        self.level
    }

    /// How far along the way to the next level, from 0.0 (inclusive) to 1.0 (exclusive)
    pub fn progress(&self) -> f64 {
        self.progress
    }
}
