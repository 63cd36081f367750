//! Horizontal time base: a triangular ramp with independent forward and
//! return legs.
//!
//! Absolute time is folded into a cycle index, the leg it falls on, and the
//! normalized beam position. The folding knows nothing about the signal
//! being swept, so segmentation reuses it directly.

use super::TimeGrid;
use super::params::{DURATION_FLOOR, NormalizedParameters};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepLeg {
    /// Active trace, position ramps 0 -> 1.
    Forward,
    /// Retrace, position ramps 1 -> 0.
    Return,
}

impl SweepLeg {
    pub const ALL: [SweepLeg; 2] = [SweepLeg::Forward, SweepLeg::Return];
}

impl std::fmt::Display for SweepLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Forward => "forward",
            Self::Return => "return",
        })
    }
}

/// One instant folded onto the time base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSample {
    /// `floor(t / sweep_period)`.
    pub cycle: u64,
    /// Time elapsed since the cycle started.
    pub cycle_phase: f64,
    pub leg: SweepLeg,
    /// Normalized horizontal position in `[0, 1]`.
    pub position: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeBase {
    forward_duration: f64,
    return_duration: f64,
}

impl From<&NormalizedParameters> for TimeBase {
    fn from(params: &NormalizedParameters) -> Self {
        Self::new(
            params.derived.forward_duration,
            params.derived.return_duration,
        )
    }
}

impl TimeBase {
    pub fn new(forward_duration: f64, return_duration: f64) -> Self {
        Self {
            forward_duration: forward_duration.max(DURATION_FLOOR),
            return_duration: return_duration.max(DURATION_FLOOR),
        }
    }

    pub fn forward_duration(&self) -> f64 {
        self.forward_duration
    }

    pub fn return_duration(&self) -> f64 {
        self.return_duration
    }

    pub fn period(&self) -> f64 {
        self.forward_duration + self.return_duration
    }

    pub fn fold(&self, t: f64) -> SweepSample {
        let period = self.period();
        let mut cycle = (t / period).floor().max(0.0) as u64;
        // The quotient can round across a cycle edge; settle on the cycle
        // whose window [k*P, (k+1)*P) actually contains t.
        if cycle > 0 && t < cycle as f64 * period {
            cycle -= 1;
        } else if t >= (cycle + 1) as f64 * period {
            cycle += 1;
        }

        let start = cycle as f64 * period;
        let cycle_phase = t - start;
        let (leg, position) = if t < start + self.forward_duration {
            (SweepLeg::Forward, cycle_phase / self.forward_duration)
        } else {
            (
                SweepLeg::Return,
                1.0 - (cycle_phase - self.forward_duration) / self.return_duration,
            )
        };

        SweepSample {
            cycle,
            cycle_phase,
            leg,
            position: position.clamp(0.0, 1.0),
        }
    }

    pub fn position_at(&self, t: f64) -> f64 {
        self.fold(t).position
    }

    pub fn fold_grid(&self, grid: &TimeGrid) -> Vec<SweepSample> {
        grid.times().iter().map(|&t| self.fold(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::params::Parameters;
    use approx::assert_relative_eq;

    fn reference() -> TimeBase {
        TimeBase::from(&Parameters::default().normalized())
    }

    #[test]
    fn forward_leg_ramps_up_linearly() {
        let tb = reference();
        assert_eq!(tb.position_at(0.0), 0.0);
        assert_relative_eq!(tb.position_at(0.5), 0.5);
        assert_relative_eq!(tb.position_at(0.995), 0.995, epsilon = 1e-12);
        assert_eq!(tb.fold(0.995).leg, SweepLeg::Forward);
    }

    #[test]
    fn return_leg_ramps_down_linearly() {
        let tb = reference();
        let start = tb.fold(1.0);
        assert_eq!(start.leg, SweepLeg::Return);
        assert_relative_eq!(start.position, 1.0);
        assert_relative_eq!(tb.position_at(1.125), 0.5, epsilon = 1e-12);
        assert_eq!(tb.fold(1.2).leg, SweepLeg::Return);
    }

    #[test]
    fn folding_wraps_into_later_cycles() {
        let tb = reference();
        let s = tb.fold(2.5 + 0.5);
        assert_eq!(s.cycle, 2);
        assert_eq!(s.leg, SweepLeg::Forward);
        assert_relative_eq!(s.cycle_phase, 0.5, epsilon = 1e-12);
        assert_relative_eq!(s.position, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn cycle_window_contains_the_instant() {
        let tb = TimeBase::new(0.1, 0.2);
        let period = tb.period();
        for i in 0..10_000 {
            let t = i as f64 * 0.000_37;
            let s = tb.fold(t);
            assert!(t >= s.cycle as f64 * period, "t={t} before cycle {}", s.cycle);
            assert!(t < (s.cycle + 1) as f64 * period, "t={t} after cycle {}", s.cycle);
        }
    }

    #[test]
    fn positions_stay_in_unit_interval() {
        for &(fwd, ret) in &[(0.001, 0.001), (0.001, 10.0), (10.0, 0.001), (0.3, 0.7)] {
            let tb = TimeBase::new(fwd, ret);
            let grid = TimeGrid::new(3.0 * tb.period(), 997);
            for s in tb.fold_grid(&grid) {
                assert!((0.0..=1.0).contains(&s.position));
                assert!(s.position.is_finite());
            }
        }
    }

    #[test]
    fn zero_length_legs_are_floored() {
        let tb = TimeBase::new(0.0, -1.0);
        assert_eq!(tb.forward_duration(), DURATION_FLOOR);
        assert_eq!(tb.return_duration(), DURATION_FLOOR);
        assert!(tb.position_at(0.0015).is_finite());
    }
}
