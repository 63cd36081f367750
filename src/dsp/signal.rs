//! Sinusoidal input channel.

use super::TimeGrid;
use super::params::{NormalizedParameters, Waveform};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSignal {
    pub amplitude: f64,
    /// Angular frequency in rad/s.
    pub omega: f64,
    /// Phase offset in radians.
    pub phase: f64,
    pub waveform: Waveform,
}

impl From<&NormalizedParameters> for InputSignal {
    fn from(params: &NormalizedParameters) -> Self {
        Self {
            amplitude: params.amplitude,
            omega: params.derived.omega,
            phase: params.derived.phase_radians,
            waveform: params.waveform,
        }
    }
}

impl InputSignal {
    #[inline]
    pub fn sample_at(&self, t: f64) -> f64 {
        self.amplitude * self.waveform.eval(self.omega * t + self.phase)
    }

    pub fn render(&self, grid: &TimeGrid) -> Vec<f64> {
        grid.times().iter().map(|&t| self.sample_at(t)).collect()
    }
}
