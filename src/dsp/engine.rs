//! Stateless sweep engine: parameter snapshot in, complete frame out.

use super::hints::DisplayHints;
use super::params::{DerivedQuantities, Parameters};
use super::segment::{TraceSegment, segment_trace};
use super::signal::InputSignal;
use super::sweep::TimeBase;
use super::{DEFAULT_SAMPLE_COUNT, TimeGrid};
use serde::Serialize;
use tracing::debug;

pub const MIN_SAMPLE_COUNT: usize = 16;
pub const MAX_SAMPLE_COUNT: usize = 65_536;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub sample_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl EngineConfig {
    fn normalized(mut self) -> Self {
        self.sample_count = clamp_sample_count(self.sample_count);
        self
    }
}

pub fn clamp_sample_count(count: usize) -> usize {
    count.clamp(MIN_SAMPLE_COUNT, MAX_SAMPLE_COUNT)
}

/// Everything a renderer needs for one redraw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepOutput {
    pub time: Vec<f64>,
    pub input_signal: Vec<f64>,
    /// Normalized horizontal position, paired with `time`.
    pub sweep_position: Vec<f64>,
    pub segments: Vec<TraceSegment>,
    pub derived: DerivedQuantities,
    pub hints: DisplayHints,
}

impl SweepOutput {
    pub fn sample_count(&self) -> usize {
        self.time.len()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SweepEngine {
    config: EngineConfig,
}

impl SweepEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Runs the full pipeline. Callers must pass finite parameters; any
    /// finite snapshot yields a plottable frame.
    pub fn compute(&self, params: &Parameters) -> SweepOutput {
        let normalized = params.normalized();
        let derived = normalized.derived;
        let grid = TimeGrid::new(derived.total_time, self.config.sample_count);

        let input_signal = InputSignal::from(&normalized).render(&grid);
        let folded = TimeBase::from(&normalized).fold_grid(&grid);
        let sweep_position = folded.iter().map(|s| s.position).collect();
        let segments = segment_trace(&folded, &input_signal);

        debug!(
            "[engine] computed {} samples over {:.3}s: sweep={:.3}s (fwd={:.3}s, ret={:.3}s), segments={}",
            grid.len(),
            derived.total_time,
            derived.sweep_period,
            derived.forward_duration,
            derived.return_duration,
            segments.len()
        );

        SweepOutput {
            time: grid.into_times(),
            input_signal,
            sweep_position,
            segments,
            hints: DisplayHints::new(params, &derived),
            derived,
        }
    }
}
