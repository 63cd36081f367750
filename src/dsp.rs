pub mod engine;
pub mod hints;
pub mod params;
pub mod segment;
pub mod signal;
pub mod sweep;

pub const DEFAULT_SAMPLE_COUNT: usize = 1_000;

/// Evenly spaced sample instants over the half-open window `[0, total_time)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    total_time: f64,
    times: Vec<f64>,
}

impl TimeGrid {
    pub fn new(total_time: f64, sample_count: usize) -> Self {
        let step = total_time / sample_count.max(1) as f64;
        Self {
            total_time,
            times: (0..sample_count).map(|i| i as f64 * step).collect(),
        }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn into_times(self) -> Vec<f64> {
        self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn step(&self) -> f64 {
        self.total_time / self.times.len().max(1) as f64
    }
}
