//! Splits the folded samples into per-leg trace segments for the
//! amplitude-vs-position view.

use super::sweep::{SweepLeg, SweepSample};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TracePoint {
    /// Sweep position.
    pub x: f64,
    /// Input amplitude.
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceSegment {
    pub kind: SweepLeg,
    pub cycle: u64,
    /// Set on the earliest segment of each kind so a renderer labels it once.
    pub is_first_of_kind: bool,
    pub points: Vec<TracePoint>,
}

impl TraceSegment {
    fn open(sample: &SweepSample, y: f64) -> Self {
        Self {
            kind: sample.leg,
            cycle: sample.cycle,
            is_first_of_kind: false,
            points: vec![TracePoint {
                x: sample.position,
                y,
            }],
        }
    }

    fn continues(&self, sample: &SweepSample) -> bool {
        self.cycle == sample.cycle && self.kind == sample.leg
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Groups consecutive samples that share a cycle and a leg.
///
/// Only non-empty runs are emitted, in time order, so concatenating the
/// segments' points reproduces the input pairing exactly.
pub fn segment_trace(folded: &[SweepSample], signal: &[f64]) -> Vec<TraceSegment> {
    debug_assert_eq!(folded.len(), signal.len());

    let mut segments = folded.iter().zip(signal).fold(
        Vec::<TraceSegment>::new(),
        |mut segments, (sample, &y)| {
            match segments.last_mut().filter(|current| current.continues(sample)) {
                Some(current) => current.points.push(TracePoint {
                    x: sample.position,
                    y,
                }),
                None => segments.push(TraceSegment::open(sample, y)),
            }
            segments
        },
    );

    for kind in SweepLeg::ALL {
        if let Some(first) = segments.iter_mut().find(|s| s.kind == kind) {
            first.is_first_of_kind = true;
        }
    }
    segments
}
