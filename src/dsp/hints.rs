//! Axis and label suggestions for whatever renders a computed frame.

use super::params::{DerivedQuantities, Parameters};
use super::sweep::SweepLeg;
use serde::Serialize;

const MIN_TICK_STEP: f64 = 1.0e-6;
const AMPLITUDE_TICKS_PER_HALF: f64 = 4.0;
const MINOR_TICKS_PER_MAJOR: f64 = 5.0;

const SWEEP_AXIS_MARGIN: f64 = 0.05;
const SWEEP_MAJOR_STEP: f64 = 0.2;
const SWEEP_MINOR_STEP: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisHint {
    pub min: f64,
    pub max: f64,
    pub major_step: f64,
    pub minor_step: f64,
}

impl AxisHint {
    fn symmetric(limit: f64) -> Self {
        let major_step = (limit / AMPLITUDE_TICKS_PER_HALF).max(MIN_TICK_STEP);
        Self {
            min: -limit,
            max: limit,
            major_step,
            minor_step: major_step / MINOR_TICKS_PER_MAJOR,
        }
    }

    fn sweep() -> Self {
        Self {
            min: -SWEEP_AXIS_MARGIN,
            max: 1.0 + SWEEP_AXIS_MARGIN,
            major_step: SWEEP_MAJOR_STEP,
            minor_step: SWEEP_MINOR_STEP,
        }
    }
}

/// Midpoint of the first leg of a kind, for a "Fwd"/"Return" caption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegAnnotation {
    pub kind: SweepLeg,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayHints {
    pub amplitude_axis: AxisHint,
    pub sweep_axis: AxisHint,
    pub annotations: Vec<LegAnnotation>,
    /// Sweep cycles started inside the window.
    pub cycle_count: usize,
    pub input_title: String,
    pub sweep_title: String,
    pub legend: String,
}

impl DisplayHints {
    pub fn new(params: &Parameters, derived: &DerivedQuantities) -> Self {
        let annotations = [
            (SweepLeg::Forward, derived.forward_duration / 2.0),
            (
                SweepLeg::Return,
                derived.forward_duration + derived.return_duration / 2.0,
            ),
        ]
        .into_iter()
        .filter(|&(_, time)| time < derived.total_time)
        .map(|(kind, time)| LegAnnotation { kind, time })
        .collect();

        Self {
            amplitude_axis: AxisHint::symmetric(derived.amplitude_limit),
            sweep_axis: AxisHint::sweep(),
            annotations,
            cycle_count: (derived.total_time / derived.sweep_period).ceil() as usize,
            input_title: format!("Input Signal: y = A{}(wt+phi)", params.waveform),
            sweep_title: format!(
                "Horiz. Sweep (Tqt={:.3}s, Tqn={:.3}s)",
                derived.forward_duration, derived.return_duration
            ),
            legend: format!(
                "A = {:.2}, x = {:.2}\nω = {:.2} rad/s\nφ = {:.1}°\nfunc = {}",
                params.amplitude,
                params.angular_frequency_factor,
                derived.omega,
                derived.phase_degrees,
                params.waveform
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::params::Waveform;
    use approx::assert_relative_eq;

    fn hints(params: Parameters) -> DisplayHints {
        DisplayHints::new(&params, &params.normalized().derived)
    }

    #[test]
    fn amplitude_axis_follows_limit() {
        let h = hints(Parameters {
            amplitude: 2.0,
            ..Default::default()
        });
        assert_relative_eq!(h.amplitude_axis.max, 2.2, epsilon = 1e-12);
        assert_relative_eq!(h.amplitude_axis.min, -2.2, epsilon = 1e-12);
        assert_relative_eq!(h.amplitude_axis.major_step, 0.55, epsilon = 1e-12);
        assert_relative_eq!(h.amplitude_axis.minor_step, 0.11, epsilon = 1e-12);
    }

    #[test]
    fn annotations_mark_first_leg_midpoints() {
        let h = hints(Parameters::default());
        assert_eq!(h.annotations.len(), 2);
        assert_eq!(h.annotations[0].kind, SweepLeg::Forward);
        assert_relative_eq!(h.annotations[0].time, 0.5);
        assert_eq!(h.annotations[1].kind, SweepLeg::Return);
        assert_relative_eq!(h.annotations[1].time, 1.125);
        assert_eq!(h.cycle_count, 4);
    }

    #[test]
    fn labels_describe_snapshot() {
        let h = hints(Parameters {
            waveform: Waveform::Cosine,
            phase: 45.0,
            ..Default::default()
        });
        assert_eq!(h.input_title, "Input Signal: y = Acos(wt+phi)");
        assert_eq!(h.sweep_title, "Horiz. Sweep (Tqt=1.000s, Tqn=0.250s)");
        assert!(h.legend.contains("φ = 45.0°"));
        assert!(h.legend.contains("ω = 6.28 rad/s"));
        assert!(h.legend.ends_with("func = cos"));
    }
}
