//! Parameter snapshot and the quantities the pipeline derives from it.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Lower bound for the angular frequency factor before it divides the period.
pub const FREQUENCY_FACTOR_FLOOR: f64 = 1.0e-6;
/// Shortest forward or return leg, in seconds.
pub const DURATION_FLOOR: f64 = 0.001;
/// Shortest display window, in seconds.
pub const WINDOW_FLOOR: f64 = 0.1;

const AMPLITUDE_HEADROOM: f64 = 1.1;
const AMPLITUDE_LIMIT_FLOOR: f64 = 0.5;

// Window spans at least this many sweep cycles, input cycles and forward legs.
const WINDOW_SWEEP_CYCLES: f64 = 3.0;
const WINDOW_INPUT_CYCLES: f64 = 5.0;
const WINDOW_FORWARD_LEGS: f64 = 1.5;

macro_rules! param_enum {
    ($(#[$attr:meta])* $vis:vis enum $name:ident { $($(#[$var_attr:meta])* $variant:ident => $label:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
        #[serde(rename_all = "snake_case")] $(#[$attr])*
        $vis enum $name { $($(#[$var_attr])* $variant,)+ }
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self { $(Self::$variant => $label),+ })
            }
        }
        impl std::str::FromStr for $name {
            type Err = anyhow::Error;
            // Accepts the short label or the serialized name.
            fn from_str(s: &str) -> anyhow::Result<Self> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| {
                        v.to_string().eq_ignore_ascii_case(s)
                            || format!("{v:?}").eq_ignore_ascii_case(s)
                    })
                    .ok_or_else(|| anyhow::anyhow!("unknown {} '{s}'", stringify!($name)))
            }
        }
    };
}

param_enum!(pub enum PhaseUnit { #[default] Degrees => "deg", Radians => "rad" });
param_enum!(pub enum Waveform { #[default] Sine => "sin", Cosine => "cos" });

impl PhaseUnit {
    /// Re-expresses `value` (in `self`) in `target` units.
    pub fn convert(self, value: f64, target: PhaseUnit) -> f64 {
        match (self, target) {
            (Self::Degrees, Self::Radians) => value.to_radians(),
            (Self::Radians, Self::Degrees) => value.to_degrees(),
            _ => value,
        }
    }

    pub fn to_radians(self, value: f64) -> f64 {
        self.convert(value, Self::Radians)
    }
}

impl Waveform {
    #[inline]
    pub fn eval(self, arg: f64) -> f64 {
        match self {
            Self::Sine => arg.sin(),
            Self::Cosine => arg.cos(),
        }
    }
}

/// One snapshot of the user-facing controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub amplitude: f64,
    /// Scales the base angular frequency: `omega = factor * PI`.
    pub angular_frequency_factor: f64,
    pub phase: f64,
    pub phase_unit: PhaseUnit,
    pub waveform: Waveform,
    /// Forward leg length in input periods.
    pub forward_factor: f64,
    /// Return leg length in input periods.
    pub return_factor: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            angular_frequency_factor: 2.0,
            phase: 0.0,
            phase_unit: PhaseUnit::Degrees,
            waveform: Waveform::Sine,
            forward_factor: 1.0,
            return_factor: 0.25,
        }
    }
}

impl Parameters {
    pub fn is_finite(&self) -> bool {
        [
            self.amplitude,
            self.angular_frequency_factor,
            self.phase,
            self.forward_factor,
            self.return_factor,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    pub fn phase_radians(&self) -> f64 {
        self.phase_unit.to_radians(self.phase)
    }

    /// Floors every quantity that is later divided by or used as a duration.
    ///
    /// Never fails for finite input; degenerate factors collapse onto the
    /// floors instead.
    pub fn normalized(&self) -> NormalizedParameters {
        let input_period = 2.0 / self.angular_frequency_factor.max(FREQUENCY_FACTOR_FLOOR);
        let forward_duration = (self.forward_factor * input_period).max(DURATION_FLOOR);
        let return_duration = (self.return_factor * input_period).max(DURATION_FLOOR);
        let sweep_period = forward_duration + return_duration;
        let total_time = WINDOW_FLOOR
            .max(WINDOW_SWEEP_CYCLES * sweep_period)
            .max(WINDOW_INPUT_CYCLES * input_period)
            .max(WINDOW_FORWARD_LEGS * forward_duration);

        NormalizedParameters {
            amplitude: self.amplitude,
            waveform: self.waveform,
            derived: DerivedQuantities {
                omega: self.angular_frequency_factor * PI,
                phase_degrees: self.phase_unit.convert(self.phase, PhaseUnit::Degrees),
                phase_radians: self.phase_radians(),
                forward_duration,
                return_duration,
                sweep_period,
                input_period,
                total_time,
                amplitude_limit: (self.amplitude.abs() * AMPLITUDE_HEADROOM)
                    .max(AMPLITUDE_LIMIT_FLOOR),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedQuantities {
    pub omega: f64,
    pub phase_degrees: f64,
    pub phase_radians: f64,
    pub forward_duration: f64,
    pub return_duration: f64,
    pub sweep_period: f64,
    pub input_period: f64,
    pub total_time: f64,
    /// Suggested symmetric bound for the amplitude axis.
    pub amplitude_limit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedParameters {
    pub amplitude: f64,
    pub waveform: Waveform,
    pub derived: DerivedQuantities,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_snapshot_derives_reference_timings() {
        let d = Parameters::default().normalized().derived;
        assert_relative_eq!(d.input_period, 1.0);
        assert_relative_eq!(d.forward_duration, 1.0);
        assert_relative_eq!(d.return_duration, 0.25);
        assert_relative_eq!(d.sweep_period, 1.25);
        assert_relative_eq!(d.total_time, 5.0);
        assert_relative_eq!(d.omega, 2.0 * PI);
        assert_relative_eq!(d.amplitude_limit, 1.1);
    }

    #[test]
    fn degrees_are_converted_to_radians() {
        let params = Parameters {
            phase: 90.0,
            ..Default::default()
        };
        let d = params.normalized().derived;
        assert_relative_eq!(d.phase_radians, PI / 2.0);
        assert_eq!(d.phase_degrees, 90.0);
    }

    #[test]
    fn radians_pass_through_untouched() {
        let params = Parameters {
            phase: 1.25,
            phase_unit: PhaseUnit::Radians,
            ..Default::default()
        };
        let d = params.normalized().derived;
        assert_eq!(d.phase_radians, 1.25);
        assert_relative_eq!(d.phase_degrees, 1.25f64.to_degrees());
    }

    #[test]
    fn degenerate_factors_collapse_onto_floors() {
        let params = Parameters {
            angular_frequency_factor: 0.0,
            forward_factor: -3.0,
            return_factor: 0.0,
            ..Default::default()
        };
        let d = params.normalized().derived;
        assert_relative_eq!(d.input_period, 2.0 / FREQUENCY_FACTOR_FLOOR);
        assert_eq!(d.forward_duration, DURATION_FLOOR);
        assert_eq!(d.return_duration, DURATION_FLOOR);
        assert!(d.sweep_period > 0.0);
        assert!(d.total_time >= WINDOW_FLOOR);
    }

    #[test]
    fn window_covers_several_cycles() {
        for &(fwd, ret) in &[(0.05, 0.05), (5.0, 5.0), (0.05, 5.0), (5.0, 0.05)] {
            let params = Parameters {
                forward_factor: fwd,
                return_factor: ret,
                ..Default::default()
            };
            let d = params.normalized().derived;
            assert!(d.total_time >= 3.0 * d.sweep_period - 1e-12);
            assert!(d.total_time >= 5.0 * d.input_period - 1e-12);
        }
    }

    #[test]
    fn amplitude_limit_has_floor_and_uses_magnitude() {
        let quiet = Parameters {
            amplitude: 0.0,
            ..Default::default()
        };
        assert_eq!(quiet.normalized().derived.amplitude_limit, 0.5);
        let inverted = Parameters {
            amplitude: -4.0,
            ..Default::default()
        };
        assert_relative_eq!(inverted.normalized().derived.amplitude_limit, 4.4);
    }

    #[test]
    fn enums_parse_from_labels_and_names() {
        assert_eq!("cos".parse::<Waveform>().unwrap(), Waveform::Cosine);
        assert_eq!("Sine".parse::<Waveform>().unwrap(), Waveform::Sine);
        assert_eq!(" RAD ".parse::<PhaseUnit>().unwrap(), PhaseUnit::Radians);
        assert_eq!("degrees".parse::<PhaseUnit>().unwrap(), PhaseUnit::Degrees);
        assert!("square".parse::<Waveform>().is_err());
    }

    #[test]
    fn non_finite_fields_are_detected() {
        assert!(Parameters::default().is_finite());
        let bad = Parameters {
            phase: f64::NAN,
            ..Default::default()
        };
        assert!(!bad.is_finite());
    }
}
