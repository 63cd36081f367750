use crate::dsp::params::{Parameters, PhaseUnit, Waveform};
use anyhow::{Context, Result, anyhow, ensure};
use std::f64::consts::TAU;
use std::ops::RangeInclusive;
use std::str::FromStr;

pub const AMPLITUDE_RANGE: RangeInclusive<f64> = 0.0..=10.0;
pub const FREQUENCY_FACTOR_RANGE: RangeInclusive<f64> = 0.1..=10.0;
pub const PHASE_DEGREES_RANGE: RangeInclusive<f64> = -360.0..=360.0;
pub const PHASE_RADIANS_RANGE: RangeInclusive<f64> = -TAU..=TAU;
pub const SWEEP_FACTOR_RANGE: RangeInclusive<f64> = 0.05..=5.0;

/// Phase presets offered next to the phase control, in degrees.
pub const QUICK_PHASES_DEGREES: [f64; 9] =
    [-90.0, -60.0, -45.0, -30.0, 0.0, 30.0, 45.0, 60.0, 90.0];

#[inline]
fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
    value.clamp(*range.start(), *range.end())
}

pub fn phase_range(unit: PhaseUnit) -> RangeInclusive<f64> {
    match unit {
        PhaseUnit::Degrees => PHASE_DEGREES_RANGE,
        PhaseUnit::Radians => PHASE_RADIANS_RANGE,
    }
}

impl Parameters {
    /// Pins every control to the range its widget allows.
    pub fn clamped(mut self) -> Self {
        self.amplitude = clamp_to(self.amplitude, &AMPLITUDE_RANGE);
        self.angular_frequency_factor =
            clamp_to(self.angular_frequency_factor, &FREQUENCY_FACTOR_RANGE);
        self.phase = clamp_to(self.phase, &phase_range(self.phase_unit));
        self.forward_factor = clamp_to(self.forward_factor, &SWEEP_FACTOR_RANGE);
        self.return_factor = clamp_to(self.return_factor, &SWEEP_FACTOR_RANGE);
        self
    }

    /// Re-expresses the phase in `unit`, keeping the physical angle.
    pub fn with_phase_unit(mut self, unit: PhaseUnit) -> Self {
        self.phase = self.phase_unit.convert(self.phase, unit);
        self.phase_unit = unit;
        self.clamped()
    }

    pub fn with_phase_degrees(mut self, degrees: f64) -> Self {
        self.phase = PhaseUnit::Degrees.convert(degrees, self.phase_unit);
        self.clamped()
    }
}

/// A single edit coming from a control surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterChange {
    Amplitude(f64),
    FrequencyFactor(f64),
    /// Phase in the snapshot's current unit.
    Phase(f64),
    PhaseUnit(PhaseUnit),
    Waveform(Waveform),
    ForwardFactor(f64),
    ReturnFactor(f64),
    /// One of [`QUICK_PHASES_DEGREES`].
    QuickPhase(f64),
}

impl ParameterChange {
    pub fn apply(self, params: &mut Parameters) {
        *params = match self {
            Self::Amplitude(v) => Parameters {
                amplitude: v,
                ..*params
            },
            Self::FrequencyFactor(v) => Parameters {
                angular_frequency_factor: v,
                ..*params
            },
            Self::Phase(v) => Parameters {
                phase: v,
                ..*params
            },
            Self::PhaseUnit(unit) => params.with_phase_unit(unit),
            Self::Waveform(waveform) => Parameters {
                waveform,
                ..*params
            },
            Self::ForwardFactor(v) => Parameters {
                forward_factor: v,
                ..*params
            },
            Self::ReturnFactor(v) => Parameters {
                return_factor: v,
                ..*params
            },
            Self::QuickPhase(degrees) => params.with_phase_degrees(degrees),
        }
        .clamped();
    }
}

fn parse_number(name: &str, value: &str) -> Result<f64> {
    let v: f64 = value
        .parse()
        .with_context(|| format!("invalid number '{value}' for {name}"))?;
    ensure!(v.is_finite(), "{name} must be finite, got {value}");
    Ok(v)
}

impl FromStr for ParameterChange {
    type Err = anyhow::Error;

    /// Parses `"<control> <value>"`, e.g. `amplitude 2.5` or `unit rad`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(anyhow!("expected '<control> <value>', got '{}'", s.trim()));
        };

        let change = match name.to_ascii_lowercase().as_str() {
            "amplitude" | "amp" => Self::Amplitude(parse_number(name, value)?),
            "frequency" | "x" => Self::FrequencyFactor(parse_number(name, value)?),
            "phase" | "phi" => Self::Phase(parse_number(name, value)?),
            "unit" => Self::PhaseUnit(value.parse()?),
            "waveform" | "func" => Self::Waveform(value.parse()?),
            "forward" | "tqt" => Self::ForwardFactor(parse_number(name, value)?),
            "return" | "tqn" => Self::ReturnFactor(parse_number(name, value)?),
            "quick" => {
                let degrees = parse_number(name, value)?;
                ensure!(
                    QUICK_PHASES_DEGREES.contains(&degrees),
                    "no quick phase preset at {degrees} degrees"
                );
                Self::QuickPhase(degrees)
            }
            other => return Err(anyhow!("unknown control '{other}'")),
        };
        Ok(change)
    }
}
