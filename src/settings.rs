// Settings loading and control-surface clamping.

mod controls;
mod data;
mod loader;

pub use controls::{
    AMPLITUDE_RANGE, FREQUENCY_FACTOR_RANGE, ParameterChange, QUICK_PHASES_DEGREES,
    SWEEP_FACTOR_RANGE, phase_range,
};
pub use data::ScopeSettings;
pub use loader::{default_settings_path, load_from, load_or_default};
