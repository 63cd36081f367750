//! Analog oscilloscope display simulation: a sinusoidal input swept by a
//! triangular time base, split into forward and retrace segments.

pub mod dsp;
pub mod export;
pub mod session;
pub mod settings;
