use crate::dsp::DEFAULT_SAMPLE_COUNT;
use crate::dsp::engine::{EngineConfig, clamp_sample_count};
use crate::dsp::params::Parameters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeSettings {
    pub parameters: Parameters,
    pub sample_count: usize,
}

impl Default for ScopeSettings {
    fn default() -> Self {
        Self {
            parameters: Parameters::default(),
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl ScopeSettings {
    pub fn sanitize(&mut self) {
        self.parameters = self.parameters.clamped();
        self.sample_count = clamp_sample_count(self.sample_count);
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            sample_count: self.sample_count,
        }
    }
}
