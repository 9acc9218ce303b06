// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Simulation parameters
//!
//! Physical constants are simulation units, not SI. Keeping them here rather
//! than as literals in the force law lets tests substitute values without
//! touching the integration code.

use crate::error::{Result, SimulationError};
use crate::force::{DEFAULT_SOFTENING_SQ, GRAVITATIONAL_CONSTANT};

/// Default timestep used by the two-body seed
pub const DEFAULT_TIMESTEP: f64 = 1.0;

/// Particle count below which the force pass always runs sequentially
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Parameters held constant for the life of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Fixed integration timestep `h`
    pub timestep: f64,
    /// Softening constant `e²` added to the squared separation
    pub softening_sq: f64,
    /// Gravitational constant `G`
    pub gravitational_constant: f64,
    /// Minimum particle count for the parallel force pass
    pub parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            timestep: DEFAULT_TIMESTEP,
            softening_sq: DEFAULT_SOFTENING_SQ,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration with the given timestep and softening
    pub fn new(timestep: f64, softening_sq: f64) -> Self {
        SimulationConfig {
            timestep,
            softening_sq,
            ..Default::default()
        }
    }

    /// Set the timestep
    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set the softening constant `e²`
    pub fn with_softening_sq(mut self, softening_sq: f64) -> Self {
        self.softening_sq = softening_sq;
        self
    }

    /// Set the gravitational constant
    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    /// Set the particle count at which the force pass goes parallel
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Check that every parameter is usable
    ///
    /// Softening must be strictly positive: it is what keeps coincident
    /// particles from producing a division by zero.
    pub fn validate(&self) -> Result<()> {
        if !(self.timestep > 0.0 && self.timestep.is_finite()) {
            return Err(SimulationError::InvalidTimestep(self.timestep));
        }
        if !(self.softening_sq > 0.0 && self.softening_sq.is_finite()) {
            return Err(SimulationError::InvalidSoftening(self.softening_sq));
        }
        if !(self.gravitational_constant >= 0.0 && self.gravitational_constant.is_finite()) {
            return Err(SimulationError::InvalidGravitationalConstant(
                self.gravitational_constant,
            ));
        }
        Ok(())
    }

    /// Advisory message for timesteps likely to behave poorly
    ///
    /// Returns `None` for ordinary values. A warning never makes a config
    /// invalid.
    pub fn timestep_warning(&self) -> Option<String> {
        let dt = self.timestep;
        if dt < 1e-9 {
            Some(format!(
                "timestep {dt} is extremely small and may lose precision over long runs"
            ))
        } else if dt > 1.0 {
            Some(format!(
                "timestep {dt} is large and may make close encounters unstable"
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.timestep, 1.0);
        assert_eq!(config.softening_sq, 1e-4);
        assert_eq!(config.gravitational_constant, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SimulationConfig::new(0.01, 1e-3)
            .with_gravitational_constant(2.0)
            .with_parallel_threshold(8);
        assert_eq!(config.timestep, 0.01);
        assert_eq!(config.softening_sq, 1e-3);
        assert_eq!(config.gravitational_constant, 2.0);
        assert_eq!(config.parallel_threshold, 8);
    }

    #[test]
    fn test_rejects_bad_timestep() {
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SimulationConfig::default().with_timestep(dt);
            assert!(matches!(
                config.validate(),
                Err(SimulationError::InvalidTimestep(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_softening() {
        for e2 in [0.0, -1e-4, f64::NAN] {
            let config = SimulationConfig::default().with_softening_sq(e2);
            assert!(matches!(
                config.validate(),
                Err(SimulationError::InvalidSoftening(_))
            ));
        }
    }

    #[test]
    fn test_rejects_negative_g() {
        let config = SimulationConfig::default().with_gravitational_constant(-1.0);
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidGravitationalConstant(_))
        ));
    }

    #[test]
    fn test_timestep_warnings() {
        assert!(SimulationConfig::default().timestep_warning().is_none());
        let small = SimulationConfig::default().with_timestep(1e-10);
        assert!(small.timestep_warning().unwrap().contains("extremely small"));
        let large = SimulationConfig::default().with_timestep(2.0);
        assert!(large.timestep_warning().unwrap().contains("large"));
    }
}
