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
//! Runtime simulation configuration
//!
//! Every tunable of the physics kernel and the driver is an explicit field
//! here rather than a compile-time constant, so property tests can exercise
//! varied parameter sets and hosts can size the population and worker pool
//! at startup. Defaults reproduce the classic 900x900, 2500-particle run.

use thiserror::Error;

use crate::pool::default_worker_count;

/// Validation failures for [`SimConfig`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Population size of zero leaves nothing to simulate
    #[error("population must be nonzero")]
    EmptyPopulation,

    /// Friction constants at or below 1 would stop or reverse motion outright
    #[error("friction constant must be greater than 1, got {0}")]
    InvalidFriction(f32),

    /// A parameter that must be strictly positive and finite was not
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive {
        /// Field name as written in [`SimConfig`]
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// A force magnitude that must be non-negative and finite was not
    #[error("{name} must be non-negative and finite, got {value}")]
    NegativeForce {
        /// Field name as written in [`SimConfig`]
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Worker pools need at least one thread
    #[error("worker count must be nonzero")]
    NoWorkers,
}

/// Configuration for a simulation run
///
/// Force magnitudes (`attraction_force`, `center_pull`, `center_push`,
/// `wrap_kick`) may be zero to disable the corresponding term; geometric
/// parameters must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Number of particles created at startup; fixed for the run
    pub population: usize,
    /// Initial viewport width in pixels
    pub width: f32,
    /// Initial viewport height in pixels
    pub height: f32,
    /// Interaction range; pairs farther apart exert no force on each other
    pub attraction_radius: f32,
    /// Scale applied to every rule coefficient in the interaction table
    pub attraction_force: f32,
    /// Friction constant; each frame velocity decays by `1 - 1/friction`
    pub friction: f32,
    /// Radius shared by every particle
    pub particle_radius: f32,
    /// Mass shared by every particle
    pub mass: f32,
    /// Magnitude of the constant pull toward the viewport center
    pub center_pull: f32,
    /// Magnitude of the outward push applied inside `center_inner_radius`
    pub center_push: f32,
    /// Distance from the center below which the outward push applies
    pub center_inner_radius: f32,
    /// Velocity nudge applied along the wrapped axis on a boundary wrap
    pub wrap_kick: f32,
    /// Lower clamp on pair distances before dividing, to avoid singularities
    pub min_distance: f32,
    /// Worker thread count for the parallel update phase
    pub workers: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            population: 2500,
            width: 900.0,
            height: 900.0,
            attraction_radius: 50.0,
            attraction_force: 0.001,
            friction: 99.0,
            particle_radius: 3.0,
            mass: 1.0,
            center_pull: 0.002,
            center_push: 0.004,
            center_inner_radius: 200.0,
            wrap_kick: 1.25,
            min_distance: 1e-3,
            workers: default_worker_count(),
        }
    }
}

impl SimConfig {
    /// Set the population size
    pub fn with_population(mut self, population: usize) -> Self {
        self.population = population;
        self
    }

    /// Set the viewport dimensions
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the interaction range
    pub fn with_attraction_radius(mut self, radius: f32) -> Self {
        self.attraction_radius = radius;
        self
    }

    /// Set the interaction force scale
    pub fn with_attraction_force(mut self, force: f32) -> Self {
        self.attraction_force = force;
        self
    }

    /// Set the friction constant
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Set the shared particle radius
    pub fn with_particle_radius(mut self, radius: f32) -> Self {
        self.particle_radius = radius;
        self
    }

    /// Set the centering policy: inward pull, outward push, and the inner
    /// radius inside which the push applies
    pub fn with_centering(mut self, pull: f32, push: f32, inner_radius: f32) -> Self {
        self.center_pull = pull;
        self.center_push = push;
        self.center_inner_radius = inner_radius;
        self
    }

    /// Set the boundary wrap velocity nudge
    pub fn with_wrap_kick(mut self, kick: f32) -> Self {
        self.wrap_kick = kick;
        self
    }

    /// Set the worker thread count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Per-frame velocity retention factor, `1 - 1/friction`
    pub fn friction_decay(&self) -> f32 {
        1.0 - 1.0 / self.friction
    }

    /// Check every field against its domain
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if !(self.friction > 1.0) || !self.friction.is_finite() {
            return Err(ConfigError::InvalidFriction(self.friction));
        }
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("attraction_radius", self.attraction_radius),
            ("particle_radius", self.particle_radius),
            ("mass", self.mass),
            ("center_inner_radius", self.center_inner_radius),
            ("min_distance", self.min_distance),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        for (name, value) in [
            ("attraction_force", self.attraction_force),
            ("center_pull", self.center_pull),
            ("center_push", self.center_push),
            ("wrap_kick", self.wrap_kick),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::NegativeForce { name, value });
            }
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_matches_classic_run() {
        let config = SimConfig::default();
        assert_eq!(config.population, 2500);
        assert_eq!(config.width, 900.0);
        assert_eq!(config.height, 900.0);
        assert_eq!(config.attraction_radius, 50.0);
        assert_eq!(config.friction, 99.0);
        assert_eq!(config.particle_radius, 3.0);
    }

    #[test]
    fn test_empty_population_rejected() {
        let config = SimConfig::default().with_population(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyPopulation));
    }

    #[test]
    fn test_friction_at_or_below_one_rejected() {
        for friction in [1.0, 0.5, 0.0, -3.0, f32::NAN] {
            let config = SimConfig::default().with_friction(friction);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidFriction(_))
            ));
        }
    }

    #[test]
    fn test_nonpositive_geometry_rejected() {
        let config = SimConfig::default().with_particle_radius(0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                name: "particle_radius",
                ..
            })
        ));

        let config = SimConfig::default().with_viewport(-900.0, 900.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "width", .. })
        ));
    }

    #[test]
    fn test_zero_forces_allowed() {
        let config = SimConfig::default()
            .with_attraction_force(0.0)
            .with_centering(0.0, 0.0, 200.0)
            .with_wrap_kick(0.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_negative_force_rejected() {
        let config = SimConfig::default().with_attraction_force(-0.001);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeForce {
                name: "attraction_force",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = SimConfig::default().with_workers(0);
        assert_eq!(config.validate(), Err(ConfigError::NoWorkers));
    }

    #[test]
    fn test_friction_decay() {
        let config = SimConfig::default().with_friction(100.0);
        assert!((config.friction_decay() - 0.99).abs() < 1e-6);
    }
}
