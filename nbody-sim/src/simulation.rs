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
//! The simulation engine
//!
//! A [`Simulation`] owns its particle set exclusively and advances it with a
//! fixed timestep. Each [`step`](Simulation::step) is a strict two-phase
//! pass: all forces are computed from the current positions into a private
//! buffer, then all particles are integrated. Nothing is mutated until every
//! force has been read.
//!
//! The particle count is fixed once a simulation is constructed. There is no
//! reset: a fresh run needs a fresh `Simulation`, or a successful
//! [`reload`](Simulation::reload) which replaces the whole set.

use std::path::Path;

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::force::{Force, Gravity};
use crate::integration::{
    calculate_total_kinetic_energy, calculate_total_momentum, integrate_semi_implicit_euler,
};
use crate::particle::{Particle, ParticleSnapshot};
use crate::persistence;
use crate::scenario;

/// Years represented by one simulation time unit, used for reporting
pub const YEARS_PER_TIME_UNIT: f64 = 3.261539827498732e6;

/// Fixed-timestep N-body engine
#[derive(Debug, Clone)]
pub struct Simulation {
    particles: Vec<Particle>,
    config: SimulationConfig,
    gravity: Gravity,
    forces: Vec<Force>,
    elapsed_time: f64,
    steps_taken: u64,
}

impl Simulation {
    /// Create a simulation from a configuration and an initial particle set
    ///
    /// Fails if the configuration is invalid, if any particle has a mass that
    /// is not positive and finite, or if any position or velocity is not
    /// finite.
    pub fn new(config: SimulationConfig, particles: Vec<Particle>) -> Result<Self> {
        config.validate()?;
        validate_particles(&particles)?;

        if let Some(warning) = config.timestep_warning() {
            log::warn!("{warning}");
        }
        log::debug!(
            "simulation created with {} particles, h = {}, e2 = {}",
            particles.len(),
            config.timestep,
            config.softening_sq
        );

        Ok(Simulation {
            forces: Vec::with_capacity(particles.len()),
            gravity: Gravity::from_config(&config),
            particles,
            config,
            elapsed_time: 0.0,
            steps_taken: 0,
        })
    }

    /// The two-body seed: a heavy body at rest at the origin and a light
    /// body on a bound orbit around it
    pub fn two_body() -> Self {
        let (config, particles) = scenario::two_body();
        // The seed is built from constants that always validate
        Simulation {
            forces: Vec::with_capacity(particles.len()),
            gravity: Gravity::from_config(&config),
            particles,
            config,
            elapsed_time: 0.0,
            steps_taken: 0,
        }
    }

    /// Load a simulation from a state file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let (config, particles) = persistence::load(path)?;
        Simulation::new(config, particles)
    }

    /// Replace this simulation's state with the contents of a file
    ///
    /// The file is parsed and validated completely before anything changes;
    /// on error `self` is left exactly as it was. On success the particle
    /// set, timestep and softening come from the file, and elapsed time and
    /// step count restart at zero.
    pub fn reload(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let (file_config, particles) = persistence::load(path)?;
        let config = self
            .config
            .with_timestep(file_config.timestep)
            .with_softening_sq(file_config.softening_sq);
        *self = Simulation::new(config, particles)?;
        Ok(())
    }

    /// Write the current state to a file
    ///
    /// Saving does not change the simulation.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        persistence::save(path, &self.config, &self.particles)
    }

    /// Advance the simulation by one timestep
    ///
    /// Total over validated states: there is no error outcome. With no
    /// particles only the clock advances.
    pub fn step(&mut self) {
        let dt = self.config.timestep;

        // Phase 1: forces from a frozen snapshot of positions
        self.gravity
            .compute_forces_into(&self.particles, &mut self.forces);

        // Phase 2: integrate, only after every force is known
        integrate_semi_implicit_euler(&mut self.particles, &self.forces, dt);

        self.elapsed_time += dt;
        self.steps_taken += 1;
        log::trace!("step {} complete, t = {}", self.steps_taken, self.elapsed_time);
    }

    /// Advance the simulation by `steps` timesteps
    pub fn run(&mut self, steps: u64) {
        log::debug!("running {} steps over {} particles", steps, self.particles.len());
        for _ in 0..steps {
            self.step();
        }
    }

    /// All particles in identity order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Particle at `index`, if any
    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the particle set is empty
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Display view of every particle, for renderers
    pub fn snapshot(&self) -> Vec<ParticleSnapshot> {
        self.particles.iter().map(Particle::snapshot).collect()
    }

    /// Run parameters
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Timestep `h`
    pub fn timestep(&self) -> f64 {
        self.config.timestep
    }

    /// Softening constant `e²`
    pub fn softening_sq(&self) -> f64 {
        self.config.softening_sq
    }

    /// Accumulated simulation time
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    /// Accumulated simulation time in years
    pub fn elapsed_years(&self) -> f64 {
        self.elapsed_time * YEARS_PER_TIME_UNIT
    }

    /// Number of completed steps
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Total kinetic energy
    pub fn kinetic_energy(&self) -> f64 {
        calculate_total_kinetic_energy(&self.particles)
    }

    /// Total softened potential energy
    pub fn potential_energy(&self) -> f64 {
        self.gravity.potential_energy(&self.particles)
    }

    /// Kinetic plus potential energy
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    /// Total linear momentum
    pub fn total_momentum(&self) -> [f64; 3] {
        calculate_total_momentum(&self.particles)
    }
}

/// Check that every particle is physically usable
pub fn validate_particles(particles: &[Particle]) -> Result<()> {
    for (index, particle) in particles.iter().enumerate() {
        let mass = particle.mass();
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(SimulationError::InvalidMass { index, mass });
        }
        if !particle.position().is_valid() {
            return Err(SimulationError::NonFiniteState {
                index,
                field: "position",
            });
        }
        if !particle.velocity().is_valid() {
            return Err(SimulationError::NonFiniteState {
                index,
                field: "velocity",
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Position, Velocity};

    fn body(mass: f64, x: f64, y: f64, z: f64) -> Particle {
        Particle::new(mass, Position::new(x, y, z), Velocity::zero())
    }

    #[test]
    fn test_new_rejects_zero_mass() {
        let result = Simulation::new(
            SimulationConfig::default(),
            vec![body(1.0, 0.0, 0.0, 0.0), body(0.0, 1.0, 0.0, 0.0)],
        );
        assert!(matches!(
            result,
            Err(SimulationError::InvalidMass { index: 1, .. })
        ));
    }

    #[test]
    fn test_new_rejects_negative_mass() {
        let result = Simulation::new(SimulationConfig::default(), vec![body(-2.0, 0.0, 0.0, 0.0)]);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidMass { index: 0, .. })
        ));
    }

    #[test]
    fn test_new_rejects_non_finite_state() {
        let result = Simulation::new(
            SimulationConfig::default(),
            vec![body(1.0, f64::NAN, 0.0, 0.0)],
        );
        assert!(matches!(
            result,
            Err(SimulationError::NonFiniteState { field: "position", .. })
        ));

        let fast = Particle::new(1.0, Position::zero(), Velocity::new(f64::INFINITY, 0.0, 0.0));
        let result = Simulation::new(SimulationConfig::default(), vec![fast]);
        assert!(matches!(
            result,
            Err(SimulationError::NonFiniteState { field: "velocity", .. })
        ));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = SimulationConfig::default().with_timestep(0.0);
        assert!(matches!(
            Simulation::new(config, Vec::new()),
            Err(SimulationError::InvalidTimestep(_))
        ));
    }

    #[test]
    fn test_two_body_seed() {
        let sim = Simulation::two_body();
        assert_eq!(sim.len(), 2);
        assert_eq!(sim.timestep(), 1.0);
        assert_eq!(sim.softening_sq(), 1e-4);
        assert_eq!(sim.elapsed_time(), 0.0);
        assert!(validate_particles(sim.particles()).is_ok());
    }

    #[test]
    fn test_step_advances_clock() {
        let mut sim = Simulation::new(SimulationConfig::new(0.25, 1e-4), Vec::new()).unwrap();
        sim.step();
        sim.step();
        assert_eq!(sim.elapsed_time(), 0.5);
        assert_eq!(sim.steps_taken(), 2);
        assert_eq!(sim.elapsed_years(), 0.5 * YEARS_PER_TIME_UNIT);
    }

    #[test]
    fn test_step_attracts_pair() {
        let mut sim = Simulation::new(
            SimulationConfig::new(0.01, 1e-4),
            vec![body(1.0, -1.0, 0.0, 0.0), body(1.0, 1.0, 0.0, 0.0)],
        )
        .unwrap();
        sim.step();
        let left = sim.particle(0).unwrap();
        let right = sim.particle(1).unwrap();
        assert!(left.velocity().dx() > 0.0);
        assert!(right.velocity().dx() < 0.0);
        assert!(left.position().x() > -1.0);
        assert!(right.position().x() < 1.0);
    }

    #[test]
    fn test_step_matches_hand_computation() {
        let config = SimulationConfig::new(0.5, 1e-4);
        let mut sim = Simulation::new(
            config,
            vec![body(2.0, 0.0, 0.0, 0.0), body(1.0, 1.0, 0.0, 0.0)],
        )
        .unwrap();
        sim.step();

        let f = 2.0 / (1.0_f64 + 1e-4).powf(1.5);
        let v0 = 0.5 * f / 2.0;
        let v1 = -0.5 * f;
        assert!((sim.particles()[0].velocity().dx() - v0).abs() < 1e-12);
        assert!((sim.particles()[1].velocity().dx() - v1).abs() < 1e-12);
        assert!((sim.particles()[0].position().x() - 0.5 * v0).abs() < 1e-12);
        assert!((sim.particles()[1].position().x() - (1.0 + 0.5 * v1)).abs() < 1e-12);
    }

    #[test]
    fn test_run_equals_repeated_step() {
        let mut a = Simulation::two_body();
        let mut b = Simulation::two_body();
        a.run(25);
        for _ in 0..25 {
            b.step();
        }
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.steps_taken(), 25);
    }

    #[test]
    fn test_snapshot_follows_particles() {
        let sim = Simulation::two_body();
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].position, sim.particles()[1].position().as_array());
    }

    #[test]
    fn test_energy_diagnostics() {
        let sim = Simulation::new(
            SimulationConfig::default(),
            vec![body(1.0, 0.0, 0.0, 0.0), body(1.0, 1.0, 0.0, 0.0)],
        )
        .unwrap();
        assert_eq!(sim.kinetic_energy(), 0.0);
        assert!(sim.potential_energy() < 0.0);
        assert_eq!(sim.total_energy(), sim.potential_energy());
        assert_eq!(sim.total_momentum(), [0.0, 0.0, 0.0]);
    }
}
