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
//! Time integration and conserved-quantity diagnostics
//!
//! # Algorithm
//!
//! Semi-implicit (symplectic) Euler:
//!
//! ```text
//! v(t + h) = v(t) + h * F(t) / m
//! x(t + h) = x(t) + h * v(t + h)
//! ```
//!
//! Position advances with the *updated* velocity. Using `v(t)` instead would
//! be explicit Euler, whose orbits spiral outward; the symplectic form keeps
//! the energy error bounded over long runs.
//!
//! Integration runs strictly after every force of the step has been computed.
//! The force buffer is a separate allocation, so no position is mutated while
//! another particle's force still reads it.

use crate::components::{Position, Velocity};
use crate::force::Force;
use crate::particle::Particle;

/// Advance every particle by one semi-implicit Euler step
///
/// `forces[i]` is the total force on `particles[i]` at the start of the step.
///
/// # Panics
///
/// Panics if `forces` and `particles` differ in length.
pub fn integrate_semi_implicit_euler(particles: &mut [Particle], forces: &[Force], dt: f64) {
    assert_eq!(
        particles.len(),
        forces.len(),
        "Force buffer must be parallel to the particle set"
    );

    for (particle, force) in particles.iter_mut().zip(forces) {
        let h_inv_mass = dt / particle.mass();

        // v' = v + h*F/m
        let vel = particle.velocity();
        let new_velocity = Velocity::new(
            vel.dx() + h_inv_mass * force.fx,
            vel.dy() + h_inv_mass * force.fy,
            vel.dz() + h_inv_mass * force.fz,
        );

        // x' = x + h*v'
        let pos = particle.position();
        let new_position = Position::new(
            pos.x() + dt * new_velocity.dx(),
            pos.y() + dt * new_velocity.dy(),
            pos.z() + dt * new_velocity.dz(),
        );

        particle.set_velocity(new_velocity);
        particle.set_position(new_position);
    }
}

/// Kinetic energy of a single particle
///
/// KE = 0.5 * m * v²
pub fn calculate_kinetic_energy(particle: &Particle) -> f64 {
    let v = particle.velocity().magnitude();
    0.5 * particle.mass() * v * v
}

/// Total kinetic energy of a particle set
pub fn calculate_total_kinetic_energy(particles: &[Particle]) -> f64 {
    particles.iter().map(calculate_kinetic_energy).sum()
}

/// Total linear momentum Σ m v
pub fn calculate_total_momentum(particles: &[Particle]) -> [f64; 3] {
    let mut total = [0.0; 3];
    for particle in particles {
        let m = particle.mass();
        let v = particle.velocity();
        total[0] += m * v.dx();
        total[1] += m * v.dy();
        total[2] += m * v.dz();
    }
    total
}
