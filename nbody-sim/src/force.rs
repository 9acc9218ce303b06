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
//! Softened Newtonian gravity between point masses
//!
//! Every particle attracts every other particle. The force on particle `i`
//! is the sum over all `j != i` of
//!
//! **F_i = G * m_i * m_j * (x_j - x_i) / (|x_j - x_i|² + e²)^(3/2)**
//!
//! The softening term `e²` keeps the force finite when two particles
//! coincide or nearly coincide.
//!
//! # Cost
//!
//! The evaluation is a full pairwise sum, O(n²) per step, with no spatial
//! partitioning. Particle counts are small (two to a few thousand).
//!
//! # Parallel Computation
//!
//! Each `F_i` reads only a frozen snapshot of positions and masses and writes
//! only its own slot in the output buffer, so with the `parallel` feature the
//! per-particle sums are mapped across the rayon pool and joined before the
//! caller sees the buffer. The inner summation order is fixed, which keeps
//! sequential and parallel results bit-identical.

use crate::components::Position;
use crate::config::SimulationConfig;
use crate::particle::Particle;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Gravitational constant in simulation units
pub const GRAVITATIONAL_CONSTANT: f64 = 1.0;

/// Default softening constant `e²`
pub const DEFAULT_SOFTENING_SQ: f64 = 1e-4;

/// A 3D force vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Force {
    /// X component
    pub fx: f64,
    /// Y component
    pub fy: f64,
    /// Z component
    pub fz: f64,
}

impl Force {
    /// Create a new force vector
    pub fn new(fx: f64, fy: f64, fz: f64) -> Self {
        Force { fx, fy, fz }
    }

    /// Create a zero force
    pub fn zero() -> Self {
        Force::new(0.0, 0.0, 0.0)
    }

    /// Check if the force is valid (all components finite)
    pub fn is_valid(&self) -> bool {
        self.fx.is_finite() && self.fy.is_finite() && self.fz.is_finite()
    }

    /// Add another force to this one
    pub fn add(&mut self, other: &Force) {
        self.fx += other.fx;
        self.fy += other.fy;
        self.fz += other.fz;
    }

    /// Get the magnitude of the force
    pub fn magnitude(&self) -> f64 {
        (self.fx * self.fx + self.fy * self.fy + self.fz * self.fz).sqrt()
    }
}

/// Pairwise softened gravity
///
/// # Example
///
/// ```
/// use nbody_sim::force::Gravity;
/// use nbody_sim::{Particle, Position, Velocity};
///
/// let gravity = Gravity::new(1.0, 1e-4);
/// let particles = vec![
///     Particle::new(1.0, Position::new(0.0, 0.0, 0.0), Velocity::zero()),
///     Particle::new(1.0, Position::new(1.0, 0.0, 0.0), Velocity::zero()),
/// ];
/// let forces = gravity.compute_forces(&particles);
/// assert!(forces[0].fx > 0.0);
/// assert_eq!(forces[0].fx, -forces[1].fx);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    g_constant: f64,
    softening_sq: f64,
    parallel_threshold: usize,
}

impl Gravity {
    /// Create a gravity law with the given constant and softening `e²`
    ///
    /// # Panics
    ///
    /// Panics if `g_constant` is negative or not finite, or if `softening_sq`
    /// is not positive and finite.
    pub fn new(g_constant: f64, softening_sq: f64) -> Self {
        assert!(
            g_constant >= 0.0 && g_constant.is_finite(),
            "Gravitational constant must be non-negative and finite"
        );
        assert!(
            softening_sq > 0.0 && softening_sq.is_finite(),
            "Softening must be positive and finite"
        );
        Gravity {
            g_constant,
            softening_sq,
            parallel_threshold: crate::config::DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Build from a configuration that has already passed `validate()`
    pub fn from_config(config: &SimulationConfig) -> Self {
        Gravity::new(config.gravitational_constant, config.softening_sq)
            .with_parallel_threshold(config.parallel_threshold)
    }

    /// Set the particle count at which the parallel pass is used
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Gravitational constant
    pub fn g_constant(&self) -> f64 {
        self.g_constant
    }

    /// Softening constant `e²`
    pub fn softening_sq(&self) -> f64 {
        self.softening_sq
    }

    /// Mass-free part of the pairwise law: `(to - from) / (r² + e²)^(3/2)`
    ///
    /// Swapping `from` and `to` negates every component exactly.
    pub fn displacement_term(&self, from: &Position, to: &Position) -> [f64; 3] {
        let dx = to.x() - from.x();
        let dy = to.y() - from.y();
        let dz = to.z() - from.z();

        let r_squared = dx * dx + dy * dy + dz * dz;
        let denominator = (r_squared + self.softening_sq).powf(1.5);

        [dx / denominator, dy / denominator, dz / denominator]
    }

    /// Force exerted on `target` by `source`
    pub fn pairwise_force(&self, target: &Particle, source: &Particle) -> Force {
        let [tx, ty, tz] = self.displacement_term(target.position(), source.position());
        // m_i * m_j is commutative in IEEE arithmetic, so the pair stays antisymmetric
        let scale = self.g_constant * (target.mass() * source.mass());
        Force::new(scale * tx, scale * ty, scale * tz)
    }

    /// Total force on `particles[index]` from every other particle
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn force_on(&self, index: usize, particles: &[Particle]) -> Force {
        let target = &particles[index];
        let mut total = Force::zero();

        for (other_index, source) in particles.iter().enumerate() {
            if other_index == index {
                continue;
            }
            total.add(&self.pairwise_force(target, source));
        }

        total
    }

    /// Compute the force on every particle
    ///
    /// The returned vector is parallel to `particles`.
    pub fn compute_forces(&self, particles: &[Particle]) -> Vec<Force> {
        let mut forces = Vec::with_capacity(particles.len());
        self.compute_forces_into(particles, &mut forces);
        forces
    }

    /// Compute the force on every particle into a reusable buffer
    ///
    /// `forces` is cleared first and ends up parallel to `particles`.
    pub fn compute_forces_into(&self, particles: &[Particle], forces: &mut Vec<Force>) {
        forces.clear();

        #[cfg(feature = "parallel")]
        {
            if particles.len() >= self.parallel_threshold {
                self.compute_forces_parallel(particles, forces);
                return;
            }
        }

        self.compute_forces_sequential(particles, forces);
    }

    fn compute_forces_sequential(&self, particles: &[Particle], forces: &mut Vec<Force>) {
        forces.extend((0..particles.len()).map(|index| self.force_on(index, particles)));
    }

    #[cfg(feature = "parallel")]
    fn compute_forces_parallel(&self, particles: &[Particle], forces: &mut Vec<Force>) {
        // Indexed collect keeps output order equal to particle order
        forces.par_extend(
            (0..particles.len())
                .into_par_iter()
                .map(|index| self.force_on(index, particles)),
        );
    }

    /// Softened potential energy of the whole set
    ///
    /// `U = -Σ_{i<j} G m_i m_j / sqrt(r² + e²)`, the potential whose negative
    /// gradient is the force computed above.
    pub fn potential_energy(&self, particles: &[Particle]) -> f64 {
        let mut total = 0.0;
        for (i, a) in particles.iter().enumerate() {
            for b in &particles[i + 1..] {
                let r = a.position().distance_to(b.position());
                total -= self.g_constant * a.mass() * b.mass()
                    / (r * r + self.softening_sq).sqrt();
            }
        }
        total
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Gravity::new(GRAVITATIONAL_CONSTANT, DEFAULT_SOFTENING_SQ)
    }
}
