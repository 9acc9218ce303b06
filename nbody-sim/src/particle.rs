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
//! Point-mass particles

use crate::components::{Color, Position, Velocity};

/// One point mass
///
/// A pure data holder: construction always succeeds with whatever values the
/// caller supplies. Physical sanity (positive mass, finite state) is checked
/// by [`Simulation::new`](crate::Simulation::new) and the loader.
///
/// `color` and `radius` are display metadata with no dynamical meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    mass: f64,
    position: Position,
    velocity: Velocity,
    color: Color,
    radius: f64,
}

impl Particle {
    /// Create a particle with the given mass, position and velocity
    ///
    /// Color defaults to white and radius to [`Particle::DEFAULT_RADIUS`].
    pub fn new(mass: f64, position: Position, velocity: Velocity) -> Self {
        Particle {
            mass,
            position,
            velocity,
            color: Color::default(),
            radius: Self::DEFAULT_RADIUS,
        }
    }

    /// Default point-sprite radius
    pub const DEFAULT_RADIUS: f64 = 0.02;

    /// Set display color and radius
    pub fn with_appearance(mut self, color: Color, radius: f64) -> Self {
        self.color = color;
        self.radius = radius;
        self
    }

    /// Mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Set the mass
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
    }

    /// World-space position
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Set the position
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Current velocity
    pub fn velocity(&self) -> &Velocity {
        &self.velocity
    }

    /// Set the velocity
    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }

    /// Display color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the display color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Point-sprite radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Set the point-sprite radius
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    /// Copy of the fields a renderer needs
    pub fn snapshot(&self) -> ParticleSnapshot {
        ParticleSnapshot {
            position: self.position.as_array(),
            color: self.color.as_array(),
            radius: self.radius,
        }
    }
}

/// Display-only view of a particle
///
/// Plain `Copy` data so a renderer may hold it on another thread while the
/// simulation keeps stepping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSnapshot {
    /// World-space position
    pub position: [f64; 3],
    /// RGB color
    pub color: [f32; 3],
    /// Point-sprite radius
    pub radius: f64,
}
