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
//! Procedurally generated initial states

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::components::{Color, Position, Velocity};
use crate::config::SimulationConfig;
use crate::particle::Particle;

/// Mass of the heavy body in the two-body seed
pub const TWO_BODY_HEAVY_MASS: f64 = 1e-3;

/// Mass of the light body in the two-body seed
pub const TWO_BODY_LIGHT_MASS: f64 = 1e-6;

/// Initial separation of the two-body seed
pub const TWO_BODY_RADIUS: f64 = 1.0;

/// Semi-major axis of the light body's orbit
pub const TWO_BODY_SEMI_MAJOR_AXIS: f64 = 2.0;

/// Seed used by the galaxy scene when none is given
pub const DEFAULT_GALAXY_SEED: u64 = 0;

/// Speed on a Kepler orbit at distance `r` with semi-major axis `a`
///
/// Vis-viva: `v = sqrt(G M (2/r - 1/a))` with `G = 1`.
pub fn vis_viva_speed(central_mass: f64, r: f64, a: f64) -> f64 {
    (central_mass * (2.0 / r - 1.0 / a)).sqrt()
}

/// Heavy body at rest at the origin, light body at `(r, 0, 0)` moving along
/// `+y` at the vis-viva speed
pub fn two_body() -> (SimulationConfig, Vec<Particle>) {
    let config = SimulationConfig::default();

    let heavy = Particle::new(TWO_BODY_HEAVY_MASS, Position::zero(), Velocity::zero())
        .with_appearance(Color::new(1.0, 0.9, 0.6), 0.05);

    let speed = vis_viva_speed(TWO_BODY_HEAVY_MASS, TWO_BODY_RADIUS, TWO_BODY_SEMI_MAJOR_AXIS);
    let light = Particle::new(
        TWO_BODY_LIGHT_MASS,
        Position::new(TWO_BODY_RADIUS, 0.0, 0.0),
        Velocity::new(0.0, speed, 0.0),
    )
    .with_appearance(Color::new(0.6, 0.8, 1.0), 0.02);

    (config, vec![heavy, light])
}

/// Two clusters on a collision course
///
/// A heavy core wrapped in a 500-body shell moves `+x`; a lighter core
/// followed by an 8×8×8 lattice of bodies moves `-x` toward it.
pub fn galaxy_collision(seed: u64) -> (SimulationConfig, Vec<Particle>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let config = SimulationConfig::new(0.002, 1e-4);
    let mut particles = Vec::with_capacity(2 + 500 + 8 * 8 * 8);

    let shell_center = Position::new(-2.0, -0.5, 0.0);
    particles.push(
        Particle::new(0.75, shell_center, Velocity::new(1.0, 0.0, 0.0))
            .with_appearance(Color::new(0.533884, 0.9966563, 0.742154), 0.05),
    );
    shell(&mut rng, &mut particles, &shell_center, 500);

    particles.push(
        Particle::new(0.03, Position::new(2.0, 0.5, 0.0), Velocity::new(-2.0, 0.0, 0.0))
            .with_appearance(Color::new(0.9, 0.9, 0.9), 0.05),
    );
    lattice(&mut particles, 8);

    (config, particles)
}

fn shell(rng: &mut SmallRng, particles: &mut Vec<Particle>, center: &Position, count: usize) {
    for _ in 0..count {
        let radius = rng.gen_range(0.8..1.2);
        let pitch: f64 = rng.gen_range(0.0..6.282);
        let yaw: f64 = rng.gen_range(0.0..6.282);

        let position = Position::new(
            yaw.cos() * pitch.cos() * radius + center.x(),
            yaw.sin() * pitch.cos() * radius + center.y(),
            pitch.sin() * radius + center.z(),
        );
        let color = Color::new(
            rng.gen_range(0.0..0.5),
            rng.gen_range(0.2..1.0),
            rng.gen_range(0.2..1.0),
        );

        particles.push(Particle::new(0.0003, position, Velocity::zero()).with_appearance(color, 0.02));
    }
}

fn lattice(particles: &mut Vec<Particle>, side: usize) {
    let step = side as f64;
    for x in 0..side {
        for y in 0..side {
            for z in 0..side {
                let (fx, fy, fz) = (x as f64 / step, y as f64 / step, z as f64 / step);
                particles.push(
                    Particle::new(
                        0.03,
                        Position::new(fx + 1.5, fy, fz - 0.5),
                        Velocity::new(-2.0, 0.0, 0.0),
                    )
                    .with_appearance(Color::new(fx as f32, fy as f32, fz as f32), 0.02),
                );
            }
        }
    }
}
