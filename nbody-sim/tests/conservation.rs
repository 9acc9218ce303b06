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
//! Integration tests for orbital stability, conservation and determinism

use nbody_sim::scenario::{galaxy_collision, two_body};
use nbody_sim::{Particle, Position, Simulation, SimulationConfig, Velocity};

fn separation(sim: &Simulation) -> f64 {
    let p = sim.particles();
    p[0].position().distance_to(p[1].position())
}

#[test]
fn test_two_body_orbit_stays_bounded() {
    let heavy_mass = 1e-3;
    let speed = (heavy_mass * (2.0 / 1.0 - 1.0 / 2.0_f64)).sqrt();
    let mut sim = Simulation::new(
        SimulationConfig::new(1.0, 1e-4),
        vec![
            Particle::new(heavy_mass, Position::zero(), Velocity::zero()),
            Particle::new(1e-6, Position::new(1.0, 0.0, 0.0), Velocity::new(0.0, speed, 0.0)),
        ],
    )
    .unwrap();

    let mut min_r = f64::MAX;
    let mut max_r = 0.0_f64;
    for _ in 0..400 {
        sim.step();
        let r = separation(&sim);
        min_r = min_r.min(r);
        max_r = max_r.max(r);
    }

    // Perihelion 1, aphelion 3 for the exact orbit
    assert!(min_r > 0.5, "light body fell inward to r = {min_r}");
    assert!(max_r < 5.0, "light body escaped to r = {max_r}");
    assert!(max_r > 2.0, "light body never left perihelion, max r = {max_r}");
}

#[test]
fn test_two_body_energy_error_is_bounded() {
    let (config, particles) = two_body();
    let mut sim = Simulation::new(config.with_timestep(0.1), particles).unwrap();

    let initial = sim.total_energy();
    let mut worst = 0.0_f64;
    for _ in 0..6000 {
        sim.step();
        worst = worst.max(((sim.total_energy() - initial) / initial).abs());
    }
    assert!(worst < 0.05, "relative energy error reached {worst}");
}

#[test]
fn test_momentum_is_conserved() {
    let particles: Vec<Particle> = (0..12)
        .map(|i| {
            let t = i as f64;
            Particle::new(
                0.5 + 0.1 * t,
                Position::new(t.cos() * 2.0, t.sin() * 2.0, 0.1 * t),
                Velocity::new(-t.sin() * 0.3, t.cos() * 0.3, 0.0),
            )
        })
        .collect();
    let mut sim = Simulation::new(SimulationConfig::new(0.001, 1e-2), particles).unwrap();

    let before = sim.total_momentum();
    sim.run(500);
    let after = sim.total_momentum();
    for k in 0..3 {
        assert!(
            (after[k] - before[k]).abs() < 1e-10,
            "momentum component {k} drifted from {} to {}",
            before[k],
            after[k]
        );
    }
}

#[test]
fn test_stepping_is_not_a_batch_formula() {
    let (config, particles) = two_body();

    let mut fine = Simulation::new(config, particles.clone()).unwrap();
    fine.run(10);

    let mut coarse = Simulation::new(config.with_timestep(10.0 * config.timestep), particles).unwrap();
    coarse.step();

    assert_eq!(fine.elapsed_time(), coarse.elapsed_time());
    assert_ne!(
        fine.particles()[1].position(),
        coarse.particles()[1].position()
    );
}

#[test]
fn test_runs_are_deterministic() {
    let (config, particles) = galaxy_collision(3);
    let mut a = Simulation::new(config, particles.clone()).unwrap();
    let mut b = Simulation::new(config, particles).unwrap();
    a.run(3);
    b.run(3);
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn test_parallel_threshold_does_not_change_results() {
    let (config, particles) = galaxy_collision(11);
    let mut sequential =
        Simulation::new(config.with_parallel_threshold(usize::MAX), particles.clone()).unwrap();
    let mut parallel = Simulation::new(config.with_parallel_threshold(0), particles).unwrap();
    sequential.run(2);
    parallel.run(2);
    assert_eq!(sequential.particles(), parallel.particles());
}
