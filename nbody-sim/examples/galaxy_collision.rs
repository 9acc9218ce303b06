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
//! Galaxy Collision Example
//!
//! Generates the two-cluster collision scene, runs it headless and reports
//! how the clusters' centres of mass approach each other.
//!
//! # Running
//!
//! ```bash
//! cargo run --example galaxy_collision --release
//!
//! # Also write the starting scene to disk
//! cargo run --example galaxy_collision --release -- galaxy.txt
//! ```

use std::time::Instant;

use nbody_sim::scenario::{galaxy_collision, DEFAULT_GALAXY_SEED};
use nbody_sim::{Particle, Simulation};

const STEPS: u64 = 200;

fn centre_of_mass(particles: &[Particle]) -> [f64; 3] {
    let mut total_mass = 0.0;
    let mut weighted = [0.0; 3];
    for p in particles {
        let m = p.mass();
        total_mass += m;
        for (w, x) in weighted.iter_mut().zip(p.position().as_array()) {
            *w += m * x;
        }
    }
    weighted.map(|w| w / total_mass)
}

fn main() -> nbody_sim::Result<()> {
    let (config, particles) = galaxy_collision(DEFAULT_GALAXY_SEED);
    let mut sim = Simulation::new(config, particles)?;

    if let Some(path) = std::env::args().nth(1) {
        sim.save(&path)?;
        println!("Wrote starting scene to {path}");
    }

    // The shell cluster is the first 501 bodies
    let split = 501;
    println!("Simulating {} bodies for {STEPS} steps", sim.len());

    let start = Instant::now();
    for step in 0..=STEPS {
        if step % 50 == 0 {
            let (left, right) = sim.particles().split_at(split);
            let a = centre_of_mass(left);
            let b = centre_of_mass(right);
            let gap = ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt();
            println!("step {step:>4}: cluster separation {gap:.4}");
        }
        sim.step();
    }

    println!("Finished in {:.2?}", start.elapsed());
    Ok(())
}
