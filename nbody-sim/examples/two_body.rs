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
//! Two-Body Orbit Example
//!
//! Runs the two-body seed for one full orbit and prints the separation and
//! energy drift every few dozen steps.
//!
//! # Running
//!
//! ```bash
//! cargo run --example two_body --release
//! ```

use nbody_sim::Simulation;

const STEPS: u64 = 562;
const OUTPUT_INTERVAL: u64 = 50;

fn main() {
    println!("N-Body Simulator - Two-Body Orbit");
    println!("=================================\n");

    let mut sim = Simulation::two_body();
    let initial_energy = sim.total_energy();

    println!("{:>6} {:>12} {:>14}", "step", "separation", "energy drift");
    for step in 0..=STEPS {
        if step % OUTPUT_INTERVAL == 0 {
            let p = sim.particles();
            let r = p[0].position().distance_to(p[1].position());
            let drift = (sim.total_energy() - initial_energy) / initial_energy;
            println!("{step:>6} {r:>12.6} {drift:>14.3e}");
        }
        sim.step();
    }

    println!("\nElapsed time: {:.3e} years", sim.elapsed_years());
}
