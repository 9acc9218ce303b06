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
//! Driving a simulation from the outside
//!
//! The engine never calls back into its driver. A driver either runs a fixed
//! number of steps headless, or alternates [`Simulation::step`] with handing
//! a frame to a [`FrameSink`] such as a renderer.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::particle::ParticleSnapshot;
use crate::simulation::Simulation;

/// How the simulation should be driven
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Run a fixed number of steps without display
    Headless {
        /// Steps to run
        steps: u64,
    },
    /// Run until the display closes, loading assets from a directory
    Windowed {
        /// Directory holding shaders and textures
        resource_dir: PathBuf,
    },
}

impl FromStr for Mode {
    type Err = std::convert::Infallible;

    /// An integer selects headless mode; a negative count runs zero steps.
    /// Anything else is taken as a resource directory.
    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        Ok(match arg.trim().parse::<i64>() {
            Ok(steps) => Mode::Headless {
                steps: u64::try_from(steps).unwrap_or(0),
            },
            Err(_) => Mode::Windowed {
                resource_dir: PathBuf::from(arg),
            },
        })
    }
}

/// Consumer of per-step frames
///
/// Implementations only read the frame; they never touch the simulation.
pub trait FrameSink {
    /// Present one frame. Return `false` to stop the loop.
    fn present(&mut self, frame: &[ParticleSnapshot]) -> bool;
}

/// Run `steps` steps with no display
pub fn run_headless(simulation: &mut Simulation, steps: u64) {
    log::info!("Running without display for {steps} steps");
    simulation.run(steps);
}

/// Alternate stepping and presenting until the sink asks to stop
///
/// Returns the number of steps taken.
pub fn run_frames<S: FrameSink + ?Sized>(simulation: &mut Simulation, sink: &mut S) -> u64 {
    let mut frames = 0;
    let mut frame = Vec::with_capacity(simulation.len());
    loop {
        simulation.step();
        frames += 1;

        frame.clear();
        frame.extend(simulation.particles().iter().map(|p| p.snapshot()));
        if !sink.present(&frame) {
            break;
        }
    }
    log::debug!("frame loop stopped after {frames} steps");
    frames
}

/// Final positions and elapsed time, printed when a run ends
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Final position of each particle
    pub positions: Vec<[f64; 3]>,
    /// Elapsed simulated time in years
    pub elapsed_years: f64,
}

impl Report {
    /// Capture the current state of a simulation
    pub fn from_simulation(simulation: &Simulation) -> Self {
        Report {
            positions: simulation
                .particles()
                .iter()
                .map(|p| p.position().as_array())
                .collect(),
            elapsed_years: simulation.elapsed_years(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Particle positions:")?;
        for (index, [x, y, z]) in self.positions.iter().enumerate() {
            writeln!(f, "{index}: ({x}, {y}, {z})")?;
        }
        write!(f, "Elapsed time: {} years", self.elapsed_years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Position, Velocity};
    use crate::config::SimulationConfig;
    use crate::particle::Particle;
    use crate::simulation::YEARS_PER_TIME_UNIT;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("250".parse::<Mode>().unwrap(), Mode::Headless { steps: 250 });
        assert_eq!("0".parse::<Mode>().unwrap(), Mode::Headless { steps: 0 });
        assert_eq!("-5".parse::<Mode>().unwrap(), Mode::Headless { steps: 0 });
        assert_eq!(
            "../resources".parse::<Mode>().unwrap(),
            Mode::Windowed {
                resource_dir: PathBuf::from("../resources")
            }
        );
    }

    struct CountingSink {
        frames: usize,
        limit: usize,
        last_len: usize,
    }

    impl FrameSink for CountingSink {
        fn present(&mut self, frame: &[ParticleSnapshot]) -> bool {
            self.frames += 1;
            self.last_len = frame.len();
            self.frames < self.limit
        }
    }

    #[test]
    fn test_run_frames_stops_when_sink_closes() {
        let mut sim = Simulation::two_body();
        let mut sink = CountingSink {
            frames: 0,
            limit: 10,
            last_len: 0,
        };
        let steps = run_frames(&mut sim, &mut sink);
        assert_eq!(steps, 10);
        assert_eq!(sink.frames, 10);
        assert_eq!(sink.last_len, 2);
        assert_eq!(sim.steps_taken(), 10);
    }

    #[test]
    fn test_run_headless() {
        let mut sim = Simulation::two_body();
        run_headless(&mut sim, 3);
        assert_eq!(sim.steps_taken(), 3);
    }

    #[test]
    fn test_report_format() {
        let mut sim = Simulation::new(
            SimulationConfig::default(),
            vec![Particle::new(1.0, Position::new(1.0, -2.5, 0.0), Velocity::zero())],
        )
        .unwrap();
        sim.step();

        let report = Report::from_simulation(&sim);
        assert_eq!(report.elapsed_years, YEARS_PER_TIME_UNIT);
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Particle positions:");
        assert_eq!(lines[1], "0: (1, -2.5, 0)");
        assert!(lines[2].starts_with("Elapsed time: "));
        assert!(lines[2].ends_with(" years"));
    }
}
