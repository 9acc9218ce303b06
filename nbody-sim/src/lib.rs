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
//! # N-Body Simulator
//!
//! A fixed-timestep gravitational N-body simulator for small sets of massive
//! particles, with a plain-text format for saving and restoring state.
//!
//! ## Features
//!
//! - **Softened Gravity**: Full pairwise Newtonian attraction with a softening
//!   term that keeps close encounters finite
//! - **Symplectic Integration**: Semi-implicit Euler with a strict
//!   force-then-integrate barrier per step
//! - **Parallelization**: Optional Rayon fork/join over the force pass
//! - **Persistence**: Lossless text save/load with full validation
//!
//! ## Example
//!
//! ```rust
//! use nbody_sim::Simulation;
//!
//! let mut sim = Simulation::two_body();
//! sim.run(100);
//! assert_eq!(sim.steps_taken(), 100);
//! assert!(sim.particles().iter().all(|p| p.position().is_valid()));
//! ```

#![warn(missing_docs)]

/// Position, velocity and color types
pub mod components;

/// Run parameters
pub mod config;

/// Headless and frame-driven loops
pub mod driver;

/// Error types
pub mod error;

/// Softened gravitational force law
pub mod force;

/// Semi-implicit Euler integration and diagnostics
pub mod integration;

/// The particle entity
pub mod particle;

/// Text state files
pub mod persistence;

/// Procedural initial states
pub mod scenario;

/// The simulation engine
pub mod simulation;

pub use components::{Color, Position, Velocity};
pub use config::SimulationConfig;
pub use error::{Result, SimulationError};
pub use particle::{Particle, ParticleSnapshot};
pub use simulation::Simulation;
