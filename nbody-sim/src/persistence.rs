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
//! Plain-text state files
//!
//! # Format
//!
//! ```text
//! <n> <h> <e2>
//! <mass> <px> <py> <pz> <vx> <vy> <vz> <cr> <cg> <cb> <radius>
//! ... (n records) ...
//! ```
//!
//! Tokens are whitespace-separated; line breaks carry no meaning to the
//! reader. There is no version field and no checksum. Numbers are written in
//! Rust's shortest round-trip notation, so saving and loading reproduces every
//! value bit for bit.
//!
//! Loading reads the whole input, validates it, and only then hands back a
//! particle set. Any failure leaves the caller with nothing.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use crate::components::{Color, Position, Velocity};
use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::particle::Particle;
use crate::simulation::validate_particles;

/// Field names of one record, in file order
const RECORD_FIELDS: [&str; 11] = [
    "mass", "px", "py", "pz", "vx", "vy", "vz", "cr", "cg", "cb", "radius",
];

/// Read a state file
///
/// Returns the timestep and softening from the header as a configuration
/// (other parameters at their defaults) together with the particles in file
/// order.
pub fn load(path: impl AsRef<Path>) -> Result<(SimulationConfig, Vec<Particle>)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SimulationError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (config, particles) = read_from(file)?;
    log::info!("Loaded {} particles from {}", particles.len(), path.display());
    Ok((config, particles))
}

/// Parse a state from any reader
pub fn read_from<R: Read>(mut reader: R) -> Result<(SimulationConfig, Vec<Particle>)> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse(&text)
}

/// Parse a state from text
pub fn parse(text: &str) -> Result<(SimulationConfig, Vec<Particle>)> {
    let mut tokens = text.split_whitespace();

    let count = header_field::<usize>(&mut tokens, "particle count")?;
    let timestep = header_field::<f64>(&mut tokens, "timestep")?;
    let softening_sq = header_field::<f64>(&mut tokens, "softening")?;

    let config = SimulationConfig::default()
        .with_timestep(timestep)
        .with_softening_sq(softening_sq);
    config.validate()?;

    // Cap the reservation so a corrupt header cannot request a huge buffer
    let mut particles = Vec::with_capacity(count.min(1 << 16));
    for index in 0..count {
        match read_record(&mut tokens, index)? {
            Some(particle) => particles.push(particle),
            None => {
                return Err(SimulationError::TruncatedRecords {
                    expected: count,
                    found: index,
                })
            }
        }
    }

    if tokens.next().is_some() {
        log::warn!("ignoring data after the {count} declared particle records");
    }

    validate_particles(&particles)?;
    Ok((config, particles))
}

fn header_field<T: FromStr>(tokens: &mut SplitWhitespace<'_>, name: &str) -> Result<T> {
    let token = tokens
        .next()
        .ok_or_else(|| SimulationError::MalformedHeader(format!("missing {name}")))?;
    token
        .parse()
        .map_err(|_| SimulationError::MalformedHeader(format!("cannot parse {name} from {token:?}")))
}

/// Read one record, or `None` if input ends before it is complete
fn read_record(tokens: &mut SplitWhitespace<'_>, index: usize) -> Result<Option<Particle>> {
    let mut fields = RECORD_FIELDS.iter();
    let mut next_token = || fields.next().and_then(|&field| tokens.next().map(|t| (t, field)));

    let mut dynamic = [0.0_f64; 7];
    for slot in dynamic.iter_mut() {
        let Some((token, field)) = next_token() else {
            return Ok(None);
        };
        *slot = parse_field(token, index, field)?;
    }

    let mut color = [0.0_f32; 3];
    for slot in color.iter_mut() {
        let Some((token, field)) = next_token() else {
            return Ok(None);
        };
        *slot = parse_field(token, index, field)?;
    }

    let Some((token, field)) = next_token() else {
        return Ok(None);
    };
    let radius: f64 = parse_field(token, index, field)?;

    let [mass, px, py, pz, vx, vy, vz] = dynamic;
    let [cr, cg, cb] = color;
    let particle = Particle::new(mass, Position::new(px, py, pz), Velocity::new(vx, vy, vz))
        .with_appearance(Color::new(cr, cg, cb), radius);
    Ok(Some(particle))
}

fn parse_field<T: FromStr>(token: &str, index: usize, field: &'static str) -> Result<T> {
    token.parse().map_err(|_| SimulationError::MalformedRecord {
        index,
        field,
        token: token.to_string(),
    })
}

/// Write a state file
pub fn save(
    path: impl AsRef<Path>,
    config: &SimulationConfig,
    particles: &[Particle],
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| SimulationError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    write_to(&mut writer, config, particles)?;
    writer.flush()?;

    log::info!("Wrote {} particles to {}", particles.len(), path.display());
    Ok(())
}

/// Serialize a state to any writer
///
/// The exact inverse of [`read_from`].
pub fn write_to<W: Write>(
    writer: &mut W,
    config: &SimulationConfig,
    particles: &[Particle],
) -> Result<()> {
    writeln!(
        writer,
        "{} {:?} {:?}",
        particles.len(),
        config.timestep,
        config.softening_sq
    )?;

    for particle in particles {
        let pos = particle.position();
        let vel = particle.velocity();
        let color = particle.color();
        writeln!(
            writer,
            "{:?} {:?} {:?} {:?} {:?} {:?} {:?} {:?} {:?} {:?} {:?}",
            particle.mass(),
            pos.x(),
            pos.y(),
            pos.z(),
            vel.dx(),
            vel.dy(),
            vel.dz(),
            color.r,
            color.g,
            color.b,
            particle.radius()
        )?;
    }

    Ok(())
}
