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
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

use nbody_sim::driver::{run_headless, Mode, Report};
use nbody_sim::scenario::{galaxy_collision, DEFAULT_GALAXY_SEED};
use nbody_sim::{persistence, Simulation};

/// Gravitational N-body particle simulator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Args {
    /// Number of steps to run headless, or a resource directory for display
    target: Option<String>,
    /// State file to load instead of the two-body seed
    input: Option<PathBuf>,
    /// Write the final state to this file
    #[arg(long)]
    save: Option<PathBuf>,
    /// Worker threads for the force pass (default: one per core)
    #[arg(long)]
    threads: Option<usize>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the galaxy-collision scene to a state file
    Generate {
        /// Output path
        output: PathBuf,
        /// Random seed for the shell bodies
        #[arg(long, default_value_t = DEFAULT_GALAXY_SEED)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Usage errors exit cleanly
            err.print()?;
            return Ok(());
        }
    };

    if let Some(Commands::Generate { output, seed }) = args.command {
        let (config, particles) = galaxy_collision(seed);
        persistence::save(&output, &config, &particles)
            .with_context(|| format!("failed to write scene to {}", output.display()))?;
        return Ok(());
    }

    let Some(target) = args.target else {
        Args::command().print_help()?;
        return Ok(());
    };

    #[cfg(feature = "parallel")]
    {
        if let Some(threads) = args.threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("failed to configure worker threads")?;
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        if args.threads.is_some() {
            log::warn!("--threads has no effect without the `parallel` feature");
        }
    }

    let mut simulation = match &args.input {
        Some(path) => Simulation::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Simulation::two_body(),
    };

    match target.parse::<Mode>() {
        Ok(Mode::Headless { steps }) => run_headless(&mut simulation, steps),
        Ok(Mode::Windowed { resource_dir }) => {
            log::error!(
                "no display backend is built into this binary (resources: {}); pass a step count to run headless",
                resource_dir.display()
            );
        }
        Err(never) => match never {},
    }

    println!("{}", Report::from_simulation(&simulation));

    if let Some(path) = &args.save {
        simulation
            .save(path)
            .with_context(|| format!("failed to save {}", path.display()))?;
    }

    Ok(())
}
