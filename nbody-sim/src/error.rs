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
//! Error types for loading, saving and constructing simulations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by simulation construction and persistence
///
/// Every variant is terminal for the call that produced it. A failed load
/// never leaves a partially populated simulation behind.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A file could not be opened or created
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// Path that was being opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Reading from or writing to an open stream failed
    #[error("stream error: {0}")]
    Stream(#[from] io::Error),

    /// The `<n> <h> <e2>` header line could not be parsed
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// End of input was reached before all declared records were read
    #[error("expected {expected} particle records, found only {found}")]
    TruncatedRecords {
        /// Record count declared in the header
        expected: usize,
        /// Number of complete records present
        found: usize,
    },

    /// A record field was not a valid number
    #[error("particle record {index}: cannot parse {field} from {token:?}")]
    MalformedRecord {
        /// Zero-based record index
        index: usize,
        /// Name of the offending field
        field: &'static str,
        /// Raw token that failed to parse
        token: String,
    },

    /// A particle has zero, negative or non-finite mass
    #[error("particle {index} has invalid mass {mass}; mass must be positive and finite")]
    InvalidMass {
        /// Zero-based particle index
        index: usize,
        /// Offending mass value
        mass: f64,
    },

    /// A particle has a NaN or infinite position or velocity
    #[error("particle {index} has a non-finite {field}")]
    NonFiniteState {
        /// Zero-based particle index
        index: usize,
        /// `"position"` or `"velocity"`
        field: &'static str,
    },

    /// Timestep is zero, negative or non-finite
    #[error("invalid timestep {0}: must be positive and finite")]
    InvalidTimestep(f64),

    /// Softening constant is zero, negative or non-finite
    #[error("invalid softening {0}: must be positive and finite")]
    InvalidSoftening(f64),

    /// Gravitational constant is negative or non-finite
    #[error("invalid gravitational constant {0}: must be non-negative and finite")]
    InvalidGravitationalConstant(f64),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = SimulationError::Io {
            path: PathBuf::from("missing/galaxy.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let message = err.to_string();
        assert!(message.contains("missing/galaxy.txt"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn test_truncated_message() {
        let err = SimulationError::TruncatedRecords { expected: 3, found: 1 };
        assert_eq!(err.to_string(), "expected 3 particle records, found only 1");
    }

    #[test]
    fn test_stream_error_from_io() {
        let err: SimulationError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(err, SimulationError::Stream(_)));
    }
}
