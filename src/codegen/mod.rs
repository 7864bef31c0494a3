//! Short code generation.
//!
//! Codes are derived from a monotonic identifier space rather than randomness,
//! so uniqueness never depends on a storage round-trip:
//!
//! - [`IdSource`] - process-wide counter handing out each identifier exactly once
//! - [`encoder`] - fixed-length base-62 rendering of an identifier
//! - [`CodeGenerator`] - pairs the two; this is what the shortening service consumes

pub mod encoder;
pub mod generator;
pub mod id_source;

pub use encoder::{ALPHABET, CODE_LEN, MAX_ID, decode, encode, max_decoded};
pub use generator::{CodeGenerator, SequentialCodeGenerator};
pub use id_source::IdSource;

#[cfg(test)]
pub use generator::MockCodeGenerator;

use thiserror::Error;

/// Failures while turning identifiers into short codes and back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// The identifier does not fit into [`CODE_LEN`] characters.
    ///
    /// The identifier space is exhausted; nothing short of widening the code
    /// length recovers from this.
    #[error("short code space exhausted: identifier {id} exceeds {max}", max = MAX_ID)]
    Overflow { id: u64 },

    /// The string is not a well-formed short code.
    #[error("invalid short code {code:?}: {reason}")]
    InvalidCode { code: String, reason: &'static str },
}
