//! Linlab - linear-algebra coursework tooling as a single CLI binary
//!
//! Linlab bundles three classic linear-algebra applications behind one
//! command-line tool: central projection of a parallelepiped onto the
//! xy-plane, Hamming single-error-correcting codes, and DCT-based
//! signal/image compression.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to the
//!   domain modules)
//! - [`core`] - Shared strong types and configuration
//! - [`projection`] - Parallelepiped modeling and central projection
//! - [`coding`] - Hamming code construction, encoding, and decoding
//! - [`dct`] - Discrete cosine transform, coefficient truncation, and
//!   grayscale image compression
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! Linlab maintains the following invariants:
//!
//! 1. Domain values are validated at construction time (binary words, keep
//!    ratios, first-octant geometry)
//! 2. Library modules return typed errors; only the CLI layer attaches
//!    human-readable context
//! 3. Decoding a clean Hamming codeword always recovers the encoded data,
//!    and any single flipped bit is corrected

pub mod cli;
pub mod coding;
pub mod core;
pub mod dct;
pub mod projection;
pub mod ui;
