//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Bits`] - Validated binary word (only '0' and '1'), most significant
//!   bit first
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use linlab::core::types::Bits;
//!
//! let word = Bits::parse("1011").unwrap();
//! assert_eq!(word.len(), 4);
//! assert_eq!(word.to_string(), "1011");
//!
//! assert!(Bits::parse("10x1").is_err());
//! assert!(Bits::parse("").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitsError {
    #[error("binary word cannot be empty")]
    Empty,

    #[error("invalid character '{found}' at index {index}: expected '0' or '1'")]
    InvalidCharacter { index: usize, found: char },

    #[error("bit index {index} out of range for word of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A validated binary word.
///
/// Bits are stored most significant first, matching the order in which the
/// word is written. Index 0 is the leftmost character of the textual form.
///
/// # Example
///
/// ```
/// use linlab::core::types::Bits;
///
/// let mut word = Bits::parse("1010").unwrap();
/// assert_eq!(word.bit(0), 1);
/// assert_eq!(word.bit(3), 0);
///
/// word.flip(3).unwrap();
/// assert_eq!(word.to_string(), "1011");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bits(Vec<u8>);

impl Bits {
    /// Parse a binary word from its textual form.
    ///
    /// # Errors
    ///
    /// Returns `BitsError::Empty` for an empty string and
    /// `BitsError::InvalidCharacter` for anything besides '0' and '1'.
    pub fn parse(s: &str) -> Result<Self, BitsError> {
        if s.is_empty() {
            return Err(BitsError::Empty);
        }
        let mut bits = Vec::with_capacity(s.len());
        for (index, ch) in s.chars().enumerate() {
            match ch {
                '0' => bits.push(0),
                '1' => bits.push(1),
                found => return Err(BitsError::InvalidCharacter { index, found }),
            }
        }
        Ok(Self(bits))
    }

    /// Build a word from raw bit values, most significant first.
    ///
    /// # Errors
    ///
    /// Returns `BitsError::Empty` if the slice is empty. Any nonzero value
    /// is treated as a set bit.
    pub fn from_bits(bits: &[u8]) -> Result<Self, BitsError> {
        if bits.is_empty() {
            return Err(BitsError::Empty);
        }
        Ok(Self(bits.iter().map(|&b| u8::from(b != 0)).collect()))
    }

    /// Number of bits in the word.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: empty words cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The bit at `index`, counting from the left (most significant first).
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; use [`Bits::flip`] for fallible
    /// access.
    pub fn bit(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// Flip the bit at `index`, counting from the left.
    ///
    /// # Errors
    ///
    /// Returns `BitsError::IndexOutOfRange` if `index >= len`.
    pub fn flip(&mut self, index: usize) -> Result<(), BitsError> {
        let len = self.0.len();
        let bit = self
            .0
            .get_mut(index)
            .ok_or(BitsError::IndexOutOfRange { index, len })?;
        *bit ^= 1;
        Ok(())
    }

    /// The bits as a slice, most significant first.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// The bits in reverse order (least significant first).
    ///
    /// Hamming positions count from 1 at the rightmost bit, so code that
    /// works position-wise usually wants this order.
    pub fn reversed(&self) -> Vec<u8> {
        self.0.iter().rev().copied().collect()
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

impl FromStr for Bits {
    type Err = BitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Bits {
    type Error = BitsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Bits> for String {
    fn from(value: Bits) -> Self {
        value.to_string()
    }
}
