//! coding
//!
//! Hamming single-error-correcting codes.
//!
//! # Construction
//!
//! A code with `m` parity bits has codeword length `n = 2^m - 1` and data
//! length `k = n - m`. Bit positions count from 1 at the least significant
//! (rightmost) bit; positions that are powers of two hold parity bits, all
//! other positions hold data bits. The parity bit at position `2^i` covers
//! every position whose index has bit `i` set, so the syndrome of a received
//! word, read as a binary number, is exactly the 1-based position of a
//! single flipped bit.
//!
//! # Invariants
//!
//! - `decode(encode(d))` recovers `d` for every data word `d`
//! - Flipping any single codeword bit is detected and corrected
//! - Valid codewords have syndrome zero

pub mod gf2;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::core::types::{Bits, BitsError};

/// Upper bound on the number of parity bits accepted by
/// [`HammingCode::new`]. Dense generator/check matrices are materialized
/// for display, which stops being reasonable past this point.
pub const MAX_PARITY_BITS: usize = 12;

/// Errors from code construction and use.
#[derive(Debug, Error, PartialEq)]
pub enum CodingError {
    #[error("number of parity bits must be at least 2, got {0}")]
    TooFewParityBits(usize),

    #[error("number of parity bits must be at most {MAX_PARITY_BITS}, got {0}")]
    TooManyParityBits(usize),

    #[error("expected a data word of {expected} bits, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    #[error("expected a codeword of {expected} bits, got {actual}")]
    CodewordLengthMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Bits(#[from] BitsError),
}

/// A `(2^m - 1, 2^m - 1 - m)` Hamming code.
#[derive(Debug, Clone)]
pub struct HammingCode {
    parity_bits: usize,
    codeword_length: usize,
    data_length: usize,
    /// Check matrix H, row `i` column `p-1` is bit `i` of position `p`.
    check: Vec<Vec<u8>>,
}

/// Result of decoding a received word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoded {
    /// The codeword after correction (equal to the input when clean)
    pub codeword: Bits,
    /// The extracted data bits
    pub data: Bits,
    /// Syndrome of the received word (0 for a valid codeword)
    pub syndrome: usize,
    /// Corrected bit position, 1-based from the right, if a correction
    /// happened
    pub corrected: Option<usize>,
}

impl HammingCode {
    /// Construct the code for `parity_bits` parity bits.
    ///
    /// # Errors
    ///
    /// Returns an error unless `2 <= parity_bits <= MAX_PARITY_BITS`.
    pub fn new(parity_bits: usize) -> Result<Self, CodingError> {
        if parity_bits < 2 {
            return Err(CodingError::TooFewParityBits(parity_bits));
        }
        if parity_bits > MAX_PARITY_BITS {
            return Err(CodingError::TooManyParityBits(parity_bits));
        }

        let codeword_length = (1 << parity_bits) - 1;
        let data_length = codeword_length - parity_bits;

        let check = (0..parity_bits)
            .map(|i| {
                (1..=codeword_length)
                    .map(|p| ((p >> i) & 1) as u8)
                    .collect()
            })
            .collect();

        Ok(Self {
            parity_bits,
            codeword_length,
            data_length,
            check,
        })
    }

    /// Number of parity bits `m`.
    pub fn parity_bits(&self) -> usize {
        self.parity_bits
    }

    /// Codeword length `n = 2^m - 1`.
    pub fn codeword_length(&self) -> usize {
        self.codeword_length
    }

    /// Data length `k = n - m`.
    pub fn data_length(&self) -> usize {
        self.data_length
    }

    /// Encode a data word of exactly `k` bits.
    ///
    /// Data bits fill the non-power-of-two positions from the right; parity
    /// bits are then computed over their coverage sets.
    ///
    /// # Errors
    ///
    /// Returns `CodingError::DataLengthMismatch` for a wrong-sized input.
    pub fn encode(&self, data: &Bits) -> Result<Bits, CodingError> {
        if data.len() != self.data_length {
            return Err(CodingError::DataLengthMismatch {
                expected: self.data_length,
                actual: data.len(),
            });
        }

        // by_pos[p - 1] is the bit at position p (position 1 = rightmost).
        let mut by_pos = vec![0u8; self.codeword_length];
        let data_lsb_first = data.reversed();
        let mut next_data = 0;
        for p in 1..=self.codeword_length {
            if !p.is_power_of_two() {
                by_pos[p - 1] = data_lsb_first[next_data];
                next_data += 1;
            }
        }

        for i in 0..self.parity_bits {
            let mask = 1usize << i;
            let mut parity = 0u8;
            for p in 1..=self.codeword_length {
                if p & mask != 0 {
                    parity ^= by_pos[p - 1];
                }
            }
            by_pos[mask - 1] = parity;
        }

        let msb_first: Vec<u8> = by_pos.iter().rev().copied().collect();
        Ok(Bits::from_bits(&msb_first)?)
    }

    /// Syndrome of a received word: `H . r` over GF(2), read as a binary
    /// number. Zero means the word is a valid codeword; otherwise the value
    /// is the 1-based position (from the right) of the flipped bit.
    ///
    /// # Errors
    ///
    /// Returns `CodingError::CodewordLengthMismatch` for a wrong-sized input.
    pub fn syndrome(&self, word: &Bits) -> Result<usize, CodingError> {
        if word.len() != self.codeword_length {
            return Err(CodingError::CodewordLengthMismatch {
                expected: self.codeword_length,
                actual: word.len(),
            });
        }

        let lsb_first = word.reversed();
        let syndrome_bits = gf2::mat_vec(&self.check, &lsb_first);
        Ok(syndrome_bits
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &bit)| acc | ((bit as usize) << i)))
    }

    /// True if the word is a valid codeword (zero syndrome).
    pub fn is_valid(&self, word: &Bits) -> Result<bool, CodingError> {
        Ok(self.syndrome(word)? == 0)
    }

    /// Decode a received word, correcting a single flipped bit if present.
    pub fn decode(&self, received: &Bits) -> Result<Decoded, CodingError> {
        let syndrome = self.syndrome(received)?;

        let mut codeword = received.clone();
        let corrected = if syndrome != 0 {
            // The syndrome counts positions from the right; Bits indexes
            // from the left.
            codeword.flip(self.codeword_length - syndrome)?;
            Some(syndrome)
        } else {
            None
        };

        let data = self.extract_data(&codeword)?;
        Ok(Decoded {
            codeword,
            data,
            syndrome,
            corrected,
        })
    }

    /// Extract the data bits from a codeword, skipping parity positions.
    fn extract_data(&self, codeword: &Bits) -> Result<Bits, CodingError> {
        let lsb_first = codeword.reversed();
        let mut data_lsb = Vec::with_capacity(self.data_length);
        for p in 1..=self.codeword_length {
            if !p.is_power_of_two() {
                data_lsb.push(lsb_first[p - 1]);
            }
        }
        let msb_first: Vec<u8> = data_lsb.iter().rev().copied().collect();
        Ok(Bits::from_bits(&msb_first)?)
    }

    /// The check matrix H as rows of bits, columns in position order
    /// 1..=n.
    pub fn check_matrix(&self) -> &[Vec<u8>] {
        &self.check
    }

    /// The generator matrix: each data row is an identity row followed by
    /// that data position's check-matrix column.
    pub fn generator_matrix(&self) -> Vec<Vec<u8>> {
        let identity = gf2::identity(self.data_length);
        (0..self.data_length)
            .map(|i| {
                let mut row = identity[i].clone();
                for check_row in &self.check {
                    row.push(check_row[i]);
                }
                row
            })
            .collect()
    }
}

impl fmt::Display for HammingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) Hamming code with {} parity bits",
            self.codeword_length, self.data_length, self.parity_bits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Bits {
        Bits::parse(s).unwrap()
    }

    #[test]
    fn seven_four_parameters() {
        let code = HammingCode::new(3).unwrap();
        assert_eq!(code.codeword_length(), 7);
        assert_eq!(code.data_length(), 4);
        assert_eq!(code.to_string(), "(7, 4) Hamming code with 3 parity bits");
    }

    #[test]
    fn rejects_out_of_range_parity_bits() {
        assert_eq!(
            HammingCode::new(1).unwrap_err(),
            CodingError::TooFewParityBits(1)
        );
        assert_eq!(
            HammingCode::new(13).unwrap_err(),
            CodingError::TooManyParityBits(13)
        );
    }

    #[test]
    fn encodes_known_word() {
        let code = HammingCode::new(3).unwrap();
        assert_eq!(code.encode(&bits("1011")).unwrap(), bits("1010101"));
    }

    #[test]
    fn encode_checks_data_length() {
        let code = HammingCode::new(3).unwrap();
        assert_eq!(
            code.encode(&bits("101")).unwrap_err(),
            CodingError::DataLengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn clean_codeword_has_zero_syndrome() {
        let code = HammingCode::new(3).unwrap();
        let word = code.encode(&bits("1011")).unwrap();
        assert_eq!(code.syndrome(&word).unwrap(), 0);
        assert!(code.is_valid(&word).unwrap());
    }

    #[test]
    fn syndrome_names_the_flipped_position() {
        let code = HammingCode::new(3).unwrap();
        let mut word = code.encode(&bits("1011")).unwrap();
        // Position 5 from the right is index 2 from the left in a 7-bit word.
        word.flip(2).unwrap();
        assert_eq!(code.syndrome(&word).unwrap(), 5);
        assert!(!code.is_valid(&word).unwrap());
    }

    #[test]
    fn decode_corrects_single_error() {
        let code = HammingCode::new(3).unwrap();
        let clean = code.encode(&bits("1011")).unwrap();
        let mut noisy = clean.clone();
        noisy.flip(6).unwrap(); // position 1 from the right

        let decoded = code.decode(&noisy).unwrap();
        assert_eq!(decoded.codeword, clean);
        assert_eq!(decoded.data, bits("1011"));
        assert_eq!(decoded.corrected, Some(1));
        assert_eq!(decoded.syndrome, 1);
    }

    #[test]
    fn decode_clean_word_reports_no_correction() {
        let code = HammingCode::new(3).unwrap();
        let clean = code.encode(&bits("0110")).unwrap();
        let decoded = code.decode(&clean).unwrap();
        assert_eq!(decoded.corrected, None);
        assert_eq!(decoded.data, bits("0110"));
    }

    #[test]
    fn check_matrix_columns_count_in_binary() {
        let code = HammingCode::new(3).unwrap();
        let check = code.check_matrix();
        // Column p-1 is the binary expansion of p, least significant row
        // first.
        for p in 1..=7usize {
            for (i, row) in check.iter().enumerate() {
                assert_eq!(row[p - 1], ((p >> i) & 1) as u8, "position {}", p);
            }
        }
    }

    #[test]
    fn generator_matrix_shape() {
        let code = HammingCode::new(3).unwrap();
        let gen = code.generator_matrix();
        assert_eq!(gen.len(), 4);
        assert!(gen.iter().all(|row| row.len() == 7));
        // Leading k columns form the identity.
        for (i, row) in gen.iter().enumerate() {
            for (j, &bit) in row.iter().take(4).enumerate() {
                assert_eq!(bit, u8::from(i == j));
            }
        }
    }

    #[test]
    fn smallest_code_roundtrips() {
        let code = HammingCode::new(2).unwrap();
        assert_eq!(code.codeword_length(), 3);
        assert_eq!(code.data_length(), 1);
        for word in ["0", "1"] {
            let decoded = code.decode(&code.encode(&bits(word)).unwrap()).unwrap();
            assert_eq!(decoded.data, bits(word));
        }
    }
}
