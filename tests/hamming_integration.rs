//! Integration tests for Hamming encoding, decoding, and correction.

use linlab::coding::{CodingError, HammingCode};
use linlab::core::types::Bits;

fn bits(s: &str) -> Bits {
    Bits::parse(s).unwrap()
}

// =============================================================================
// (7, 4) golden values
// =============================================================================

#[test]
fn seven_four_golden_encodings() {
    let code = HammingCode::new(3).unwrap();
    // Parity positions 1, 2, 4 computed by hand.
    for (data, expected) in [
        ("0000", "0000000"),
        ("1011", "1010101"),
        ("1111", "1111111"),
        ("0001", "0000111"),
    ] {
        assert_eq!(
            code.encode(&bits(data)).unwrap(),
            bits(expected),
            "data {}",
            data
        );
    }
}

#[test]
fn decode_recovers_data_from_clean_codeword() {
    let code = HammingCode::new(3).unwrap();
    let decoded = code.decode(&bits("1010101")).unwrap();
    assert_eq!(decoded.data, bits("1011"));
    assert_eq!(decoded.syndrome, 0);
    assert_eq!(decoded.corrected, None);
}

// =============================================================================
// Error correction sweeps
// =============================================================================

#[test]
fn every_single_bit_error_is_corrected_in_seven_four() {
    let code = HammingCode::new(3).unwrap();
    for data in ["0000", "1011", "0110", "1111", "1000"] {
        let clean = code.encode(&bits(data)).unwrap();
        for index in 0..7 {
            let mut noisy = clean.clone();
            noisy.flip(index).unwrap();

            let decoded = code.decode(&noisy).unwrap();
            assert_eq!(decoded.codeword, clean, "data {} index {}", data, index);
            assert_eq!(decoded.data, bits(data), "data {} index {}", data, index);
            // Position counts from 1 at the rightmost bit.
            assert_eq!(decoded.corrected, Some(7 - index));
        }
    }
}

#[test]
fn every_single_bit_error_is_corrected_in_fifteen_eleven() {
    let code = HammingCode::new(4).unwrap();
    assert_eq!(code.codeword_length(), 15);
    assert_eq!(code.data_length(), 11);

    let data = bits("10110011100");
    let clean = code.encode(&data).unwrap();
    assert!(code.is_valid(&clean).unwrap());

    for index in 0..15 {
        let mut noisy = clean.clone();
        noisy.flip(index).unwrap();
        assert!(!code.is_valid(&noisy).unwrap());

        let decoded = code.decode(&noisy).unwrap();
        assert_eq!(decoded.data, data, "index {}", index);
    }
}

#[test]
fn syndrome_is_the_position_from_the_right() {
    let code = HammingCode::new(3).unwrap();
    let clean = code.encode(&bits("0110")).unwrap();
    for position in 1..=7usize {
        let mut noisy = clean.clone();
        noisy.flip(7 - position).unwrap();
        assert_eq!(code.syndrome(&noisy).unwrap(), position);
    }
}

// =============================================================================
// Input validation
// =============================================================================

#[test]
fn mismatched_lengths_are_rejected() {
    let code = HammingCode::new(3).unwrap();
    assert_eq!(
        code.encode(&bits("10110")).unwrap_err(),
        CodingError::DataLengthMismatch {
            expected: 4,
            actual: 5
        }
    );
    assert_eq!(
        code.decode(&bits("1010")).unwrap_err(),
        CodingError::CodewordLengthMismatch {
            expected: 7,
            actual: 4
        }
    );
}

#[test]
fn parity_bit_bounds_are_enforced() {
    assert!(matches!(
        HammingCode::new(0),
        Err(CodingError::TooFewParityBits(0))
    ));
    assert!(matches!(
        HammingCode::new(1),
        Err(CodingError::TooFewParityBits(1))
    ));
    assert!(HammingCode::new(2).is_ok());
    assert!(HammingCode::new(12).is_ok());
    assert!(matches!(
        HammingCode::new(13),
        Err(CodingError::TooManyParityBits(13))
    ));
}

// =============================================================================
// Matrices
// =============================================================================

#[test]
fn generator_rows_encode_to_valid_codewords() {
    // Parity columns in the generator were built from the check matrix, so
    // a data word encoded by `encode` must always check out.
    let code = HammingCode::new(4).unwrap();
    for row in 0..code.data_length() {
        let mut data = vec![0u8; code.data_length()];
        data[row] = 1;
        let word = code.encode(&Bits::from_bits(&data).unwrap()).unwrap();
        assert!(code.is_valid(&word).unwrap(), "unit data row {}", row);
    }
}

#[test]
fn check_matrix_has_distinct_nonzero_columns() {
    let code = HammingCode::new(4).unwrap();
    let check = code.check_matrix();
    let columns: Vec<Vec<u8>> = (0..code.codeword_length())
        .map(|p| check.iter().map(|row| row[p]).collect())
        .collect();

    for (i, column) in columns.iter().enumerate() {
        assert!(column.iter().any(|&b| b == 1), "column {} is zero", i);
        for other in columns.iter().skip(i + 1) {
            assert_ne!(column, other);
        }
    }
}
