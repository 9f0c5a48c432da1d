//! coding::gf2
//!
//! Small dense matrix helpers over GF(2). Matrices are row vectors of bits
//! (0 or 1), sized by the code parameters, so a plain `Vec<Vec<u8>>`
//! representation is sufficient.

/// Identity matrix of the given size.
pub fn identity(size: usize) -> Vec<Vec<u8>> {
    (0..size)
        .map(|row| (0..size).map(|col| u8::from(row == col)).collect())
        .collect()
}

/// Matrix-vector product over GF(2).
///
/// # Panics
///
/// Panics if the vector length does not match the matrix column count.
pub fn mat_vec(matrix: &[Vec<u8>], vector: &[u8]) -> Vec<u8> {
    matrix
        .iter()
        .map(|row| {
            assert_eq!(row.len(), vector.len(), "GF(2) dimension mismatch");
            row.iter()
                .zip(vector)
                .fold(0u8, |acc, (&m, &v)| acc ^ (m & v))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_has_unit_diagonal() {
        let id = identity(3);
        assert_eq!(id, vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]);
    }

    #[test]
    fn mat_vec_reduces_mod_two() {
        let m = vec![vec![1, 1, 1], vec![1, 0, 1]];
        // First row sums three set bits -> 1, second row two -> 0.
        assert_eq!(mat_vec(&m, &[1, 1, 1]), vec![1, 0]);
    }

    #[test]
    fn identity_is_neutral() {
        let v = [1, 0, 1, 1];
        assert_eq!(mat_vec(&identity(4), &v), v.to_vec());
    }
}
