//! dct
//!
//! Orthonormal discrete cosine transform (DCT-II) and coefficient-truncation
//! compression.
//!
//! # Transform
//!
//! The transform is built from an explicit orthonormal matrix `A` with
//! `A[0][j] = sqrt(1/n)` and `A[i][j] = sqrt(2/n) * cos(pi * i * (1/2 + j) / n)`
//! for `i > 0`. The 1D transform of a vector `v` is `A . v`, the inverse is
//! `A^T . y`. The 2D transform of a matrix `X` is `A_h . X . A_w^T`.
//!
//! # Compression
//!
//! "Compression" keeps the low-frequency top-left block of the 2D
//! coefficient matrix and zeroes the rest, controlled by a [`KeepRatio`].
//! Reconstruction quality is summarized in a [`ReconstructionReport`].

pub mod image;
pub mod matrix;

use serde::Serialize;
use thiserror::Error;

pub use matrix::Matrix;

/// Differences smaller than this are reported as zero; they are transform
/// round-off, not compression loss.
pub const NOISE_THRESHOLD: f64 = 1e-10;

/// Errors from transform and compression operations.
#[derive(Debug, Error, PartialEq)]
pub enum DctError {
    #[error("input must not be empty")]
    EmptyInput,

    #[error("keep ratio must be a fraction between 0 and 1, got {0}")]
    InvalidKeepRatio(f64),

    #[error("keep percentage must be between 0 and 100, got {0}")]
    InvalidKeepPercent(f64),
}

/// A validated fraction of coefficients to keep, in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct KeepRatio(f64);

impl KeepRatio {
    /// Validate a fraction in `0..=1`.
    pub fn new(fraction: f64) -> Result<Self, DctError> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(DctError::InvalidKeepRatio(fraction));
        }
        Ok(Self(fraction))
    }

    /// Validate a percentage in `0..=100`.
    pub fn from_percent(percent: f64) -> Result<Self, DctError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(DctError::InvalidKeepPercent(percent));
        }
        Ok(Self(percent / 100.0))
    }

    /// The fraction in `0..=1`.
    pub fn fraction(&self) -> f64 {
        self.0
    }

    /// The fraction as a percentage.
    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }
}

/// The orthonormal DCT transformation matrix of size `n`.
pub fn transform_matrix(n: usize) -> Matrix {
    let nf = n as f64;
    Matrix::from_fn(n, n, |i, j| {
        if i == 0 {
            (1.0 / nf).sqrt()
        } else {
            (2.0 / nf).sqrt() * (std::f64::consts::PI * i as f64 * (0.5 + j as f64) / nf).cos()
        }
    })
}

/// 1D DCT of a vector.
///
/// # Errors
///
/// Returns `DctError::EmptyInput` for an empty vector.
pub fn dct_1d(v: &[f64]) -> Result<Vec<f64>, DctError> {
    if v.is_empty() {
        return Err(DctError::EmptyInput);
    }
    Ok(transform_matrix(v.len()).mul_vec(v))
}

/// Inverse 1D DCT of a coefficient vector.
///
/// # Errors
///
/// Returns `DctError::EmptyInput` for an empty vector.
pub fn idct_1d(y: &[f64]) -> Result<Vec<f64>, DctError> {
    if y.is_empty() {
        return Err(DctError::EmptyInput);
    }
    Ok(transform_matrix(y.len()).transpose().mul_vec(y))
}

/// 2D DCT of a matrix: `A_h . X . A_w^T`.
///
/// # Errors
///
/// Returns `DctError::EmptyInput` for an empty matrix.
pub fn dct_2d(x: &Matrix) -> Result<Matrix, DctError> {
    if x.is_empty() {
        return Err(DctError::EmptyInput);
    }
    let a_h = transform_matrix(x.rows());
    let a_w = transform_matrix(x.cols());
    Ok(a_h.mul(x).mul(&a_w.transpose()))
}

/// Inverse 2D DCT: `A_h^T . Y . A_w`.
///
/// # Errors
///
/// Returns `DctError::EmptyInput` for an empty matrix.
pub fn idct_2d(y: &Matrix) -> Result<Matrix, DctError> {
    if y.is_empty() {
        return Err(DctError::EmptyInput);
    }
    let a_h = transform_matrix(y.rows());
    let a_w = transform_matrix(y.cols());
    Ok(a_h.transpose().mul(y).mul(&a_w))
}

/// Zero all coefficients outside the top-left block.
///
/// The kept block is `floor(rows * r)` by `floor(cols * r)`.
pub fn truncate(coefficients: &Matrix, keep: KeepRatio) -> Matrix {
    let keep_rows = (coefficients.rows() as f64 * keep.fraction()) as usize;
    let keep_cols = (coefficients.cols() as f64 * keep.fraction()) as usize;

    Matrix::from_fn(coefficients.rows(), coefficients.cols(), |r, c| {
        if r < keep_rows && c < keep_cols {
            coefficients[(r, c)]
        } else {
            0.0
        }
    })
}

/// Reconstruction quality summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconstructionReport {
    /// Rows of the kept coefficient block
    pub kept_rows: usize,
    /// Columns of the kept coefficient block
    pub kept_cols: usize,
    /// Number of kept coefficients
    pub kept_coefficients: usize,
    /// Total number of coefficients
    pub total_coefficients: usize,
    /// Largest absolute sample difference
    pub max_abs_error: f64,
    /// Mean squared sample difference
    pub mean_squared_error: f64,
}

impl ReconstructionReport {
    /// Compare a reconstruction against the original.
    ///
    /// Differences below [`NOISE_THRESHOLD`] count as zero.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ; both matrices come from the same
    /// pipeline.
    pub fn compare(
        original: &Matrix,
        reconstructed: &Matrix,
        kept_rows: usize,
        kept_cols: usize,
    ) -> Self {
        assert_eq!(original.rows(), reconstructed.rows(), "shape mismatch");
        assert_eq!(original.cols(), reconstructed.cols(), "shape mismatch");

        let mut max_abs = 0.0f64;
        let mut sum_sq = 0.0f64;
        let total = original.rows() * original.cols();
        for (a, b) in original.iter().zip(reconstructed.iter()) {
            let mut diff = (a - b).abs();
            if diff < NOISE_THRESHOLD {
                diff = 0.0;
            }
            max_abs = max_abs.max(diff);
            sum_sq += diff * diff;
        }

        Self {
            kept_rows,
            kept_cols,
            kept_coefficients: kept_rows * kept_cols,
            total_coefficients: total,
            max_abs_error: max_abs,
            mean_squared_error: sum_sq / total as f64,
        }
    }
}

/// Result of the transform-truncate-reconstruct pipeline.
#[derive(Debug, Clone)]
pub struct Compressed {
    /// Truncated coefficient matrix
    pub coefficients: Matrix,
    /// Reconstructed samples
    pub reconstructed: Matrix,
    /// Quality summary
    pub report: ReconstructionReport,
}

/// Run the full pipeline on a sample matrix.
///
/// # Errors
///
/// Returns `DctError::EmptyInput` for an empty matrix.
pub fn compress(samples: &Matrix, keep: KeepRatio) -> Result<Compressed, DctError> {
    let coefficients = dct_2d(samples)?;
    let truncated = truncate(&coefficients, keep);
    let reconstructed = idct_2d(&truncated)?;

    let kept_rows = (samples.rows() as f64 * keep.fraction()) as usize;
    let kept_cols = (samples.cols() as f64 * keep.fraction()) as usize;
    let report = ReconstructionReport::compare(samples, &reconstructed, kept_rows, kept_cols);

    Ok(Compressed {
        coefficients: truncated,
        reconstructed,
        report,
    })
}

/// The four demonstration vectors used by `dct vector --demo`.
pub fn demo_vectors() -> Vec<(&'static str, Vec<f64>)> {
    vec![
        (
            "linear ramp",
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0],
        ),
        (
            "alternating signal",
            vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0],
        ),
        ("constant", vec![10.0; 8]),
        ("impulse", vec![0.0, 0.0, 0.0, 100.0, 0.0, 0.0, 0.0, 0.0]),
    ]
}
