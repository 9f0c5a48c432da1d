//! Integration tests for the DCT pipeline: transforms, truncation, and the
//! PGM image path.

use tempfile::TempDir;

use linlab::dct::image::{compress_image, GrayImage};
use linlab::dct::{
    compress, dct_1d, dct_2d, demo_vectors, idct_1d, idct_2d, transform_matrix, DctError,
    KeepRatio, Matrix,
};

fn assert_close(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() < eps, "{} !~ {}", a, b);
}

// =============================================================================
// 1D transform
// =============================================================================

#[test]
fn demo_vectors_roundtrip() {
    for (name, samples) in demo_vectors() {
        let coefficients = dct_1d(&samples).unwrap();
        let reconstructed = idct_1d(&coefficients).unwrap();
        for (a, b) in samples.iter().zip(&reconstructed) {
            assert!((a - b).abs() < 1e-9, "{}: {} != {}", name, a, b);
        }
    }
}

#[test]
fn constant_signal_concentrates_in_dc() {
    let coefficients = dct_1d(&[10.0; 8]).unwrap();
    // sqrt(8) * 10
    assert_close(coefficients[0], 28.284271247461902, 1e-9);
    for &c in &coefficients[1..] {
        assert_close(c, 0.0, 1e-9);
    }
}

#[test]
fn alternating_signal_concentrates_in_highest_frequency() {
    let coefficients = dct_1d(&[1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0]).unwrap();
    let (max_index, _) = coefficients
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
        .unwrap();
    assert_eq!(max_index, 7);
}

#[test]
fn transform_preserves_energy() {
    // Orthonormal transforms preserve the Euclidean norm.
    let samples = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0];
    let coefficients = dct_1d(&samples).unwrap();
    let before: f64 = samples.iter().map(|v| v * v).sum();
    let after: f64 = coefficients.iter().map(|v| v * v).sum();
    assert_close(before, after, 1e-6);
}

// =============================================================================
// 2D transform
// =============================================================================

#[test]
fn two_dimensional_roundtrip_non_square() {
    let samples = Matrix::from_fn(6, 9, |r, c| ((r * 37 + c * 11) % 251) as f64);
    let back = idct_2d(&dct_2d(&samples).unwrap()).unwrap();
    for (a, b) in samples.iter().zip(back.iter()) {
        assert_close(a, b, 1e-9);
    }
}

#[test]
fn flat_image_transforms_to_single_coefficient() {
    let samples = Matrix::from_fn(4, 4, |_, _| 128.0);
    let coefficients = dct_2d(&samples).unwrap();
    // DC = value * sqrt(rows * cols)
    assert_close(coefficients[(0, 0)], 512.0, 1e-9);
    let off_dc: f64 = coefficients
        .iter()
        .skip(1)
        .map(f64::abs)
        .fold(0.0, f64::max);
    assert_close(off_dc, 0.0, 1e-9);
}

#[test]
fn compression_error_grows_as_keep_shrinks() {
    let samples = Matrix::from_fn(16, 16, |r, c| {
        128.0 + 100.0 * ((r as f64) * 0.7).sin() * ((c as f64) * 0.3).cos()
    });

    let full = compress(&samples, KeepRatio::new(1.0).unwrap()).unwrap();
    let half = compress(&samples, KeepRatio::new(0.5).unwrap()).unwrap();
    let tenth = compress(&samples, KeepRatio::new(0.1).unwrap()).unwrap();

    assert_close(full.report.max_abs_error, 0.0, 1e-9);
    assert!(half.report.mean_squared_error <= tenth.report.mean_squared_error);
    assert!(tenth.report.mean_squared_error > 0.0);
}

#[test]
fn empty_matrix_is_rejected() {
    assert_eq!(dct_2d(&Matrix::zeros(0, 5)).unwrap_err(), DctError::EmptyInput);
}

// =============================================================================
// Image pipeline
// =============================================================================

fn test_image(width: usize, height: usize) -> GrayImage {
    let pixels = (0..width * height)
        .map(|i| {
            let x = i % width;
            let y = i / width;
            ((x * 13 + y * 29) % 256) as u8
        })
        .collect();
    GrayImage::new(width, height, pixels).unwrap()
}

#[test]
fn image_saves_and_reloads_in_both_formats() {
    let dir = TempDir::new().expect("create temp dir");
    let image = test_image(12, 7);

    for (name, binary) in [("plain.pgm", false), ("binary.pgm", true)] {
        let path = dir.path().join(name);
        image.save_pgm(&path, binary).expect("save image");
        let reloaded = GrayImage::load_pgm(&path).expect("reload image");
        assert_eq!(image, reloaded, "{}", name);
    }
}

#[test]
fn full_keep_image_compression_is_lossless() {
    let image = test_image(8, 8);
    let result = compress_image(&image, KeepRatio::new(1.0).unwrap()).unwrap();
    assert_eq!(result.reconstructed, image);
    assert!(result.difference.pixels().iter().all(|&p| p == 0));
}

#[test]
fn truncated_image_compression_reports_loss() {
    let image = test_image(16, 16);
    let result = compress_image(&image, KeepRatio::from_percent(25.0).unwrap()).unwrap();
    assert_eq!(result.report.kept_rows, 4);
    assert_eq!(result.report.kept_cols, 4);
    assert_eq!(result.report.kept_coefficients, 16);
    assert_eq!(result.report.total_coefficients, 256);
    assert!(result.report.max_abs_error > 0.0);
    assert!(result.difference.pixels().iter().any(|&p| p > 0));
}

#[test]
fn reconstruction_stays_in_sample_range() {
    let image = test_image(16, 16);
    let result = compress_image(&image, KeepRatio::new(0.3).unwrap()).unwrap();
    assert_eq!(result.reconstructed.width(), 16);
    assert_eq!(result.reconstructed.height(), 16);
    // from_matrix clamps, so every sample is a valid u8 by construction;
    // check the shape survived instead.
    assert_eq!(result.reconstructed.pixels().len(), 256);
}
