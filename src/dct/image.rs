//! dct::image
//!
//! Grayscale images and the PGM (portable graymap) codec, plus the
//! image-level compression pipeline.
//!
//! # Format support
//!
//! Plain (`P2`) and binary (`P5`) PGM with a maxval of at most 255.
//! Comments (`#` to end of line) are accepted anywhere in the header.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{compress, DctError, KeepRatio, Matrix, ReconstructionReport};

/// Errors from PGM decoding and encoding.
#[derive(Debug, Error)]
pub enum PgmError {
    #[error("failed to read image '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write image '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("not a PGM image: expected magic 'P2' or 'P5', found '{0}'")]
    BadMagic(String),

    #[error("malformed PGM header: {0}")]
    MalformedHeader(String),

    #[error("unsupported maxval {0}: only maxval <= 255 is supported")]
    UnsupportedMaxval(u32),

    #[error("sample value {value} exceeds maxval {maxval}")]
    SampleOutOfRange { value: u32, maxval: u32 },

    #[error("image data ended early: expected {expected} samples, found {found}")]
    TruncatedData { expected: usize, found: usize },

    #[error("image dimensions must be positive, got {width}x{height}")]
    EmptyImage { width: usize, height: usize },
}

/// A grayscale raster image, row-major, 8 bits per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl GrayImage {
    /// Build an image from raw samples.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions; panics are reserved for the
    /// internal length invariant.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, PgmError> {
        if width == 0 || height == 0 {
            return Err(PgmError::EmptyImage { width, height });
        }
        assert_eq!(pixels.len(), width * height, "sample count mismatch");
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The sample at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    /// Convert to a sample matrix (rows = image rows).
    pub fn to_matrix(&self) -> Matrix {
        Matrix::from_fn(self.height, self.width, |r, c| {
            f64::from(self.pixels[r * self.width + c])
        })
    }

    /// Build an image from a sample matrix, rounding and clamping to
    /// `0..=255`.
    pub fn from_matrix(matrix: &Matrix) -> Result<Self, PgmError> {
        let pixels = matrix
            .iter()
            .map(|v| v.round().clamp(0.0, 255.0) as u8)
            .collect();
        Self::new(matrix.cols(), matrix.rows(), pixels)
    }

    /// Load a PGM file.
    pub fn load_pgm(path: &Path) -> Result<Self, PgmError> {
        let bytes = fs::read(path).map_err(|e| PgmError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::decode_pgm(&bytes)
    }

    /// Decode PGM bytes (plain `P2` or binary `P5`).
    pub fn decode_pgm(bytes: &[u8]) -> Result<Self, PgmError> {
        let mut reader = TokenReader::new(bytes);

        let magic = reader
            .next_token()
            .ok_or_else(|| PgmError::MalformedHeader("missing magic number".into()))?;
        let binary = match magic.as_str() {
            "P2" => false,
            "P5" => true,
            other => return Err(PgmError::BadMagic(other.to_string())),
        };

        let width = reader.next_usize("width")?;
        let height = reader.next_usize("height")?;
        let maxval = reader.next_usize("maxval")? as u32;
        if maxval == 0 || maxval > 255 {
            return Err(PgmError::UnsupportedMaxval(maxval));
        }
        if width == 0 || height == 0 {
            return Err(PgmError::EmptyImage { width, height });
        }

        let expected = width * height;
        let pixels = if binary {
            // Exactly one whitespace byte separates the header from the
            // raster.
            let data = reader.rest_after_single_whitespace();
            if data.len() < expected {
                return Err(PgmError::TruncatedData {
                    expected,
                    found: data.len(),
                });
            }
            data[..expected].to_vec()
        } else {
            let mut samples = Vec::with_capacity(expected);
            while samples.len() < expected {
                match reader.next_token() {
                    Some(token) => {
                        let value: u32 = token.parse().map_err(|_| {
                            PgmError::MalformedHeader(format!("invalid sample '{}'", token))
                        })?;
                        if value > maxval {
                            return Err(PgmError::SampleOutOfRange { value, maxval });
                        }
                        samples.push(value as u8);
                    }
                    None => {
                        return Err(PgmError::TruncatedData {
                            expected,
                            found: samples.len(),
                        })
                    }
                }
            }
            samples
        };

        Self::new(width, height, pixels)
    }

    /// Encode as PGM bytes.
    pub fn encode_pgm(&self, binary: bool) -> Vec<u8> {
        if binary {
            let mut out = format!("P5\n{} {}\n255\n", self.width, self.height).into_bytes();
            out.extend_from_slice(&self.pixels);
            out
        } else {
            let mut out = format!("P2\n{} {}\n255\n", self.width, self.height);
            for row in self.pixels.chunks(self.width) {
                let line: Vec<String> = row.iter().map(|p| p.to_string()).collect();
                out.push_str(&line.join(" "));
                out.push('\n');
            }
            out.into_bytes()
        }
    }

    /// Write a PGM file.
    pub fn save_pgm(&self, path: &Path, binary: bool) -> Result<(), PgmError> {
        fs::write(path, self.encode_pgm(binary)).map_err(|e| PgmError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Whitespace/comment-aware token reader over PGM header bytes.
struct TokenReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> TokenReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#' {
                while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Option<String> {
        self.skip_whitespace_and_comments();
        if self.pos >= self.bytes.len() {
            return None;
        }
        let start = self.pos;
        while self.pos < self.bytes.len() && !self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        Some(String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned())
    }

    fn next_usize(&mut self, field: &str) -> Result<usize, PgmError> {
        let token = self
            .next_token()
            .ok_or_else(|| PgmError::MalformedHeader(format!("missing {}", field)))?;
        token
            .parse()
            .map_err(|_| PgmError::MalformedHeader(format!("invalid {} '{}'", field, token)))
    }

    fn rest_after_single_whitespace(&mut self) -> &'a [u8] {
        if self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        &self.bytes[self.pos..]
    }
}

/// Result of compressing an image.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    /// Reconstructed image after truncation
    pub reconstructed: GrayImage,
    /// Absolute per-pixel difference against the original
    pub difference: GrayImage,
    /// Quality summary over the float reconstruction
    pub report: ReconstructionReport,
}

/// Compress an image through the 2D DCT pipeline.
///
/// # Errors
///
/// `DctError::EmptyInput` cannot actually occur for a constructed
/// [`GrayImage`], but the transform errors are propagated unchanged.
pub fn compress_image(image: &GrayImage, keep: KeepRatio) -> Result<CompressedImage, DctError> {
    let samples = image.to_matrix();
    let result = compress(&samples, keep)?;

    let difference = Matrix::from_fn(samples.rows(), samples.cols(), |r, c| {
        let diff = (samples[(r, c)] - result.reconstructed[(r, c)]).abs();
        if diff < super::NOISE_THRESHOLD {
            0.0
        } else {
            diff
        }
    });

    // from_matrix only fails on empty shapes, which compress already
    // rejected above.
    let reconstructed =
        GrayImage::from_matrix(&result.reconstructed).map_err(|_| DctError::EmptyInput)?;
    let difference = GrayImage::from_matrix(&difference).map_err(|_| DctError::EmptyInput)?;

    Ok(CompressedImage {
        reconstructed,
        difference,
        report: result.report,
    })
}
