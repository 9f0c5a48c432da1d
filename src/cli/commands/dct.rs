//! dct command - Transform vectors and compress grayscale images

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use serde_json::json;

use crate::cli::Context;
use crate::dct::image::{compress_image, GrayImage};
use crate::dct::{demo_vectors, dct_1d, idct_1d, transform_matrix, KeepRatio, Matrix};
use crate::ui::{output, prompts};

/// Transform one or more sample vectors and reconstruct them.
pub fn vector(ctx: &Context, values: Option<String>, demo: bool, matrix: bool) -> Result<()> {
    let sets: Vec<(String, Vec<f64>)> = if demo {
        demo_vectors()
            .into_iter()
            .map(|(name, v)| (name.to_string(), v))
            .collect()
    } else {
        let samples = resolve_samples(ctx, values)?;
        vec![("input".to_string(), samples)]
    };

    let mut json_entries = Vec::new();

    for (name, samples) in &sets {
        let coefficients = dct_1d(samples)?;
        let reconstructed = idct_1d(&coefficients)?;

        if ctx.json {
            json_entries.push(json!({
                "name": name,
                "samples": samples,
                "coefficients": coefficients,
                "reconstructed": reconstructed,
            }));
            continue;
        }

        println!("--- {} ---", name);
        println!("samples:       {}", output::format_float_vec(samples));
        println!("coefficients:  {}", output::format_float_vec(&coefficients));
        println!("reconstructed: {}", output::format_float_vec(&reconstructed));
        if matrix {
            println!("transformation matrix:");
            let a = transform_matrix(samples.len());
            for r in 0..a.rows() {
                let row: Vec<f64> = (0..a.cols()).map(|c| a[(r, c)]).collect();
                println!("  {}", output::format_float_vec(&row));
            }
        }
        println!();
    }

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&json_entries)?);
    }
    Ok(())
}

/// Compress a PGM image by truncating high-frequency DCT coefficients.
pub fn image(
    ctx: &Context,
    input: PathBuf,
    keep: Option<f64>,
    output_path: Option<PathBuf>,
    diff: Option<PathBuf>,
    coefficients: Option<PathBuf>,
    ascii: bool,
) -> Result<()> {
    let keep = resolve_keep_ratio(ctx, keep)?;

    let image = GrayImage::load_pgm(&input)
        .with_context(|| format!("failed to load image '{}'", input.display()))?;
    output::debug(
        format!("loaded {}x{} image", image.width(), image.height()),
        ctx.verbosity(),
    );

    let result = compress_image(&image, keep)?;

    let output_path = output_path.unwrap_or_else(|| default_output_path(&input));
    result
        .reconstructed
        .save_pgm(&output_path, !ascii)
        .with_context(|| format!("failed to write '{}'", output_path.display()))?;

    if let Some(path) = &diff {
        result
            .difference
            .save_pgm(path, !ascii)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
    }

    if let Some(path) = &coefficients {
        let truncated = crate::dct::truncate(&crate::dct::dct_2d(&image.to_matrix())?, keep);
        spectrum_image(&truncated)?
            .save_pgm(path, !ascii)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
    }

    if ctx.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "input": input.display().to_string(),
                "output": output_path.display().to_string(),
                "width": image.width(),
                "height": image.height(),
                "keep_percent": keep.percent(),
                "report": result.report,
            }))?
        );
        return Ok(());
    }

    output::print(
        format!(
            "reconstructed {}x{} image with {:.0}% of coefficients ({} of {})",
            image.width(),
            image.height(),
            keep.percent(),
            result.report.kept_coefficients,
            result.report.total_coefficients,
        ),
        ctx.verbosity(),
    );
    output::print(
        format!(
            "max abs error {:.3}, mean squared error {:.3}",
            result.report.max_abs_error, result.report.mean_squared_error,
        ),
        ctx.verbosity(),
    );
    println!("{}", output_path.display());
    Ok(())
}

/// Resolve the keep percentage: flag, then interactive prompt (default from
/// config), then the config value alone.
fn resolve_keep_ratio(ctx: &Context, keep: Option<f64>) -> Result<KeepRatio> {
    if let Some(percent) = keep {
        return Ok(KeepRatio::from_percent(percent)?);
    }

    let config_percent = ctx.config.keep_ratio() * 100.0;
    if !ctx.interactive {
        return Ok(KeepRatio::from_percent(config_percent)?);
    }

    let default = format!("{}", config_percent);
    loop {
        let raw = prompts::input(
            "Enter the keep ratio for DCT compression (0-100)",
            Some(&default),
            ctx.interactive,
        )?;
        match raw.parse::<f64>() {
            Ok(percent) => match KeepRatio::from_percent(percent) {
                Ok(keep) => return Ok(keep),
                Err(err) => output::error(err),
            },
            Err(_) => output::error(format!("invalid number '{}'", raw)),
        }
    }
}

/// Resolve the sample list, prompting in interactive mode.
fn resolve_samples(ctx: &Context, values: Option<String>) -> Result<Vec<f64>> {
    if let Some(raw) = values {
        return parse_samples(&raw).map_err(anyhow::Error::msg);
    }
    loop {
        let raw = prompts::input(
            "Enter samples separated by commas",
            None,
            ctx.interactive,
        )
        .context("missing samples; pass --values or run interactively")?;
        match parse_samples(&raw) {
            Ok(samples) => return Ok(samples),
            Err(err) => output::error(err),
        }
    }
}

fn parse_samples(raw: &str) -> Result<Vec<f64>, String> {
    let samples: Result<Vec<f64>, String> = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse()
                .map_err(|_| format!("invalid number '{}'", part))
        })
        .collect();
    let samples = samples?;
    if samples.is_empty() {
        return Err("expected at least one sample".to_string());
    }
    Ok(samples)
}

/// Default reconstructed-image path: `photo.pgm` -> `photo-reconstructed.pgm`.
fn default_output_path(input: &std::path::Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{}-reconstructed.pgm", stem))
}

/// Log-scaled magnitude of a coefficient matrix as a grayscale image.
fn spectrum_image(coefficients: &Matrix) -> Result<GrayImage> {
    let log_scaled = coefficients.map(|v| (v.abs() + 1.0).ln());
    let max = log_scaled.iter().fold(0.0f64, f64::max);
    let normalized = if max > 0.0 {
        log_scaled.map(|v| v / max * 255.0)
    } else {
        log_scaled
    };
    Ok(GrayImage::from_matrix(&normalized)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_samples_handles_spacing() {
        assert_eq!(
            parse_samples("1, 2.5 ,3").unwrap(),
            vec![1.0, 2.5, 3.0]
        );
    }

    #[test]
    fn parse_samples_rejects_garbage() {
        assert!(parse_samples("1,x").is_err());
        assert!(parse_samples("").is_err());
    }

    #[test]
    fn default_output_path_appends_suffix() {
        assert_eq!(
            default_output_path(std::path::Path::new("dir/photo.pgm")),
            PathBuf::from("dir/photo-reconstructed.pgm")
        );
    }

    #[test]
    fn spectrum_of_zero_matrix_is_black() {
        let image = spectrum_image(&Matrix::zeros(2, 2)).unwrap();
        assert!(image.pixels().iter().all(|&p| p == 0));
    }
}
