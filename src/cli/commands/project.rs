//! project command - Central projection of a parallelepiped

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use serde_json::json;

use crate::cli::args::parse_vec3;
use crate::cli::Context;
use crate::projection::scene::Scene;
use crate::projection::svg::{render, SvgOptions};
use crate::projection::{Parallelepiped, Projection, Vec3, CORNER_LABELS};
use crate::ui::{output, prompts};

/// Project a parallelepiped through one or more centers.
#[allow(clippy::too_many_arguments)]
pub fn project(
    ctx: &Context,
    scene: Option<PathBuf>,
    support: Option<Vec3>,
    a: Option<Vec3>,
    b: Option<Vec3>,
    c: Option<Vec3>,
    centers: Vec<Vec3>,
    svg: Option<PathBuf>,
    no_labels: bool,
) -> Result<()> {
    let (solid, named_centers) = if let Some(path) = scene {
        if support.is_some() || a.is_some() || b.is_some() || c.is_some() || !centers.is_empty() {
            bail!("--scene cannot be combined with inline vector flags");
        }
        let scene = Scene::load(&path)
            .with_context(|| format!("failed to load scene '{}'", path.display()))?;
        let solid = scene.parallelepiped()?;
        let named: Vec<(String, Vec3)> = scene
            .centers
            .iter()
            .enumerate()
            .map(|(i, center)| (center.display_name(i), center.position))
            .collect();
        (solid, named)
    } else {
        let support = resolve_vector(ctx, support, "Support vector s (x,y,z)")?;
        let a = resolve_vector(ctx, a, "Spanning vector a (x,y,z)")?;
        let b = resolve_vector(ctx, b, "Spanning vector b (x,y,z)")?;
        let c = resolve_vector(ctx, c, "Spanning vector c (x,y,z)")?;
        let solid = Parallelepiped::new(support, a, b, c)?;

        let centers = if centers.is_empty() {
            vec![resolve_vector(ctx, None, "Projection center (x,y,z)")?]
        } else {
            centers
        };
        let named: Vec<(String, Vec3)> = centers
            .into_iter()
            .enumerate()
            .map(|(i, position)| (format!("center-{}", i + 1), position))
            .collect();
        (solid, named)
    };

    for (label, corner) in CORNER_LABELS.iter().zip(solid.corners()) {
        output::debug(format!("corner {} = {}", label, corner), ctx.verbosity());
    }

    let mut json_entries = Vec::new();
    let center_count = named_centers.len();

    for (index, (name, center)) in named_centers.iter().enumerate() {
        let projection = solid
            .project(*center)
            .with_context(|| format!("cannot project through {} at {}", name, center))?;

        if ctx.json {
            json_entries.push(projection_json(name, *center, &projection));
        } else {
            print_projection(ctx, name, *center, &projection);
        }

        if let Some(base) = &svg {
            let path = svg_path(base, index, center_count);
            let (width, height) = ctx.config.svg_size();
            let options = SvgOptions {
                width,
                height,
                corner_labels: !no_labels,
                title: Some(name.clone()),
                ..Default::default()
            };
            std::fs::write(&path, render(&projection, &options))
                .with_context(|| format!("failed to write SVG '{}'", path.display()))?;
            output::print(
                format!("wrote drawing for {} to {}", name, path.display()),
                ctx.verbosity(),
            );
        }
    }

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&json_entries)?);
    }

    Ok(())
}

/// Resolve a vector flag, prompting in interactive mode.
fn resolve_vector(ctx: &Context, value: Option<Vec3>, message: &str) -> Result<Vec3> {
    if let Some(v) = value {
        return Ok(v);
    }
    loop {
        let raw = prompts::input(message, None, ctx.interactive)
            .context("missing vector; pass it as a flag or run interactively")?;
        match parse_vec3(&raw) {
            Ok(v) => return Ok(v),
            Err(err) => output::error(err),
        }
    }
}

/// Derive a per-center SVG path: `figure.svg` becomes `figure-2.svg` for
/// the second center and so on. A single center keeps the path as given.
fn svg_path(base: &Path, index: usize, count: usize) -> PathBuf {
    if count <= 1 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "projection".to_string());
    let extension = base.extension().map(|s| s.to_string_lossy().into_owned());
    let file = match extension {
        Some(ext) => format!("{}-{}.{}", stem, index + 1, ext),
        None => format!("{}-{}", stem, index + 1),
    };
    base.with_file_name(file)
}

fn print_projection(ctx: &Context, name: &str, center: Vec3, projection: &Projection) {
    output::print(
        format!("projection through {} at {}:", name, center),
        ctx.verbosity(),
    );
    for (label, point) in projection.labeled() {
        // The bare corner lines are the command's output, so they print
        // even in quiet mode.
        println!("  {}' = {}", label, point);
    }
}

fn projection_json(name: &str, center: Vec3, projection: &Projection) -> serde_json::Value {
    let corners: serde_json::Map<String, serde_json::Value> = projection
        .labeled()
        .map(|(label, point)| (label.to_string(), json!([point.x, point.y])))
        .collect();
    json!({
        "center": { "name": name, "position": <[f64; 3]>::from(center) },
        "corners": corners,
    })
}
