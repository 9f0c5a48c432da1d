//! projection::scene
//!
//! Scene files describe a parallelepiped and one or more projection centers
//! in TOML.
//!
//! # Example
//!
//! ```toml
//! support = [1.0, 1.0, 1.0]
//! a = [1.0, 2.0, 3.0]
//! b = [3.0, 1.0, 3.0]
//! c = [3.0, 2.0, 1.0]
//!
//! [[center]]
//! name = "wide"
//! position = [10.0, 5.0, 20.0]
//!
//! [[center]]
//! position = [1.0, 4.0, 20.0]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{validate_center, Parallelepiped, ProjectionError, Vec3};

/// Errors from scene loading and validation.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse scene file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("scene defines no projection centers")]
    NoCenters,

    #[error(transparent)]
    Invalid(#[from] ProjectionError),
}

/// A parallelepiped plus its projection centers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Support vector of the parallelepiped
    pub support: Vec3,
    /// Spanning vector a
    pub a: Vec3,
    /// Spanning vector b
    pub b: Vec3,
    /// Spanning vector c
    pub c: Vec3,
    /// Projection centers, at least one
    #[serde(rename = "center", default)]
    pub centers: Vec<Center>,
}

/// A named projection center.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Center {
    /// Optional display name; defaults to `center-<n>`
    pub name: Option<String>,
    /// Position of the center
    pub position: Vec3,
}

impl Center {
    /// Display name, falling back to a one-based index.
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("center-{}", index + 1),
        }
    }
}

impl Scene {
    /// Load and validate a scene from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, defines no
    /// centers, or describes an invalid solid/center combination.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let contents = fs::read_to_string(path).map_err(|e| SceneError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let scene: Scene = toml::from_str(&contents).map_err(|e| SceneError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        scene.validate()?;
        Ok(scene)
    }

    /// Validate the scene: solid in the first octant, at least one center,
    /// every center admissible.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.centers.is_empty() {
            return Err(SceneError::NoCenters);
        }

        let solid = self.parallelepiped()?;
        for center in &self.centers {
            validate_center(center.position, &solid)?;
        }
        Ok(())
    }

    /// Build the parallelepiped this scene describes.
    pub fn parallelepiped(&self) -> Result<Parallelepiped, ProjectionError> {
        Parallelepiped::new(self.support, self.a, self.b, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = r#"
        support = [1.0, 1.0, 1.0]
        a = [1.0, 2.0, 3.0]
        b = [3.0, 1.0, 3.0]
        c = [3.0, 2.0, 1.0]

        [[center]]
        name = "wide"
        position = [10.0, 5.0, 20.0]

        [[center]]
        position = [1.0, 4.0, 20.0]
    "#;

    #[test]
    fn parses_demo_scene() {
        let scene: Scene = toml::from_str(DEMO).unwrap();
        assert_eq!(scene.centers.len(), 2);
        assert_eq!(scene.centers[0].display_name(0), "wide");
        assert_eq!(scene.centers[1].display_name(1), "center-2");
        scene.validate().unwrap();
    }

    #[test]
    fn scene_without_centers_is_rejected() {
        let scene: Scene = toml::from_str(
            r#"
            support = [1.0, 1.0, 1.0]
            a = [1.0, 2.0, 3.0]
            b = [3.0, 1.0, 3.0]
            c = [3.0, 2.0, 1.0]
            "#,
        )
        .unwrap();
        assert!(matches!(scene.validate(), Err(SceneError::NoCenters)));
    }

    #[test]
    fn low_center_fails_validation() {
        let scene: Scene = toml::from_str(
            r#"
            support = [1.0, 1.0, 1.0]
            a = [1.0, 2.0, 3.0]
            b = [3.0, 1.0, 3.0]
            c = [3.0, 2.0, 1.0]

            [[center]]
            position = [5.0, 5.0, 5.0]
            "#,
        )
        .unwrap();
        assert!(matches!(
            scene.validate(),
            Err(SceneError::Invalid(ProjectionError::CenterTooLow { .. }))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<Scene, _> = toml::from_str(
            r#"
            support = [1.0, 1.0, 1.0]
            a = [1.0, 2.0, 3.0]
            b = [3.0, 1.0, 3.0]
            c = [3.0, 2.0, 1.0]
            bogus = true
            "#,
        );
        assert!(result.is_err());
    }
}
