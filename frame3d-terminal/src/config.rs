//! Command-line configuration for the terminal viewer

use clap::{Parser, ValueEnum};
use frame3d_core::ProjectionMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectionArg {
    Perspective,
    Orthographic,
}

impl From<ProjectionArg> for ProjectionMode {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Perspective => ProjectionMode::Perspective,
            ProjectionArg::Orthographic => ProjectionMode::Orthographic,
        }
    }
}

/// Spin a textured cube in the terminal using affine frames
#[derive(Debug, Clone, Parser)]
#[command(name = "frame3d-terminal", version)]
pub struct ViewerConfig {
    /// Projection used at startup (toggle with `p`)
    #[arg(long, value_enum, default_value_t = ProjectionArg::Perspective)]
    pub projection: ProjectionArg,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 45.0)]
    pub fov_degrees: f32,

    /// Distance from the camera to the cube centre
    #[arg(long, default_value_t = 5.0)]
    pub distance: f32,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Automatic spin per frame about each local axis, in degrees
    #[arg(long, default_value_t = 1.0)]
    pub spin_degrees: f32,

    /// Cube edge length
    #[arg(long, default_value_t = 2.0)]
    pub size: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionArg::Perspective,
            fov_degrees: 45.0,
            distance: 5.0,
            fps: 30,
            spin_degrees: 1.0,
            size: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parser() {
        let parsed = ViewerConfig::parse_from(["frame3d-terminal"]);
        let defaults = ViewerConfig::default();
        assert_eq!(parsed.projection, defaults.projection);
        assert_eq!(parsed.fov_degrees, defaults.fov_degrees);
        assert_eq!(parsed.distance, defaults.distance);
        assert_eq!(parsed.fps, defaults.fps);
    }

    #[test]
    fn test_orthographic_flag() {
        let parsed = ViewerConfig::parse_from([
            "frame3d-terminal",
            "--projection",
            "orthographic",
            "--fov-degrees",
            "60",
        ]);
        assert_eq!(ProjectionMode::from(parsed.projection), ProjectionMode::Orthographic);
        assert_eq!(parsed.fov_degrees, 60.0);
    }
}
