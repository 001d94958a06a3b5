//! Pawn configuration

use crate::error::{PawnError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound for sub-steps per physics tick
pub const MAX_SUB_STEPS: u32 = 8;

/// Angles, in degrees from "up", separating ground, wall and ceiling surfaces.
///
/// Required ordering:
/// `0 ≤ slope ≤ ground ≤ 90 ≤ 180 − ceiling ≤ 180 − ceiling_slope ≤ 180`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleThresholds {
    /// Steepest ground that still counts as a walkable slope
    pub max_slope_angle: f32,
    /// Steepest surface that still counts as ground
    pub max_ground_angle: f32,
    /// Steepest ceiling that still counts as a sloped ceiling
    pub max_ceiling_slope_angle: f32,
    /// Steepest surface that still counts as ceiling
    pub max_ceiling_angle: f32,
}

impl Default for AngleThresholds {
    fn default() -> Self {
        Self {
            max_slope_angle: 30.0,
            max_ground_angle: 60.0,
            max_ceiling_slope_angle: 30.0,
            max_ceiling_angle: 60.0,
        }
    }
}

impl AngleThresholds {
    /// Check the threshold ordering
    pub fn validate(&self) -> Result<()> {
        let Self {
            max_slope_angle: slope,
            max_ground_angle: ground,
            max_ceiling_slope_angle: ceiling_slope,
            max_ceiling_angle: ceiling,
        } = *self;

        if [slope, ground, ceiling_slope, ceiling]
            .iter()
            .any(|a| !a.is_finite())
        {
            return Err(PawnError::InvalidConfig(format!(
                "angle thresholds must be finite: {self:?}"
            )));
        }

        let ordering = [
            (slope >= 0.0, "max_slope_angle must not be negative"),
            (slope <= ground, "max_slope_angle must not exceed max_ground_angle"),
            (ground <= 90.0, "max_ground_angle must not exceed 90"),
            (ceiling <= 90.0, "max_ceiling_angle must not exceed 90"),
            (
                ceiling_slope <= ceiling,
                "max_ceiling_slope_angle must not exceed max_ceiling_angle",
            ),
            (ceiling_slope >= 0.0, "max_ceiling_slope_angle must not be negative"),
        ];

        match ordering.iter().find(|(ok, _)| !ok) {
            Some((_, message)) => Err(PawnError::InvalidConfig(format!("{message} ({self:?})"))),
            None => Ok(()),
        }
    }
}

/// Pawn configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawnConfig {
    /// Surface classification thresholds
    pub angles: AngleThresholds,

    /// How far each direction is probed when refreshing surroundings
    pub nearest_surface_check_distance: f32,

    /// Distance at or below which a surface counts as touching
    pub adjacency_check_distance: f32,

    /// Sub-steps per physics tick. Any integer is accepted and clamped to
    /// 1..=8 on use; non-integer JSON values fail to decode.
    pub sub_steps: i64,
}

impl Default for PawnConfig {
    fn default() -> Self {
        Self {
            angles: AngleThresholds::default(),
            nearest_surface_check_distance: 1000.0,
            adjacency_check_distance: 0.01,
            sub_steps: 1,
        }
    }
}

impl PawnConfig {
    /// Decode and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate thresholds and distances
    pub fn validate(&self) -> Result<()> {
        self.angles.validate()?;

        if !(self.nearest_surface_check_distance.is_finite()
            && self.nearest_surface_check_distance > 0.0)
        {
            return Err(PawnError::InvalidConfig(format!(
                "nearest_surface_check_distance must be positive, got {}",
                self.nearest_surface_check_distance
            )));
        }

        if !(self.adjacency_check_distance.is_finite() && self.adjacency_check_distance >= 0.0) {
            return Err(PawnError::InvalidConfig(format!(
                "adjacency_check_distance must not be negative, got {}",
                self.adjacency_check_distance
            )));
        }

        Ok(())
    }

    /// Sub-step count actually used per tick
    pub fn effective_sub_steps(&self) -> u32 {
        self.sub_steps.clamp(1, i64::from(MAX_SUB_STEPS)) as u32
    }

    /// Set angle thresholds
    pub fn with_angles(mut self, angles: AngleThresholds) -> Self {
        self.angles = angles;
        self
    }

    /// Set the surroundings probe distance
    pub fn with_nearest_surface_check_distance(mut self, distance: f32) -> Self {
        self.nearest_surface_check_distance = distance;
        self
    }

    /// Set the adjacency distance
    pub fn with_adjacency_check_distance(mut self, distance: f32) -> Self {
        self.adjacency_check_distance = distance;
        self
    }

    /// Set sub-steps per tick
    pub fn with_sub_steps(mut self, sub_steps: i64) -> Self {
        self.sub_steps = sub_steps;
        self
    }
}
