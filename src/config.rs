/*
 * Flock Configuration Module
 *
 * This module defines the FlockConfig struct that contains all the
 * adjustable parameters for a flock, the enums selecting between rule
 * variants, and validation that rejects configurations the simulation
 * cannot run (negative weights, non-finite bounds and so on).
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::neighbors::Neighborhood;

/// How the separation force decays with distance to a neighbor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparationFalloff {
    /// Magnitude `separation_weight / d`.
    #[default]
    InverseLinear,
    /// Magnitude `separation_weight / d²`; negligible at range, sharp up close.
    InverseSquare,
}

/// How the border repulsion decays with distance to the nearer edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderFalloff {
    /// Constant magnitude `border_weight` anywhere inside the threshold band.
    #[default]
    Constant,
    /// Magnitude `border_weight / d`, ramping up as the edge approaches.
    InverseDistance,
}

/// What the summed alignment headings are divided by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentNorm {
    /// Divide by the number of neighbors actually found.
    #[default]
    Count,
    /// Divide by the configured `Nearest(k)` capacity even when fewer
    /// neighbors exist, damping alignment in sparse flocks. Behaves like
    /// `Count` under a radius neighborhood, where there is no fixed capacity.
    Capacity,
}

/// Parameters for a flock. All fields are plain data so configs can be
/// loaded from JSON, compared, and copied freely.
///
/// `FlockConfig::default()` is the [`classic`](FlockConfig::classic) preset;
/// deserialization fills missing fields from it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    /// World width in world units. Boids spawn inside `[0, width]`.
    pub width: f64,
    /// World height in world units. The y axis points up.
    pub height: f64,
    /// Number of boids spawned on construction.
    pub population: usize,
    /// Which other boids influence a boid each tick.
    pub neighborhood: Neighborhood,
    pub separation_weight: f64,
    pub separation_falloff: SeparationFalloff,
    pub alignment_weight: f64,
    pub alignment_norm: AlignmentNorm,
    pub cohesion_weight: f64,
    pub border_weight: f64,
    pub border_falloff: BorderFalloff,
    /// Distance from an edge inside which border repulsion acts.
    pub border_threshold: f64,
    /// Speed cap, enforced every tick before positions move.
    pub max_velocity: f64,
    /// Spawn velocity components are drawn from `[-start_velocity, start_velocity]`.
    pub start_velocity: f64,
    // Performance settings
    pub parallel: bool,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl FlockConfig {
    /// The calibration the simulation originally shipped with: a wide
    /// perception radius, strong close-range repulsion and hard walls.
    pub fn classic() -> Self {
        Self {
            width: 1000.0,
            height: 800.0,
            population: 50,
            neighborhood: Neighborhood::Radius(140.0),
            separation_weight: 8.0,
            separation_falloff: SeparationFalloff::InverseLinear,
            alignment_weight: 2.0,
            alignment_norm: AlignmentNorm::Count,
            cohesion_weight: 2.0,
            border_weight: 5.0,
            border_falloff: BorderFalloff::Constant,
            border_threshold: 90.0,
            max_velocity: 50.0,
            start_velocity: 10.0,
            parallel: false,
        }
    }

    /// Fixed-size neighborhoods with alignment dominant. Produces the tight,
    /// fish-school motion where everyone matches their k closest companions.
    pub fn schooling() -> Self {
        Self {
            neighborhood: Neighborhood::Nearest(12),
            separation_weight: 6.0,
            alignment_weight: 6.0,
            alignment_norm: AlignmentNorm::Capacity,
            cohesion_weight: 3.0,
            ..Self::classic()
        }
    }

    /// Sharp inverse-square repulsion and soft-walled borders. Flocks scatter
    /// at close contact and slow gradually near edges instead of bouncing.
    /// The border push matches `classic` right at the threshold and ramps
    /// harder closer in.
    pub fn skittish() -> Self {
        Self {
            separation_weight: 400.0,
            separation_falloff: SeparationFalloff::InverseSquare,
            border_weight: 450.0,
            border_falloff: BorderFalloff::InverseDistance,
            ..Self::classic()
        }
    }

    /// Check that every parameter is usable. `Flock` construction runs this,
    /// so a flock never exists with a config that would produce NaN forces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ConfigError::InvalidBounds { axis: "width", value: self.width });
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ConfigError::InvalidBounds { axis: "height", value: self.height });
        }
        if let Neighborhood::Radius(radius) = self.neighborhood {
            if !(radius.is_finite() && radius >= 0.0) {
                return Err(ConfigError::InvalidRadius(radius));
            }
        }
        for (name, weight) in [
            ("separation_weight", self.separation_weight),
            ("alignment_weight", self.alignment_weight),
            ("cohesion_weight", self.cohesion_weight),
            ("border_weight", self.border_weight),
        ] {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(ConfigError::InvalidWeight { name, value: weight });
            }
        }
        if !(self.border_threshold.is_finite() && self.border_threshold >= 0.0) {
            return Err(ConfigError::InvalidBorderThreshold(self.border_threshold));
        }
        if !(self.max_velocity.is_finite() && self.max_velocity >= 0.0) {
            return Err(ConfigError::InvalidMaxVelocity(self.max_velocity));
        }
        if !(self.start_velocity.is_finite() && self.start_velocity >= 0.0) {
            return Err(ConfigError::InvalidStartVelocity(self.start_velocity));
        }
        Ok(())
    }

    // The divisor applied to the summed alignment headings. Callers only
    // divide when at least one neighbor exists, so this is never zero then:
    // a non-empty neighbor set under Nearest(k) implies k >= 1.
    pub(crate) fn alignment_divisor(&self, neighbor_count: usize) -> f64 {
        match self.alignment_norm {
            AlignmentNorm::Count => neighbor_count as f64,
            AlignmentNorm::Capacity => match self.neighborhood {
                Neighborhood::Nearest(k) => k as f64,
                Neighborhood::Radius(_) => neighbor_count as f64,
            },
        }
    }
}

/// A parameter the simulation cannot run with.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("{axis} must be positive and finite, got {value}")]
    InvalidBounds { axis: &'static str, value: f64 },
    #[error("view radius must be non-negative and finite, got {0}")]
    InvalidRadius(f64),
    #[error("{name} must be non-negative and finite, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("border_threshold must be non-negative and finite, got {0}")]
    InvalidBorderThreshold(f64),
    #[error("max_velocity must be non-negative and finite, got {0}")]
    InvalidMaxVelocity(f64),
    #[error("start_velocity must be non-negative and finite, got {0}")]
    InvalidStartVelocity(f64),
}
