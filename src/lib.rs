/*
 * Murmuration - 2D Boid Flocking Simulation Core
 *
 * This file defines the module structure for the flocking library.
 * The crate simulates a flock of boids in a bounded planar world: callers
 * build a Flock from a FlockConfig, drive it with advance(dt), and read
 * positions and velocities back for rendering or analysis.
 *
 * Coordinates follow the math convention: the origin sits at the
 * low-x/low-y corner of the world rectangle and y increases upward.
 * Renderers targeting a screen-space y-down surface flip on output.
 */

// Re-export key components for easier access
pub use boid::Boid;
pub use config::{AlignmentNorm, BorderFalloff, ConfigError, FlockConfig, SeparationFalloff};
pub use flock::Flock;
pub use neighbors::Neighborhood;
pub use stats::TickStats;

// The vector type used throughout the public API
pub use glam::DVec2;

// Define modules
pub mod boid;
pub mod config;
pub mod flock;
pub mod neighbors;
pub mod stats;

// Constants
/// The longest timestep a single tick will integrate, in seconds.
/// `Flock::advance` clamps anything larger down to this.
pub const MAX_TICK_SECONDS: f64 = 1.0;
