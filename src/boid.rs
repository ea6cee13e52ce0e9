/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid accumulates four accelerations every tick:
 * 1. Separation: push away from each neighbor, stronger when closer
 * 2. Alignment: steer towards the average heading of neighbors
 * 3. Cohesion: steer towards the centroid of neighbors
 * 4. Border repulsion: push back towards the interior near world edges
 *
 * Every rule degrades to a zero contribution instead of producing NaN:
 * coincident boids exert no separation, stationary neighbors contribute
 * no heading, and a boid sitting on its neighbors' centroid feels no
 * cohesion.
 */

use glam::DVec2;
use rand::Rng;

use crate::config::{BorderFalloff, FlockConfig, SeparationFalloff};

#[derive(Clone, Debug, PartialEq)]
pub struct Boid {
    position: DVec2,
    velocity: DVec2,
}

impl Boid {
    pub fn new(position: DVec2, velocity: DVec2) -> Self {
        Self { position, velocity }
    }

    /// Spawn a boid at a uniform random position inside the world bounds,
    /// with each velocity component drawn from the start-velocity envelope.
    pub(crate) fn spawn<R: Rng>(rng: &mut R, config: &FlockConfig) -> Self {
        let position = DVec2::new(
            rng.gen_range(0.0..=config.width),
            rng.gen_range(0.0..=config.height),
        );
        let velocity = DVec2::new(
            rng.gen_range(-config.start_velocity..=config.start_velocity),
            rng.gen_range(-config.start_velocity..=config.start_velocity),
        );
        Self { position, velocity }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Current speed, the velocity magnitude.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Travel direction in radians, measured counterclockwise from the
    /// positive x axis. A stationary boid reports 0.
    pub fn heading(&self) -> f64 {
        if self.velocity == DVec2::ZERO {
            return 0.0;
        }
        self.velocity.y.atan2(self.velocity.x)
    }

    // Sum the four rule accelerations against a snapshot of the flock.
    // `neighbors` holds indices into `flock`, never including this boid.
    pub(crate) fn steering(&self, flock: &[Boid], neighbors: &[usize], config: &FlockConfig) -> DVec2 {
        self.separation(flock, neighbors, config)
            + self.alignment(flock, neighbors, config)
            + self.cohesion(flock, neighbors, config)
            + self.border_repulsion(config)
    }

    // Calculate separation acceleration (push away from each neighbor)
    fn separation(&self, flock: &[Boid], neighbors: &[usize], config: &FlockConfig) -> DVec2 {
        let mut steering = DVec2::ZERO;

        for &i in neighbors {
            let away = self.position - flock[i].position;
            let d = away.length();

            // A coincident neighbor has no direction to push along.
            if d == 0.0 {
                continue;
            }

            let magnitude = match config.separation_falloff {
                SeparationFalloff::InverseLinear => config.separation_weight / d,
                SeparationFalloff::InverseSquare => config.separation_weight / (d * d),
            };
            steering += away / d * magnitude;
        }

        steering
    }

    // Calculate alignment acceleration (steer towards the average heading of neighbors)
    fn alignment(&self, flock: &[Boid], neighbors: &[usize], config: &FlockConfig) -> DVec2 {
        if neighbors.is_empty() {
            return DVec2::ZERO;
        }

        let mut heading_sum = DVec2::ZERO;
        for &i in neighbors {
            let velocity = flock[i].velocity;
            let speed = velocity.length();

            // A stationary neighbor has no heading to share.
            if speed == 0.0 {
                continue;
            }
            heading_sum += velocity / speed;
        }

        heading_sum * (config.alignment_weight / config.alignment_divisor(neighbors.len()))
    }

    // Calculate cohesion acceleration (steer towards the centroid of neighbors)
    fn cohesion(&self, flock: &[Boid], neighbors: &[usize], config: &FlockConfig) -> DVec2 {
        if neighbors.is_empty() {
            return DVec2::ZERO;
        }

        let mut centroid = DVec2::ZERO;
        for &i in neighbors {
            centroid += flock[i].position;
        }
        centroid /= neighbors.len() as f64;

        let towards = centroid - self.position;
        let d = towards.length();

        // Already sitting on the centroid; nowhere to steer.
        if d == 0.0 {
            return DVec2::ZERO;
        }

        towards / d * config.cohesion_weight
    }

    // Calculate border repulsion, per axis, away from the nearer edge
    fn border_repulsion(&self, config: &FlockConfig) -> DVec2 {
        DVec2::new(
            axis_repulsion(self.position.x, config.width, config),
            axis_repulsion(self.position.y, config.height, config),
        )
    }

    /// Integrate one tick: apply the acceleration, cap the speed, then move.
    /// The cap comes before the move so the position never advances faster
    /// than `max_velocity` allows.
    pub(crate) fn integrate(&mut self, acceleration: DVec2, dt: f64, max_velocity: f64) {
        self.velocity += acceleration * dt;

        // Limit speed by uniform rescale, preserving direction
        let speed = self.velocity.length();
        if speed > max_velocity {
            self.velocity *= max_velocity / speed;
        }

        self.position += self.velocity * dt;
    }
}

// Signed repulsion along one axis. Only the nearer edge can push, the push
// points towards the interior, and a boid outside the world (or exactly on
// an edge) feels nothing.
fn axis_repulsion(coordinate: f64, extent: f64, config: &FlockConfig) -> f64 {
    let to_low = coordinate;
    let to_high = extent - coordinate;

    if to_low <= to_high {
        if to_low > 0.0 && to_low < config.border_threshold {
            return border_magnitude(to_low, config);
        }
    } else if to_high > 0.0 && to_high < config.border_threshold {
        return -border_magnitude(to_high, config);
    }

    0.0
}

fn border_magnitude(distance: f64, config: &FlockConfig) -> f64 {
    match config.border_falloff {
        BorderFalloff::Constant => config.border_weight,
        BorderFalloff::InverseDistance => config.border_weight / distance,
    }
}
