/*
 * Tick Statistics Module
 *
 * This module defines the TickStats struct, a cheap aggregate view of the
 * flock refreshed after every tick and reset. Callers poll it instead of
 * walking the boid list themselves.
 *
 * Includes metrics for:
 * - Total ticks advanced
 * - The timestep actually integrated last tick
 * - Current population
 * - Mean and maximum speed across the flock
 */

use crate::boid::Boid;

// Aggregates describing the current state of a flock
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickStats {
    /// Ticks advanced since the flock was built. Resets do not count.
    pub ticks: u64,
    /// The dt the most recent tick integrated, after sanitizing. A tick
    /// fed a NaN or negative dt records 0 here.
    pub last_dt: f64,
    pub population: usize,
    pub mean_speed: f64,
    /// Never exceeds the configured `max_velocity` once a tick has run.
    pub max_speed: f64,
}

impl TickStats {
    pub(crate) fn record_tick(&mut self, dt: f64, boids: &[Boid]) {
        self.ticks += 1;
        self.last_dt = dt;
        self.observe(boids);
    }

    // Recompute population and speed aggregates from the boid list
    pub(crate) fn observe(&mut self, boids: &[Boid]) {
        self.population = boids.len();
        self.max_speed = 0.0;
        self.mean_speed = 0.0;

        if boids.is_empty() {
            return;
        }

        let mut total = 0.0;
        for boid in boids {
            let speed = boid.speed();
            total += speed;
            if speed > self.max_speed {
                self.max_speed = speed;
            }
        }
        self.mean_speed = total / boids.len() as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn observe_computes_population_and_speeds() {
        let boids = vec![
            Boid::new(dvec2(0.0, 0.0), dvec2(3.0, 4.0)),  // speed 5
            Boid::new(dvec2(1.0, 1.0), dvec2(0.0, 0.0)),  // speed 0
            Boid::new(dvec2(2.0, 2.0), dvec2(0.0, 10.0)), // speed 10
        ];

        let mut stats = TickStats::default();
        stats.observe(&boids);

        assert_eq!(stats.population, 3);
        assert_eq!(stats.max_speed, 10.0);
        assert_eq!(stats.mean_speed, 5.0);
        assert_eq!(stats.ticks, 0);
    }

    #[test]
    fn observe_zeroes_out_for_an_empty_flock() {
        let mut stats = TickStats::default();
        stats.record_tick(0.1, &[Boid::new(dvec2(0.0, 0.0), dvec2(2.0, 0.0))]);
        stats.observe(&[]);

        assert_eq!(stats.population, 0);
        assert_eq!(stats.mean_speed, 0.0);
        assert_eq!(stats.max_speed, 0.0);
        // The tick counter survives.
        assert_eq!(stats.ticks, 1);
    }

    #[test]
    fn record_tick_counts_and_stores_the_timestep() {
        let boids = vec![Boid::new(dvec2(0.0, 0.0), dvec2(1.0, 0.0))];
        let mut stats = TickStats::default();

        stats.record_tick(0.016, &boids);
        stats.record_tick(0.032, &boids);

        assert_eq!(stats.ticks, 2);
        assert_eq!(stats.last_dt, 0.032);
        assert_eq!(stats.max_speed, 1.0);
    }
}
