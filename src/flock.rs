/*
 * Flock Module
 *
 * This module owns the simulation state and drives it forward in ticks.
 * Each tick every boid perceives a frozen snapshot of the flock, so the
 * outcome is independent of update order and the sequential and parallel
 * paths produce identical results.
 *
 * All randomness lives here: a seeded ChaCha12 stream spawns the initial
 * population and any later resets, while advancing the simulation draws
 * no random numbers at all. Same config, same seed, same flock forever.
 */

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use rayon::prelude::*;

use crate::boid::Boid;
use crate::config::{ConfigError, FlockConfig};
use crate::stats::TickStats;
use crate::MAX_TICK_SECONDS;

pub struct Flock {
    boids: Vec<Boid>,
    config: FlockConfig,
    rng: ChaCha12Rng,
    stats: TickStats,
}

impl Flock {
    /// Build a flock with a random seed.
    pub fn new(config: FlockConfig) -> Result<Self, ConfigError> {
        Self::seeded(config, rand::thread_rng().gen())
    }

    /// Build a flock from a fixed seed. Two flocks built with the same
    /// config and seed evolve identically, tick for tick.
    pub fn seeded(config: FlockConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        let boids = spawn_population(&mut rng, &config, config.population);
        let mut stats = TickStats::default();
        stats.observe(&boids);

        Ok(Self { boids, config, rng, stats })
    }

    /// Build a flock from explicit boids instead of random placement.
    /// Useful for staged scenarios and for restoring a saved scene.
    pub fn with_boids(config: FlockConfig, boids: Vec<Boid>) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = ChaCha12Rng::seed_from_u64(rand::thread_rng().gen());
        let mut stats = TickStats::default();
        stats.observe(&boids);

        Ok(Self { boids, config, rng, stats })
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    /// Aggregates refreshed after every tick and reset.
    pub fn stats(&self) -> TickStats {
        self.stats
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Out-of-range timesteps are tamed rather than rejected: a negative or
    /// non-finite `dt` integrates as 0, and anything above
    /// [`MAX_TICK_SECONDS`] is clamped down, bounding the step a stalled
    /// host clock can produce.
    pub fn advance(&mut self, dt: f64) {
        let dt = sanitize_dt(dt);

        // Every boid perceives this frozen copy of the flock.
        let snapshot = self.boids.clone();
        let config = &self.config;

        if config.parallel {
            // Process boids in parallel chunks to reduce synchronization overhead
            let chunk_size = std::cmp::max(self.boids.len() / rayon::current_num_threads(), 1);

            self.boids
                .par_chunks_mut(chunk_size)
                .enumerate()
                .for_each(|(chunk_index, chunk)| {
                    for (offset, boid) in chunk.iter_mut().enumerate() {
                        let index = chunk_index * chunk_size + offset;
                        let neighbors = config.neighborhood.select(&snapshot, index);
                        let acceleration = boid.steering(&snapshot, &neighbors, config);
                        boid.integrate(acceleration, dt, config.max_velocity);
                    }
                });
        } else {
            for (index, boid) in self.boids.iter_mut().enumerate() {
                let neighbors = config.neighborhood.select(&snapshot, index);
                let acceleration = boid.steering(&snapshot, &neighbors, config);
                boid.integrate(acceleration, dt, config.max_velocity);
            }
        }

        self.stats.record_tick(dt, &self.boids);
    }

    /// Replace the whole population with `population` freshly spawned boids.
    /// The config is untouched; the swap happens in one step, so no tick
    /// ever sees a mix of old and new boids.
    pub fn reset(&mut self, population: usize) {
        self.boids = spawn_population(&mut self.rng, &self.config, population);
        self.stats.observe(&self.boids);
    }
}

fn spawn_population<R: Rng>(rng: &mut R, config: &FlockConfig, population: usize) -> Vec<Boid> {
    (0..population).map(|_| Boid::spawn(rng, config)).collect()
}

fn sanitize_dt(dt: f64) -> f64 {
    if !dt.is_finite() || dt < 0.0 {
        return 0.0;
    }
    dt.min(MAX_TICK_SECONDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_rejects_nonsense_timesteps() {
        assert_eq!(sanitize_dt(f64::NAN), 0.0);
        assert_eq!(sanitize_dt(f64::INFINITY), 0.0);
        assert_eq!(sanitize_dt(f64::NEG_INFINITY), 0.0);
        assert_eq!(sanitize_dt(-0.25), 0.0);
    }

    #[test]
    fn sanitize_clamps_oversized_timesteps() {
        assert_eq!(sanitize_dt(5.0), MAX_TICK_SECONDS);
        assert_eq!(sanitize_dt(MAX_TICK_SECONDS), MAX_TICK_SECONDS);
        assert_eq!(sanitize_dt(1.0 / 60.0), 1.0 / 60.0);
        assert_eq!(sanitize_dt(0.0), 0.0);
    }

    #[test]
    fn construction_rejects_invalid_configs() {
        let mut config = FlockConfig::classic();
        config.max_velocity = f64::NAN;
        assert!(Flock::seeded(config, 1).is_err());
        assert!(Flock::with_boids(config, Vec::new()).is_err());
    }

    #[test]
    fn seeded_flock_spawns_the_configured_population() {
        let mut config = FlockConfig::classic();
        config.population = 7;
        let flock = Flock::seeded(config, 99).unwrap();
        assert_eq!(flock.boids().len(), 7);
        assert_eq!(flock.stats().population, 7);
        assert_eq!(flock.stats().ticks, 0);
    }

    #[test]
    fn stats_track_ticks_and_timestep() {
        let mut flock = Flock::seeded(FlockConfig::classic(), 5).unwrap();
        flock.advance(0.25);
        flock.advance(f64::NAN);

        let stats = flock.stats();
        assert_eq!(stats.ticks, 2);
        assert_eq!(stats.last_dt, 0.0); // the NaN tick integrated nothing
        assert_eq!(stats.population, 50);
        assert!(stats.max_speed <= FlockConfig::classic().max_velocity + 1e-9);
        assert!(stats.mean_speed <= stats.max_speed);
    }

    #[test]
    fn reset_swaps_the_population_in_one_step() {
        let mut flock = Flock::seeded(FlockConfig::classic(), 5).unwrap();
        flock.advance(0.1);
        flock.reset(3);

        assert_eq!(flock.boids().len(), 3);
        assert_eq!(flock.stats().population, 3);
        // Ticks keep counting across resets.
        assert_eq!(flock.stats().ticks, 1);
    }
}
