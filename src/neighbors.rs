/*
 * Neighbor Selection Module
 *
 * This module decides which other boids influence a given boid each tick.
 * Two policies are supported:
 * - Radius: every other boid within a fixed Euclidean distance
 * - Nearest: the k closest other boids, however far away
 *
 * Both are brute-force scans over the flock. Comparisons use squared
 * distances so the only square roots in the simulation are the ones that
 * feed force magnitudes.
 */

use serde::{Deserialize, Serialize};

use crate::boid::Boid;

/// The neighborhood policy: which other boids a boid perceives.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Neighborhood {
    /// Every other boid within this distance, boundary inclusive.
    Radius(f64),
    /// The k closest other boids. A flock of n boids yields at most n - 1.
    Nearest(usize),
}

impl Neighborhood {
    /// Collect the indices of the boids that influence `flock[subject]`.
    /// The subject itself is never included.
    pub fn select(&self, flock: &[Boid], subject: usize) -> Vec<usize> {
        match *self {
            Neighborhood::Radius(radius) => select_within_radius(flock, subject, radius),
            Neighborhood::Nearest(k) => select_nearest(flock, subject, k),
        }
    }
}

fn select_within_radius(flock: &[Boid], subject: usize, radius: f64) -> Vec<usize> {
    let origin = flock[subject].position();
    let radius_sq = radius * radius;

    flock
        .iter()
        .enumerate()
        .filter(|&(i, other)| i != subject && other.position().distance_squared(origin) <= radius_sq)
        .map(|(i, _)| i)
        .collect()
}

fn select_nearest(flock: &[Boid], subject: usize, k: usize) -> Vec<usize> {
    let origin = flock[subject].position();

    let mut candidates: Vec<(f64, usize)> = flock
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != subject)
        .map(|(i, other)| (other.position().distance_squared(origin), i))
        .collect();

    // Stable sort keeps equidistant candidates in index order, so ties
    // resolve the same way on every run.
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
    candidates.truncate(k);

    candidates.into_iter().map(|(_, i)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    // A line of boids at x = 0, 10, 20, ... makes distances easy to read.
    fn line_flock(count: usize) -> Vec<Boid> {
        (0..count)
            .map(|i| Boid::new(dvec2(i as f64 * 10.0, 0.0), dvec2(0.0, 0.0)))
            .collect()
    }

    #[test]
    fn radius_matches_a_manual_distance_filter() {
        let flock = vec![
            Boid::new(dvec2(0.0, 0.0), dvec2(0.0, 0.0)),
            Boid::new(dvec2(3.0, 4.0), dvec2(0.0, 0.0)),   // distance 5
            Boid::new(dvec2(-6.0, 8.0), dvec2(0.0, 0.0)),  // distance 10
            Boid::new(dvec2(0.0, 10.5), dvec2(0.0, 0.0)),  // distance 10.5
            Boid::new(dvec2(100.0, 0.0), dvec2(0.0, 0.0)), // distance 100
        ];
        let policy = Neighborhood::Radius(10.0);

        let selected = policy.select(&flock, 0);

        let expected: Vec<usize> = flock
            .iter()
            .enumerate()
            .filter(|&(i, b)| i != 0 && b.position().distance(flock[0].position()) <= 10.0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(selected, expected);
        // Distance 10 sits exactly on the boundary and is included.
        assert_eq!(selected, vec![1, 2]);
    }

    #[test]
    fn radius_never_includes_the_subject() {
        let flock = line_flock(4);
        for subject in 0..flock.len() {
            let selected = Neighborhood::Radius(1000.0).select(&flock, subject);
            assert!(!selected.contains(&subject));
            assert_eq!(selected.len(), flock.len() - 1);
        }
    }

    #[test]
    fn zero_radius_only_sees_coincident_boids() {
        let mut flock = line_flock(3);
        flock.push(Boid::new(dvec2(0.0, 0.0), dvec2(1.0, 0.0)));
        let selected = Neighborhood::Radius(0.0).select(&flock, 0);
        assert_eq!(selected, vec![3]);
    }

    #[test]
    fn nearest_returns_k_closest_in_order() {
        let flock = line_flock(5);
        let selected = Neighborhood::Nearest(2).select(&flock, 2);
        // Boids 1 and 3 are both at distance 10 from boid 2; index order breaks the tie.
        assert_eq!(selected, vec![1, 3]);
    }

    #[test]
    fn nearest_caps_at_flock_size_minus_one() {
        let flock = line_flock(4);
        let selected = Neighborhood::Nearest(10).select(&flock, 0);
        assert_eq!(selected.len(), 3);
        assert!(!selected.contains(&0));
    }

    #[test]
    fn nearest_zero_selects_nothing() {
        let flock = line_flock(4);
        assert!(Neighborhood::Nearest(0).select(&flock, 1).is_empty());
    }

    #[test]
    fn nearest_excludes_no_closer_boid() {
        let flock = vec![
            Boid::new(dvec2(0.0, 0.0), dvec2(0.0, 0.0)),
            Boid::new(dvec2(50.0, 0.0), dvec2(0.0, 0.0)),
            Boid::new(dvec2(7.0, 0.0), dvec2(0.0, 0.0)),
            Boid::new(dvec2(0.0, 3.0), dvec2(0.0, 0.0)),
            Boid::new(dvec2(-20.0, 1.0), dvec2(0.0, 0.0)),
        ];
        let selected = Neighborhood::Nearest(2).select(&flock, 0);
        assert_eq!(selected.len(), 2);

        let origin = flock[0].position();
        let farthest_selected = selected
            .iter()
            .map(|&i| flock[i].position().distance_squared(origin))
            .fold(0.0f64, f64::max);
        for i in 1..flock.len() {
            if !selected.contains(&i) {
                assert!(flock[i].position().distance_squared(origin) >= farthest_selected);
            }
        }
        assert_eq!(selected, vec![3, 2]);
    }

    #[test]
    fn singleton_flock_has_no_neighbors() {
        let flock = line_flock(1);
        assert!(Neighborhood::Radius(100.0).select(&flock, 0).is_empty());
        assert!(Neighborhood::Nearest(5).select(&flock, 0).is_empty());
    }
}
