//! Numerical integration of arc length over a parametric speed `|dp/du|`.

/// Number of Simpson intervals used for a whole-curve integration.
pub const LENGTH_INTERVALS: usize = 512;

/// Number of samples used by brute-force extremum searches.
pub const EXTREMUM_SAMPLES: usize = 1000;

/// Composite Simpson's rule of `speed` over `[0, 1]` using `n_intervals`
/// intervals (`2 * n_intervals + 1` samples).
pub fn integrate(speed: impl Fn(f64) -> f64, n_intervals: usize) -> f64 {
    let n_samples = 2 * n_intervals + 1;
    let h = 1.0 / (n_samples - 1) as f64;
    let sum: f64 = (0..n_samples)
        .map(|i| {
            let weight = if i == 0 || i == n_samples - 1 {
                1.0
            } else if i % 2 == 1 {
                4.0
            } else {
                2.0
            };
            // the last sample lands on 1.0 exactly
            let u = if i == n_samples - 1 { 1.0 } else { i as f64 * h };
            weight * speed(u)
        })
        .sum();
    sum * h / 3.0
}

/// Single Simpson step of `speed` over `[u, u + du]`.
///
/// The integrand does not depend on its own history, so this matches a
/// classical fourth-order Runge-Kutta step.
pub fn simpson_step(speed: impl Fn(f64) -> f64, u: f64, du: f64) -> f64 {
    let h = du / 2.0;
    du * (speed(u) + 4.0 * speed(u + h) + speed(u + du)) / 6.0
}

/// Largest value of `f` over `n_steps` uniform samples of `[0, 1)`.
pub fn sampled_max(f: impl Fn(f64) -> f64, n_steps: usize) -> f64 {
    (0..n_steps)
        .map(|i| f(i as f64 / n_steps as f64))
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Walks a curve in fixed parametric steps, accumulating arc length, and
/// reports the parameters at which the running length first reaches each
/// multiple of `separation`.
///
/// Placement is approximate: each hit is the first step at or past its
/// threshold, not an exact root.
#[derive(Debug, Clone)]
pub struct ArcLengthWalker {
    n_steps: usize,
    separation: f64,
}

impl ArcLengthWalker {
    pub fn new(n_steps: usize, separation: f64) -> Self {
        assert!(n_steps >= 2, "need at least two integration steps");
        assert!(separation > 0.0, "separation must be positive, got {}", separation);
        Self { n_steps, separation }
    }

    pub fn step(&self) -> f64 {
        1.0 / self.n_steps as f64
    }

    /// Parameters of the placements, in increasing order.
    ///
    /// `ds(u, du)` returns the arc length increment over `[u, u + du]`.
    pub fn placements(&self, ds: impl Fn(f64, f64) -> f64) -> Vec<f64> {
        self.walk(ds).into_iter().map(|p| p.u).collect()
    }

    /// Like [`Self::placements`], also reporting the arc length walked so
    /// far at each hit.
    pub fn walk(&self, ds: impl Fn(f64, f64) -> f64) -> Vec<Placement> {
        let du = self.step();
        let mut s = 0.0;
        let mut s_next = 0.0;
        let mut hits = Vec::new();
        for i in 0..self.n_steps - 1 {
            let u = i as f64 * du;
            if s >= s_next {
                hits.push(Placement { u, s });
                s_next += self.separation;
            }
            s += ds(u, du);
        }
        hits
    }
}

/// A hit of [`ArcLengthWalker::walk`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub u: f64,
    /// Arc length from `u = 0`.
    pub s: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_integrate_constant() {
        assert_relative_eq!(integrate(|_| 3.0, LENGTH_INTERVALS), 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_integrate_cubic_is_exact() {
        // Simpson's rule is exact for cubics
        let f = |u: f64| 4.0 * u * u * u;
        assert_relative_eq!(integrate(f, 4), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_steps_sum_to_integral() {
        let f = |u: f64| 1.0 + (2.0 * PI * u).sin().powi(2);
        let n = 256;
        let du = 1.0 / n as f64;
        let stepped: f64 = (0..n).map(|i| simpson_step(f, i as f64 * du, du)).sum();
        assert_relative_eq!(stepped, integrate(f, n), max_relative = 1e-9);
        assert_relative_eq!(stepped, 1.5, max_relative = 1e-9);
    }

    #[test]
    fn test_sampled_max() {
        let m = sampled_max(|u| (2.0 * PI * u).sin(), EXTREMUM_SAMPLES);
        assert_relative_eq!(m, 1.0, max_relative = 1e-9);
    }

    #[test]
    fn test_walker_uniform_speed() {
        // unit speed: placements every 0.1 in u
        let walker = ArcLengthWalker::new(1000, 0.1);
        let hits = walker.placements(|_, du| du);
        assert_eq!(hits.len(), 10);
        for (k, u) in hits.iter().enumerate() {
            assert!((u - k as f64 * 0.1).abs() <= walker.step() + 1e-12);
        }
    }

    #[test]
    fn test_walker_nonuniform_speed_is_uniform_in_length() {
        // speed 2u: s(u) = u^2, so the k-th hit is near sqrt(k * sep)
        let walker = ArcLengthWalker::new(10_000, 0.25);
        let hits = walker.placements(|u, du| simpson_step(|x| 2.0 * x, u, du));
        assert_eq!(hits.len(), 4);
        for (k, u) in hits.iter().enumerate() {
            assert!((u - (k as f64 * 0.25).sqrt()).abs() < 2.0 * walker.step());
        }
    }

    #[test]
    fn test_walk_reports_length_at_each_hit() {
        let walker = ArcLengthWalker::new(1000, 0.3);
        let hits = walker.walk(|_, du| 2.0 * du);
        assert_eq!(hits.len(), 7);
        for (k, p) in hits.iter().enumerate() {
            assert!(p.s >= k as f64 * 0.3 - 1e-12);
            assert_relative_eq!(p.s, 2.0 * p.u, max_relative = 1e-9);
        }
    }
}
