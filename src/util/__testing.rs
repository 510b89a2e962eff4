//! Testing utilities, do not depend on any of these in production!

use fastrand::Rng;
use itertools::Itertools;

use crate::{Complex, RootedPoly};

struct RandStreamF64 {
    state: Rng,
}

impl RandStreamF64 {
    fn new(seed: u64) -> Self {
        Self {
            state: Rng::with_seed(seed),
        }
    }
}

impl Iterator for RandStreamF64 {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.state.f64())
    }
}

/// Uniformly distributed points in a rectangle of the complex plane.
pub struct RandStreamCartesian {
    real_stream: RandStreamF64,
    min_re: f64,
    max_re: f64,
    min_im: f64,
    max_im: f64,
}

impl RandStreamCartesian {
    #[must_use]
    pub fn new(seed: u64, min_re: f64, max_re: f64, min_im: f64, max_im: f64) -> Self {
        assert!(
            min_re <= max_re && min_im <= max_im,
            "minimum should be smaller or equal to maximum"
        );
        Self {
            real_stream: RandStreamF64::new(seed),
            min_re,
            max_re,
            min_im,
            max_im,
        }
    }
}

impl Iterator for RandStreamCartesian {
    type Item = Complex;

    fn next(&mut self) -> Option<Self::Item> {
        let re = (self.real_stream.next()?).mul_add(self.max_re - self.min_re, self.min_re);
        let im = (self.real_stream.next()?).mul_add(self.max_im - self.min_im, self.min_im);
        Some(Complex::new(re, im))
    }
}

/// Points in an annulus, angles given as fractions of a full turn.
pub struct RandStreamPolar {
    real_stream: RandStreamF64,
    min_radius: f64,
    max_radius: f64,
}

impl RandStreamPolar {
    #[must_use]
    pub fn new(seed: u64, min_radius: f64, max_radius: f64) -> Self {
        assert!(0.0 <= min_radius, "radius should be non-negative");
        assert!(
            min_radius <= max_radius,
            "min_radius should be smaller or equal to max_radius"
        );
        Self {
            real_stream: RandStreamF64::new(seed),
            min_radius,
            max_radius,
        }
    }
}

impl Iterator for RandStreamPolar {
    type Item = Complex;

    fn next(&mut self) -> Option<Self::Item> {
        let r =
            (self.real_stream.next()?).mul_add(self.max_radius - self.min_radius, self.min_radius);
        let a = self.real_stream.next()?;
        debug_assert!(r >= 0.0);
        Some(Complex::from_polar(r, a * std::f64::consts::TAU))
    }
}

/// Random rooted polynomials of a fixed degree whose roots are at least
/// `min_separation` apart.
pub struct RootedPolyStream<I: Iterator<Item = Complex>> {
    degree: usize,
    min_separation: f64,
    root_stream: I,
}

impl<I: Iterator<Item = Complex>> RootedPolyStream<I> {
    pub const fn new(degree: usize, min_separation: f64, root_stream: I) -> Self {
        Self {
            degree,
            min_separation,
            root_stream,
        }
    }
}

impl<I: Iterator<Item = Complex>> Iterator for RootedPolyStream<I> {
    type Item = RootedPoly;

    fn next(&mut self) -> Option<Self::Item> {
        let mut roots: Vec<Complex> = Vec::with_capacity(self.degree);
        while roots.len() < self.degree {
            let candidate = self.root_stream.next()?;
            if roots
                .iter()
                .all(|r| r.distance(candidate) >= self.min_separation)
            {
                roots.push(candidate);
            }
        }
        RootedPoly::new(&roots).ok()
    }
}

/// Random coefficient vectors of the given order.
#[must_use]
pub fn random_coeffs(seed: u64, order: usize) -> Vec<Complex> {
    RandStreamCartesian::new(seed, -10.0, 10.0, -10.0, 10.0)
        .take(order)
        .collect_vec()
}

/// Check that every value in `found` is within `tol` of a distinct value in
/// `expected`.
#[must_use]
pub fn check_roots(found: &[Complex], mut expected: Vec<Complex>, tol: f64) -> bool {
    if found.len() != expected.len() {
        return false;
    }

    for r1 in found {
        let mut best_idx = 0;
        let mut best_d = f64::MAX;
        for (i, r2) in expected.iter().enumerate() {
            let d = r1.distance(*r2);
            if d < best_d {
                best_idx = i;
                best_d = d;
            }
        }
        if best_d > tol {
            return false;
        }
        expected.remove(best_idx);
    }
    true
}
