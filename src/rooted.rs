use std::fmt::Display;

use itertools::Itertools;

use crate::{Complex, Error, Poly, Result};

/// Index reported by [`RootedPoly::index_of_closest_root`] when no root is
/// close enough.
pub const NO_ROOT: usize = 0;

/// Monic polynomial in factored form, `(z - r_0)(z - r_1)...`.
///
/// The order of the roots carries no meaning for the polynomial itself, it
/// only fixes the numbering used by [`RootedPoly::index_of_closest_root`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RootedPoly(Vec<Complex>);

impl RootedPoly {
    /// # Errors
    /// [`Error::InvalidArgument`] if `roots` is empty.
    pub fn new(roots: &[Complex]) -> Result<Self> {
        if roots.is_empty() {
            return Err(Error::invalid("a rooted polynomial needs at least one root"));
        }
        Ok(Self(roots.to_vec()))
    }

    #[must_use]
    pub fn roots(&self) -> &[Complex] {
        &self.0
    }

    /// Number of roots, which is also the degree.
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Evaluate the product form at `z`.
    ///
    /// ```
    /// use newton_fractal::{complex, RootedPoly};
    ///
    /// let p = RootedPoly::new(&[complex!(2.0, 1.0), complex!(1.0), complex!(0.0, -4.0)]).unwrap();
    /// assert_eq!(p.apply(complex!(0.0)), complex!(-4.0, 8.0));
    /// ```
    #[must_use]
    pub fn apply(&self, z: Complex) -> Complex {
        self.0.iter().fold(Complex::ONE, |acc, &r| acc * (z - r))
    }

    /// Expand the factors into coefficient form.
    ///
    /// ```
    /// use newton_fractal::{complex, poly, RootedPoly};
    ///
    /// let p = RootedPoly::new(&[complex!(1.0), complex!(-1.0)]).unwrap();
    /// assert_eq!(p.to_poly(), poly![-1.0, 0.0, 1.0]);
    /// ```
    #[must_use]
    pub fn to_poly(&self) -> Poly {
        let factor = |r: &Complex| Poly::new(&[r.negate(), Complex::ONE]);
        let Some((first, rest)) = self.0.split_first() else {
            return Poly::one();
        };
        rest.iter()
            .fold(factor(first), |acc, r| acc.multiply(&factor(r)))
    }

    /// Zero-based index of the root closest to `z`, among the roots no
    /// further than `threshold` away. Exact ties keep the earlier root.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `threshold` is negative or NaN.
    pub fn closest_root(&self, z: Complex, threshold: f64) -> Result<Option<usize>> {
        if threshold.is_nan() || threshold < 0.0 {
            return Err(Error::invalid(format!(
                "threshold must be non-negative, got {threshold}"
            )));
        }
        let mut best = None;
        let mut best_distance = f64::MAX;
        for (i, r) in self.0.iter().enumerate() {
            let d = z.distance(*r);
            if d <= threshold && d < best_distance {
                best = Some(i);
                best_distance = d;
            }
        }
        Ok(best)
    }

    /// One-based index of the closest root within `threshold`, or
    /// [`NO_ROOT`].
    ///
    /// # Errors
    /// Same as [`RootedPoly::closest_root`].
    pub fn index_of_closest_root(&self, z: Complex, threshold: f64) -> Result<usize> {
        Ok(self.closest_root(z, threshold)?.map_or(NO_ROOT, |i| i + 1))
    }
}

impl From<&RootedPoly> for Poly {
    fn from(value: &RootedPoly) -> Self {
        value.to_poly()
    }
}

impl Display for RootedPoly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let factors = self.0.iter().map(|r| format!("[z - ({r})]")).join(" * ");
        write!(f, "{factors}")
    }
}
