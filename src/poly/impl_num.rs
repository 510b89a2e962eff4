// Implementation of traits related to numeric operations and operators

use std::ops::Mul;

use crate::{util::linalg::convolve_1d, Complex, Poly};

impl Poly {
    /// Product of two polynomials. The result has order `m + n - 1` for
    /// operands of order `m` and `n`.
    ///
    /// ```
    /// use newton_fractal::poly;
    ///
    /// // (z - 1)(z + 1) = z^2 - 1
    /// let p = poly![-1.0, 1.0].multiply(&poly![1.0, 1.0]);
    /// assert_eq!(p, poly![-1.0, 0.0, 1.0]);
    /// ```
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        Self(convolve_1d(&self.0, &other.0))
    }

    /// Multiply every coefficient by `factor`.
    #[must_use]
    pub fn scaled(mut self, factor: Complex) -> Self {
        self.0.iter_mut().for_each(|c| *c = *c * factor);
        self
    }
}

impl Mul<Self> for Poly {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl Mul<&Self> for Poly {
    type Output = Self;

    fn mul(self, rhs: &Self) -> Self::Output {
        self.multiply(rhs)
    }
}

impl Mul<Poly> for &Poly {
    type Output = Poly;

    fn mul(self, rhs: Poly) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl Mul<&Poly> for &Poly {
    type Output = Poly;

    fn mul(self, rhs: &Poly) -> Self::Output {
        self.multiply(rhs)
    }
}

impl Mul<Complex> for Poly {
    type Output = Self;

    fn mul(self, rhs: Complex) -> Self::Output {
        self.scaled(rhs)
    }
}

impl std::iter::Product for Poly {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc * x)
    }
}

#[cfg(test)]
mod test {
    use crate::{Complex, Poly};

    #[test]
    fn multiply() {
        let p1 = poly![1.0, 2.0, 3.0];
        let p2 = poly![4.0, 5.0];
        assert_eq!(p1.multiply(&p2), poly![4.0, 13.0, 22.0, 15.0]);
    }

    #[test]
    fn multiply_order() {
        let p1 = poly![1.0, 0.0, 0.0, 0.0];
        let p2 = poly![1.0, 1.0, 0.0];
        assert_eq!(p1.multiply(&p2).order(), 6);
    }

    #[test]
    fn multiply_by_zero_poly() {
        let p = poly![1.0, 2.0];
        assert_eq!((&p * &Poly::zero()).order(), 2);
        assert!((p * Poly::zero()).iter().all(|c| c.is_zero()));
    }

    #[test]
    fn multiply_complex() {
        // (z - i)(z + i) = z^2 + 1
        let p1 = Poly::new(&[Complex::IM_NEG, Complex::ONE]);
        let p2 = Poly::new(&[Complex::IM, Complex::ONE]);
        assert!((p1 * p2).approx_eq(&poly![1.0, 0.0, 1.0], 1E-12));
    }

    #[test]
    fn scaled() {
        let p = poly![1.0, 2.0] * complex!(0.0, 1.0);
        assert_eq!(p, Poly::new(&[complex!(0.0, 1.0), complex!(0.0, 2.0)]));
    }

    #[test]
    fn product() {
        let factors = vec![poly![-1.0, 1.0], poly![1.0, 1.0], poly![0.0, 1.0]];
        assert_eq!(factors.into_iter().product::<Poly>(), poly![0.0, -1.0, 0.0, 1.0]);
    }
}
