use crate::{Complex, Poly};

impl Poly {
    /// Derivative. Constants (the zero polynomial included) derive to the
    /// zero polynomial.
    #[must_use]
    pub fn derive(&self) -> Self {
        // derivative of constant is zero
        if self.order() == 1 {
            return Self::zero();
        }

        #[allow(clippy::cast_precision_loss)]
        let coeffs = self
            .iter()
            .enumerate()
            .skip(1) // shift degrees down
            .map(|(i, c)| *c * Complex::from(i as f64))
            .collect();
        Self::from_complex_vec(coeffs)
    }
}

#[cfg(test)]
mod test {
    use crate::{Complex, Poly};

    #[test]
    fn derive() {
        let p = poly![1.0, 2.0, 3.0];
        assert_eq!(p.derive(), poly![2.0, 6.0]);
    }

    #[test]
    fn derive_constant() {
        let p = poly![5.0];
        assert_eq!(p.derive(), Poly::zero());
    }

    /// zero is a fixed point
    #[test]
    fn derive_zero() {
        assert_eq!(Poly::zero().derive(), Poly::zero());
        assert_eq!(Poly::new(&[]).derive().derive(), Poly::zero());
    }

    #[test]
    fn derive_complex() {
        // i z^3 + (1 - i) z
        let p = Poly::new(&[Complex::ZERO, complex!(1.0, -1.0), Complex::ZERO, Complex::IM]);
        let expected = Poly::new(&[complex!(1.0, -1.0), Complex::ZERO, complex!(0.0, 3.0)]);
        assert!(p.derive().approx_eq(&expected, 1E-12));
    }

    #[test]
    fn derive_lowers_order() {
        let p = poly![0.0, 0.0, 0.0, 0.0, 1.0];
        let d = p.derive();
        assert_eq!(d.order(), 4);
        assert_eq!(d.derive().derive().derive(), poly![24.0]);
    }
}
