use std::fmt::Display;

use itertools::Itertools;

use crate::Complex;

mod calculus;
mod conversions;
mod impl_num;

/// Polynomial in coefficient form.
///
/// Coefficient `i` belongs to `z^i`. There is always at least one
/// coefficient: constructing from an empty sequence yields the zero
/// polynomial `[0]`. Beyond that, coefficients are kept exactly as given,
/// trailing zeros included, so [`Poly::order`] is the length of the input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Poly(Vec<Complex>);

impl Poly {
    #[must_use]
    pub fn new(coeffs: &[Complex]) -> Self {
        Self::from_complex_vec(coeffs.to_vec())
    }

    /// The canonical zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self(vec![Complex::ZERO])
    }

    #[must_use]
    pub fn one() -> Self {
        Self(vec![Complex::ONE])
    }

    /// Number of coefficients.
    #[must_use]
    pub fn order(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.order() - 1
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.len() == 1 && self.0[0].is_zero()
    }

    /// Evaluate the polynomial at `z`.
    ///
    /// ```
    /// use newton_fractal::{complex, poly};
    ///
    /// // z^2 - 1
    /// let p = poly![-1.0, 0.0, 1.0];
    /// assert_eq!(p.apply(complex!(3.0)), complex!(8.0));
    /// ```
    #[must_use]
    pub fn apply(&self, z: Complex) -> Complex {
        if z.is_zero() {
            return self.0[0];
        }
        // Horner's method, one multiply-add per coefficient
        self.0.iter().rev().fold(Complex::ZERO, |acc, &c| acc * z + c)
    }

    /// Coefficient-wise [`Complex::approx_eq`]. Polynomials of different
    /// order are never equal.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.order() == other.order()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.approx_eq(*b, epsilon))
    }
}

fn variable_fmt(power: usize) -> String {
    match power {
        0 => String::new(),
        1 => "z".to_owned(),
        _ => format!("z^{power}"),
    }
}

impl Display for Poly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let terms = self
            .iter()
            .enumerate()
            .rev()
            .map(|(i, c)| format!("({c}){}", variable_fmt(i)))
            .join(" + ");
        write!(f, "{terms}")
    }
}
