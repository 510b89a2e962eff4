use std::{
    f64::consts::TAU,
    fmt::{self, Display},
    hash::{Hash, Hasher},
    ops::{Add, Mul, Neg, Sub},
};

use num::complex::Complex64;

use crate::{Error, Result};

mod parse;

/// Immutable double-precision complex number.
///
/// Equality is exact: two values are equal when both of their components
/// have the same bit pattern, so `0.0` and `-0.0` differ and `NaN` equals
/// itself. Use [`Complex::approx_eq`] for tolerant comparisons.
///
/// Addition, subtraction, multiplication and negation are total and exposed
/// as operators. Division is fallible, see [`Complex::divide`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 0.0);
    pub const ONE_NEG: Self = Self::new(-1.0, 0.0);
    pub const IM: Self = Self::new(0.0, 1.0);
    pub const IM_NEG: Self = Self::new(0.0, -1.0);

    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    #[must_use]
    pub fn from_polar(modulus: f64, arg: f64) -> Self {
        Complex64::from_polar(modulus, arg).into()
    }

    #[must_use]
    pub const fn re(self) -> f64 {
        self.re
    }

    #[must_use]
    pub const fn im(self) -> f64 {
        self.im
    }

    /// True for both `+0.0` and `-0.0` components.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    /// Euclidean norm.
    #[must_use]
    pub fn modulus(self) -> f64 {
        Complex64::from(self).norm()
    }

    /// Principal argument in `(-pi, pi]`.
    #[must_use]
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Euclidean distance between two points of the complex plane.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).modulus()
    }

    #[must_use]
    pub fn negate(self) -> Self {
        -self
    }

    #[must_use]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.re * factor, self.im * factor)
    }

    /// Divide by scaling with the conjugate of `rhs`.
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] if `rhs` is exactly zero. There is no
    /// tolerance: tiny divisors divide normally.
    pub fn divide(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let divisor = rhs.re.mul_add(rhs.re, rhs.im * rhs.im);
        Ok(Self::new(
            self.re.mul_add(rhs.re, self.im * rhs.im) / divisor,
            self.im.mul_add(rhs.re, -(self.re * rhs.im)) / divisor,
        ))
    }

    /// Integer power using De Moivre's formula.
    ///
    /// # Errors
    /// [`Error::UndefinedPower`] for `0^0`.
    pub fn power(self, n: u32) -> Result<Self> {
        if n == 0 && self.is_zero() {
            return Err(Error::UndefinedPower);
        }
        let n = f64::from(n);
        Ok(Self::from_polar(self.modulus().powf(n), n * self.arg()))
    }

    /// The `n` principal `n`-th roots, ordered by increasing angle
    /// `(arg(z) + 2 pi k) / n` for `k` in `0..n`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `n` is zero.
    pub fn root(self, n: u32) -> Result<Vec<Self>> {
        if n == 0 {
            return Err(Error::invalid("root degree must be positive"));
        }
        let degree = f64::from(n);
        let modulus = self.modulus().powf(degree.recip());
        let arg = self.arg();
        Ok((0..n)
            .map(|k| Self::from_polar(modulus, f64::from(k).mul_add(TAU, arg) / degree))
            .collect())
    }

    /// Component-wise comparison: each pair of components must either be
    /// bit-identical or differ by strictly less than `epsilon`.
    #[must_use]
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        let close = |a: f64, b: f64| a.to_bits() == b.to_bits() || (a - b).abs() < epsilon;
        close(self.re, other.re) && close(self.im, other.im)
    }
}

impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        self.re.to_bits() == other.re.to_bits() && self.im.to_bits() == other.im.to_bits()
    }
}

// bitwise equality is reflexive, even for NaN
impl Eq for Complex {}

impl Hash for Complex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.re.to_bits().hash(state);
        self.im.to_bits().hash(state);
    }
}

impl From<Complex64> for Complex {
    fn from(value: Complex64) -> Self {
        Self::new(value.re, value.im)
    }
}

impl From<Complex> for Complex64 {
    fn from(value: Complex) -> Self {
        Self::new(value.re, value.im)
    }
}

impl From<f64> for Complex {
    fn from(value: f64) -> Self {
        Self::new(value, 0.0)
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        (Complex64::from(self) * Complex64::from(rhs)).into()
    }
}

impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.re, -self.im)
    }
}

impl std::iter::Sum for Complex {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, z| acc + z)
    }
}

impl std::iter::Product for Complex {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, z| acc * z)
    }
}

/// At most four decimals, trailing zeros trimmed.
fn fmt_decimal(x: f64) -> String {
    let s = format!("{x:.4}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

impl Display for Complex {
    #[allow(clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (re, im) = (self.re, self.im);
        match (re != 0.0, im.partial_cmp(&0.0)) {
            (true, Some(std::cmp::Ordering::Greater)) => {
                write!(f, "{} + i{}", fmt_decimal(re), fmt_decimal(im))
            }
            (true, Some(std::cmp::Ordering::Less)) => {
                write!(f, "{} - i{}", fmt_decimal(re), fmt_decimal(-im))
            }
            (true, _) => write!(f, "{}", fmt_decimal(re)),
            (false, Some(std::cmp::Ordering::Greater)) => write!(f, "i{}", fmt_decimal(im)),
            (false, Some(std::cmp::Ordering::Less)) => write!(f, "-i{}", fmt_decimal(-im)),
            (false, _) => write!(f, "0"),
        }
    }
}

#[cfg(test)]
mod test {
    use std::f64::consts::PI;

    use super::Complex;
    use crate::Error;

    const EPSILON: f64 = 1E-9;

    #[test]
    fn exact_equality_is_bitwise() {
        assert_eq!(Complex::new(1.0, 2.0), complex!(1.0, 2.0));
        assert_ne!(Complex::new(0.0, 0.0), Complex::new(-0.0, 0.0));
        assert_eq!(Complex::new(f64::NAN, 0.0), Complex::new(f64::NAN, 0.0));
    }

    #[test]
    fn approx_eq() {
        let a = complex!(1.0, 1.0);
        assert!(a.approx_eq(complex!(1.0 + 1E-10, 1.0 - 1E-10), EPSILON));
        assert!(!a.approx_eq(complex!(1.0 + 1E-3, 1.0), EPSILON));
    }

    #[test]
    fn arithmetic() {
        let a = complex!(3.0, 2.0);
        let b = complex!(1.0, -4.0);
        assert_eq!(a + b, complex!(4.0, -2.0));
        assert_eq!(a - b, complex!(2.0, 6.0));
        assert_eq!(a * b, complex!(11.0, -10.0));
        assert_eq!(-a, complex!(-3.0, -2.0));
        assert_eq!(a.negate(), -a);
        assert_eq!(a.conj(), complex!(3.0, -2.0));
    }

    #[test]
    fn divide() {
        let a = complex!(11.0, -10.0);
        let b = complex!(1.0, -4.0);
        assert!(a.divide(b).unwrap().approx_eq(complex!(3.0, 2.0), EPSILON));
    }

    #[test]
    fn divide_by_zero() {
        let a = complex!(1.0, 1.0);
        assert!(matches!(a.divide(Complex::ZERO), Err(Error::DivisionByZero)));
        assert!(matches!(
            a.divide(Complex::new(-0.0, 0.0)),
            Err(Error::DivisionByZero)
        ));
        // no tolerance
        assert!(a.divide(complex!(1E-300, 0.0)).is_ok());
    }

    #[test]
    fn modulus_and_distance() {
        assert!((complex!(3.0, 4.0).modulus() - 5.0).abs() < EPSILON);
        assert!((complex!(1.0, 1.0).distance(complex!(4.0, 5.0)) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn power() {
        let z = complex!(1.0, 1.0);
        assert!(z.power(2).unwrap().approx_eq(complex!(0.0, 2.0), EPSILON));
        assert!(z.power(0).unwrap().approx_eq(Complex::ONE, EPSILON));
        assert!(Complex::IM
            .power(3)
            .unwrap()
            .approx_eq(Complex::IM_NEG, EPSILON));
    }

    #[test]
    fn zero_to_the_zero() {
        assert!(matches!(Complex::ZERO.power(0), Err(Error::UndefinedPower)));
        assert!(Complex::ZERO.power(3).unwrap().approx_eq(Complex::ZERO, EPSILON));
    }

    #[test]
    fn roots_of_unity() {
        let roots = Complex::ONE.root(4).unwrap();
        assert_eq!(roots.len(), 4);
        let expected = [
            Complex::ONE,
            Complex::IM,
            Complex::ONE_NEG,
            Complex::IM_NEG,
        ];
        for (r, e) in roots.iter().zip(expected) {
            assert!(r.approx_eq(e, EPSILON), "{r} != {e}");
        }
    }

    #[test]
    fn roots_ordered_by_angle() {
        let z = complex!(-8.0, 0.0);
        let roots = z.root(3).unwrap();
        assert!(roots[0].approx_eq(Complex::from_polar(2.0, PI / 3.0), EPSILON));
        assert!(roots[1].approx_eq(complex!(-2.0, 0.0), EPSILON));
        assert!(roots[2].approx_eq(Complex::from_polar(2.0, 5.0 * PI / 3.0), EPSILON));
    }

    #[test]
    fn root_of_degree_zero() {
        assert!(matches!(
            Complex::ONE.root(0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(complex!(1.0, 2.0).to_string(), "1 + i2");
        assert_eq!(complex!(1.0, -2.5).to_string(), "1 - i2.5");
        assert_eq!(complex!(1.5, 0.0).to_string(), "1.5");
        assert_eq!(complex!(0.0, 1.0).to_string(), "i1");
        assert_eq!(complex!(0.0, -3.0).to_string(), "-i3");
        assert_eq!(complex!(0.0, 0.0).to_string(), "0");
        assert_eq!(complex!(-0.123_456, 0.0).to_string(), "-0.1235");
    }

    #[test]
    fn sum_and_product() {
        let zs = [complex!(1.0, 1.0), complex!(2.0, -1.0), complex!(0.0, 3.0)];
        assert_eq!(zs.iter().copied().sum::<Complex>(), complex!(3.0, 3.0));
        assert_eq!(
            zs.iter().copied().product::<Complex>(),
            complex!(1.0, 1.0) * complex!(2.0, -1.0) * complex!(0.0, 3.0)
        );
    }
}
