use std::ops::Index;

use crate::{Complex, Poly};

impl Poly {
    #[must_use]
    pub fn as_slice(&self) -> &[Complex] {
        self.0.as_slice()
    }

    /// Iterate over coefficients, from the least significant
    pub fn iter(&self) -> std::slice::Iter<'_, Complex> {
        self.0.iter()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Complex> {
        self.0.clone()
    }

    #[must_use]
    pub fn from_complex_vec(value: Vec<Complex>) -> Self {
        if value.is_empty() {
            return Self::zero();
        }
        Self(value)
    }

    #[must_use]
    pub fn from_real_slice(value: &[f64]) -> Self {
        Self::from_complex_vec(value.iter().copied().map(Complex::from).collect())
    }
}

impl From<&[Complex]> for Poly {
    fn from(value: &[Complex]) -> Self {
        Self::new(value)
    }
}

impl From<Vec<Complex>> for Poly {
    fn from(value: Vec<Complex>) -> Self {
        Self::from_complex_vec(value)
    }
}

impl From<Poly> for Vec<Complex> {
    fn from(val: Poly) -> Self {
        val.0
    }
}

impl Index<usize> for Poly {
    type Output = Complex;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Poly {
    type IntoIter = std::slice::Iter<'a, Complex>;
    type Item = &'a Complex;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use crate::{Complex, Poly};

    #[test]
    fn from_vec() {
        let p: Poly = vec![Complex::ONE, Complex::IM].into();
        assert_eq!(p.order(), 2);
        assert_eq!(p[1], Complex::IM);
        assert_eq!(Poly::from(Vec::new()), Poly::zero());
    }

    #[test]
    fn from_reals() {
        assert_eq!(
            Poly::from_real_slice(&[1.0, -2.0]).to_vec(),
            vec![complex!(1.0), complex!(-2.0)]
        );
        assert_eq!(Poly::from_real_slice(&[]), Poly::zero());
    }
}
