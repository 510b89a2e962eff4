use crate::{Complex, Poly, Result};

/// Newton-Raphson iteration `z <- z - p(z) / dp(z)` starting from `z0`.
///
/// Stops after the first step whose length is at most
/// `convergence_threshold`, or after `max_iter` steps, whichever comes
/// first. At least one step is always taken.
///
/// # Errors
/// [`crate::Error::DivisionByZero`] if the derivative vanishes at one of the
/// iterates.
pub fn newton_iterate(
    poly: &Poly,
    derivative: &Poly,
    z0: Complex,
    convergence_threshold: f64,
    max_iter: usize,
) -> Result<Complex> {
    let mut z = z0;
    let mut iter = 0;
    loop {
        let step = poly.apply(z).divide(derivative.apply(z))?;
        let next = z - step;
        iter += 1;
        let step_len = next.distance(z);
        z = next;
        if step_len <= convergence_threshold || iter >= max_iter {
            return Ok(z);
        }
    }
}
