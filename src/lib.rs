//! Newton-Raphson fractals over complex polynomials.
//!
//! A polynomial is given by its roots ([`RootedPoly`]). Every pixel of a
//! [`Viewport`] is used as a starting point for Newton's method on that
//! polynomial and is labelled with the root the iteration converges to
//! ([`NewtonFractal`]). A [`Scheduler`] spreads the pixels of a request
//! over a pool of worker threads.
//!
//! ```
//! use newton_fractal::{complex, NewtonFractal, Scheduler, Viewport};
//!
//! let fractal = NewtonFractal::from_roots(&[complex!(1.0), complex!(-1.0)]).unwrap();
//! let viewport = Viewport::new(-2.0, 2.0, -2.0, 2.0, 3, 3, 0).unwrap();
//! let scheduler = Scheduler::builder().with_threads(2).build().unwrap();
//! let image = scheduler.produce(&fractal, &viewport).unwrap();
//! assert_eq!(image.indices, vec![2, 0, 1, 2, 0, 1, 2, 0, 1]);
//! ```
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Shorthand for [`Complex::new`]. The imaginary part defaults to zero.
///
/// ```
/// use newton_fractal::{complex, Complex};
///
/// assert_eq!(complex!(1.0, -2.0), Complex::new(1.0, -2.0));
/// assert_eq!(complex!(3.0), Complex::new(3.0, 0.0));
/// ```
#[macro_export]
macro_rules! complex {
    ($re:expr) => {
        $crate::Complex::new($re, 0.0)
    };
    ($re:expr, $im:expr) => {
        $crate::Complex::new($re, $im)
    };
}

/// A [`Poly`] from real coefficients, lowest degree first.
///
/// ```
/// use newton_fractal::{complex, poly, Poly};
///
/// assert_eq!(poly![-1.0, 0.0, 1.0], Poly::new(&[complex!(-1.0), complex!(0.0), complex!(1.0)]));
/// ```
#[macro_export]
macro_rules! poly {
    () => {
        $crate::Poly::zero()
    };
    ($($c:expr),+ $(,)?) => {
        $crate::Poly::new(&[$($crate::Complex::from($c)),+])
    };
}

/// A [`RootedPoly`] from a non-empty list of complex roots.
///
/// # Panics
/// If the list is empty.
#[macro_export]
macro_rules! roots {
    ($($r:expr),+ $(,)?) => {
        $crate::RootedPoly::new(&[$($r),+]).expect("roots! needs at least one root")
    };
}

mod complex;
pub use complex::Complex;

mod error;
pub use error::{Error, Result};

mod fractal;
pub use fractal::{newton_iterate, FractalImage, NewtonConfig, NewtonFractal, Pixel, Viewport};

mod poly;
pub use poly::Poly;

mod rooted;
pub use rooted::{RootedPoly, NO_ROOT};

mod scheduler;
pub use scheduler::{partition, CancellationToken, FailurePolicy, Scheduler, SchedulerBuilder};

mod util;
#[doc(hidden)]
pub use util::__testing;
