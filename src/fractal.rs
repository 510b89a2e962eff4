//! Newton fractal engine: classifies every pixel of a viewport by the root
//! that Newton-Raphson iteration started at that pixel converges to.

use crate::{Complex, Error, Poly, Result, RootedPoly, NO_ROOT};

mod kernel;
pub use kernel::newton_iterate;
mod viewport;
pub use viewport::{Pixel, Viewport};

/// Tuning knobs of the per-pixel iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewtonConfig {
    convergence_threshold: f64,
    root_threshold: f64,
    max_iter: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            convergence_threshold: 0.001,
            root_threshold: 0.002,
            max_iter: 256,
        }
    }
}

impl NewtonConfig {
    /// Iteration stops once a step is at most this long.
    #[must_use]
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// A converged point is attributed to a root only within this distance.
    #[must_use]
    pub fn with_root_threshold(mut self, threshold: f64) -> Self {
        self.root_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    #[must_use]
    pub fn convergence_threshold(&self) -> f64 {
        self.convergence_threshold
    }

    #[must_use]
    pub fn root_threshold(&self) -> f64 {
        self.root_threshold
    }

    #[must_use]
    pub const fn max_iter(&self) -> usize {
        self.max_iter
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("convergence threshold", self.convergence_threshold),
            ("root threshold", self.root_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.max_iter == 0 {
            return Err(Error::invalid("max_iter must be at least 1"));
        }
        Ok(())
    }
}

/// The result of one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FractalImage {
    /// One entry per pixel, row-major from the top-left corner. `0` is
    /// "no root", `k` is "converged to root `k - 1`".
    pub indices: Vec<u16>,
    /// Number of roots plus one, i.e. the number of distinct values
    /// `indices` can hold. Meant for palette sizing.
    pub root_count_plus_one: u16,
    pub request_id: u64,
    pub width: usize,
    pub height: usize,
}

/// A polynomial prepared for fractal rendering.
///
/// The coefficient form and its derivative are computed once here and
/// shared read-only by every pixel of every request.
#[derive(Clone, Debug)]
pub struct NewtonFractal {
    rooted: RootedPoly,
    poly: Poly,
    derivative: Poly,
    config: NewtonConfig,
}

impl NewtonFractal {
    /// # Errors
    /// [`Error::InvalidArgument`] if the configuration is invalid or there
    /// are more roots than a `u16` index buffer can tell apart.
    pub fn new(rooted: RootedPoly, config: NewtonConfig) -> Result<Self> {
        config.validate()?;
        if rooted.len() >= usize::from(u16::MAX) {
            return Err(Error::invalid(format!(
                "at most {} roots are supported, got {}",
                u16::MAX - 1,
                rooted.len()
            )));
        }
        let poly = rooted.to_poly();
        let derivative = poly.derive();
        log::debug!("prepared fractal for {rooted} {{poly: \"{poly}\", derivative: \"{derivative}\"}}");
        Ok(Self {
            rooted,
            poly,
            derivative,
            config,
        })
    }

    /// Shorthand for [`NewtonFractal::new`] with the default configuration.
    ///
    /// # Errors
    /// See [`RootedPoly::new`] and [`NewtonFractal::new`].
    pub fn from_roots(roots: &[Complex]) -> Result<Self> {
        Self::new(RootedPoly::new(roots)?, NewtonConfig::default())
    }

    #[must_use]
    pub const fn rooted(&self) -> &RootedPoly {
        &self.rooted
    }

    #[must_use]
    pub const fn poly(&self) -> &Poly {
        &self.poly
    }

    #[must_use]
    pub const fn derivative(&self) -> &Poly {
        &self.derivative
    }

    #[must_use]
    pub const fn config(&self) -> &NewtonConfig {
        &self.config
    }

    #[must_use]
    pub fn root_count_plus_one(&self) -> u16 {
        // bounded by the check in `new`
        u16::try_from(self.poly.order()).unwrap_or(u16::MAX)
    }

    /// Run the iteration from `z0` without classifying the end point.
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] if the derivative vanishes along the way.
    pub fn iterate(&self, z0: Complex) -> Result<Complex> {
        newton_iterate(
            &self.poly,
            &self.derivative,
            z0,
            self.config.convergence_threshold,
            self.config.max_iter,
        )
    }

    /// Root index for a starting point: `1 + i` if the iteration ends
    /// within the root threshold of root `i`, otherwise `0`.
    ///
    /// An iteration that hits a zero derivative counts as not converging.
    #[must_use]
    pub fn classify(&self, z0: Complex) -> u16 {
        let z = match self.iterate(z0) {
            Ok(z) => z,
            Err(e) => {
                log::trace!("no root for {z0}: {e}");
                return 0;
            }
        };
        // the threshold was validated in `new`, so this cannot fail
        let index = self
            .rooted
            .index_of_closest_root(z, self.config.root_threshold)
            .unwrap_or(NO_ROOT);
        u16::try_from(index).unwrap_or(0)
    }

    /// Fill `row` with the indices of pixel row `y` of `viewport`.
    pub fn render_row(&self, viewport: &Viewport, y: usize, row: &mut [u16]) {
        debug_assert_eq!(row.len(), viewport.width());
        for (x, slot) in row.iter_mut().enumerate() {
            *slot = self.classify(viewport.pixel_to_point(Pixel(x, y)));
        }
    }

    /// Render a whole viewport on the calling thread.
    #[must_use]
    pub fn render_sequential(&self, viewport: &Viewport) -> FractalImage {
        let mut indices = vec![0; viewport.len()];
        for (y, row) in indices.chunks_mut(viewport.width()).enumerate() {
            self.render_row(viewport, y, row);
        }
        self.image(viewport, indices)
    }

    pub(crate) fn image(&self, viewport: &Viewport, indices: Vec<u16>) -> FractalImage {
        FractalImage {
            indices,
            root_count_plus_one: self.root_count_plus_one(),
            request_id: viewport.request_id(),
            width: viewport.width(),
            height: viewport.height(),
        }
    }
}
