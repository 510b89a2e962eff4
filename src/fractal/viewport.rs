//! The rectangle of the complex plane a request covers, and the mapping
//! between that rectangle and the pixel grid it is sampled on.

use crate::{Complex, Error, Result};

/// A pixel of the output grid. Column first, row 0 is the top row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pixel(pub usize, pub usize);

/// A single fractal request: bounds on the complex plane, the pixel grid
/// they are sampled on, and an opaque identifier passed back with the
/// result.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    re_min: f64,
    re_max: f64,
    im_min: f64,
    im_max: f64,
    width: usize,
    height: usize,
    request_id: u64,
}

impl Viewport {
    /// # Errors
    /// [`Error::InvalidArgument`] unless `width >= 2`, `height >= 2`,
    /// `re_max > re_min` and `im_max > im_min` (all bounds finite).
    pub fn new(
        re_min: f64,
        re_max: f64,
        im_min: f64,
        im_max: f64,
        width: usize,
        height: usize,
        request_id: u64,
    ) -> Result<Self> {
        if width < 2 || height < 2 {
            return Err(Error::invalid(format!(
                "viewport must be at least 2x2 pixels, got {width}x{height}"
            )));
        }
        if ![re_min, re_max, im_min, im_max].iter().all(|b| b.is_finite()) {
            return Err(Error::invalid("viewport bounds must be finite"));
        }
        if re_max <= re_min {
            return Err(Error::invalid(format!(
                "re_max ({re_max}) must be greater than re_min ({re_min})"
            )));
        }
        if im_max <= im_min {
            return Err(Error::invalid(format!(
                "im_max ({im_max}) must be greater than im_min ({im_min})"
            )));
        }
        Ok(Self {
            re_min,
            re_max,
            im_min,
            im_max,
            width,
            height,
            request_id,
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn request_id(&self) -> u64 {
        self.request_id
    }

    /// The total number of pixels. Used to size the output buffer.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false, a viewport has at least 2x2 pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Linear offset of a pixel in the output buffer.
    #[must_use]
    pub const fn offset(&self, pixel: Pixel) -> usize {
        pixel.1 * self.width + pixel.0
    }

    /// Map a pixel to the complex plane. Column 0 maps to `re_min`, row 0
    /// maps to `im_max`: the vertical axis is flipped so the image reads
    /// with the imaginary axis pointing up.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn pixel_to_point(&self, pixel: Pixel) -> Complex {
        let Pixel(x, y) = pixel;
        let (w, h) = (self.width as f64, self.height as f64);
        let re = x as f64 / (w - 1.0) * (self.re_max - self.re_min) + self.re_min;
        let im = (h - 1.0 - y as f64) / (h - 1.0) * (self.im_max - self.im_min) + self.im_min;
        Complex::new(re, im)
    }
}
