use std::ops::Range;

use crate::{Error, Result};

/// Split rows `0..height` into `bands` contiguous ranges of
/// `height / bands` rows each, the last range absorbing the remainder.
///
/// When there are fewer rows than bands, all but the last range are empty.
///
/// ```
/// use newton_fractal::partition;
///
/// assert_eq!(partition(10, 3).unwrap(), vec![0..3, 3..6, 6..10]);
/// ```
///
/// # Errors
/// [`Error::InvalidArgument`] if `bands` is zero.
pub fn partition(height: usize, bands: usize) -> Result<Vec<Range<usize>>> {
    if bands == 0 {
        return Err(Error::invalid("cannot partition rows into zero bands"));
    }
    let per_band = height / bands;
    Ok((0..bands)
        .map(|i| {
            let start = i * per_band;
            let end = if i == bands - 1 { height } else { start + per_band };
            start..end
        })
        .collect())
}
