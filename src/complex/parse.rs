//! Textual complex numbers: `"a"`, `"ib"`, `"-i"`, `"a + ib"`, `"a - i"`, ...

use std::str::FromStr;

use super::Complex;
use crate::Error;

/// `[+-]?digits(.digits*)?`
fn is_decimal(s: &str, signed: bool) -> bool {
    let s = if signed {
        s.strip_prefix(['+', '-']).unwrap_or(s)
    } else {
        s
    };
    let (int, frac) = s.split_once('.').unwrap_or((s, ""));
    !int.is_empty()
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}

/// Magnitude of an `i`, `i2`, `i0.5` term. `None` if malformed.
fn imaginary_magnitude(s: &str) -> Option<f64> {
    let digits = s.strip_prefix('i')?;
    if digits.is_empty() {
        return Some(1.0);
    }
    if !is_decimal(digits, false) {
        return None;
    }
    digits.parse().ok()
}

impl FromStr for Complex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| Error::parse(s.to_owned(), reason);

        let parts: Vec<&str> = s.split_whitespace().collect();
        match parts.as_slice() {
            [] => Err(fail("input is empty")),
            [re, sign, im] => {
                if !is_decimal(re, true) {
                    return Err(fail("real part is malformed"));
                }
                let re: f64 = re.parse().map_err(|_| fail("real part is malformed"))?;
                let im = imaginary_magnitude(im).ok_or_else(|| fail("imaginary part is malformed"))?;
                match *sign {
                    "+" => Ok(Self::new(re, im)),
                    "-" => Ok(Self::new(re, -im)),
                    _ => Err(fail("expected '+' or '-' between real and imaginary part")),
                }
            }
            [single] => {
                if is_decimal(single, true) {
                    let re: f64 = single.parse().map_err(|_| fail("real part is malformed"))?;
                    return Ok(Self::new(re, 0.0));
                }
                let (negative, rest) = match single.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, single.strip_prefix('+').unwrap_or(single)),
                };
                let im = imaginary_magnitude(rest).ok_or_else(|| fail("not a real or imaginary number"))?;
                Ok(Self::new(0.0, if negative { -im } else { im }))
            }
            _ => Err(fail("expected one part or three parts separated by spaces")),
        }
    }
}
