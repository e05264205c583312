// Positional (non-exponent) rendering of `significand * 10^exponent`.
//
// The digit run is placed against the decimal point in one of three shapes,
// with `nzeroes` virtual zeroes making up the difference:
//
//    [0.][000...000][digits]     exponent pulls the run right of the point
//    [dig][.][its]               the point falls inside the run
//    [digits][000...000]         the run ends left of the point
//
// `precision` only pads the fraction with zeroes; rounding below the shortest
// form is out of scope here and stays with the caller.

use super::digits::write_2_digits;
use super::Error;

const MAX_DIGITS: usize = 17;

// right-aligned decimal expansion via div-100 pair steps.
fn extract_digits(mut n: u64, digits: &mut [u8; MAX_DIGITS + 1]) -> usize {
    let mut i = digits.len();
    while n >= 100 {
        i -= 2;
        write_2_digits((n % 100) as u32, digits, i);
        n /= 100;
    }
    if n >= 10 {
        i -= 2;
        write_2_digits(n as u32, digits, i);
    } else {
        i -= 1;
        digits[i] = b'0' + n as u8;
    }
    i
}

fn put(buf: &mut [u8], pos: &mut usize, bytes: &[u8]) -> Result<(), Error> {
    if buf.len() - *pos < bytes.len() {
        return Err(Error::OutOfRange);
    }
    buf[*pos..*pos + bytes.len()].copy_from_slice(bytes);
    *pos += bytes.len();
    Ok(())
}

fn put_zeroes(buf: &mut [u8], pos: &mut usize, n: usize) -> Result<(), Error> {
    if buf.len() - *pos < n {
        return Err(Error::OutOfRange);
    }
    for b in &mut buf[*pos..*pos + n] {
        *b = b'0';
    }
    *pos += n;
    Ok(())
}

pub fn write_fixed(
    buf: &mut [u8],
    negative: bool,
    significand: u64,
    exponent: i32,
    precision: Option<usize>,
) -> Result<usize, Error> {
    if significand >= 100_000_000_000_000_000 {
        return Err(Error::InvalidArgument);
    }

    let mut pos = 0;

    if negative {
        put(buf, &mut pos, b"-")?;
    }

    if significand == 0 {
        put(buf, &mut pos, b"0")?;
        if let Some(frac) = precision {
            if frac > 0 {
                put(buf, &mut pos, b".")?;
                put_zeroes(buf, &mut pos, frac)?;
            }
        }
        return Ok(pos);
    }

    let mut digits = [0u8; MAX_DIGITS + 1];
    let start = extract_digits(significand, &mut digits);
    let mut end = digits.len();
    let mut exponent = exponent;
    // cancel trailing zeros into the exponent so the layout below never
    // renders them as fraction digits.
    while end - start > 1 && digits[end - 1] == b'0' {
        end -= 1;
        exponent += 1;
    }
    let digits = &digits[start..end];
    let ndigits = digits.len() as i32;

    // the point position relative to the first digit: value = 0.digits * 10^k.
    let k = exponent + ndigits;

    let frac_written = if k <= 0 {
        put(buf, &mut pos, b"0.")?;
        put_zeroes(buf, &mut pos, (-k) as usize)?;
        put(buf, &mut pos, digits)?;
        (-k) as usize + digits.len()
    } else if (k as usize) < digits.len() {
        let k = k as usize;
        put(buf, &mut pos, &digits[..k])?;
        put(buf, &mut pos, b".")?;
        put(buf, &mut pos, &digits[k..])?;
        digits.len() - k
    } else {
        put(buf, &mut pos, digits)?;
        put_zeroes(buf, &mut pos, k as usize - digits.len())?;
        0
    };

    if let Some(frac) = precision {
        if frac > frac_written {
            if frac_written == 0 {
                put(buf, &mut pos, b".")?;
            }
            put_zeroes(buf, &mut pos, frac - frac_written)?;
        }
    }

    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(negative: bool, sig: u64, exp: i32, precision: Option<usize>) -> String {
        let mut buf = [0u8; 512];
        let len = write_fixed(&mut buf, negative, sig, exp, precision).unwrap();
        String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    #[test]
    fn point_inside_digits() {
        assert_eq!(run(false, 12345, -2, None), "123.45");
        assert_eq!(run(false, 15, -1, None), "1.5");
        assert_eq!(run(true, 15, -1, None), "-1.5");
    }

    #[test]
    fn point_left_of_digits() {
        assert_eq!(run(false, 1, -4, None), "0.0001");
        assert_eq!(run(false, 5, -324, None).len(), 2 + 324);
        assert_eq!(run(false, 625, -5, None), "0.00625");
    }

    #[test]
    fn point_right_of_digits() {
        assert_eq!(run(false, 5, 2, None), "500");
        assert_eq!(run(false, 17976931348623157, 292, None).len(), 309);
        assert_eq!(run(false, 1, 0, None), "1");
    }

    #[test]
    fn trailing_zeros_fold_into_the_exponent() {
        assert_eq!(run(false, 1500, -3, None), "1.5");
        assert_eq!(run(false, 1000, -3, None), "1");
        assert_eq!(run(false, 120, 1, None), "1200");
    }

    #[test]
    fn precision_pads_but_never_rounds() {
        assert_eq!(run(false, 15, -1, Some(3)), "1.500");
        assert_eq!(run(false, 1, 0, Some(2)), "1.00");
        assert_eq!(run(false, 0, 0, Some(2)), "0.00");
        assert_eq!(run(true, 0, 0, None), "-0");
        assert_eq!(run(false, 12345, -4, Some(2)), "1.2345");
    }

    #[test]
    fn zero() {
        assert_eq!(run(false, 0, 0, None), "0");
    }

    #[test]
    fn buffer_overflow_is_reported() {
        let mut buf = [0u8; 8];
        assert_eq!(
            write_fixed(&mut buf, false, 1, 300, None),
            Err(Error::OutOfRange)
        );
    }
}
