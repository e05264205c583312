//! Shortest-roundtrip conversion of IEEE-754 binary32/binary64 values to
//! decimal text, written into a caller-owned byte buffer with no allocation.
//!
//! The pipeline has two halves: [`flt2dec`] decodes a float and finds the
//! shortest `significand * 10^exponent` pair that parses back to the same
//! bits (Grisu3 with a Dragon fallback), and [`dec2str`] renders such a pair
//! into one of the supported layouts with a fused trailing-zero-trimming
//! digit engine. [`to_chars_f64`] and [`to_chars_f32`] glue them together.
//!
//! ```
//! use flt2str::dec2str::Format;
//!
//! let mut buf = [0u8; 32];
//! let len = flt2str::to_chars_f64(&mut buf, 1.5, Format::Scientific).unwrap();
//! assert_eq!(&buf[..len], b"1.5e+00");
//!
//! let len = flt2str::to_chars_f64(&mut buf, 1e100, Format::Scientific).unwrap();
//! assert_eq!(&buf[..len], b"1e+100");
//! ```

#![cfg_attr(not(test), no_std)]

pub mod dec2str;
pub mod flt2dec;

use dec2str::{Error, Format};
use flt2dec::FullDecoded;

/// Writes the shortest representation of `v` in the requested format.
/// Returns the number of bytes written.
///
/// `buf` must be at least [`dec2str::MIN_BUFFER_LEN`] bytes for the
/// scientific and general layouts; the fixed layout checks its exact need.
pub fn to_chars_f64(buf: &mut [u8], v: f64, format: Format) -> Result<usize, Error> {
    let (negative, decoded) = flt2dec::decode(v);
    match decoded {
        FullDecoded::Nan { signaling } => dec2str::write_nan(buf, negative, signaling),
        FullDecoded::Infinite => dec2str::write_infinity(buf, negative),
        FullDecoded::Zero => match format {
            Format::Hex => dec2str::hex::write_hex64(buf, v.to_bits()),
            _ => dec2str::format_finite64(buf, negative, 0, 0, format),
        },
        FullDecoded::Finite(ref d) => match format {
            Format::Hex => dec2str::hex::write_hex64(buf, v.to_bits()),
            _ => {
                let dec = flt2dec::shortest_decimal(d);
                dec2str::format_finite64(buf, negative, dec.sig, i32::from(dec.exp), format)
            }
        },
    }
}

/// Single-precision counterpart of [`to_chars_f64`].
pub fn to_chars_f32(buf: &mut [u8], v: f32, format: Format) -> Result<usize, Error> {
    let (negative, decoded) = flt2dec::decode(v);
    match decoded {
        FullDecoded::Nan { signaling } => dec2str::write_nan(buf, negative, signaling),
        FullDecoded::Infinite => dec2str::write_infinity(buf, negative),
        FullDecoded::Zero => match format {
            Format::Hex => dec2str::hex::write_hex32(buf, v.to_bits()),
            _ => dec2str::format_finite32(buf, negative, 0, 0, format),
        },
        FullDecoded::Finite(ref d) => match format {
            Format::Hex => dec2str::hex::write_hex32(buf, v.to_bits()),
            _ => {
                let dec = flt2dec::shortest_decimal(d);
                debug_assert!(dec.sig < 1_000_000_000);
                dec2str::format_finite32(buf, negative, dec.sig as u32, i32::from(dec.exp), format)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt64(v: f64, format: Format) -> String {
        let mut buf = [0u8; 512];
        let len = to_chars_f64(&mut buf, v, format).unwrap();
        String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    fn fmt32(v: f32, format: Format) -> String {
        let mut buf = [0u8; 512];
        let len = to_chars_f32(&mut buf, v, format).unwrap();
        String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    #[test]
    fn scientific_seed_cases() {
        assert_eq!(fmt64(0.0, Format::Scientific), "0e+00");
        assert_eq!(fmt64(-0.0, Format::Scientific), "-0e+00");
        assert_eq!(fmt64(1.0, Format::Scientific), "1e+00");
        assert_eq!(fmt64(1.5, Format::Scientific), "1.5e+00");
        assert_eq!(fmt64(1234567.0, Format::Scientific), "1.234567e+06");
        assert_eq!(fmt64(1e100, Format::Scientific), "1e+100");
        assert_eq!(
            fmt64(f64::MAX, Format::Scientific),
            "1.7976931348623157e+308"
        );
        assert_eq!(fmt64(5e-324, Format::Scientific), "5e-324");
        assert_eq!(fmt32(3.197633022e38f32, Format::Scientific), "3.197633e+38");
    }

    #[test]
    fn general_seed_cases() {
        assert_eq!(fmt64(0.0, Format::General), "0");
        assert_eq!(fmt64(-0.0, Format::General), "-0");
        assert_eq!(fmt64(1.0, Format::General), "1");
        assert_eq!(fmt64(1.5, Format::General), "1.5");
        assert_eq!(fmt64(1234567.0, Format::General), "1.234567e+06");
        assert_eq!(fmt64(0.1, Format::General), "1e-01");
    }

    #[test]
    fn nonfinite_values() {
        assert_eq!(fmt64(f64::INFINITY, Format::Scientific), "inf");
        assert_eq!(fmt64(f64::NEG_INFINITY, Format::Scientific), "-inf");
        assert_eq!(fmt64(f64::NAN, Format::Scientific), "nan");
        assert_eq!(fmt64(-f64::NAN, Format::Scientific), "-nan(ind)");
        assert_eq!(
            fmt64(f64::from_bits(0x7ff0_0000_0000_0001), Format::Scientific),
            "nan(snan)"
        );
        assert_eq!(
            fmt64(f64::from_bits(0xfff0_0000_0000_0001), Format::Scientific),
            "-nan(snan)"
        );
        assert_eq!(fmt32(f32::NAN, Format::General), "nan");
    }

    #[test]
    fn fixed_output() {
        assert_eq!(fmt64(1.5, Format::Fixed), "1.5");
        assert_eq!(fmt64(-1.5, Format::Fixed), "-1.5");
        assert_eq!(fmt64(100.0, Format::Fixed), "100");
        assert_eq!(fmt64(0.1, Format::Fixed), "0.1");
        assert_eq!(fmt64(0.00625, Format::Fixed), "0.00625");
        assert_eq!(fmt64(0.0, Format::Fixed), "0");
    }

    #[test]
    fn hex_output() {
        assert_eq!(fmt64(1.0, Format::Hex), "0x1p+0");
        assert_eq!(fmt64(-3.5, Format::Hex), "-0x1.cp+1");
        assert_eq!(fmt64(0.0, Format::Hex), "0x0p+0");
        assert_eq!(fmt32(3.0, Format::Hex), "0x1.8p+1");
    }

    #[test]
    fn significand_boundaries() {
        // 2^e straddles: exercised through the power-of-two decoder branch
        assert_eq!(fmt64(2.0, Format::Scientific), "2e+00");
        assert_eq!(fmt64(1024.0, Format::Scientific), "1.024e+03");
        assert_eq!(fmt64(f64::MIN_POSITIVE, Format::Scientific), "2.2250738585072014e-308");
        assert_eq!(fmt32(f32::MAX, Format::Scientific), "3.4028235e+38");
        assert_eq!(fmt32(f32::MIN_POSITIVE, Format::Scientific), "1.1754944e-38");
        assert_eq!(fmt32(f32::from_bits(1), Format::Scientific), "1e-45");
    }

    #[test]
    fn exponent_suffix_boundaries() {
        assert_eq!(fmt64(1e99, Format::Scientific), "1e+99");
        assert_eq!(fmt64(1e100, Format::Scientific), "1e+100");
        assert_eq!(fmt64(1e-99, Format::Scientific), "1e-99");
        assert_eq!(fmt64(1e-100, Format::Scientific), "1e-100");
    }
}
