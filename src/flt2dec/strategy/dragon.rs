/*
Shortest decomposition by an almost direct (but slightly optimized) rendition
of Figure 3 of [1]. Slow but exact for every input; serves as the total
fallback behind the Grisu strategy.

[1] Burger, R. G. and Dybvig, R. K. 1996. Printing floating-point numbers
    quickly and accurately. SIGPLAN Not. 31, 5 (May. 1996), 108-116.
*/

use core::cmp::Ordering;

use crate::flt2dec::bignum::{Big32x36 as Big, Digit32 as Digit};
use crate::flt2dec::estimator::estimate_scaling_factor;
use crate::flt2dec::{Decimal, Decoded, MAX_SIG_DIGITS};

static POW10: [Digit; 9] = [
    1, 10, 100, 1000, 10000, 100000, 1000000, 10000000, 100000000,
];

// precalculated arrays of `Digit`s for 10^(2^n)
static POW10TO16: [Digit; 2] = [0x6fc10000, 0x2386f2];
static POW10TO32: [Digit; 4] = [0, 0x85acef81, 0x2d6d415b, 0x4ee];
static POW10TO64: [Digit; 7] = [
    0, 0, 0xbf6a1f01, 0x6e38ed64, 0xdaa797ed, 0xe93ff9f4, 0x184f03,
];
static POW10TO128: [Digit; 14] = [
    0, 0, 0, 0, 0x2e953e01, 0x3df9909, 0xf1538fd, 0x2374e42f, 0xd3cff5ec, 0xc404dc08, 0xbccdb0da,
    0xa6337f19, 0xe91f2603, 0x24e,
];
static POW10TO256: [Digit; 27] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0x982e7c01, 0xbed3875b, 0xd8d99f72, 0x12152f87, 0x6bde50c6, 0xcf4a6e70,
    0xd595d80f, 0x26b2716e, 0xadc666b0, 0x1d153624, 0x3c42d35a, 0x63ff540e, 0xcc5573c0, 0x65f9ef17,
    0x55bc28f2, 0x80dcc7f7, 0xf46eeddc, 0x5fdcefce, 0x553f7,
];

// powers of ten for the carry check after rounding up the significand.
static POW10U64: [u64; 18] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
];

fn mul_pow10(mut x: Big, n: usize) -> Big {
    debug_assert!(n < 512);
    if n & 7 != 0 {
        x = x.mul_small(POW10[n & 7]);
    }
    if n & 8 != 0 {
        x = x.mul_small(POW10[8]);
    }
    if n & 16 != 0 {
        x = x.mul_digits(&POW10TO16);
    }
    if n & 32 != 0 {
        x = x.mul_digits(&POW10TO32);
    }
    if n & 64 != 0 {
        x = x.mul_digits(&POW10TO64);
    }
    if n & 128 != 0 {
        x = x.mul_digits(&POW10TO128);
    }
    if n & 256 != 0 {
        x = x.mul_digits(&POW10TO256);
    }
    x
}

// only usable when `x < 16 * scale`; `scaleN` should be `scale * N`.
fn div_rem_upto_16(mut x: Big, scale: &Big, scale2: &Big, scale4: &Big, scale8: &Big) -> (u8, Big) {
    let mut d = 0;
    if x >= *scale8 {
        x = x.sub(scale8);
        d += 8;
    }
    if x >= *scale4 {
        x = x.sub(scale4);
        d += 4;
    }
    if x >= *scale2 {
        x = x.sub(scale2);
        d += 2;
    }
    if x >= *scale {
        x = x.sub(scale);
        d += 1;
    }
    debug_assert!(x < *scale);
    (d, x)
}

pub fn shortest_decimal(d: &Decoded) -> Decimal {
    // the number `v` to format is known to be:
    // - equal to `mant * 2^exp`;
    // - preceded by `(mant - 2 * minus) * 2^exp` in the original type; and
    // - followed by `(mant + 2 * plus) * 2^exp` in the original type.
    //
    // obviously, `minus` and `plus` cannot be zero, and `mant` generates at
    // least one digit. any number between `low = (mant - minus) * 2^exp` and
    // `high = (mant + plus) * 2^exp` maps to this exact floating point
    // number, bounds included iff the original mantissa was even.

    assert!(d.mant > 0);
    assert!(d.minus > 0);
    assert!(d.plus > 0);
    assert!(d.mant.checked_add(d.plus).is_some());
    assert!(d.mant.checked_sub(d.minus).is_some());

    // `a.cmp(&b) < rounding` is `if d.inclusive {a <= b} else {a < b}`
    let rounding = if d.inclusive {
        Ordering::Greater
    } else {
        Ordering::Equal
    };

    // estimate `k_0` from the original inputs satisfying `10^(k_0-1) < high
    // <= 10^(k_0+1)`; the tight bound is fixed up below.
    let mut k = estimate_scaling_factor(d.mant + d.plus, d.exp);

    // convert `{mant, plus, minus} * 2^exp` into the fractional form so that:
    // - `v = mant / scale`
    // - `low = (mant - minus) / scale`
    // - `high = (mant + plus) / scale`
    let mut mant = Big::from_u64(d.mant);
    let mut minus = Big::from_u64(d.minus);
    let mut plus = Big::from_u64(d.plus);
    let mut scale = Big::from_small(1);
    if d.exp < 0 {
        scale = scale.mul_pow2(-d.exp as usize);
    } else {
        mant = mant.mul_pow2(d.exp as usize);
        minus = minus.mul_pow2(d.exp as usize);
        plus = plus.mul_pow2(d.exp as usize);
    }

    // divide `mant` by `10^k`. now `scale / 10 < mant + plus <= scale * 10`.
    if k >= 0 {
        scale = mul_pow10(scale, k as usize);
    } else {
        mant = mul_pow10(mant, -k as usize);
        minus = mul_pow10(minus, -k as usize);
        plus = mul_pow10(plus, -k as usize);
    }

    // fixup when `mant + plus > scale` (or `>=`), by scaling `scale` by 10
    // (equivalently, skipping the initial multiplication of the others).
    // now `scale < mant + plus <= scale * 10` and digits can be generated.
    //
    // note that the first digit *can* be zero, when `scale - plus < mant <
    // scale`; the rounding-up condition fires immediately in that case.
    if scale.cmp(&mant.add(&plus)) < rounding {
        k += 1;
    } else {
        mant = mant.mul_small(10);
        minus = minus.mul_small(10);
        plus = plus.mul_small(10);
    }

    // cache `(2, 4, 8) * scale` for digit generation.
    let scale2 = scale.mul_pow2(1);
    let scale4 = scale.mul_pow2(2);
    let scale8 = scale.mul_pow2(3);

    let mut sig: u64 = 0;
    let mut len = 0usize;
    let down;
    let up;
    loop {
        // invariants, with `d[0..n-1]` the digits generated so far:
        // - `v = mant / scale * 10^(k-n-1) + d[0..n-1] * 10^(k-n)`
        // - `v - low = minus / scale * 10^(k-n-1)`
        // - `high - v = plus / scale * 10^(k-n-1)`
        // - `(mant + plus) / scale <= 10` (thus `mant / scale < 10`)

        // generate one digit: `d[n] = floor(mant / scale) < 10`.
        let (digit, rem) = div_rem_upto_16(mant, &scale, &scale2, &scale4, &scale8);
        mant = rem;
        debug_assert!(digit < 10);
        sig = sig * 10 + u64::from(digit);
        len += 1;
        debug_assert!(len <= MAX_SIG_DIGITS + 1);

        // the shortest representation between `low` and `high` stops here
        // when both of these hold (`d[0..n-1]` rounds to `v` and the last
        // digit needs no increment), derived by solving the invariants:
        // - stop and round down (keep digits) when `mant < minus` (or `<=`).
        // - stop and round up (increment the last digit) when
        //   `scale < mant + plus` (or `<=`).
        let stop_down = mant.cmp(&minus) < rounding;
        let stop_up = scale.cmp(&mant.add(&plus)) < rounding;
        if stop_down || stop_up {
            down = stop_down;
            up = stop_up;
            break;
        }

        // restore the invariants. this makes the algorithm terminating:
        // `minus` and `plus` always increase while `mant` stays below `scale`.
        mant = mant.mul_small(10);
        minus = minus.mul_small(10);
        plus = plus.mul_small(10);
    }

    // rounding up happens when
    // i) only the rounding-up condition was triggered, or
    // ii) both were triggered and tie breaking prefers rounding up.
    if up && (!down || mant.mul_pow2(1) >= scale) {
        sig += 1;
        if sig == POW10U64[len] {
            // an all-nines significand carried over into one more digit; the
            // significand is now a power of ten and the exponent moves up.
            len += 1;
            k += 1;
        }
    }

    Decimal {
        sig,
        exp: k - len as i16,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flt2dec::testing;

    #[test]
    fn test_mul_pow10() {
        let mut prevpow10 = Big::from_small(1);
        for i in 1..340 {
            let curpow10 = mul_pow10(Big::from_small(1), i);
            assert_eq!(curpow10, prevpow10.mul_small(10));
            prevpow10 = curpow10;
        }
    }

    #[test]
    fn shortest_sanity_test() {
        testing::f64_shortest_sanity_test(shortest_decimal);
        testing::f32_shortest_sanity_test(shortest_decimal);
        testing::more_shortest_sanity_test(shortest_decimal);
    }
}
