//! Bit-level decoding of IEEE-754 values into a mantissa with its rounding
//! interval, the shape every decomposition strategy consumes.

/// A decoded finite, nonzero value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The scaled mantissa; `original value = mant * 2^exp`.
    pub mant: u64,
    /// Lower and upper ulp bounds: any number between `(mant - minus) * 2^exp`
    /// and `(mant + plus) * 2^exp` rounds to `mant` (bounds included only
    /// when `inclusive` is set).
    pub minus: u64,
    pub plus: u64,
    /// Shared base-2 exponent.
    pub exp: i16,
    /// In IEEE-754 rounding the bounds are included when the original
    /// mantissa was even.
    pub inclusive: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FullDecoded {
    Nan { signaling: bool },
    Infinite,
    Zero,
    Finite(Decoded),
}

/// A binary float whose bit layout the decoder understands.
pub trait DecodableFloat: Copy {
    const SIG_BITS: u32;
    const EXP_BITS: u32;
    fn to_bits64(self) -> u64;
}

impl DecodableFloat for f32 {
    const SIG_BITS: u32 = 23;
    const EXP_BITS: u32 = 8;
    fn to_bits64(self) -> u64 {
        u64::from(self.to_bits())
    }
}

impl DecodableFloat for f64 {
    const SIG_BITS: u32 = 52;
    const EXP_BITS: u32 = 11;
    fn to_bits64(self) -> u64 {
        self.to_bits()
    }
}

/// Splits `v` into its sign and the decoded payload.
pub fn decode<T: DecodableFloat>(v: T) -> (bool, FullDecoded) {
    let bits = v.to_bits64();
    let frac = bits & ((1u64 << T::SIG_BITS) - 1);
    let biased = ((bits >> T::SIG_BITS) & ((1u64 << T::EXP_BITS) - 1)) as i32;
    let negative = bits >> (T::SIG_BITS + T::EXP_BITS) != 0;

    let max_biased = (1i32 << T::EXP_BITS) - 1;
    let bias = max_biased >> 1;
    // exponent shared by every mantissa-as-integer reading: for a normal
    // value, `v = (frac | 2^SIG_BITS) * 2^(e_base + biased)`.
    let e_base = -(bias + T::SIG_BITS as i32);

    if biased == max_biased {
        if frac == 0 {
            return (negative, FullDecoded::Infinite);
        }
        // the topmost fraction bit distinguishes quiet from signaling.
        let quiet = frac >> (T::SIG_BITS - 1) != 0;
        return (negative, FullDecoded::Nan { signaling: !quiet });
    }
    if biased == 0 && frac == 0 {
        return (negative, FullDecoded::Zero);
    }

    let decoded = if biased == 0 {
        // subnormal. the neighbors sit one ulp away on both sides:
        // (mant - 2, exp) -- (mant, exp) -- (mant + 2, exp)
        let mant = frac << 1;
        Decoded {
            mant,
            minus: 1,
            plus: 1,
            exp: e_base as i16,
            inclusive: mant & 1 == 0,
        }
    } else {
        let mant = frac | (1u64 << T::SIG_BITS);
        let exp = e_base + biased;
        let inclusive = mant & 1 == 0;
        if frac == 0 {
            // an exact power of two; the gap below is half the gap above:
            // (maxmant, exp - 1) -- (2^SIG_BITS, exp) -- (2^SIG_BITS + 1, exp)
            // where maxmant = 2^(SIG_BITS+1) - 1
            Decoded {
                mant: mant << 2,
                minus: 1,
                plus: 2,
                exp: (exp - 2) as i16,
                inclusive,
            }
        } else {
            // (mant - 1, exp) -- (mant, exp) -- (mant + 1, exp)
            Decoded {
                mant: mant << 1,
                minus: 1,
                plus: 1,
                exp: (exp - 1) as i16,
                inclusive,
            }
        }
    };
    (negative, FullDecoded::Finite(decoded))
}
