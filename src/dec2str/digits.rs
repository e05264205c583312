// Radix-100 digit tables and the two primitive pair emitters. Everything the
// digit engine writes goes through these.

/// ASCII of the zero-padded two-digit decimal expansion of `i` at `[2i, 2i+1]`,
/// for `i` in `0..100`.
pub static RADIX_100_TABLE: [u8; 200] = *b"\
    00010203040506070809\
    10111213141516171819\
    20212223242526272829\
    30313233343536373839\
    40414243444546474849\
    50515253545556575859\
    60616263646566676869\
    70717273747576777879\
    80818283848586878889\
    90919293949596979899";

/// The head pair for `i` in `0..100`: the leading digit of `i` followed by a
/// decimal point. Writing this pair lays down the dot speculatively; when a
/// second digit exists the engine overwrites the byte after it.
pub static RADIX_100_HEAD_TABLE: [u8; 200] = *b"\
    0.1.2.3.4.5.6.7.8.9.\
    1.1.1.1.1.1.1.1.1.1.\
    2.2.2.2.2.2.2.2.2.2.\
    3.3.3.3.3.3.3.3.3.3.\
    4.4.4.4.4.4.4.4.4.4.\
    5.5.5.5.5.5.5.5.5.5.\
    6.6.6.6.6.6.6.6.6.6.\
    7.7.7.7.7.7.7.7.7.7.\
    8.8.8.8.8.8.8.8.8.8.\
    9.9.9.9.9.9.9.9.9.9.";

#[inline]
pub fn write_1_digit(n: u32, buf: &mut [u8], pos: usize) {
    debug_assert!(n < 10);
    buf[pos] = b'0' + n as u8;
}

#[inline]
pub fn write_2_digits(n: u32, buf: &mut [u8], pos: usize) {
    debug_assert!(n < 100);
    let n = n as usize;
    buf[pos..pos + 2].copy_from_slice(&RADIX_100_TABLE[n * 2..n * 2 + 2]);
}

/// Writes `(leading digit of n, '.')` at `pos`.
#[inline]
pub fn write_head_pair(n: u32, buf: &mut [u8], pos: usize) {
    debug_assert!(n < 100);
    let n = n as usize;
    buf[pos..pos + 2].copy_from_slice(&RADIX_100_HEAD_TABLE[n * 2..n * 2 + 2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radix_100_table_encodes_all_pairs() {
        for i in 0..100u8 {
            let entry = &RADIX_100_TABLE[i as usize * 2..i as usize * 2 + 2];
            assert_eq!(entry, [b'0' + i / 10, b'0' + i % 10]);
        }
    }

    #[test]
    fn head_table_pairs_leading_digit_with_dot() {
        for i in 0..100u8 {
            let entry = &RADIX_100_HEAD_TABLE[i as usize * 2..i as usize * 2 + 2];
            let lead = if i < 10 { i } else { i / 10 };
            assert_eq!(entry, [b'0' + lead, b'.']);
        }
    }

    #[test]
    fn pair_emitters() {
        let mut buf = [0; 4];
        write_2_digits(7, &mut buf, 0);
        write_2_digits(42, &mut buf, 2);
        assert_eq!(&buf, b"0742");
        write_1_digit(9, &mut buf, 0);
        assert_eq!(buf[0], b'9');
    }
}
