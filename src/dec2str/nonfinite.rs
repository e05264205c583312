// Writer for the values the digit pipeline never sees. Runs before
// decomposition; the quiet bit decides between the NaN spellings.

use super::Error;

fn write_bytes(buf: &mut [u8], negative: bool, body: &[u8]) -> Result<usize, Error> {
    let len = body.len() + negative as usize;
    if buf.len() < len {
        return Err(Error::OutOfRange);
    }
    let mut pos = 0;
    if negative {
        buf[0] = b'-';
        pos = 1;
    }
    buf[pos..pos + body.len()].copy_from_slice(body);
    Ok(pos + body.len())
}

pub fn write_infinity(buf: &mut [u8], negative: bool) -> Result<usize, Error> {
    write_bytes(buf, negative, b"inf")
}

pub fn write_nan(buf: &mut [u8], negative: bool, signaling: bool) -> Result<usize, Error> {
    match (negative, signaling) {
        (false, false) => write_bytes(buf, false, b"nan"),
        (true, false) => write_bytes(buf, true, b"nan(ind)"),
        (false, true) => write_bytes(buf, false, b"nan(snan)"),
        (true, true) => write_bytes(buf, true, b"nan(snan)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(f: impl Fn(&mut [u8]) -> Result<usize, Error>) -> String {
        let mut buf = [0u8; 16];
        let len = f(&mut buf).unwrap();
        String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    #[test]
    fn spellings() {
        assert_eq!(run(|b| write_infinity(b, false)), "inf");
        assert_eq!(run(|b| write_infinity(b, true)), "-inf");
        assert_eq!(run(|b| write_nan(b, false, false)), "nan");
        assert_eq!(run(|b| write_nan(b, true, false)), "-nan(ind)");
        assert_eq!(run(|b| write_nan(b, false, true)), "nan(snan)");
        assert_eq!(run(|b| write_nan(b, true, true)), "-nan(snan)");
    }

    #[test]
    fn tiny_buffer_is_rejected() {
        let mut buf = [0u8; 2];
        assert_eq!(write_nan(&mut buf, true, false), Err(Error::OutOfRange));
    }
}
