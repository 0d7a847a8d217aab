//! Two's-complement conversion between bit strings and signed integers.

use crate::error::*;

pub const MAX_BITS: u32 = 64;

fn check_width(bits: u32) -> Result<()> {
    if bits == 0 || bits > MAX_BITS {
        Err(Error::InvalidWidth(bits))
    } else {
        Ok(())
    }
}

/// Interpret `raw` as a `bits` wide two's-complement number.
///
/// `raw` is written most significant bit first and must consist of exactly
/// `bits` characters `0` or `1`.
pub fn decode(raw: &str, bits: u32) -> Result<i64> {
    check_width(bits)?;

    let len = raw.chars().count();
    if len != bits as usize {
        return Err(Error::format(raw, format!("expected {} bits, found {}", bits, len)));
    }

    let mut unsigned: u64 = 0;
    for c in raw.chars() {
        let bit = match c {
            '0' => 0,
            '1' => 1,
            other => return Err(Error::format(raw, format!("'{}' is not a binary digit", other))),
        };
        unsigned = (unsigned << 1) | bit;
    }

    let sign = 1u64 << (bits - 1);
    let value = if unsigned & sign != 0 {
        unsigned as i128 - (1i128 << bits)
    } else {
        unsigned as i128
    };

    Ok(value as i64)
}

/// Smallest and largest value representable with `bits` signed bits.
pub fn signed_range(bits: u32) -> Result<(i64, i64)> {
    check_width(bits)?;
    let half = 1i128 << (bits - 1);
    Ok(((-half) as i64, (half - 1) as i64))
}

/// Render `value` as a `bits` wide two's-complement bit string.
pub fn encode(value: i64, bits: u32) -> Result<String> {
    let (min, max) = signed_range(bits)?;
    if value < min || value > max {
        return Err(Error::format(
            value.to_string(),
            format!("does not fit into {} signed bits", bits),
        ));
    }

    let mask = (1u128 << bits) - 1;
    let unsigned = (value as i128 as u128) & mask;
    Ok(format!("{:0width$b}", unsigned, width = bits as usize))
}
