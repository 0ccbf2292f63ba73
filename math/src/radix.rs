//! Positional decoding of share values written in bases 2 through 36.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::RadixError;

/// Smallest base accepted by [`decode`] and [`encode`].
pub const MIN_BASE: u32 = 2;
/// Largest base accepted by [`decode`] and [`encode`].
pub const MAX_BASE: u32 = 36;

/// Map an ASCII alphanumeric character to its digit value.
///
/// Letters are case-insensitive: both `'a'` and `'A'` map to 10.
/// Returns `None` for anything that is not `[0-9A-Za-z]`.
#[inline]
pub fn digit_value(character: char) -> Option<u32> {
    match character {
        '0'..='9' => Some(character as u32 - '0' as u32),
        'a'..='z' => Some(character as u32 - 'a' as u32 + 10),
        'A'..='Z' => Some(character as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

fn ensure_base(base: u32) -> Result<(), RadixError> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(RadixError::UnsupportedBase(base))
    }
}

/// Decode `encoded` as an unsigned integer written in `base`.
///
/// Every character is validated before any arithmetic happens, so the
/// reported error always points at the leftmost offending character.
/// Digits are then accumulated from the least significant end:
/// `Σ digit_i · base^i`.
///
/// ```
/// use math::radix::decode;
/// use num_bigint::BigUint;
///
/// assert_eq!(decode("213", 4).unwrap(), BigUint::from(39u32));
/// assert_eq!(decode("FF", 16).unwrap(), decode("ff", 16).unwrap());
/// ```
pub fn decode(encoded: &str, base: u32) -> Result<BigUint, RadixError> {
    ensure_base(base)?;
    if encoded.is_empty() {
        return Err(RadixError::EmptyValue);
    }

    let digits = encoded
        .chars()
        .enumerate()
        .map(|(position, character)| {
            let digit = digit_value(character).ok_or(
                RadixError::InvalidCharacter {
                    character,
                    position,
                },
            )?;
            if digit >= base {
                return Err(RadixError::InvalidDigit {
                    character,
                    position,
                    digit,
                    base,
                });
            }
            Ok(digit)
        })
        .collect::<Result<Vec<u32>, _>>()?;

    let mut value = BigUint::zero();
    let mut power = BigUint::one();
    for digit in digits.into_iter().rev() {
        if digit != 0 {
            value += &power * digit;
        }
        power *= base;
    }

    Ok(value)
}

/// Render `value` in `base` using lowercase letters for digits above 9.
pub fn encode(value: &BigUint, base: u32) -> Result<String, RadixError> {
    ensure_base(base)?;
    Ok(value.to_str_radix(base))
}
