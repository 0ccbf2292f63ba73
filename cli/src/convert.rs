use anyhow::{Context, Result};
use math::{error::Result as MathResult, radix};
use num_bigint::BigUint;

fn from_base(value: &str, base: u32) -> MathResult<BigUint> {
    Ok(radix::decode(value, base)?)
}

fn to_base(value: &BigUint, base: u32) -> MathResult<String> {
    Ok(radix::encode(value, base)?)
}

pub fn decode(value: &str, base: u32) -> Result<()> {
    let decoded = from_base(value, base)
        .with_context(|| format!("cannot decode `{value}` in base {base}"))?;
    println!("{decoded}");
    Ok(())
}

pub fn encode(decimal: &str, base: u32) -> Result<()> {
    let value: BigUint = decimal
        .trim()
        .parse()
        .with_context(|| format!("`{decimal}` is not a decimal integer"))?;
    println!("{}", to_base(&value, base)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use math::error::{MathError, RadixError};

    use super::*;

    #[test]
    fn decode_reports_radix_errors() {
        assert!(matches!(
            from_base("G", 10),
            Err(MathError::Radix(RadixError::InvalidDigit { .. }))
        ));
        assert!(decode("G", 10).is_err());
        assert!(decode("ff", 37).is_err());
    }

    #[test]
    fn decode_accepts_large_values() {
        assert_eq!(
            from_base("e1b5e05623d881f", 16).unwrap(),
            BigUint::from(1_016_509_518_118_225_951u64)
        );
        assert!(decode("e1b5e05623d881f", 16).is_ok());
    }

    #[test]
    fn encode_checks_input_and_base() {
        assert_eq!(to_base(&BigUint::from(39u32), 4).unwrap(), "213");
        assert!(encode("39", 4).is_ok());
        assert!(encode("thirty-nine", 4).is_err());
        assert!(matches!(
            to_base(&BigUint::from(39u32), 1),
            Err(MathError::Radix(RadixError::UnsupportedBase(1)))
        ));
        assert!(encode("39", 1).is_err());
    }
}
