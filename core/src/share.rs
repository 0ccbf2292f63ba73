use math::{error::RadixError, radix::decode, traits::PointSource};
use num_bigint::{BigInt, BigUint};

use crate::error::{ShamirError, ShamirResult};

/// One collected share: a point whose y-coordinate is still encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Share {
    x: u64,
    base: u32,
    encoded: String,
}

impl Share {
    /// Share ids are evaluation points; zero would be the secret itself.
    pub fn new(
        x: u64,
        base: u32,
        encoded: impl Into<String>,
    ) -> ShamirResult<Self> {
        if x == 0 {
            return Err(ShamirError::InvalidShareId(x));
        }

        Ok(Share {
            x,
            base,
            encoded: encoded.into(),
        })
    }

    pub fn x(&self) -> u64 {
        self.x
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Decode the y-coordinate.
    pub fn decode(&self) -> Result<Point, RadixError> {
        let y = decode(&self.encoded, self.base)?;
        Ok(Point { x: self.x, y })
    }
}

/// Decoded form of a [`Share`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u64,
    pub y: BigUint,
}

impl Point {
    pub fn new(x: u64, y: impl Into<BigUint>) -> Self {
        Self { x, y: y.into() }
    }
}

impl PointSource for Point {
    fn x(&self) -> BigInt {
        BigInt::from(self.x)
    }

    fn y(&self) -> BigInt {
        BigInt::from(self.y.clone())
    }
}

/// Shares for one reconstruction, kept in ascending x order.
///
/// Construction rejects repeated x values, so every set in circulation has
/// distinct abscissae.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShareSet {
    shares: Vec<Share>,
}

impl ShareSet {
    pub fn new(mut shares: Vec<Share>) -> ShamirResult<Self> {
        shares.sort_by_key(Share::x);
        if let Some(pair) = shares.windows(2).find(|w| w[0].x == w[1].x) {
            return Err(ShamirError::DuplicateXValue(pair[0].x));
        }
        Ok(Self { shares })
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Share> {
        self.shares.iter()
    }

    pub fn as_slice(&self) -> &[Share] {
        &self.shares
    }
}

impl TryFrom<Vec<Share>> for ShareSet {
    type Error = ShamirError;

    fn try_from(shares: Vec<Share>) -> Result<Self, Self::Error> {
        Self::new(shares)
    }
}

impl<'a> IntoIterator for &'a ShareSet {
    type Item = &'a Share;
    type IntoIter = std::slice::Iter<'a, Share>;

    fn into_iter(self) -> Self::IntoIter {
        self.shares.iter()
    }
}
