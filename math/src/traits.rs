use num_bigint::{BigInt, BigUint};

/// Abstract source of an interpolation point.
///
/// Implemented by anything that can report an exact `(x, y)` pair; the
/// Lagrange helpers only ever read through this trait.
pub trait PointSource {
    /// The x-coordinate of this point.
    fn x(&self) -> BigInt;

    /// The y-coordinate of this point.
    fn y(&self) -> BigInt;
}

impl PointSource for (BigInt, BigInt) {
    fn x(&self) -> BigInt {
        self.0.clone()
    }

    fn y(&self) -> BigInt {
        self.1.clone()
    }
}

impl PointSource for (u64, BigUint) {
    fn x(&self) -> BigInt {
        BigInt::from(self.0)
    }

    fn y(&self) -> BigInt {
        BigInt::from(self.1.clone())
    }
}

impl PointSource for (i64, i64) {
    fn x(&self) -> BigInt {
        BigInt::from(self.0)
    }

    fn y(&self) -> BigInt {
        BigInt::from(self.1)
    }
}

impl<P: PointSource + ?Sized> PointSource for &P {
    fn x(&self) -> BigInt {
        (**self).x()
    }

    fn y(&self) -> BigInt {
        (**self).y()
    }
}
