#[macro_use]
pub mod macros;

pub mod error;
pub mod fraction;
pub mod lagrange;
pub mod prelude;
pub mod radix;
pub mod traits;

pub use fraction::Fraction;
