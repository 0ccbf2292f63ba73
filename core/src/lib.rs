//! Threshold secret recovery from shares whose values are written in mixed
//! bases.
//!
//! Shares are decoded into exact integers, the `k` shares with the smallest
//! ids are interpolated at zero with exact rational arithmetic, and surplus
//! shares are used to cross-check the result.

pub mod audit;
pub mod batch;
pub mod config;
pub mod error;
pub mod params;
pub mod processor;
pub mod share;
pub mod utils;

pub use audit::{audit_shares, AuditReport};
pub use batch::{reconstruct_batch, CaseOutcome, ShareSetCase};
pub use config::ShareSetFile;
pub use error::{ConfigError, ShamirError, ShamirResult};
pub use params::{ConsistencyPolicy, Threshold};
pub use processor::{
    decode_shares, reconstruct_secret, Consistency, DecodeReport,
    Reconstruction, Reconstructor,
};
pub use share::{Point, Share, ShareSet};
