//! Share-set data files.
//!
//! ```json
//! {
//!     "keys": { "n": 4, "k": 3 },
//!     "1": { "base": "10", "value": "4" },
//!     "2": { "base": "2", "value": "111" }
//! }
//! ```
//!
//! Every key other than `"keys"` is a share id. Entries are read in file
//! order and repeated ids are kept, so they surface as
//! [`ShamirError::DuplicateXValue`] instead of one silently replacing the
//! other.
//!
//! [`ShamirError::DuplicateXValue`]: crate::error::ShamirError::DuplicateXValue

use std::{fmt, fs, path::Path};

use serde::{
    de::{self, MapAccess, Visitor},
    Deserialize, Deserializer,
};
use tracing::debug;

use crate::{
    batch::ShareSetCase,
    error::{ConfigError, ConfigResult},
    params::validate_threshold_config,
    share::{Share, ShareSet},
};

#[derive(Debug, Deserialize)]
struct Keys {
    n: usize,
    k: usize,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBase {
    Number(u64),
    Text(String),
}

impl RawBase {
    /// Any unsigned integer is a base here; bases the decoder cannot handle
    /// are rejected per share. Values past `u32::MAX` saturate, which keeps
    /// them out of range.
    fn parse(&self) -> Option<u32> {
        match self {
            RawBase::Number(base) => {
                Some(u32::try_from(*base).unwrap_or(u32::MAX))
            }
            RawBase::Text(text) if is_plain_digits(text) => {
                Some(text.parse().unwrap_or(u32::MAX))
            }
            RawBase::Text(_) => None,
        }
    }
}

fn is_plain_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for RawBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawBase::Number(base) => write!(f, "{base}"),
            RawBase::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawShare {
    base: RawBase,
    value: String,
}

#[derive(Debug)]
struct RawFile {
    keys: Option<Keys>,
    entries: Vec<(String, RawShare)>,
}

impl<'de> Deserialize<'de> for RawFile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawFileVisitor;

        impl<'de> Visitor<'de> for RawFileVisitor {
            type Value = RawFile;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a share file object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<RawFile, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut keys = None;
                let mut entries = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key == "keys" {
                        if keys.is_some() {
                            return Err(de::Error::duplicate_field("keys"));
                        }
                        keys = Some(map.next_value()?);
                    } else {
                        entries.push((key, map.next_value()?));
                    }
                }
                Ok(RawFile { keys, entries })
            }
        }

        deserializer.deserialize_map(RawFileVisitor)
    }
}

/// A parsed data file: declared share count, threshold, and the shares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareSetFile {
    pub declared: usize,
    pub threshold: usize,
    pub shares: ShareSet,
}

impl ShareSetFile {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let raw: RawFile = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading share file");
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Turn the file into a named batch case.
    pub fn into_case(self, name: impl Into<String>) -> ShareSetCase {
        ShareSetCase {
            name: name.into(),
            threshold: self.threshold,
            shares: self.shares,
        }
    }

    fn from_raw(raw: RawFile) -> ConfigResult<Self> {
        let keys = raw.keys.ok_or(ConfigError::MissingKeys)?;

        if keys.n != raw.entries.len() {
            return Err(ConfigError::ShareCountMismatch {
                declared: keys.n,
                found: raw.entries.len(),
            });
        }
        if !validate_threshold_config(keys.k, keys.n) {
            return Err(ConfigError::InvalidThreshold {
                threshold: keys.k,
                shares: keys.n,
            });
        }

        let shares = raw
            .entries
            .into_iter()
            .map(|(key, share)| parse_share(key, share))
            .collect::<ConfigResult<Vec<Share>>>()?;

        Ok(ShareSetFile {
            declared: keys.n,
            threshold: keys.k,
            shares: ShareSet::new(shares)?,
        })
    }
}

fn parse_share(key: String, raw: RawShare) -> ConfigResult<Share> {
    let x = match is_plain_digits(&key).then(|| key.parse::<u64>()) {
        Some(Ok(x)) if x > 0 => x,
        _ => return Err(ConfigError::InvalidShareKey(key)),
    };

    let base = raw.base.parse().ok_or_else(|| ConfigError::InvalidBase {
        x,
        base: raw.base.to_string(),
    })?;

    Ok(Share::new(x, base, raw.value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShamirError;

    const CASE_ONE: &str = include_str!("../tests/fixtures/case1.json");
    const CASE_TWO: &str = include_str!("../tests/fixtures/case2.json");

    #[test]
    fn parses_first_fixture() {
        let file = ShareSetFile::from_json(CASE_ONE).unwrap();
        assert_eq!(file.declared, 4);
        assert_eq!(file.threshold, 3);
        let summary: Vec<(u64, u32, &str)> = file
            .shares
            .iter()
            .map(|share| (share.x(), share.base(), share.encoded()))
            .collect();
        assert_eq!(
            summary,
            vec![(1, 10, "4"), (2, 2, "111"), (3, 10, "12"), (6, 4, "213")]
        );
    }

    #[test]
    fn parses_second_fixture() {
        let file = ShareSetFile::from_json(CASE_TWO).unwrap();
        assert_eq!(file.declared, 10);
        assert_eq!(file.threshold, 7);
        assert_eq!(file.shares.len(), 10);
    }

    #[test]
    fn numeric_base_is_accepted() {
        let json = r#"{"keys": {"n": 1, "k": 1}, "5": {"base": 16, "value": "ff"}}"#;
        let file = ShareSetFile::from_json(json).unwrap();
        assert_eq!(file.shares.as_slice()[0].base(), 16);
    }

    #[test]
    fn out_of_range_base_is_left_to_the_decoder() {
        let json = r#"{"keys": {"n": 1, "k": 1}, "1": {"base": "99", "value": "1"}}"#;
        let file = ShareSetFile::from_json(json).unwrap();
        assert_eq!(file.shares.as_slice()[0].base(), 99);
    }

    #[test]
    fn duplicate_share_ids_are_not_overwritten() {
        let json = r#"{
            "keys": {"n": 3, "k": 2},
            "1": {"base": "10", "value": "4"},
            "2": {"base": "10", "value": "7"},
            "1": {"base": "10", "value": "5"}
        }"#;
        assert!(matches!(
            ShareSetFile::from_json(json),
            Err(ConfigError::Shamir(ShamirError::DuplicateXValue(1)))
        ));
    }

    #[test]
    fn missing_keys_section_is_rejected() {
        let json = r#"{"1": {"base": "10", "value": "4"}}"#;
        assert!(matches!(
            ShareSetFile::from_json(json),
            Err(ConfigError::MissingKeys)
        ));
    }

    #[test]
    fn repeated_keys_section_is_rejected() {
        let json = r#"{"keys": {"n": 0, "k": 1}, "keys": {"n": 0, "k": 1}}"#;
        assert!(matches!(
            ShareSetFile::from_json(json),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn declared_count_must_match() {
        let json = r#"{"keys": {"n": 2, "k": 1}, "1": {"base": "10", "value": "4"}}"#;
        assert!(matches!(
            ShareSetFile::from_json(json),
            Err(ConfigError::ShareCountMismatch {
                declared: 2,
                found: 1,
            })
        ));
    }

    #[test]
    fn threshold_must_fit_share_count() {
        let json = r#"{"keys": {"n": 1, "k": 2}, "1": {"base": "10", "value": "4"}}"#;
        assert!(matches!(
            ShareSetFile::from_json(json),
            Err(ConfigError::InvalidThreshold {
                threshold: 2,
                shares: 1,
            })
        ));
    }

    #[test]
    fn bad_share_keys_are_rejected() {
        for key in [
            "zero",
            "0",
            "-3",
            "1.5",
            "+3",
            " 3",
            "",
            "18446744073709551616",
        ] {
            let json = format!(
                r#"{{"keys": {{"n": 1, "k": 1}}, "{key}": {{"base": "10", "value": "4"}}}}"#
            );
            assert!(
                matches!(
                    ShareSetFile::from_json(&json),
                    Err(ConfigError::InvalidShareKey(ref k)) if k == key
                ),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn oversized_base_is_left_to_the_decoder() {
        let json = r#"{
            "keys": {"n": 2, "k": 1},
            "1": {"base": 5000000000, "value": "1"},
            "2": {"base": "99999999999999999999", "value": "1"}
        }"#;
        let file = ShareSetFile::from_json(json).unwrap();
        for share in &file.shares {
            assert_eq!(share.base(), u32::MAX);
            assert_eq!(
                share.decode(),
                Err(math::error::RadixError::UnsupportedBase(u32::MAX))
            );
        }
    }

    #[test]
    fn signed_base_text_is_rejected() {
        let json = r#"{"keys": {"n": 1, "k": 1}, "1": {"base": "+16", "value": "f"}}"#;
        assert!(matches!(
            ShareSetFile::from_json(json),
            Err(ConfigError::InvalidBase { x: 1, ref base }) if base == "+16"
        ));
    }

    #[test]
    fn non_numeric_base_is_rejected() {
        let json = r#"{"keys": {"n": 1, "k": 1}, "1": {"base": "ten", "value": "4"}}"#;
        assert!(matches!(
            ShareSetFile::from_json(json),
            Err(ConfigError::InvalidBase { x: 1, ref base }) if base == "ten"
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            ShareSetFile::from_json("{\"keys\": "),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            ShareSetFile::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn into_case_carries_threshold() {
        let case = ShareSetFile::from_json(CASE_ONE)
            .unwrap()
            .into_case("case1");
        assert_eq!(case.name, "case1");
        assert_eq!(case.threshold, 3);
        assert_eq!(case.shares.len(), 4);
    }
}
