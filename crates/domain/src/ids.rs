use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Caller-assigned key of an NFT record.
///
/// The store never generates identifiers; whoever creates a record picks its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NftId(i32);

impl NftId {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for NftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for NftId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<NftId> for i32 {
    fn from(value: NftId) -> Self {
        value.0
    }
}

impl FromStr for NftId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .map(Self)
            .map_err(|_| DomainError::parse(format!("Invalid NFT id: {:?}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_surrounding_whitespace() {
        assert_eq!(" 42 ".parse::<NftId>().ok(), Some(NftId::new(42)));
        assert_eq!("-7".parse::<NftId>().ok(), Some(NftId::new(-7)));
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = "abc".parse::<NftId>().unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
        assert!("".parse::<NftId>().is_err());
        assert!("1.5".parse::<NftId>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&NftId::new(9)).expect("serialize");
        assert_eq!(json, "9");
    }
}
