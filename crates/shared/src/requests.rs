//! Request contracts for the record API
//!
//! The batch lookup takes its identifiers as a comma-separated query string
//! (`?ids=2,6,9`). Parsing lives here so the engine and the player agree on
//! the exact format.

use serde::{Deserialize, Serialize};

use nftdb_domain::NftId;

/// Query string of the batch lookup endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchQuery {
    #[serde(default)]
    pub ids: Option<String>,
}

/// Errors produced while parsing a comma-separated id list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdListError {
    #[error("Error: Ids are required")]
    Missing,
    #[error("Error: Invalid Ids. Make sure all the ids are of type number (got {0:?})")]
    Invalid(String),
}

/// Parse `"2,6,9"` into identifiers, preserving order and duplicates.
///
/// Whitespace around each token is ignored. A missing or blank list and any
/// token that is not an integer are rejected.
pub fn parse_id_list(raw: Option<&str>) -> Result<Vec<NftId>, IdListError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(IdListError::Missing);
    }

    raw.split(',')
        .map(|token| {
            token
                .parse::<NftId>()
                .map_err(|_| IdListError::Invalid(token.trim().to_string()))
        })
        .collect()
}

/// Format identifiers as the comma-separated list the batch endpoint expects.
pub fn format_id_list(ids: &[i32]) -> String {
    ids.iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i32]) -> Vec<NftId> {
        values.iter().copied().map(NftId::new).collect()
    }

    #[test]
    fn parses_comma_separated_ids() {
        assert_eq!(parse_id_list(Some("2,6,9")), Ok(ids(&[2, 6, 9])));
        assert_eq!(parse_id_list(Some(" 2 , 6,9 ")), Ok(ids(&[2, 6, 9])));
        assert_eq!(parse_id_list(Some("4,4")), Ok(ids(&[4, 4])));
    }

    #[test]
    fn missing_or_blank_list_is_rejected() {
        assert_eq!(parse_id_list(None), Err(IdListError::Missing));
        assert_eq!(parse_id_list(Some("")), Err(IdListError::Missing));
        assert_eq!(parse_id_list(Some("   ")), Err(IdListError::Missing));
    }

    #[test]
    fn any_bad_token_rejects_the_whole_list() {
        assert_eq!(
            parse_id_list(Some("2,x,9")),
            Err(IdListError::Invalid("x".to_string()))
        );
        assert_eq!(
            parse_id_list(Some("2,,9")),
            Err(IdListError::Invalid(String::new()))
        );
    }

    #[test]
    fn formats_for_query_string() {
        assert_eq!(format_id_list(&[2, 6, 9]), "2,6,9");
        assert_eq!(format_id_list(&[]), "");
    }
}
