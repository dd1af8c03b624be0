//! Sort token codec.
//!
//! A sort token is the combined `<field>_<direction>` string used as the query
//! parameter for result ordering, e.g. `simInvest_desc` or `actual_invest_asc`.
//! Field names may themselves contain underscores, so decoding always splits on
//! the **last** underscore.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default token of the comparison table.
pub const COMPARISON_DEFAULT: &str = "simInvest_desc";

/// Default token of the rank table.
pub const RANK_DEFAULT: &str = "revenue_desc";

/// Options offered by the comparison and rank dropdowns.
pub const RESULT_SORT_OPTIONS: &[&str] = &[
    "simInvest_desc",
    "simInvest_asc",
    "revenue_desc",
    "revenue_asc",
    "employees_desc",
    "employees_asc",
];

/// Options offered by the investment list dropdown.
pub const INVESTMENT_SORT_OPTIONS: &[&str] = &[
    "invest_amount_desc",
    "invest_amount_asc",
    "actual_invest_desc",
    "actual_invest_asc",
];

const SEPARATOR: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort direction: {0:?}")]
pub struct ParseSortDirectionError(pub String);

impl FromStr for SortDirection {
    type Err = ParseSortDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(ParseSortDirectionError(s.to_string()))
        }
    }
}

/// Split a token into its field and direction.
///
/// Tokens without an underscore, or whose suffix is not a direction, are treated
/// as a bare field name sorted descending.
pub fn decode(token: &str) -> (&str, SortDirection) {
    match token.rsplit_once(SEPARATOR) {
        Some((field, suffix)) => match suffix.parse::<SortDirection>() {
            Ok(direction) => (field, direction),
            Err(_) => (token, SortDirection::default()),
        },
        None => (token, SortDirection::default()),
    }
}

/// Inverse of [`decode`] for well-formed tokens.
pub fn encode(field: &str, direction: SortDirection) -> String {
    format!("{field}{SEPARATOR}{direction}")
}

/// Decoded sort token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SortToken {
    field: String,
    direction: SortDirection,
}

impl SortToken {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn decode(token: &str) -> Self {
        let (field, direction) = decode(token);
        Self::new(field, direction)
    }

    pub fn encode(&self) -> String {
        encode(&self.field, self.direction)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }
}

impl fmt::Display for SortToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, SEPARATOR, self.direction)
    }
}

impl FromStr for SortToken {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::decode(s))
    }
}

impl From<String> for SortToken {
    fn from(token: String) -> Self {
        Self::decode(&token)
    }
}

impl From<&str> for SortToken {
    fn from(token: &str) -> Self {
        Self::decode(token)
    }
}

impl From<SortToken> for String {
    fn from(token: SortToken) -> Self {
        token.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_splits_on_last_underscore() {
        assert_eq!(decode("actual_invest_desc"), ("actual_invest", SortDirection::Desc));
        assert_eq!(decode("simInvest_asc"), ("simInvest", SortDirection::Asc));
        assert_eq!(decode("a_b_c_asc"), ("a_b_c", SortDirection::Asc));
    }

    #[test]
    fn round_trips_every_preset() {
        for token in RESULT_SORT_OPTIONS.iter().chain(INVESTMENT_SORT_OPTIONS) {
            let (field, direction) = decode(token);
            assert_eq!(encode(field, direction), *token);
            assert_eq!(SortToken::decode(token).to_string(), *token);
        }
    }

    #[test]
    fn token_without_underscore_defaults_to_desc() {
        let token = SortToken::decode("revenue");
        assert_eq!(token.field(), "revenue");
        assert_eq!(token.direction(), SortDirection::Desc);
    }

    #[test]
    fn unknown_suffix_keeps_whole_token_as_field() {
        let token = SortToken::decode("actual_invest");
        assert_eq!(token.field(), "actual_invest");
        assert_eq!(token.direction(), SortDirection::Desc);
    }

    #[test]
    fn direction_is_case_insensitive() {
        assert_eq!(decode("revenue_ASC"), ("revenue", SortDirection::Asc));
    }

    #[test]
    fn serde_uses_string_form() {
        let token = SortToken::new("invest_amount", SortDirection::Asc);
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"invest_amount_asc\"");
        let back: SortToken = serde_json::from_str("\"employees_desc\"").unwrap();
        assert_eq!(back, SortToken::new("employees", SortDirection::Desc));
    }
}
