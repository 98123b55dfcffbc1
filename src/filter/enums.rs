//! Closed enumerations carried on the wire and their token codec.
//!
//! Every enum encodes as its symbolic name lowercased as a whole
//! (`GreaterThanOrEquals` becomes `greaterthanorequals`), with no word
//! separators inserted. Decoding compares against the symbolic names
//! ignoring ASCII case, so `GreaterThanOrEquals`, `greaterthanorequals` and
//! `GREATERTHANOREQUALS` all decode to the same member.

use super::error::FilterError;
use chrono::NaiveDate;
use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An enumeration with a lowercase wire token per member
pub trait WireEnum: Copy + Sized + 'static {
    /// Name used in decode errors
    const KIND: &'static str;

    /// Every member in declaration order
    fn members() -> &'static [Self];

    /// The member's symbolic name, e.g. `NotEquals`
    fn symbol(self) -> &'static str;

    fn as_token(self) -> String {
        encode(self)
    }
}

/// Encode a member as its wire token
pub fn encode<T: WireEnum>(value: T) -> String {
    value.symbol().to_ascii_lowercase()
}

/// Decode a wire token, ignoring ASCII case
pub fn decode<T: WireEnum>(token: &str) -> Result<T, FilterError> {
    T::members()
        .iter()
        .copied()
        .find(|member| member.symbol().eq_ignore_ascii_case(token))
        .ok_or_else(|| FilterError::UnknownEnumToken {
            kind: T::KIND,
            token: token.to_string(),
        })
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl WireEnum for $name {
            const KIND: &'static str = stringify!($name);

            fn members() -> &'static [Self] {
                Self::ALL
            }

            fn symbol(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.as_token())
            }
        }

        impl FromStr for $name {
            type Err = FilterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                decode(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.as_token())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let token = String::deserialize(deserializer)?;
                decode(&token).map_err(de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Comparison a leaf filter asks the remote side to perform
    pub enum MatchType {
        Equals,
        NotEquals,
        Contains,
        StartsWith,
        Exact,
        GreaterThan,
        GreaterThanOrEquals,
        LessThan,
        LessThanOrEquals,
        IsEmpty,
        IsNotEmpty,
        MultiValue,
    }
}

wire_enum! {
    /// How a composite filter joins its terms
    pub enum LogicalOperator {
        And,
        Or,
    }
}

wire_enum! {
    /// Granularity of a date comparison
    #[derive(Default)]
    pub enum DatePrecision {
        #[default]
        Day,
        Month,
        Year,
        Recurring,
        Hour,
        Minute,
    }
}

wire_enum! {
    /// Direction of a sort criterion
    pub enum SortOrder {
        Ascending,
        Descending,
    }
}

impl DatePrecision {
    /// Format a calendar date at this precision.
    ///
    /// Only `Day`, `Month` and `Year` have a format of their own. Every other
    /// precision, `Hour` and `Minute` included, renders as a full day since a
    /// calendar date carries no time of day.
    pub fn format_date(self, date: NaiveDate) -> String {
        let pattern = match self {
            DatePrecision::Month => "%Y-%m",
            DatePrecision::Year => "%Y",
            _ => "%Y-%m-%d",
        };
        date.format(pattern).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_lowercase_whole_name() {
        assert_eq!(MatchType::GreaterThanOrEquals.as_token(), "greaterthanorequals");
        assert_eq!(MatchType::NotEquals.as_token(), "notequals");
        assert_eq!(MatchType::MultiValue.as_token(), "multivalue");
        assert_eq!(LogicalOperator::And.as_token(), "and");
        assert_eq!(SortOrder::Descending.to_string(), "descending");
    }

    #[test]
    fn test_decode_ignores_case() {
        assert_eq!(
            "StartsWith".parse::<MatchType>().unwrap(),
            MatchType::StartsWith
        );
        assert_eq!(
            "startswith".parse::<MatchType>().unwrap(),
            MatchType::StartsWith
        );
        assert_eq!("OR".parse::<LogicalOperator>().unwrap(), LogicalOperator::Or);
    }

    #[test]
    fn test_decode_rejects_separated_words() {
        let err = "starts_with".parse::<MatchType>().unwrap_err();
        assert!(matches!(
            err,
            FilterError::UnknownEnumToken { kind: "MatchType", ref token } if token == "starts_with"
        ));
    }

    #[test]
    fn test_every_member_round_trips() {
        for member in MatchType::ALL {
            assert_eq!(decode::<MatchType>(&member.as_token()).unwrap(), *member);
        }
        for member in DatePrecision::ALL {
            assert_eq!(decode::<DatePrecision>(&member.as_token()).unwrap(), *member);
        }
    }

    #[test]
    fn test_format_date_by_precision() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(DatePrecision::Day.format_date(date), "2024-03-07");
        assert_eq!(DatePrecision::Month.format_date(date), "2024-03");
        assert_eq!(DatePrecision::Year.format_date(date), "2024");
        assert_eq!(DatePrecision::Recurring.format_date(date), "2024-03-07");
        assert_eq!(DatePrecision::Hour.format_date(date), "2024-03-07");
        assert_eq!(DatePrecision::Minute.format_date(date), "2024-03-07");
    }

    #[test]
    fn test_default_precision_is_day() {
        assert_eq!(DatePrecision::default(), DatePrecision::Day);
    }

    #[test]
    fn test_serde_uses_tokens() {
        assert_eq!(
            serde_json::to_string(&MatchType::LessThanOrEquals).unwrap(),
            r#""lessthanorequals""#
        );
        let parsed: SortOrder = serde_json::from_str(r#""ASCENDING""#).unwrap();
        assert_eq!(parsed, SortOrder::Ascending);
        assert!(serde_json::from_str::<SortOrder>(r#""up""#).is_err());
    }
}
