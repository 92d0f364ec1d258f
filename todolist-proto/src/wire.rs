//! Date and time encodings used at the service boundary.
//!
//! Due dates travel as calendar-date strings (`YYYY-MM-DD`) and due times as
//! clock strings (`HH:MM`). Parsing is lenient in the ways real services are
//! sloppy: an RFC 3339 timestamp is reduced to its UTC calendar date, a time
//! with seconds is accepted, and an empty string is treated as absent.
//!
//! The [`date`] and [`time`] modules are meant for `#[serde(with = "...")]`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for clock times.
pub const TIME_FORMAT: &str = "%H:%M";

const TIME_FORMAT_WITH_SECONDS: &str = "%H:%M:%S";

/// Errors produced when a wire string is not a valid date or time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The string is neither `YYYY-MM-DD` nor an RFC 3339 timestamp.
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    /// The string is neither `HH:MM` nor `HH:MM:SS`.
    #[error("invalid time '{0}' (expected HH:MM)")]
    InvalidTime(String),
}

/// Formats a date in the wire representation.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a wire date.
///
/// # Errors
///
/// Returns [`WireError::InvalidDate`] if `raw` is not a calendar date or an
/// RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Result<NaiveDate, WireError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| WireError::InvalidDate(raw.to_string()))
}

/// Formats a time in the wire representation (minute precision).
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parses a wire time.
///
/// # Errors
///
/// Returns [`WireError::InvalidTime`] if `raw` is not `HH:MM` or `HH:MM:SS`.
pub fn parse_time(raw: &str) -> Result<NaiveTime, WireError> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, TIME_FORMAT_WITH_SECONDS))
        .map_err(|_| WireError::InvalidTime(raw.to_string()))
}

/// Serde adapters for [`NaiveDate`] fields.
pub mod date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes a date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    /// Deserializes a date from a wire string.
    ///
    /// # Errors
    ///
    /// Fails if the string is not a valid wire date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }

    /// Adapters for `Option<NaiveDate>`; `null` and `""` both mean absent.
    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        /// Serializes an optional date, `None` as `null`.
        ///
        /// # Errors
        ///
        /// Propagates serializer errors.
        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional date.
        ///
        /// # Errors
        ///
        /// Fails if a non-empty string is not a valid wire date.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| crate::wire::parse_date(&raw))
                .transpose()
                .map_err(serde::de::Error::custom)
        }
    }

    /// Adapters for patch fields: absent leaves the value alone, `null`
    /// clears it. Pair with `#[serde(default, skip_serializing_if = "Option::is_none")]`.
    pub mod nullable {
        use chrono::NaiveDate;
        use serde::{Deserializer, Serializer};

        /// Serializes `Some(None)` as `null` and `Some(Some(d))` as a date.
        ///
        /// # Errors
        ///
        /// Propagates serializer errors.
        #[allow(clippy::ref_option, clippy::option_option)]
        pub fn serialize<S: Serializer>(
            date: &Option<Option<NaiveDate>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(inner) => super::option::serialize(inner, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes a present field; `null` becomes `Some(None)`.
        ///
        /// # Errors
        ///
        /// Fails if a non-empty string is not a valid wire date.
        #[allow(clippy::option_option)]
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Option<NaiveDate>>, D::Error> {
            super::option::deserialize(deserializer).map(Some)
        }
    }
}

/// Serde adapters for [`NaiveTime`] fields.
pub mod time {
    /// Adapters for `Option<NaiveTime>`; `null` and `""` both mean absent.
    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        /// Serializes an optional time as `HH:MM`, `None` as `null`.
        ///
        /// # Errors
        ///
        /// Propagates serializer errors.
        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(value) => serializer.serialize_str(&crate::wire::format_time(*value)),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional time.
        ///
        /// # Errors
        ///
        /// Fails if a non-empty string is not a valid wire time.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| crate::wire::parse_time(&raw))
                .transpose()
                .map_err(serde::de::Error::custom)
        }
    }

    /// Patch-field adapters, see [`crate::wire::date::nullable`].
    pub mod nullable {
        use chrono::NaiveTime;
        use serde::{Deserializer, Serializer};

        /// Serializes `Some(None)` as `null` and `Some(Some(t))` as `HH:MM`.
        ///
        /// # Errors
        ///
        /// Propagates serializer errors.
        #[allow(clippy::ref_option, clippy::option_option)]
        pub fn serialize<S: Serializer>(
            time: &Option<Option<NaiveTime>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(inner) => super::option::serialize(inner, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes a present field; `null` becomes `Some(None)`.
        ///
        /// # Errors
        ///
        /// Fails if a non-empty string is not a valid wire time.
        #[allow(clippy::option_option)]
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Option<NaiveTime>>, D::Error> {
            super::option::deserialize(deserializer).map(Some)
        }
    }
}
