use crate::error::Error;
use chrono::{DateTime, SecondsFormat, Utc};
use derive_more::From;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

///
/// Timestamp
/// (UTC, in microseconds since the unix epoch)
///

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    From,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[repr(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);
    pub const MIN: Self = Self(i64::MIN);
    pub const MAX: Self = Self(i64::MAX);

    #[must_use]
    pub const fn from_micros(us: i64) -> Self {
        Self(us)
    }

    /// Construct from milliseconds (saturating at the representable range).
    #[must_use]
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms.saturating_mul(1_000))
    }

    /// Construct from seconds (saturating at the representable range).
    #[must_use]
    pub const fn from_seconds(secs: i64) -> Self {
        Self(secs.saturating_mul(1_000_000))
    }

    pub fn parse_rfc3339(s: &str) -> Result<Self, Error> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| Error::decode(format!("timestamp parse error: {e}")))?;

        Ok(Self(dt.timestamp_micros()))
    }

    /// Integer microseconds first, RFC 3339 second.
    pub fn parse_flexible(s: &str) -> Result<Self, Error> {
        if let Ok(us) = s.parse::<i64>() {
            return Ok(Self(us));
        }

        Self::parse_rfc3339(s)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Calendar view; `None` outside chrono's supported range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_micros(self.0)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_flexible(s)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_micros())
    }
}
