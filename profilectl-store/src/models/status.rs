//! Availability status stored as text
//!
//! The column is free text with `active` as its default. The well-known
//! values get their own variants; anything else is carried verbatim so
//! rows written by other services still decode and round-trip.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};

use crate::error::ValidationError;

/// Availability shown on a profile
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AvailabilityStatus {
    #[default]
    Active,
    Away,
    Busy,
    Offline,
    /// Stored value outside the well-known set
    Other(String),
}

impl AvailabilityStatus {
    pub const KNOWN: [AvailabilityStatus; 4] =
        [Self::Active, Self::Away, Self::Busy, Self::Offline];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Away => "away",
            Self::Busy => "busy",
            Self::Offline => "offline",
            Self::Other(value) => value,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Exact match against the stored text; no normalization.
    fn from_stored(value: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|status| status.as_str() == value)
            .unwrap_or_else(|| Self::Other(value.to_owned()))
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AvailabilityStatus {
    fn from(value: String) -> Self {
        Self::from_stored(&value)
    }
}

impl From<AvailabilityStatus> for String {
    fn from(status: AvailabilityStatus) -> Self {
        match status {
            AvailabilityStatus::Other(value) => value,
            known => known.as_str().to_owned(),
        }
    }
}

/// Lenient parsing for typed input: well-known names match case-insensitively
/// after trimming, other text is kept as given.
impl FromStr for AvailabilityStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::BlankStatus);
        }

        Ok(Self::KNOWN
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Self::Other(trimmed.to_owned())))
    }
}

impl sqlx::Type<Postgres> for AvailabilityStatus {
    fn type_info() -> PgTypeInfo {
        <str as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <str as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, Postgres> for AvailabilityStatus {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let text = <&str as sqlx::Decode<Postgres>>::decode(value)?;
        Ok(Self::from_stored(text))
    }
}

impl sqlx::Encode<'_, Postgres> for AvailabilityStatus {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <&str as sqlx::Encode<Postgres>>::encode(self.as_str(), buf)
    }
}
