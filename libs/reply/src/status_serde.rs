//! `StatusCode` as a plain number in config and manifest files.
//!
//! Use with `#[serde(with = "crate::status_serde")]`, or the [`optional`]
//! variant for fields where `0` means unset.

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serializer};

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
pub(crate) fn serialize<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    from_code(u16::deserialize(deserializer)?)
}

fn from_code<E: serde::de::Error>(code: u16) -> Result<StatusCode, E> {
    StatusCode::from_u16(code).map_err(E::custom)
}

/// `Option<StatusCode>` written as `0` when unset.
pub(crate) mod optional {
    use super::{Deserialize, Deserializer, Serializer, StatusCode, from_code};

    #[allow(clippy::ref_option)] // serde requires &T signature
    pub(crate) fn serialize<S>(status: &Option<StatusCode>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(status.map_or(0, |s| s.as_u16()))
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<StatusCode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u16::deserialize(deserializer)? {
            0 => Ok(None),
            code => from_code(code).map(Some),
        }
    }
}
