//! Record model shared by the storage layer and the HTTP API.

use chrono::{DateTime, Utc};
use rand::RngExt;
use serde::{Deserialize, Serialize};

/// Tag placed in front of every generated public ID.
pub const PUBLIC_ID_PREFIX: &str = "ALON";

/// Number of random characters after the prefix.
pub const PUBLIC_ID_SUFFIX_LEN: usize = 6;

const SUFFIX_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A persisted receipt record.
///
/// Serialises with camelCase keys. Optional plan/client fields are always
/// present in the JSON output, as `null` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,
    pub public_id: String,
    pub fill: String,
    pub info: String,
    pub ram: Option<String>,
    pub cpu: Option<String>,
    pub disk: Option<String>,
    pub price: Option<String>,
    pub discord_id: Option<String>,
    pub discord_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated creation input. Server-owned fields (`id`, `publicId`,
/// `createdAt`) are not part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecipe {
    pub fill: String,
    pub info: String,
    pub ram: Option<String>,
    pub cpu: Option<String>,
    pub disk: Option<String>,
    pub price: Option<String>,
    pub discord_id: Option<String>,
    pub discord_name: Option<String>,
}

impl NewRecipe {
    /// Input with only the two required fields set.
    pub fn new(fill: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            info: info.into(),
            ..Self::default()
        }
    }
}

/// Generate a fresh public ID such as `ALON-7QZ0KD`.
pub fn generate_public_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..PUBLIC_ID_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.random_range(0..SUFFIX_CHARSET.len());
            SUFFIX_CHARSET[idx] as char
        })
        .collect();
    format!("{PUBLIC_ID_PREFIX}-{suffix}")
}

/// Returns true if `s` has the `ALON-XXXXXX` shape produced by
/// [`generate_public_id`].
pub fn is_public_id(s: &str) -> bool {
    s.strip_prefix(PUBLIC_ID_PREFIX)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|suffix| {
            suffix.len() == PUBLIC_ID_SUFFIX_LEN
                && suffix
                    .bytes()
                    .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        })
}
