//! Author model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Namespace prefix carried by author keys in the dumps
pub const AUTHOR_KEY_PREFIX: &str = "/authors/";

/// Canonical author record, keyed by its bare Open Library id (`OL123A`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: String,
    pub name: String,
    /// Empty when the dump has no `personal_name`
    pub personal_name: String,
}

/// Strip the `/authors/` namespace from a key (no-op when absent)
pub fn author_id_from_key(key: &str) -> String {
    key.replace(AUTHOR_KEY_PREFIX, "")
}
