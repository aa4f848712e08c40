//! Book model, the flattened form of an Open Library work

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Namespace prefix carried by work keys in the dumps
pub const WORK_KEY_PREFIX: &str = "/works/";

/// Canonical book record.
///
/// `author_names` is a snapshot taken when the work was loaded and stays
/// positionally aligned with `author_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub cover_ids: Vec<String>,
    pub author_ids: Vec<String>,
    pub author_names: Vec<String>,
}

/// Strip the `/works/` namespace from a key (no-op when absent)
pub fn book_id_from_key(key: &str) -> String {
    key.replace(WORK_KEY_PREFIX, "")
}
