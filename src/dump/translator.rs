//! Dump record to catalog model translators
//!
//! Authors translate on their own. Works need the author store: every author
//! reference is resolved to a display name while the book is built, so the
//! author pass has to be finished first.

use chrono::NaiveDate;
use serde_json::Value;

use super::parser::{
    json_type, nested_str, optional_array, optional_str, required_str, scalar_text, RawRecord,
};
use crate::{
    error::LineError,
    models::{author::author_id_from_key, book::book_id_from_key, Author, Book},
    repository::AuthorLookup,
};

/// Translate an author record
pub fn translate_author(record: &RawRecord) -> Result<Author, LineError> {
    let id = author_id_from_key(required_str(record, "key")?);
    let name = required_str(record, "name")?.to_string();
    let personal_name = optional_str(record, "personal_name")
        .unwrap_or_default()
        .to_string();

    Ok(Author {
        id,
        name,
        personal_name,
    })
}

/// Translate a work record into a book, resolving author names through
/// `authors`. An unknown author fails the whole record.
pub async fn translate_work(
    record: &RawRecord,
    authors: &dyn AuthorLookup,
) -> Result<Book, LineError> {
    let id = book_id_from_key(required_str(record, "key")?);
    let name = required_str(record, "title")?.to_string();
    let description = description(record);
    let published_date = published_date(record)?;
    let cover_ids = cover_ids(record)?;
    let author_ids = author_ids(record)?;

    let mut author_names = Vec::with_capacity(author_ids.len());
    for author_id in &author_ids {
        match authors.get_author_by_id(author_id).await? {
            Some(author) => author_names.push(author.name),
            None => return Err(LineError::UnresolvedAuthorReference(author_id.clone())),
        }
    }

    Ok(Book {
        id,
        name,
        description,
        published_date,
        cover_ids,
        author_ids,
        author_names,
    })
}

/// `{"description": {"type": "/type/text", "value": "..."}}`, older records
/// carry a bare string instead
fn description(record: &RawRecord) -> Option<String> {
    match record.get("description") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Object(_)) => nested_str(record, "description", "value").map(String::from),
        _ => None,
    }
}

/// Date portion of `created.value` (`2009-12-11T01:57:19.964652`)
fn published_date(record: &RawRecord) -> Result<Option<NaiveDate>, LineError> {
    let Some(timestamp) = nested_str(record, "created", "value") else {
        return Ok(None);
    };

    let date = timestamp
        .split_once('T')
        .map_or(timestamp, |(date, _)| date);

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| LineError::invalid("created.value", format!("{timestamp:?}: {e}")))
}

fn cover_ids(record: &RawRecord) -> Result<Vec<String>, LineError> {
    let Some(covers) = optional_array(record, "covers")? else {
        return Ok(Vec::new());
    };

    covers
        .iter()
        .enumerate()
        .map(|(i, cover)| {
            scalar_text(cover).ok_or_else(|| {
                LineError::invalid(
                    &format!("covers[{i}]"),
                    format!("expected a scalar, got {}", json_type(cover)),
                )
            })
        })
        .collect()
}

/// `authors: [{"author": {"key": "/authors/OL1A"}, "type": ...}, ...]`
fn author_ids(record: &RawRecord) -> Result<Vec<String>, LineError> {
    let Some(refs) = optional_array(record, "authors")? else {
        return Ok(Vec::new());
    };

    refs.iter()
        .enumerate()
        .map(|(i, entry)| {
            entry
                .get("author")
                .and_then(|author| author.get("key"))
                .and_then(Value::as_str)
                .map(author_id_from_key)
                .ok_or_else(|| LineError::RequiredFieldMissing(format!("authors[{i}].author.key")))
        })
        .collect()
}
