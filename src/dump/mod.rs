//! Open Library dump parsing and translation
//!
//! This module isolates the JSON payload of dump lines and translates author
//! and work records into the catalog models.

pub mod parser;
pub mod translator;

pub use parser::{extract_payload, parse_line, RawRecord};
pub use translator::{translate_author, translate_work};
