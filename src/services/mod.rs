//! Loader services

pub mod loader;

pub use loader::{open_dump, LoaderService};
