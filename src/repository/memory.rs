//! In-process catalog store, used for dry runs and tests

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AuthorLookup, CatalogStore};
use crate::{
    error::AppResult,
    models::{Author, Book},
};

#[derive(Default)]
pub struct MemoryRepository {
    authors: RwLock<HashMap<String, Author>>,
    books: RwLock<HashMap<String, Book>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn author_count(&self) -> usize {
        self.authors.read().await.len()
    }

    pub async fn book_count(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn get_book(&self, id: &str) -> Option<Book> {
        self.books.read().await.get(id).cloned()
    }
}

#[async_trait]
impl AuthorLookup for MemoryRepository {
    async fn get_author_by_id(&self, id: &str) -> AppResult<Option<Author>> {
        Ok(self.authors.read().await.get(id).cloned())
    }
}

#[async_trait]
impl CatalogStore for MemoryRepository {
    async fn upsert_author(&self, author: &Author) -> AppResult<()> {
        self.authors
            .write()
            .await
            .insert(author.id.clone(), author.clone());
        Ok(())
    }

    async fn upsert_book(&self, book: &Book) -> AppResult<()> {
        self.books.write().await.insert(book.id.clone(), book.clone());
        Ok(())
    }

    fn as_lookup(&self) -> &dyn AuthorLookup {
        self
    }
}
