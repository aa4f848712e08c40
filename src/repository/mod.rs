//! Repository layer: the storage ports and their backends

pub mod authors;
pub mod books;
pub mod memory;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::{Author, Book},
};

pub use memory::MemoryRepository;

/// Read side used while normalizing works: resolve an author id to the
/// record persisted by the author pass.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorLookup: Send + Sync {
    async fn get_author_by_id(&self, id: &str) -> AppResult<Option<Author>>;
}

/// Write side of the catalog. Upserts overwrite the whole record by id.
#[async_trait]
pub trait CatalogStore: AuthorLookup {
    async fn upsert_author(&self, author: &Author) -> AppResult<()>;

    async fn upsert_book(&self, book: &Book) -> AppResult<()>;

    /// Expose the store as a plain lookup for the work normalizer
    fn as_lookup(&self) -> &dyn AuthorLookup;
}

/// Postgres-backed repository holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to the database and apply pending migrations
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;

        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!("Database migrations completed");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl AuthorLookup for Repository {
    async fn get_author_by_id(&self, id: &str) -> AppResult<Option<Author>> {
        self.authors.get_by_id(id).await
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn upsert_author(&self, author: &Author) -> AppResult<()> {
        self.authors.upsert(author).await
    }

    async fn upsert_book(&self, book: &Book) -> AppResult<()> {
        self.books.upsert(book).await
    }

    fn as_lookup(&self) -> &dyn AuthorLookup {
        self
    }
}
