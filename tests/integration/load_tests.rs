//! Two-pass load against the in-memory store

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use openlibrary_loader::{
    models::PassOutcome,
    repository::{AuthorLookup, MemoryRepository},
    services::LoaderService,
};
use tempfile::NamedTempFile;

const JANE: &str = "/type/author\t/authors/OL1A\t1\t2008-04-01T03:28:50.625462\t{\"key\":\"/authors/OL1A\",\"name\":\"Jane Doe\"}";
const SAMPLE: &str = "/type/work\t/works/OL1W\t2\t2009-12-11T01:57:19.964652\t{\"key\":\"/works/OL1W\",\"title\":\"Sample\",\"authors\":[{\"author\":{\"key\":\"/authors/OL1A\"}}]}";

fn dump(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create dump file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write dump line");
    }
    file.flush().expect("Failed to flush dump file");
    file
}

fn loader(store: &Arc<MemoryRepository>) -> LoaderService {
    LoaderService::new(store.clone())
}

#[tokio::test]
async fn test_sample_scenario() {
    let store = Arc::new(MemoryRepository::new());
    let authors = dump(&[JANE]);
    let works = dump(&[SAMPLE]);

    let report = loader(&store).run(authors.path(), works.path()).await;

    assert_eq!(report.authors.loaded, 1);
    assert_eq!(report.works.loaded, 1);
    assert_eq!(report.total_skipped(), 0);

    let jane = store.get_author_by_id("OL1A").await.unwrap().unwrap();
    assert_eq!(jane.name, "Jane Doe");
    assert_eq!(jane.personal_name, "");

    let book = store.get_book("OL1W").await.unwrap();
    assert_eq!(book.name, "Sample");
    assert_eq!(book.author_ids, vec!["OL1A"]);
    assert_eq!(book.author_names, vec!["Jane Doe"]);
    assert!(book.cover_ids.is_empty());
    assert!(book.description.is_none());
    assert!(book.published_date.is_none());
}

#[tokio::test]
async fn test_same_author_twice_is_one_record() {
    let store = Arc::new(MemoryRepository::new());
    let authors = dump(&[JANE, JANE]);

    let report = loader(&store).load_authors(authors.path()).await;

    assert_eq!(report.loaded, 2);
    assert_eq!(store.author_count().await, 1);
}

#[tokio::test]
async fn test_work_before_author_then_replayed() {
    let store = Arc::new(MemoryRepository::new());
    let loader = loader(&store);
    let works = dump(&[SAMPLE]);

    let first = loader.load_works(works.path()).await;
    assert_eq!(first.loaded, 0);
    assert_eq!(first.skipped_by_kind["unresolved_author_reference"], 1);
    assert_eq!(store.book_count().await, 0);

    loader.load_authors(dump(&[JANE]).path()).await;

    let replay = loader.load_works(works.path()).await;
    assert_eq!(replay.loaded, 1);
    assert_eq!(store.get_book("OL1W").await.unwrap().author_names, vec!["Jane Doe"]);
}

#[tokio::test]
async fn test_author_defined_late_in_dump_is_still_resolved() {
    let store = Arc::new(MemoryRepository::new());
    let authors = dump(&[
        "x\t{\"key\":\"/authors/OL2A\",\"name\":\"John Roe\"}",
        JANE,
    ]);
    let works = dump(&[
        "x\t{\"key\":\"/works/OL2W\",\"title\":\"Duo\",\"authors\":[{\"author\":{\"key\":\"/authors/OL1A\"}},{\"author\":{\"key\":\"/authors/OL2A\"}}]}",
    ]);

    let report = loader(&store).run(authors.path(), works.path()).await;

    assert_eq!(report.works.loaded, 1);
    let book = store.get_book("OL2W").await.unwrap();
    assert_eq!(book.author_ids, vec!["OL1A", "OL2A"]);
    assert_eq!(book.author_names, vec!["Jane Doe", "John Roe"]);
}

#[tokio::test]
async fn test_bad_lines_are_skipped_and_counted() {
    let store = Arc::new(MemoryRepository::new());
    let authors = dump(&[
        JANE,
        "",
        "x\t{\"key\":\"/authors/OL3A\"}",
        "x\t{broken",
        "x\t{\"key\":\"/authors/OL4A\",}",
    ]);
    let works = dump(&[
        SAMPLE,
        "no json at all",
        "x\t{\"key\":\"/works/OL3W\",\"title\":\"Ghost\",\"authors\":[{\"author\":{\"key\":\"/authors/OL404A\"}}]}",
        "x\t{\"key\":\"/works/OL4W\",\"title\":\"Odd date\",\"created\":{\"value\":\"sometime\"}}",
    ]);

    let report = loader(&store).run(authors.path(), works.path()).await;

    assert_eq!(report.authors.lines_read, 5);
    assert_eq!(report.authors.loaded, 1);
    assert_eq!(report.authors.skipped_by_kind["malformed_line"], 1);
    assert_eq!(report.authors.skipped_by_kind["required_field_missing"], 1);
    assert_eq!(report.authors.skipped_by_kind["malformed_json"], 2);

    assert_eq!(report.works.lines_read, 4);
    assert_eq!(report.works.loaded, 1);
    assert_eq!(report.works.skipped_by_kind["malformed_line"], 1);
    assert_eq!(report.works.skipped_by_kind["unresolved_author_reference"], 1);
    assert_eq!(report.works.skipped_by_kind["invalid_field"], 1);

    assert_eq!(store.author_count().await, 1);
    assert_eq!(store.book_count().await, 1);
}

#[tokio::test]
async fn test_missing_author_dump_still_runs_work_pass() {
    let store = Arc::new(MemoryRepository::new());
    let works = dump(&[
        SAMPLE,
        "x\t{\"key\":\"/works/OL5W\",\"title\":\"Anonymous\"}",
    ]);

    let report = loader(&store)
        .run(Path::new("/nonexistent/ol_dump_authors.txt"), works.path())
        .await;

    assert!(matches!(report.authors.outcome, PassOutcome::Aborted(_)));
    assert!(report.works.is_completed());
    assert_eq!(report.works.loaded, 1);
    assert_eq!(report.works.skipped, 1);
    assert!(store.get_book("OL5W").await.is_some());
}

#[tokio::test]
async fn test_ids_never_carry_namespace() {
    let store = Arc::new(MemoryRepository::new());
    let authors = dump(&[JANE, "x\t{\"key\":\"OL7A\",\"name\":\"Bare Key\"}"]);
    let works = dump(&[
        SAMPLE,
        "x\t{\"key\":\"/works/OL7W\",\"title\":\"Covers\",\"covers\":[1, 2, 3],\"authors\":[{\"author\":{\"key\":\"/authors/OL7A\"}}]}",
    ]);

    loader(&store).run(authors.path(), works.path()).await;

    for id in ["OL1A", "OL7A"] {
        let author = store.get_author_by_id(id).await.unwrap().unwrap();
        assert!(!author.id.contains("/authors/"));
    }
    for id in ["OL1W", "OL7W"] {
        let book = store.get_book(id).await.unwrap();
        assert!(!book.id.contains("/works/"));
        assert_eq!(book.author_ids.len(), book.author_names.len());
    }
    assert_eq!(store.get_book("OL7W").await.unwrap().cover_ids, vec!["1", "2", "3"]);
}
