//! Book catalog store
//!
//! Holds every book record in memory, in insertion order, behind a single lock.
//! Writers take the lock exclusively, so mutations never interleave with each
//! other or with a listing in progress.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use rand::Rng;

use crate::{
    error::CatalogError,
    models::book::{Book, BookFilter, BookPayload, BookSummary},
};

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";
const ID_LENGTH: usize = 16;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Clone, Default)]
pub struct CatalogService {
    books: Arc<RwLock<Vec<Book>>>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CatalogResult<RwLockReadGuard<'_, Vec<Book>>> {
        self.books.read().map_err(|_| CatalogError::LockPoisoned("read"))
    }

    fn write(&self) -> CatalogResult<RwLockWriteGuard<'_, Vec<Book>>> {
        self.books.write().map_err(|_| CatalogError::LockPoisoned("write"))
    }

    /// Add a new book and return its generated id
    pub fn create(&self, payload: BookPayload) -> CatalogResult<String> {
        let name = validate(&payload)?;

        let mut books = self.write()?;
        let id = loop {
            let candidate = generate_id();
            if !books.iter().any(|book| book.id == candidate) {
                break candidate;
            }
        };

        let now = Utc::now();
        books.push(Book {
            id: id.clone(),
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished: payload.page_count == payload.read_page,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        });

        if !books.iter().any(|book| book.id == id) {
            return Err(CatalogError::PersistFault(id));
        }

        tracing::info!("Catalog create: book id={} ({} books)", id, books.len());
        Ok(id)
    }

    /// List summaries of the books matching every filter, in insertion order
    pub fn query(&self, filter: &BookFilter) -> CatalogResult<Vec<BookSummary>> {
        let books = self.read()?;
        let summaries: Vec<BookSummary> = books
            .iter()
            .filter(|book| filter.matches(book))
            .map(BookSummary::from)
            .collect();
        tracing::debug!(
            "Catalog query {:?}: {} of {} books",
            filter,
            summaries.len(),
            books.len()
        );
        Ok(summaries)
    }

    /// Get the full record of a book
    pub fn get_by_id(&self, id: &str) -> CatalogResult<Book> {
        self.read()?
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    /// Replace every field of a book except its id and insertion time.
    ///
    /// The payload is validated before the id is looked up, so an invalid payload
    /// is reported even for an unknown id.
    pub fn update_by_id(&self, id: &str, payload: BookPayload) -> CatalogResult<()> {
        let name = validate(&payload)?;

        let mut books = self.write()?;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(CatalogError::NotFound)?;
        book.apply(payload, name, Utc::now());

        tracing::info!("Catalog update: book id={}", id);
        Ok(())
    }

    /// Remove a book
    pub fn delete_by_id(&self, id: &str) -> CatalogResult<()> {
        let mut books = self.write()?;
        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or(CatalogError::NotFound)?;
        books.remove(index);

        tracing::info!("Catalog delete: book id={} ({} books left)", id, books.len());
        Ok(())
    }

    /// Number of stored books
    pub fn count(&self) -> CatalogResult<usize> {
        Ok(self.read()?.len())
    }
}

/// Check the payload and return the book name it carries
fn validate(payload: &BookPayload) -> CatalogResult<String> {
    let name = match payload.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            tracing::warn!("Catalog: rejected payload without name");
            return Err(CatalogError::MissingName);
        }
    };

    if payload.read_page > payload.page_count {
        tracing::warn!(
            "Catalog: rejected readPage={} > pageCount={}",
            payload.read_page,
            payload.page_count
        );
        return Err(CatalogError::PageOverflow);
    }

    Ok(name)
}

fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
