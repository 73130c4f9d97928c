use tokio::sync::RwLock;

mod book;

pub use book::{seed_books, Book};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Book with id {id} not found")]
    NotFound { id: String },
    #[error("Book with id {id} is not available")]
    Unavailable { id: String, quantity: i64 },
}

/// In-memory book store.
///
/// Books keep their insertion order and are never removed. Every operation
/// holds the lock for its whole lookup and update, so concurrent checkouts
/// of the same book can never oversell it.
#[derive(Debug, Default)]
pub struct Inventory {
    books: RwLock<Vec<Book>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    pub fn seeded() -> Self {
        Self::with_books(seed_books())
    }

    #[tracing::instrument(skip_all)]
    pub async fn list(&self) -> Vec<Book> {
        let books = self.books.read().await;

        tracing::trace!(count = books.len(), "Listing books");

        books.clone()
    }

    /// Returns the first book with exactly this id.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Book, InventoryError> {
        let books = self.books.read().await;

        find(&books, id).cloned()
    }

    /// Appends the book. Ids are not checked for uniqueness.
    #[tracing::instrument(skip_all, fields(id = %book.id))]
    pub async fn create(&self, book: Book) -> Book {
        let mut books = self.books.write().await;

        if books.iter().any(|existing| existing.id == book.id) {
            tracing::debug!("A book with this id already exists");
        }

        books.push(book.clone());

        tracing::debug!(count = books.len(), "Book created");

        book
    }

    #[tracing::instrument(skip(self))]
    pub async fn checkout(&self, id: &str) -> Result<Book, InventoryError> {
        let mut books = self.books.write().await;
        let book = find_mut(&mut books, id)?;

        if !book.is_available() {
            tracing::debug!(quantity = book.quantity, "Book not available");

            return Err(InventoryError::Unavailable {
                id: id.to_string(),
                quantity: book.quantity,
            });
        }

        book.quantity -= 1;

        tracing::debug!(quantity = book.quantity, "Book checked out");

        Ok(book.clone())
    }

    #[tracing::instrument(skip(self))]
    pub async fn return_book(&self, id: &str) -> Result<Book, InventoryError> {
        let mut books = self.books.write().await;
        let book = find_mut(&mut books, id)?;

        book.quantity = book.quantity.saturating_add(1);

        tracing::debug!(quantity = book.quantity, "Book returned");

        Ok(book.clone())
    }
}

fn find<'a>(books: &'a [Book], id: &str) -> Result<&'a Book, InventoryError> {
    books
        .iter()
        .find(|book| book.id == id)
        .ok_or_else(|| not_found(id))
}

fn find_mut<'a>(books: &'a mut [Book], id: &str) -> Result<&'a mut Book, InventoryError> {
    books
        .iter_mut()
        .find(|book| book.id == id)
        .ok_or_else(|| not_found(id))
}

fn not_found(id: &str) -> InventoryError {
    tracing::debug!(id, "Book not found");

    InventoryError::NotFound { id: id.to_string() }
}
