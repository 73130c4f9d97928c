use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct Book {
    /// Caller supplied identifier. Not required to be unique.
    #[schema(example = "4")]
    pub id: String,
    #[schema(example = "Dune")]
    pub title: String,
    #[schema(example = "Frank Herbert")]
    pub author: String,
    /// Available copies.
    #[serde(default)]
    #[schema(example = 2)]
    pub quantity: i64,
}

impl Book {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        quantity: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            quantity,
        }
    }

    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }
}

/// The books every freshly started store holds.
pub fn seed_books() -> Vec<Book> {
    vec![
        Book::new("1", "Harry Potter", "J.K. Rowling", 7),
        Book::new("2", "Le Seigneur des Anneaux", "J.R.R. Tolkien", 3),
        Book::new("3", "Le Trône de Fer", "George R.R. Martin", 5),
    ]
}
