use sqlx::SqlitePool;

use booktrack_http::error::ApiError;

use super::models::{Book, NewBook};

/// Data access for the `books` table.
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn title_exists(&self, title: &str) -> Result<bool, ApiError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE title = ?)")
                .bind(title)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn isbn_exists(&self, isbn: &str) -> Result<bool, ApiError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = ?)")
            .bind(isbn)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Insert a new record. The UNIQUE indexes are the authoritative
    /// uniqueness guard; a violation that raced past the pre-checks is
    /// translated back into the same duplicate error codes.
    pub async fn insert(&self, id: &str, book: &NewBook, image_path: &str) -> Result<(), ApiError> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (id, title, author, isbn, genre, available_copies, image_path)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.genre.as_str())
        .bind(book.available_copies)
        .bind(image_path)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => Err(translate_insert_error(err)),
        }
    }

    pub async fn list(&self) -> Result<Vec<Book>, ApiError> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, isbn, genre, available_copies, image_path, created_at
            FROM books
            ORDER BY created_at, title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }
}

fn translate_insert_error(err: sqlx::Error) -> ApiError {
    if let Some(db_err) = err.as_database_error() {
        let message = db_err.message();
        if message.contains("UNIQUE constraint failed") {
            if message.contains("books.title") {
                return ApiError::TitleExists;
            }
            if message.contains("books.isbn") {
                return ApiError::IsbnExists;
            }
        }
    }
    ApiError::Persistence(anyhow::Error::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::{Genre, ImageUpload};
    use crate::modules::books::BooksModule;
    use booktrack_kernel::Module;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let migrations = BooksModule::new()
            .migrations()
            .into_iter()
            .map(|m| ("books".to_string(), m))
            .collect();
        booktrack_db::run_migrations(&pool, migrations).await.unwrap();
        pool
    }

    fn sample_book(title: &str, isbn: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Valid Author".to_string(),
            isbn: isbn.to_string(),
            genre: Genre::Fiction,
            available_copies: 5,
            image: ImageUpload {
                filename: "cover.jpg".to_string(),
                bytes: vec![0u8; 16],
            },
        }
    }

    #[tokio::test]
    async fn insert_then_lookup_round_trips() {
        let repo = BookRepository::new(test_pool().await);
        let book = sample_book("Dune", "9781234567890");

        repo.insert("id-1", &book, "id-1.jpg").await.unwrap();

        assert!(repo.title_exists("Dune").await.unwrap());
        assert!(repo.isbn_exists("9781234567890").await.unwrap());
        assert!(!repo.title_exists("Other").await.unwrap());

        let books = repo.list().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[0].image_path, "id-1.jpg");
    }

    #[tokio::test]
    async fn duplicate_title_violation_maps_to_title_exists() {
        let repo = BookRepository::new(test_pool().await);
        repo.insert("id-1", &sample_book("Dune", "9781234567890"), "a.jpg")
            .await
            .unwrap();

        let err = repo
            .insert("id-2", &sample_book("Dune", "9999999999999"), "b.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::TitleExists));
    }

    #[tokio::test]
    async fn duplicate_isbn_violation_maps_to_isbn_exists() {
        let repo = BookRepository::new(test_pool().await);
        repo.insert("id-1", &sample_book("Dune", "9781234567890"), "a.jpg")
            .await
            .unwrap();

        let err = repo
            .insert("id-2", &sample_book("Dune Messiah", "9781234567890"), "b.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::IsbnExists));
    }
}
