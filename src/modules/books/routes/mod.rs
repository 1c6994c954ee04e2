use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use booktrack_http::error::ApiError;
use booktrack_kernel::AppContext;

use super::models::{Book, ImageUpload, Submission};
use super::repository::BookRepository;

/// Body of a successful submission response.
#[derive(Debug, Serialize)]
pub struct AddBookResponse {
    pub message: &'static str,
    #[serde(rename = "bookId")]
    pub book_id: String,
}

/// `POST /addBook` — validate, check uniqueness, persist.
pub async fn add_book(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<AddBookResponse>), ApiError> {
    let submission = read_submission(&mut multipart).await?;
    let book = submission.validate()?;

    let repo = BookRepository::new(ctx.pool().clone());

    // The title check runs before the ISBN check; clients depend on the order.
    if repo.title_exists(&book.title).await? {
        return Err(ApiError::TitleExists);
    }
    if repo.isbn_exists(&book.isbn).await? {
        return Err(ApiError::IsbnExists);
    }

    let id = Uuid::new_v4().to_string();
    let image_name = match book.image.extension() {
        Some(ext) => format!("{id}.{ext}"),
        None => id.clone(),
    };

    let image_path = ctx.assets_dir().join(&image_name);
    tokio::fs::create_dir_all(ctx.assets_dir())
        .await
        .map_err(|err| ApiError::Persistence(err.into()))?;
    tokio::fs::write(&image_path, &book.image.bytes)
        .await
        .map_err(|err| ApiError::Persistence(err.into()))?;

    if let Err(err) = repo.insert(&id, &book, &image_name).await {
        // A record is never partially persisted: remove the asset when
        // the insert is rejected.
        let _ = tokio::fs::remove_file(&image_path).await;
        return Err(err);
    }

    tracing::info!(book_id = %id, title = %book.title, "book added");

    Ok((
        StatusCode::CREATED,
        Json(AddBookResponse {
            message: "Book added successfully!",
            book_id: id,
        }),
    ))
}

/// `GET /books` — list persisted records.
pub async fn list_books(State(ctx): State<AppContext>) -> Result<Json<Vec<Book>>, ApiError> {
    let repo = BookRepository::new(ctx.pool().clone());
    let books = repo.list().await?;
    Ok(Json(books))
}

async fn read_submission(multipart: &mut Multipart) -> Result<Submission, ApiError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::validation(format!("malformed multipart body: {err}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "title" => submission.title = Some(text_part(field).await?),
            "author" => submission.author = Some(text_part(field).await?),
            "isbn" => submission.isbn = Some(text_part(field).await?),
            "genre" => submission.genre = Some(text_part(field).await?),
            "availableCopies" => submission.available_copies = Some(text_part(field).await?),
            "image" => {
                let filename = field.file_name().unwrap_or("image").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| ApiError::validation(format!("unreadable image part: {err}")))?;
                submission.image = Some(ImageUpload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(submission)
}

async fn text_part(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|err| ApiError::validation(format!("unreadable text part: {err}")))
}
