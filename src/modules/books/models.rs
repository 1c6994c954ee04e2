use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use sqlx::FromRow;

use booktrack_http::error::ApiError;

/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 100;
/// Longest accepted author name, in characters.
pub const MAX_AUTHOR_CHARS: usize = 150;
/// Largest accepted cover image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 16 * 1024 * 1024;

/// A persisted catalog record.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: String,
    pub available_copies: i64,
    pub image_path: String,
    pub created_at: String,
}

/// Catalog genres offered by the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genre {
    Fiction,
    NonFiction,
    Biography,
    Drama,
    ScienceFiction,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Biography => "Biography",
            Genre::Drama => "Drama",
            Genre::ScienceFiction => "Science Fiction",
        }
    }
}

impl FromStr for Genre {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fiction" => Ok(Genre::Fiction),
            "Non-Fiction" => Ok(Genre::NonFiction),
            "Biography" => Ok(Genre::Biography),
            "Drama" => Ok(Genre::Drama),
            "Science Fiction" => Ok(Genre::ScienceFiction),
            _ => Err(()),
        }
    }
}

/// Image part of a submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// File extension of the uploaded image, if the browser sent one.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
    }
}

/// A submission that has passed server-side validation.
#[derive(Debug)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: Genre,
    pub available_copies: i64,
    pub image: ImageUpload,
}

/// Raw multipart fields as received from the wire, before validation.
#[derive(Debug, Default)]
pub struct Submission {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub available_copies: Option<String>,
    pub image: Option<ImageUpload>,
}

impl Submission {
    /// Re-validate every field server-side. The client performs the same
    /// checks, but it cannot be trusted.
    pub fn validate(self) -> Result<NewBook, ApiError> {
        let title = required_text(self.title, "title")?;
        let author = required_text(self.author, "author")?;
        let isbn = required_text(self.isbn, "isbn")?;
        let genre = required_text(self.genre, "genre")?;
        let copies = required_text(self.available_copies, "availableCopies")?;
        let image = self
            .image
            .filter(|image| !image.bytes.is_empty())
            .ok_or_else(|| ApiError::validation("missing required field 'image'"))?;

        if !is_valid_isbn(&isbn) {
            return Err(ApiError::IsbnInvalid);
        }

        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(ApiError::validation("title exceeds 100 characters"));
        }
        if author.chars().count() > MAX_AUTHOR_CHARS {
            return Err(ApiError::validation("author exceeds 150 characters"));
        }

        let genre = Genre::from_str(&genre)
            .map_err(|_| ApiError::validation(format!("unknown genre '{genre}'")))?;

        let available_copies: i64 = copies
            .parse()
            .map_err(|_| ApiError::validation("availableCopies is not an integer"))?;
        if available_copies < 0 {
            return Err(ApiError::validation("availableCopies is negative"));
        }

        if image.bytes.len() > MAX_IMAGE_BYTES {
            return Err(ApiError::validation("image exceeds 16 MB"));
        }

        Ok(NewBook {
            title,
            author,
            isbn,
            genre,
            available_copies,
            image,
        })
    }
}

fn required_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(ApiError::validation(format!(
                    "missing required field '{field}'"
                )))
            } else {
                Ok(trimmed.to_string())
            }
        }
        None => Err(ApiError::validation(format!(
            "missing required field '{field}'"
        ))),
    }
}

/// An ISBN is accepted only as exactly 13 ASCII digits.
pub fn is_valid_isbn(isbn: &str) -> bool {
    isbn.len() == 13 && isbn.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_submission() -> Submission {
        Submission {
            title: Some("Valid Book Title".to_string()),
            author: Some("Valid Author".to_string()),
            isbn: Some("9781234567890".to_string()),
            genre: Some("Fiction".to_string()),
            available_copies: Some("5".to_string()),
            image: Some(ImageUpload {
                filename: "cover.jpg".to_string(),
                bytes: vec![0u8; 64],
            }),
        }
    }

    #[test]
    fn thirteen_digit_isbn_is_valid() {
        assert!(is_valid_isbn("9781234567890"));
        assert!(!is_valid_isbn("123"));
        assert!(!is_valid_isbn("97812345678901"));
        assert!(!is_valid_isbn("978123456789X"));
        assert!(!is_valid_isbn(""));
    }

    #[test]
    fn valid_submission_passes() {
        let book = valid_submission().validate().unwrap();
        assert_eq!(book.title, "Valid Book Title");
        assert_eq!(book.genre, Genre::Fiction);
        assert_eq!(book.available_copies, 5);
    }

    #[test]
    fn missing_field_is_rejected() {
        let mut submission = valid_submission();
        submission.author = None;
        let err = submission.validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[test]
    fn whitespace_only_field_counts_as_missing() {
        let mut submission = valid_submission();
        submission.title = Some("   ".to_string());
        let err = submission.validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[test]
    fn bad_isbn_maps_to_isbn_invalid() {
        let mut submission = valid_submission();
        submission.isbn = Some("123".to_string());
        let err = submission.validate().unwrap_err();
        assert!(matches!(err, ApiError::IsbnInvalid));
    }

    #[test]
    fn title_at_limit_passes_and_over_limit_fails() {
        let mut submission = valid_submission();
        submission.title = Some("A".repeat(MAX_TITLE_CHARS));
        assert!(submission.validate().is_ok());

        let mut submission = valid_submission();
        submission.title = Some("A".repeat(MAX_TITLE_CHARS + 1));
        assert!(matches!(
            submission.validate().unwrap_err(),
            ApiError::Validation { .. }
        ));
    }

    #[test]
    fn author_over_limit_fails() {
        let mut submission = valid_submission();
        submission.author = Some("A".repeat(MAX_AUTHOR_CHARS + 1));
        assert!(matches!(
            submission.validate().unwrap_err(),
            ApiError::Validation { .. }
        ));
    }

    #[test]
    fn unknown_genre_is_rejected() {
        let mut submission = valid_submission();
        submission.genre = Some("Horror".to_string());
        assert!(matches!(
            submission.validate().unwrap_err(),
            ApiError::Validation { .. }
        ));
    }

    #[test]
    fn negative_copies_is_rejected() {
        let mut submission = valid_submission();
        submission.available_copies = Some("-1".to_string());
        assert!(matches!(
            submission.validate().unwrap_err(),
            ApiError::Validation { .. }
        ));
    }

    #[test]
    fn oversized_image_is_rejected() {
        let mut submission = valid_submission();
        submission.image = Some(ImageUpload {
            filename: "huge.jpg".to_string(),
            bytes: vec![0u8; MAX_IMAGE_BYTES + 1],
        });
        assert!(matches!(
            submission.validate().unwrap_err(),
            ApiError::Validation { .. }
        ));
    }

    #[test]
    fn image_at_exactly_16_mb_passes() {
        let mut submission = valid_submission();
        submission.image = Some(ImageUpload {
            filename: "big.jpg".to_string(),
            bytes: vec![0u8; MAX_IMAGE_BYTES],
        });
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn genre_round_trips_through_str() {
        for genre in [
            Genre::Fiction,
            Genre::NonFiction,
            Genre::Biography,
            Genre::Drama,
            Genre::ScienceFiction,
        ] {
            assert_eq!(Genre::from_str(genre.as_str()), Ok(genre));
        }
    }

    #[test]
    fn image_extension_is_extracted() {
        let image = ImageUpload {
            filename: "cover.jpg".to_string(),
            bytes: vec![],
        };
        assert_eq!(image.extension(), Some("jpg"));

        let image = ImageUpload {
            filename: "cover".to_string(),
            bytes: vec![],
        };
        assert_eq!(image.extension(), None);
    }
}
