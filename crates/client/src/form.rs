use crate::messages;

/// Largest image the form accepts, matching the server-side bound.
pub const MAX_IMAGE_BYTES: usize = 16 * 1024 * 1024;
/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 100;
/// Longest accepted author name, in characters.
pub const MAX_AUTHOR_CHARS: usize = 150;

/// A file chosen through the image input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// What the image-preview area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePreview {
    NoImageSelected,
    Selected { name: String },
}

impl ImagePreview {
    pub fn label(&self) -> &str {
        match self {
            ImagePreview::NoImageSelected => messages::NO_IMAGE_SELECTED,
            ImagePreview::Selected { name } => name,
        }
    }
}

/// Field state of the add-book form.
#[derive(Debug, Clone, Default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: Option<String>,
    pub copies: String,
    image: Option<ImageFile>,
}

impl BookForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_image(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.image = Some(ImageFile {
            name: name.into(),
            bytes,
        });
    }

    /// Clearing the file input drops the selection and the preview.
    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn image(&self) -> Option<&ImageFile> {
        self.image.as_ref()
    }

    pub fn preview(&self) -> ImagePreview {
        match &self.image {
            Some(file) => ImagePreview::Selected {
                name: file.name.clone(),
            },
            None => ImagePreview::NoImageSelected,
        }
    }

    /// Return every field to its empty/default state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// An ISBN is accepted only as exactly 13 ASCII digits.
pub fn is_valid_isbn(isbn: &str) -> bool {
    isbn.len() == 13 && isbn.bytes().all(|b| b.is_ascii_digit())
}
