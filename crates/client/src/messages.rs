//! User-facing notification strings. These are part of the observable
//! contract of the form and must not be reworded.

pub const ALL_FIELDS_REQUIRED: &str =
    "All fields are required. Please fill in the required fields.";
pub const TITLE_TOO_LONG: &str = "Title should not exceed 100 characters.";
pub const AUTHOR_TOO_LONG: &str = "Author's name should not exceed 150 characters.";
pub const ISBN_INVALID: &str = "Please enter a valid ISBN number.";
pub const IMAGE_TOO_LARGE: &str = "The image file size should not exceed 16 MB.";
pub const BOOK_ADDED: &str = "Book added successfully!";
pub const TITLE_EXISTS: &str = "The title already exists. Please use a unique title.";
pub const ISBN_EXISTS: &str = "The ISBN already exists. Please use a unique ISBN.";
pub const ADD_FAILED: &str = "Failed to add book.";
pub const NETWORK_ERROR: &str = "An error occurred while adding the book.";
pub const NO_IMAGE_SELECTED: &str = "No Image Selected";
pub const CONFIRM_ADD_BOOK: &str = "Are you sure you want to add this book?";
