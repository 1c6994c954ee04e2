use crate::form::{self, BookForm, MAX_AUTHOR_CHARS, MAX_IMAGE_BYTES, MAX_TITLE_CHARS};
use crate::messages;
use crate::notify::{Confirmer, Notifier};
use crate::transport::{SubmitOutcome, SubmitPayload, Transport};

/// Drives the add-book form: field state, local validation, submission,
/// and response-to-notification mapping.
pub struct FormController<T, N, C> {
    form: BookForm,
    transport: T,
    notifier: N,
    confirmer: C,
    open: bool,
}

impl<T, N, C> FormController<T, N, C>
where
    T: Transport,
    N: Notifier,
    C: Confirmer,
{
    pub fn new(transport: T, notifier: N, confirmer: C) -> Self {
        Self {
            form: BookForm::new(),
            transport,
            notifier,
            confirmer,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookForm {
        &mut self.form
    }

    pub fn open_form(&mut self) {
        self.open = true;
    }

    /// Closing by any path (cancel, outside click, success) resets every
    /// field before the form can be reopened.
    pub fn close_form(&mut self) {
        self.form.reset();
        self.open = false;
    }

    /// React to a change on the file input. An empty selection clears the
    /// preview; an oversized file is rejected and also clears it.
    pub fn attach_image(&mut self, name: &str, bytes: Vec<u8>) {
        if bytes.is_empty() {
            self.form.clear_image();
            return;
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            self.form.clear_image();
            self.notifier.notify(messages::IMAGE_TOO_LARGE);
            return;
        }
        self.form.set_image(name, bytes);
    }

    pub fn clear_image(&mut self) {
        self.form.clear_image();
    }

    /// Submission intent: run local validation, confirm, send, and map the
    /// result to a notification. Validation failures never reach the wire.
    pub async fn submit(&mut self) {
        if let Some(message) = self.local_validation_message() {
            self.notifier.notify(message);
            return;
        }

        if !self.confirmer.confirm(messages::CONFIRM_ADD_BOOK) {
            self.close_form();
            return;
        }

        let payload = self.build_payload();

        match self.transport.submit(&payload).await {
            Ok(SubmitOutcome::Created { .. }) => {
                self.notifier.notify(messages::BOOK_ADDED);
                self.close_form();
            }
            Ok(SubmitOutcome::Rejected { code }) => {
                let message = match code.as_deref() {
                    Some("title_exists") => messages::TITLE_EXISTS,
                    Some("isbn_exists") => messages::ISBN_EXISTS,
                    Some("isbn_invalid") => messages::ISBN_INVALID,
                    // Unknown or missing codes fall back to the generic
                    // failure message.
                    _ => messages::ADD_FAILED,
                };
                self.notifier.notify(message);
            }
            Err(_) => {
                self.notifier.notify(messages::NETWORK_ERROR);
            }
        }
    }

    fn local_validation_message(&self) -> Option<&'static str> {
        let form = &self.form;
        let genre_missing = form
            .genre
            .as_deref()
            .map_or(true, |genre| genre.trim().is_empty());

        if form.title.trim().is_empty()
            || form.author.trim().is_empty()
            || form.isbn.trim().is_empty()
            || genre_missing
            || form.copies.trim().is_empty()
            || form.image().is_none()
        {
            return Some(messages::ALL_FIELDS_REQUIRED);
        }

        if form.title.trim().chars().count() > MAX_TITLE_CHARS {
            return Some(messages::TITLE_TOO_LONG);
        }
        if form.author.trim().chars().count() > MAX_AUTHOR_CHARS {
            return Some(messages::AUTHOR_TOO_LONG);
        }
        if !form::is_valid_isbn(form.isbn.trim()) {
            return Some(messages::ISBN_INVALID);
        }

        None
    }

    fn build_payload(&self) -> SubmitPayload {
        let image = self.form.image().expect("validated form holds an image");
        SubmitPayload {
            title: self.form.title.trim().to_string(),
            author: self.form.author.trim().to_string(),
            isbn: self.form.isbn.trim().to_string(),
            genre: self.form.genre.clone().unwrap_or_default(),
            available_copies: self.form.copies.trim().to_string(),
            image_name: image.name.clone(),
            image_bytes: image.bytes.clone(),
        }
    }
}
