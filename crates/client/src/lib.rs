//! Client-side form controller for the BookTrack add-book workflow.
//!
//! The controller mirrors the browser form: it holds field state, runs the
//! local validation pass, and maps server responses to the user-facing
//! notification strings. Dialogs and the network are behind the [`Notifier`],
//! [`Confirmer`], and [`Transport`] traits so the workflow is testable
//! without a browser or a running server.

pub mod controller;
pub mod form;
pub mod messages;
pub mod notify;
pub mod transport;

pub use controller::FormController;
pub use form::{BookForm, ImagePreview};
pub use notify::{Confirmer, Notifier};
pub use transport::{HttpTransport, SubmitOutcome, SubmitPayload, Transport, TransportError};
