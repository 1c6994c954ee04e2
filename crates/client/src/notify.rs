use std::sync::Arc;

/// User notification sink. The browser implementation was `alert`;
/// here anything that can show a message qualifies.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Yes/no confirmation dialog. The browser implementation was `confirm`.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

impl<C: Confirmer + ?Sized> Confirmer for Arc<C> {
    fn confirm(&self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }
}

/// Prints notifications to stdout; used by the CLI driver.
#[derive(Debug, Default)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, message: &str) {
        println!("{message}");
    }
}

/// Approves every confirmation; used by the CLI driver where the user
/// already expressed intent by running the command.
#[derive(Debug, Default)]
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
