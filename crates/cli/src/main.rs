use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use booktrack_client::notify::{AlwaysConfirm, StdoutNotifier};
use booktrack_client::{FormController, HttpTransport};

/// Submit a book to a running BookTrack server.
#[derive(Debug, Parser)]
#[command(name = "booktrack-cli")]
struct Cli {
    /// Full URL of the add-book endpoint
    #[arg(long, default_value = "http://localhost:5500/addBook")]
    endpoint: String,

    #[arg(long)]
    title: String,

    #[arg(long)]
    author: String,

    /// 13-digit ISBN
    #[arg(long)]
    isbn: String,

    /// One of: Fiction, Non-Fiction, Biography, Drama, Science Fiction
    #[arg(long)]
    genre: String,

    #[arg(long)]
    copies: String,

    /// Path to the cover image (at most 16 MB)
    #[arg(long)]
    image: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();

    let cli = Cli::parse();

    let image_bytes = std::fs::read(&cli.image)
        .with_context(|| format!("failed to read image '{}'", cli.image.display()))?;
    let image_name = cli
        .image
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image")
        .to_string();

    let mut controller =
        FormController::new(HttpTransport::new(cli.endpoint), StdoutNotifier, AlwaysConfirm);

    controller.open_form();
    {
        let form = controller.form_mut();
        form.title = cli.title;
        form.author = cli.author;
        form.isbn = cli.isbn;
        form.genre = Some(cli.genre);
        form.copies = cli.copies;
    }
    controller.attach_image(&image_name, image_bytes);

    controller.submit().await;

    Ok(())
}
