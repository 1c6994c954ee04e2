pub mod models;
pub mod repository;
pub mod routes;

use async_trait::async_trait;
use axum::routing::{get, post};
use axum::Router;

use booktrack_kernel::{AppContext, Migration, Module};

/// Books module: the add-book submission endpoint and catalog listing.
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    // The add-book wire contract predates the module layout: browser
    // clients post to /addBook at the root, not under /api/books.
    fn mount_path(&self) -> String {
        "/".to_string()
    }

    async fn init(&self, ctx: &AppContext) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings().environment,
            assets_dir = %ctx.assets_dir().display(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &AppContext) -> Router {
        Router::new()
            .route("/addBook", post(routes::add_book))
            .route("/books", get(routes::list_books))
            .with_state(ctx.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/addBook": {
                    "post": {
                        "summary": "Add a book to the catalog",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "multipart/form-data": {
                                    "schema": {
                                        "$ref": "#/components/schemas/AddBookForm"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Book created",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/AddBookResponse"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Validation failure or duplicate title/ISBN",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "500": {
                                "description": "Persistence failure",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/books": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "List of books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/Book"
                                            }
                                        }
                                    }
                                }
                            },
                            "500": {
                                "description": "Internal server error",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Unique identifier for the book"
                            },
                            "title": {
                                "type": "string",
                                "description": "Title of the book, unique across the catalog"
                            },
                            "author": {
                                "type": "string",
                                "description": "Author of the book"
                            },
                            "isbn": {
                                "type": "string",
                                "description": "13-digit ISBN, unique across the catalog"
                            },
                            "genre": {
                                "type": "string",
                                "description": "Catalog genre"
                            },
                            "available_copies": {
                                "type": "integer",
                                "description": "Number of copies available"
                            },
                            "image_path": {
                                "type": "string",
                                "description": "Stored cover image asset"
                            },
                            "created_at": {
                                "type": "string",
                                "description": "Creation timestamp"
                            }
                        },
                        "required": ["id", "title", "author", "isbn", "genre", "available_copies", "image_path"]
                    },
                    "AddBookForm": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "maxLength": 100 },
                            "author": { "type": "string", "maxLength": 150 },
                            "isbn": { "type": "string", "pattern": "^\\d{13}$" },
                            "genre": {
                                "type": "string",
                                "enum": ["Fiction", "Non-Fiction", "Biography", "Drama", "Science Fiction"]
                            },
                            "availableCopies": { "type": "string" },
                            "image": { "type": "string", "format": "binary" }
                        },
                        "required": ["title", "author", "isbn", "genre", "availableCopies", "image"]
                    },
                    "AddBookResponse": {
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" },
                            "bookId": { "type": "string" }
                        },
                        "required": ["message", "bookId"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE books (
                    id TEXT PRIMARY KEY,
                    title TEXT NOT NULL,
                    author TEXT NOT NULL,
                    isbn TEXT NOT NULL,
                    genre TEXT NOT NULL,
                    available_copies INTEGER NOT NULL CHECK (available_copies >= 0),
                    image_path TEXT NOT NULL,
                    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
                );
                CREATE UNIQUE INDEX books_title_unique ON books (title);
                CREATE UNIQUE INDEX books_isbn_unique ON books (isbn);
                "#,
        }]
    }

    async fn start(&self, _ctx: &AppContext) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}
