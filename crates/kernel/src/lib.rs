pub mod context;
pub mod module;
pub mod registry;
pub mod settings;

pub use context::AppContext;
pub use module::{Migration, Module};
pub use registry::ModuleRegistry;
