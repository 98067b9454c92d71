pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod observability;
pub mod pipeline;
pub mod types;

// Layered boundaries: use cases and ports, and their adapters
pub mod app;
pub mod infra;

pub use error::{BuilderError, Result};
pub use pipeline::processing::normalize::{clean, normalize};
pub use types::Tree;
