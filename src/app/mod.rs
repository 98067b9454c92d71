pub mod build_use_case;
pub mod download;
pub mod fetch_use_case;
pub mod ports;

pub use build_use_case::{BuildDictionaryUseCase, ProcessedTree};
pub use fetch_use_case::FetchAssetsUseCase;
