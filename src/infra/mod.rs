// Adapters implementing the ports in `app::ports`.

pub mod gemmi_parser;
pub mod http_client;
pub mod json_parser;
pub mod output_adapter;

pub use gemmi_parser::GemmiCliParser;
pub use http_client::ReqwestHttp;
pub use json_parser::JsonDocumentParser;
pub use output_adapter::JsonFileOutput;
