//! Document ingestion: format detection and text extraction

pub mod decode;
pub mod dispatcher;
pub mod parser;

#[cfg(test)]
pub(crate) mod fixtures;

pub use decode::decode_text;
pub use dispatcher::ExtractionDispatcher;
pub use parser::Extractor;
