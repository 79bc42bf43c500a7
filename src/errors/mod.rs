pub mod types;

pub use types::ParserError;
