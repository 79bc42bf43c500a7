pub mod cli;
pub mod engine;
pub mod errors;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod reporting;
pub mod sink;
