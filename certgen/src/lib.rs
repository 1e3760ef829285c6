pub mod config;
pub mod duration_parser;
pub mod list_parser;
