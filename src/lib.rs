pub mod client;
pub mod config;
pub mod error;
pub mod generate;
pub mod generation;
pub mod prompt;
pub mod response;
pub mod server;
