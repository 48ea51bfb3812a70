pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod github;
pub mod http;
pub mod openai;
pub mod options;
pub mod select;
pub mod types;
pub mod workflows;

pub use error::{AppError, ErrorKind};
