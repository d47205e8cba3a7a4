pub mod api;
pub mod classify;
pub mod config;
pub mod descriptor;
pub mod errors;
pub mod filter;
pub mod guid;
pub mod staging;
pub mod tree;

pub use api::{generate, GenerateError, GenerateOptions};
