pub mod config;
pub mod content;
pub mod dom;
pub mod engine;
pub mod error;
pub mod net;
pub mod render;
pub mod route;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use engine::Session;
pub use error::{FetchError, LoadError};
