pub mod config;
pub mod error;
pub mod imagen;
pub mod server;

pub use error::{Error, Result};
