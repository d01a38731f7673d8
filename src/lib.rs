pub mod app;
pub mod constants;
pub mod error;
pub mod libs;

pub use error::{ConsoleError, Result};
