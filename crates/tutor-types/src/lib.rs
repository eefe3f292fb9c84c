pub mod message;
pub mod visualization;
pub mod document;
pub mod event;
pub mod config;
pub mod error;
pub mod session;

#[cfg(test)]
mod tests;

pub use error::{Rejection, TutorError};
pub type Result<T> = std::result::Result<T, TutorError>;
