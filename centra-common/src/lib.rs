//! Common utilities for the centra toolkit

pub mod error;
pub mod logging;

pub use error::{Error, Result};
