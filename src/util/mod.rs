//! Utility types and functions for Cast.
//!
//! This module contains fundamental types used throughout the library:
//! - [`Error`] / [`Result`] - Error handling
//! - Vector type re-exports from glam

mod error;
mod math;

pub use error::*;
pub use math::*;
