//! # Basescape Development Tools
//!
//! Command-line tools for development:
//! - Data validators
//! - Base renderer (PNG)
//! - Pointer and placement probes

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod export;
pub mod loader;
pub mod probe;
pub mod render;
pub mod sprites;
pub mod validate;
