//! Core domain model for concordia.
//!
//! This crate defines the persisted document model, the canonical book
//! table with citation parsing, the SQLite corpus store, and the core
//! error type.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod canon;
pub mod error;
pub mod model;
pub mod schema;

pub use error::{Error, Result};
