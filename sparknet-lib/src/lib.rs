//! SparkNet console library
//!
//! Typed access to the SparkNet backend (documents, sessions and files) and
//! the search/filter/sort utility used by every list view.

pub mod backend;
pub mod console;
pub mod error;
pub mod model;
pub mod table;

mod client;

pub use client::*;
