//! # bandcat Common Library
//!
//! Shared code for the bandcat catalog service:
//! - Genre vocabulary and its two textual encodings
//! - Band/Album domain model
//! - Creation request validation
//! - Band list filtering
//! - Configuration loading
//! - Database schema initialization

pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod genre;
pub mod models;
pub mod validation;

pub use error::{Error, Result};
pub use filter::{list_bands, BandFilter};
pub use genre::Genre;
pub use models::{Album, Band, NewBand};
