//! Core library for the VivoPass ticketing client
//!
//! This crate contains everything that does not touch the network:
//! - Records mirrored from the backend
//! - The failure taxonomy and its user-facing messages
//! - Form validation
//! - Derived view-models (joins, search, reports)

pub mod access;
pub mod error;
pub mod model;
pub mod validation;
pub mod views;

pub use error::{Error, ErrorKind};
pub type Result<T> = std::result::Result<T, Error>;
