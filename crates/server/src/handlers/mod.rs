//! # API Handlers
//!
//! This module organizes the Axum handlers for the web server's API
//! endpoints.

pub mod general;
pub mod study;

pub use general::*;
pub use study::*;
