//! Error types and error handling for the front end.
//!
//! This module defines the errors returned by the scanner and the parser.
//! It includes:
//!
//! - Error structures with source position information
//! - The two error categories (scan errors and syntax errors)
//! - Error formatting and display functionality

pub mod errors;
