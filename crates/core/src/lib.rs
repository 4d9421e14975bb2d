//! Platter Core - Shared types library.
//!
//! This crate provides common types used across all Platter components:
//! - `account` - Client-side session and profile-data layer
//! - `cli` - Command-line tools for driving the account layer
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the email/phone identifier classification

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
