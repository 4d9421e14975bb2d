//! Core types for Platter.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod identifier;

pub use id::*;
pub use identifier::{Identifier, IdentifierKind};
