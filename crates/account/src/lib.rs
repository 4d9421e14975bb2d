//! Platter account layer - client-side session and profile data.
//!
//! This crate is the stateful core of the Platter front end: it discovers
//! whether a visitor is authenticated, submits credentials, and maintains
//! the signed-in user's profile and delivery addresses for one logical
//! session. Rendering is someone else's job - the types here expose plain
//! data and navigation signals for a view layer to consume.
//!
//! # Components
//!
//! - [`session`] - session evidence vault and the pure authenticated check
//! - [`auth`] - credential submission, registration, password reset
//! - [`addresses`] - ordered address collection with a single active entry
//! - [`api`] - HTTP client for the Platter backend
//! - [`dashboard`] - composition of the above for the authenticated area
//!
//! # Consistency model
//!
//! Address mutations apply locally first and mirror to the backend
//! best-effort; a failed mirror never rolls the local change back, it flips
//! a per-address sync marker the view can surface.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod addresses;
pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod session;
