//! Emulator operation handlers.
//!
//! This module contains the implementations of all operations, organized
//! into submodules by category. Each submodule exposes `handle_*` methods
//! on [`crate::provider::MockServer`] returning the structured
//! [`miniomock_model::S3Error`] on failure.
//!
//! The `miniomock` client bridges its public methods to these handlers.

pub mod bucket;
pub mod copy;
pub mod list;
pub mod object;
pub mod tagging;
