//! Request, response and error types for the miniomock object-storage emulator.
//!
//! These are the values exchanged between test code and the emulator: option
//! structs going in ([`input`]), results coming out ([`output`]), shared value
//! types ([`types`]) and the structured [`S3Error`].

pub mod error;
pub mod input;
pub mod output;
pub mod types;

pub use error::{S3Error, S3ErrorCode};
