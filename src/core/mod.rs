//! Crate-wide support code

pub mod logging;
