//! Communication protocols

pub mod flashif;
